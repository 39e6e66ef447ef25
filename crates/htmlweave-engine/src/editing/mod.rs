/*!
 * # Editing Core
 *
 * The mutable side of the engine: a [`Document`] owns the text buffer, the
 * format spans and the comment markers, and keeps them consistent through
 * every edit.
 *
 * ## Edit Pipeline
 *
 * 1. **Command**: callers describe an edit as a [`Cmd`]
 * 2. **Buffer**: the text changes and yields a [`Shift`](crate::buffer::Shift)
 * 3. **Transform**: spans grow, shift, split or join; markers follow
 * 4. **Normalize**: coalescable spans merge again
 * 5. **Check**: model invariants are verified on the working copy
 * 6. **Commit**: the copy replaces the document and a [`Patch`] is returned
 *
 * Nothing is committed when any step fails.
 *
 * ## Lists
 *
 * A `\n` typed inside a list item splits it into two items. Deleting the
 * separator between two items joins them. Items whose text is deleted stay
 * behind as empty `<li></li>` elements.
 *
 * ## Module Structure
 *
 * - **`document`**: `Document`, its queries and the commit step
 * - **`commands`**: the `Cmd` enum
 * - **`transform`**: span and marker maintenance for insert and delete
 * - **`placeholder`**: pending media spans handed to an external uploader
 * - **`patch`**: what changed in one edit
 */

pub mod commands;
pub mod document;
pub mod patch;
pub mod placeholder;
mod transform;

pub use commands::Cmd;
pub use document::Document;
pub use patch::{MarkerDelta, Patch, SpanDelta};
pub use placeholder::PlaceholderId;
