//! # Snapshot Testing Support
//!
//! - **`normalize`**: converts a document into a stable, serializable `Snap`
//!   with no ids, for tests and the CLI `inspect` command
//! - **`invariants`**: the model checks run before every edit is committed
//!   (spans in bounds, void spans on U+FFFC, list items inside lists,
//!   blocks on whole lines, no dangling separators, coalescable spans
//!   merged, markers ordered)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{MarkerSnap, Snap, SpanSnap, normalize};
