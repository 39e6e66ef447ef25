use serde::{Deserialize, Serialize};

use crate::model::{DEFAULT_BLOCK_TAGS, FormatKind, VOID_TAGS};

/// Knobs for the HTML decoder and encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    /// Unrecognized tags to treat as blocks, on top of the built-in set
    pub extra_block_tags: Vec<String>,
    /// Tags that never have content or an end tag, on top of the HTML set
    pub extra_void_tags: Vec<String>,
    /// Tags whose raw line breaks are kept as line breaks
    pub preformatted_tags: Vec<String>,
    /// Drop whitespace-only text that contains a line break when it sits
    /// between blocks or directly inside a list
    pub ignore_inter_block_whitespace: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            extra_block_tags: Vec::new(),
            extra_void_tags: Vec::new(),
            preformatted_tags: vec!["pre".to_string()],
            ignore_inter_block_whitespace: true,
        }
    }
}

impl CodecOptions {
    pub fn is_block_tag(&self, tag: &str) -> bool {
        FormatKind::from_tag(tag).is_block()
            || DEFAULT_BLOCK_TAGS.contains(&tag)
            || self.extra_block_tags.iter().any(|t| t == tag)
    }

    pub fn is_void_tag(&self, tag: &str) -> bool {
        VOID_TAGS.contains(&tag) || self.extra_void_tags.iter().any(|t| t == tag)
    }

    pub fn is_preformatted(&self, tag: &str) -> bool {
        self.preformatted_tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = CodecOptions::default();
        assert!(options.is_block_tag("li"));
        assert!(options.is_block_tag("figure"));
        assert!(!options.is_block_tag("iframe"));
        assert!(options.is_void_tag("img"));
        assert!(options.is_preformatted("pre"));
        assert!(options.ignore_inter_block_whitespace);
    }

    #[test]
    fn extra_tags_extend_defaults() {
        let options = CodecOptions {
            extra_block_tags: vec!["iframe".into()],
            extra_void_tags: vec!["x-embed".into()],
            ..CodecOptions::default()
        };
        assert!(options.is_block_tag("iframe"));
        assert!(options.is_void_tag("x-embed"));
    }
}
