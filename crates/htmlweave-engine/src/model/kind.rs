use serde::Serialize;

/// What a span means, independent of the element name it was written with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
pub enum FormatKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Heading(u8),
    Paragraph,
    Quote,
    OrderedList,
    UnorderedList,
    ListItem,
    Link,
    Code,
    Sub,
    Sup,
    Font,
    Big,
    Small,
    Image,
    HorizontalRule,
    UnknownTag(String),
}

/// Elements that have no content and no end tag.
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Unrecognized tags treated as blocks unless configured otherwise.
pub const DEFAULT_BLOCK_TAGS: &[&str] = &[
    "div",
    "figure",
    "figcaption",
    "pre",
    "section",
    "article",
    "aside",
    "header",
    "footer",
    "nav",
    "address",
    "main",
    "details",
    "summary",
    "dl",
    "dt",
    "dd",
    "table",
];

impl FormatKind {
    /// Map a lower-cased element name to its kind.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "b" | "strong" => Self::Bold,
            "i" | "em" => Self::Italic,
            "u" => Self::Underline,
            "s" | "strike" | "del" => Self::Strikethrough,
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "p" => Self::Paragraph,
            "blockquote" => Self::Quote,
            "ol" => Self::OrderedList,
            "ul" => Self::UnorderedList,
            "li" => Self::ListItem,
            "a" => Self::Link,
            "code" | "tt" => Self::Code,
            "sub" => Self::Sub,
            "sup" => Self::Sup,
            "font" => Self::Font,
            "big" => Self::Big,
            "small" => Self::Small,
            "img" => Self::Image,
            "hr" => Self::HorizontalRule,
            other => Self::UnknownTag(other.to_string()),
        }
    }

    /// Element name used when a span of this kind is created without one.
    pub fn default_tag(&self) -> String {
        match self {
            Self::Bold => "b".into(),
            Self::Italic => "i".into(),
            Self::Underline => "u".into(),
            Self::Strikethrough => "s".into(),
            Self::Heading(level) => format!("h{}", (*level).clamp(1, 6)),
            Self::Paragraph => "p".into(),
            Self::Quote => "blockquote".into(),
            Self::OrderedList => "ol".into(),
            Self::UnorderedList => "ul".into(),
            Self::ListItem => "li".into(),
            Self::Link => "a".into(),
            Self::Code => "code".into(),
            Self::Sub => "sub".into(),
            Self::Sup => "sup".into(),
            Self::Font => "font".into(),
            Self::Big => "big".into(),
            Self::Small => "small".into(),
            Self::Image => "img".into(),
            Self::HorizontalRule => "hr".into(),
            Self::UnknownTag(name) => name.clone(),
        }
    }

    /// Block kinds known without configuration. Unknown tags are decided by
    /// the codec options.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Self::Heading(_)
                | Self::Paragraph
                | Self::Quote
                | Self::OrderedList
                | Self::UnorderedList
                | Self::ListItem
                | Self::HorizontalRule
        )
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::OrderedList | Self::UnorderedList)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Image | Self::HorizontalRule)
    }

    /// Inline formatting kinds. Only these merge with equal neighbours.
    pub fn is_coalescable(&self) -> bool {
        matches!(
            self,
            Self::Bold
                | Self::Italic
                | Self::Underline
                | Self::Strikethrough
                | Self::Link
                | Self::Code
                | Self::Sub
                | Self::Sup
                | Self::Font
                | Self::Big
                | Self::Small
        )
    }
}

impl std::fmt::Display for FormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heading(level) => write!(f, "Heading({level})"),
            Self::UnknownTag(name) => write!(f, "UnknownTag({name})"),
            other => write!(f, "{other:?}"),
        }
    }
}
