use std::fmt;

/// Rendered form of [`Detection::NotFound`].
pub const NOT_FOUND_SENTINEL: &str = "[No Watermark Found]";

/// Outcome of scanning audio for an embedded message.
///
/// `NotFound` is an ordinary result: the scan covered the working channel
/// (or the configured scan limit) without meeting the end marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    Found(String),
    NotFound,
}

impl Detection {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The recovered message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Found(message) => Some(message),
            Self::NotFound => None,
        }
    }

    pub fn into_message(self) -> Option<String> {
        match self {
            Self::Found(message) => Some(message),
            Self::NotFound => None,
        }
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(message) => f.write_str(message),
            Self::NotFound => f.write_str(NOT_FOUND_SENTINEL),
        }
    }
}
