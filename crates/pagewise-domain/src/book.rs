//! Catalog domain types.

use serde::{Deserialize, Serialize};

/// Editorial state of a catalog book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BookStatus {
    #[default]
    Draft,
    Review,
    Published,
}

impl BookStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Review => "Review",
            Self::Published => "Published",
        }
    }

    /// Parse a stored status. Unknown values read back as `Draft`.
    pub fn from_stored(s: &str) -> Self {
        match s {
            "Review" => Self::Review,
            "Published" => Self::Published,
            _ => Self::Draft,
        }
    }
}
