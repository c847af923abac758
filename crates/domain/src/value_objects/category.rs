//! Email intent category
//!
//! The two-valued classification of a draft prompt. There is no third
//! "unknown" value: anything that is not recognized as sales is a follow-up.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The intent category of an email draft
///
/// # Examples
///
/// ```
/// use domain::Category;
///
/// assert_eq!(Category::parse_lenient("sales"), Category::Sales);
/// assert_eq!(Category::parse_lenient("Sales!"), Category::FollowUp);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// A sales pitch
    Sales,
    /// A follow-up on prior contact
    FollowUp,
}

impl Category {
    /// Map free text onto a category, tolerating anything.
    ///
    /// The input is trimmed and lowercased; only an exact `"sales"` match
    /// yields [`Category::Sales`]. Every other value, including partial
    /// matches and empty strings, yields [`Category::FollowUp`].
    pub fn parse_lenient(s: &str) -> Self {
        if s.trim().to_lowercase() == "sales" {
            Self::Sales
        } else {
            Self::FollowUp
        }
    }

    /// Get the category as its wire label
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::FollowUp => "follow-up",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
