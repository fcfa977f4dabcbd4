//! Expense categories
//!
//! The application offers a fixed set of categories, but stored data may also
//! carry free-text labels, which are kept verbatim as `Custom`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::color::{Rgb, PALETTE};

/// Category of an expense
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Food,
    Transport,
    Housing,
    Leisure,
    Other,
    /// Free-text label outside the fixed set
    Custom(String),
}

impl Category {
    /// The fixed categories in the order the entry form lists them
    pub fn fixed() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transport,
            Self::Housing,
            Self::Leisure,
            Self::Other,
        ]
    }

    /// Display label
    pub fn label(&self) -> &str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Housing => "Housing",
            Self::Leisure => "Leisure",
            Self::Other => "Other",
            Self::Custom(label) => label,
        }
    }

    /// Parse a label; the fixed set matches case-insensitively,
    /// anything else is kept as a custom category.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "food" => Self::Food,
            "transport" => Self::Transport,
            "housing" => Self::Housing,
            "leisure" => Self::Leisure,
            "other" => Self::Other,
            _ => Self::Custom(trimmed.to_string()),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Fixed color for this category, independent of which other categories
    /// are present. Custom categories have none.
    pub fn stable_color(&self) -> Option<Rgb> {
        match self {
            Self::Food => Some(PALETTE[0]),
            Self::Transport => Some(PALETTE[1]),
            Self::Housing => Some(PALETTE[2]),
            Self::Leisure => Some(PALETTE[3]),
            Self::Other => Some(PALETTE[4]),
            Self::Custom(_) => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}
