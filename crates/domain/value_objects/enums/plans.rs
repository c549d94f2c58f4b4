use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Scheduled posts a free-tier user may create per calendar month.
pub const FREE_MONTHLY_POST_QUOTA: i32 = 5;

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Plan {
    #[default]
    Free,
    Unlimited,
}

impl Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plan = match self {
            Plan::Free => "FREE",
            Plan::Unlimited => "UNLIMITED",
        };
        write!(f, "{}", plan)
    }
}

impl Plan {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "FREE" => Some(Plan::Free),
            "UNLIMITED" => Some(Plan::Unlimited),
            _ => None,
        }
    }

    /// Stored plan values fall back to the free tier when unrecognized.
    pub fn from_stored(value: &str) -> Self {
        Self::parse(value).unwrap_or(Plan::Free)
    }
}
