use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PostStatus {
    #[default]
    Draft,
    Scheduled,
    Published,
}

impl Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            PostStatus::Draft => "DRAFT",
            PostStatus::Scheduled => "SCHEDULED",
            PostStatus::Published => "PUBLISHED",
        };
        write!(f, "{}", status)
    }
}

impl PostStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "DRAFT" => Some(PostStatus::Draft),
            "SCHEDULED" => Some(PostStatus::Scheduled),
            "PUBLISHED" => Some(PostStatus::Published),
            _ => None,
        }
    }
}
