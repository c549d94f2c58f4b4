use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PostType {
    #[default]
    Update,
    Event,
    Offer,
}

impl Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let post_type = match self {
            PostType::Update => "UPDATE",
            PostType::Event => "EVENT",
            PostType::Offer => "OFFER",
        };
        write!(f, "{}", post_type)
    }
}

impl PostType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "UPDATE" => Some(PostType::Update),
            "EVENT" => Some(PostType::Event),
            "OFFER" => Some(PostType::Offer),
            _ => None,
        }
    }
}
