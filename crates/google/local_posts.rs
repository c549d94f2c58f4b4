use serde::Serialize;

use crate::domain::{entities::posts::PostEntity, value_objects::enums::post_types::PostType};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopicType {
    Standard,
    Event,
    Offer,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub media_format: String,
    pub source_url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventSchedule {
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventInfo {
    pub title: String,
    pub schedule: EventSchedule,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OfferInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redeem_online_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_conditions: Option<String>,
}

/// Wire shape of a Business Profile local post.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocalPost {
    pub language_code: String,
    pub summary: String,
    pub topic_type: TopicType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<MediaItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer: Option<OfferInfo>,
}

fn iso_date(timestamp: chrono::DateTime<chrono::Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

fn iso_time(timestamp: chrono::DateTime<chrono::Utc>) -> String {
    timestamp.format("%H:%M:%S").to_string()
}

/// Maps a stored post onto the provider payload. Subtype fields are only
/// honored when they match the post type: an event without both dates keeps
/// the EVENT topic but omits the schedule, and offers carry terms only.
pub fn convert_to_local_post(post: &PostEntity) -> LocalPost {
    let mut local_post = LocalPost {
        language_code: "en".to_string(),
        summary: post.content.clone(),
        topic_type: TopicType::Standard,
        media: None,
        event: None,
        offer: None,
    };

    if let Some(image_url) = &post.image_url {
        local_post.media = Some(vec![MediaItem {
            media_format: "PHOTO".to_string(),
            source_url: image_url.clone(),
        }]);
    }

    match PostType::parse(&post.type_) {
        Some(PostType::Event) => {
            local_post.topic_type = TopicType::Event;
            if let (Some(start), Some(end)) = (post.event_start_date, post.event_end_date) {
                local_post.event = Some(EventInfo {
                    title: post.title.clone(),
                    schedule: EventSchedule {
                        start_date: iso_date(start),
                        start_time: iso_time(start),
                        end_date: iso_date(end),
                        end_time: iso_time(end),
                    },
                });
            }
        }
        Some(PostType::Offer) => {
            local_post.topic_type = TopicType::Offer;
            if let Some(terms) = &post.offer_terms {
                local_post.offer = Some(OfferInfo {
                    coupon_code: None,
                    redeem_online_url: None,
                    terms_conditions: Some(terms.clone()),
                });
            }
        }
        _ => {}
    }

    local_post
}
