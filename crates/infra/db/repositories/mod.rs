pub mod businesses;
pub mod oauth_credentials;
pub mod posts;
pub mod usage_records;
pub mod users;
