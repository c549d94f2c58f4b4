pub mod business_profile;
pub mod local_posts;
pub mod oauth;
