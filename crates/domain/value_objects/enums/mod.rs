pub mod plans;
pub mod post_statuses;
pub mod post_types;
