pub mod domain;
pub mod google;
pub mod imagegen;
pub mod infra;
pub mod observability;
