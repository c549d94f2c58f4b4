pub mod businesses;
pub mod google_publish;
pub mod google_tokens;
pub mod image_gen;
pub mod posts;
pub mod usage;
