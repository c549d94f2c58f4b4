pub mod businesses;
pub mod generate_image;
pub mod google_publish;
pub mod posts;
pub mod usage;
