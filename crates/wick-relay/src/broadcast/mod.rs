//! Periodic broadcast tasks.

pub mod image;
pub mod scheduler;

pub use image::daily_image_file_name;
pub use scheduler::run_image_broadcast;
