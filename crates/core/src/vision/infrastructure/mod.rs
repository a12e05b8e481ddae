pub mod haar_cascade;
pub mod image_vision_toolkit;
