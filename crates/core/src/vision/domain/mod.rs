pub mod vision_toolkit;
