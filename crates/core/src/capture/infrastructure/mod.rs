pub mod ffmpeg_camera;
pub mod frame_encoder;
pub mod image_file_source;
mod pixels;
