use std::path::{Path, PathBuf};

use crate::capture::domain::frame_source::{CaptureError, FrameSource};
use crate::capture::infrastructure::pixels::{receive_rgb_frame, rgb_scaler};
use crate::shared::frame::Frame;

/// Serves a still image as if it were a camera.
///
/// Lets the registration and attendance checks run on machines without a
/// webcam. Every `read` between `open` and `release` returns the same frame.
/// Decoding goes through ffmpeg, matching the camera path.
pub struct ImageFileSource {
    path: PathBuf,
    frame: Option<Frame>,
}

impl ImageFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            frame: None,
        }
    }
}

impl FrameSource for ImageFileSource {
    fn describe(&self) -> String {
        format!("image file {}", self.path.display())
    }

    fn open(&mut self) -> Result<(), CaptureError> {
        let frame = decode_image(&self.path).map_err(|e| CaptureError::DeviceUnavailable {
            device: self.describe(),
            reason: e.to_string(),
        })?;
        self.frame = Some(frame);
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.frame.is_some()
    }

    fn read(&mut self) -> Result<Frame, CaptureError> {
        self.frame.clone().ok_or(CaptureError::NotOpen)
    }

    fn release(&mut self) {
        self.frame = None;
    }
}

fn decode_image(path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
    ffmpeg_next::init()?;

    let mut ictx = ffmpeg_next::format::input(path)?;
    let stream = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Video)
        .ok_or("No image data found")?;
    let stream_index = stream.index();

    let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
    let mut decoder = codec_ctx.decoder().video()?;
    let mut scaler = rgb_scaler(&decoder)?;

    for (stream, packet) in ictx.packets() {
        if stream.index() != stream_index {
            continue;
        }
        decoder.send_packet(&packet)?;
        if let Some(frame) = receive_rgb_frame(&mut decoder, &mut scaler)? {
            return Ok(frame);
        }
    }

    // Flush decoder for formats that buffer the single frame
    let _ = decoder.send_eof();
    receive_rgb_frame(&mut decoder, &mut scaler)?.ok_or_else(|| "Failed to decode image".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_image(dir: &Path, width: u32, height: u32) -> PathBuf {
        let path = dir.join("face.png");
        let mut img = image::RgbImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([50, 100, 200]);
        }
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_open_then_read_returns_rgb_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), 64, 48);
        let mut source = ImageFileSource::new(&path);
        source.open().unwrap();
        assert!(source.is_open());

        let frame = source.read().unwrap();
        assert_eq!(frame.width(), 64);
        assert_eq!(frame.height(), 48);
        assert_eq!(frame.channels(), 3);
        assert_eq!(&frame.data()[..3], &[50, 100, 200]);
    }

    #[test]
    fn test_read_can_repeat_until_release() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), 8, 8);
        let mut source = ImageFileSource::new(&path);
        source.open().unwrap();
        assert_eq!(source.read().unwrap(), source.read().unwrap());

        source.release();
        assert!(!source.is_open());
        assert_eq!(source.read(), Err(CaptureError::NotOpen));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let mut source = ImageFileSource::new("/nonexistent/face.png");
        let err = source.open().unwrap_err();
        assert!(matches!(err, CaptureError::DeviceUnavailable { .. }));
        assert!(!source.is_open());
    }
}
