use base64::{engine::general_purpose, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use thiserror::Error;

use crate::shared::constants::JPEG_QUALITY;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("cannot encode an empty frame")]
    EmptyFrame,
    #[error("unsupported channel count {0}")]
    UnsupportedChannels(u8),
    #[error("jpeg encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),
}

/// Compresses a frame to JPEG.
pub fn encode_jpeg(frame: &Frame) -> Result<Vec<u8>, EncodeError> {
    if frame.is_empty() {
        return Err(EncodeError::EmptyFrame);
    }
    let color = match frame.channels() {
        3 => ExtendedColorType::Rgb8,
        1 => ExtendedColorType::L8,
        other => return Err(EncodeError::UnsupportedChannels(other)),
    };

    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY).encode(
        frame.data(),
        frame.width(),
        frame.height(),
        color,
    )?;
    Ok(buffer)
}

/// JPEG-compresses a frame and returns it as standard base64 text, the form
/// the backend expects in `frame_data`.
pub fn encode_frame_base64(frame: &Frame) -> Result<String, EncodeError> {
    let jpeg = encode_jpeg(frame)?;
    log::debug!(
        "Encoded {}x{} frame to {} JPEG bytes",
        frame.width(),
        frame.height(),
        jpeg.len()
    );
    Ok(general_purpose::STANDARD.encode(jpeg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_frame(width: u32, height: u32) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 4) as u8, (y * 4) as u8, 128]);
            }
        }
        Frame::new(data, width, height, 3)
    }

    #[test]
    fn test_encode_jpeg_produces_decodable_image() {
        let jpeg = encode_jpeg(&gradient_frame(64, 48)).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 48);
    }

    #[test]
    fn test_base64_output_decodes_to_jpeg() {
        let text = encode_frame_base64(&gradient_frame(16, 16)).unwrap();
        assert!(text
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'='));
        let bytes = general_purpose::STANDARD.decode(text).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_grayscale_frame_is_supported() {
        let frame = Frame::blank(10, 10, 1);
        assert!(encode_jpeg(&frame).is_ok());
    }

    #[test]
    fn test_empty_frame_is_rejected() {
        let frame = Frame::blank(0, 0, 3);
        assert!(matches!(encode_jpeg(&frame), Err(EncodeError::EmptyFrame)));
    }

    #[test]
    fn test_rgba_frame_is_rejected() {
        let frame = Frame::blank(2, 2, 4);
        assert!(matches!(
            encode_jpeg(&frame),
            Err(EncodeError::UnsupportedChannels(4))
        ));
    }
}
