use crate::capture::domain::frame_source::{CaptureError, FrameSource};
use crate::capture::infrastructure::pixels::{receive_rgb_frame, rgb_scaler};
use crate::shared::constants::CAMERA_MAX_PACKETS;
use crate::shared::frame::Frame;

/// Captures frames from a system camera through libavdevice.
///
/// The device is addressed by index like a video-capture handle:
/// `/dev/video{N}` on Linux, avfoundation device `N` on macOS and vfwcap
/// driver `N` on Windows.
pub struct FfmpegCamera {
    index: u32,
    device: Option<OpenDevice>,
}

struct OpenDevice {
    ictx: ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    stream_index: usize,
}

impl FfmpegCamera {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            device: None,
        }
    }

    fn unavailable(&self, reason: impl ToString) -> CaptureError {
        CaptureError::DeviceUnavailable {
            device: self.describe(),
            reason: reason.to_string(),
        }
    }

    fn open_device(&self) -> Result<OpenDevice, CaptureError> {
        ffmpeg_next::init().map_err(|e| self.unavailable(e))?;
        ffmpeg_next::device::register_all();

        let (format_name, path) = device_address(self.index);
        let format = ffmpeg_next::device::input::video()
            .find(|f| f.name().split(',').any(|n| n == format_name))
            .ok_or_else(|| self.unavailable(format!("{format_name} input is not available")))?;

        let mut options = ffmpeg_next::Dictionary::new();
        if format_name == "avfoundation" {
            options.set("framerate", "30");
        }

        let ictx = match ffmpeg_next::format::open_with(&path, &format, options)
            .map_err(|e| self.unavailable(e))?
        {
            ffmpeg_next::format::context::Context::Input(ictx) => ictx,
            ffmpeg_next::format::context::Context::Output(_) => {
                return Err(self.unavailable("device opened as output"));
            }
        };

        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| self.unavailable("no video stream"))?;
        let stream_index = stream.index();
        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
            .map_err(|e| self.unavailable(e))?;
        let decoder = codec_ctx.decoder().video().map_err(|e| self.unavailable(e))?;
        let scaler = rgb_scaler(&decoder).map_err(|e| self.unavailable(e))?;

        log::debug!(
            "Opened {} ({}x{}, {:?})",
            self.describe(),
            decoder.width(),
            decoder.height(),
            decoder.format()
        );

        Ok(OpenDevice {
            ictx,
            decoder,
            scaler,
            stream_index,
        })
    }
}

impl FrameSource for FfmpegCamera {
    fn describe(&self) -> String {
        let (format_name, path) = device_address(self.index);
        format!("camera {} ({format_name}:{path})", self.index)
    }

    fn open(&mut self) -> Result<(), CaptureError> {
        if self.device.is_none() {
            self.device = Some(self.open_device()?);
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.device.is_some()
    }

    fn read(&mut self) -> Result<Frame, CaptureError> {
        let device = self.device.as_mut().ok_or(CaptureError::NotOpen)?;
        let no_frame = |e: ffmpeg_next::Error| CaptureError::NoFrame(e.to_string());

        for (stream, packet) in device.ictx.packets().take(CAMERA_MAX_PACKETS) {
            if stream.index() != device.stream_index {
                continue;
            }
            if device.decoder.send_packet(&packet).is_err() {
                continue;
            }
            if let Some(frame) = receive_rgb_frame(&mut device.decoder, &mut device.scaler)
                .map_err(no_frame)?
            {
                return Ok(frame);
            }
        }

        Err(CaptureError::NoFrame(format!(
            "no decodable frame within {CAMERA_MAX_PACKETS} packets"
        )))
    }

    fn release(&mut self) {
        if self.device.take().is_some() {
            log::debug!("Released {}", self.describe());
        }
    }
}

impl Drop for FfmpegCamera {
    fn drop(&mut self) {
        self.release();
    }
}

/// libavdevice input format and device path for a camera index.
fn device_address(index: u32) -> (&'static str, String) {
    if cfg!(target_os = "macos") {
        ("avfoundation", index.to_string())
    } else if cfg!(target_os = "windows") {
        ("vfwcap", index.to_string())
    } else {
        ("video4linux2", format!("/dev/video{index}"))
    }
}
