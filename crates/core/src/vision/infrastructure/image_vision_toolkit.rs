use std::path::PathBuf;

use crate::shared::asset_resolver;
use crate::shared::constants::{
    EYE_CASCADE_NAME, EYE_CASCADE_URL, FACE_CASCADE_NAME, FACE_CASCADE_URL,
};
use crate::shared::frame::Frame;
use crate::vision::domain::vision_toolkit::{CascadeSummary, VisionError, VisionToolkit};
use crate::vision::infrastructure::haar_cascade::HaarCascade;

/// [`VisionToolkit`] backed by the `image` crate and cached OpenCV cascades.
pub struct ImageVisionToolkit {
    bundled_dir: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
}

impl ImageVisionToolkit {
    pub fn new(bundled_dir: Option<PathBuf>) -> Self {
        Self {
            bundled_dir,
            cache_dir: None,
        }
    }

    /// Overrides the platform cache directory.
    pub fn with_cache_dir(mut self, cache_dir: PathBuf) -> Self {
        self.cache_dir = Some(cache_dir);
        self
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, VisionError> {
        let url = cascade_url(name).ok_or_else(|| VisionError::AssetUnavailable {
            name: name.to_string(),
            reason: "unknown cascade".to_string(),
        })?;
        let bundled = self.bundled_dir.as_deref();
        let resolved = match &self.cache_dir {
            Some(cache) => asset_resolver::resolve_in(cache, name, url, bundled),
            None => asset_resolver::resolve(name, url, bundled),
        };
        resolved.map_err(|e| VisionError::AssetUnavailable {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }
}

impl VisionToolkit for ImageVisionToolkit {
    fn to_grayscale(&self, frame: &Frame) -> Result<Frame, VisionError> {
        if frame.channels() != 3 {
            return Err(VisionError::Conversion(format!(
                "expected 3 channels, got {}",
                frame.channels()
            )));
        }
        let rgb = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or_else(|| VisionError::Conversion("frame data does not match size".into()))?;
        let gray = image::imageops::grayscale(&rgb);
        Ok(Frame::new(gray.into_raw(), frame.width(), frame.height(), 1))
    }

    fn load_cascade(&self, name: &str) -> Result<CascadeSummary, VisionError> {
        let path = self.resolve(name)?;
        let cascade = HaarCascade::load(&path).map_err(|e| VisionError::MalformedCascade {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        log::debug!(
            "Loaded {name} from {}: {} stages, {}x{} window",
            path.display(),
            cascade.stage_count,
            cascade.window.0,
            cascade.window.1
        );
        Ok(CascadeSummary {
            name: name.to_string(),
            stage_count: cascade.stage_count,
            window: cascade.window,
        })
    }
}

fn cascade_url(name: &str) -> Option<&'static str> {
    match name {
        FACE_CASCADE_NAME => Some(FACE_CASCADE_URL),
        EYE_CASCADE_NAME => Some(EYE_CASCADE_URL),
        _ => None,
    }
}
