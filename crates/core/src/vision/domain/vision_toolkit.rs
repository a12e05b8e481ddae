use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum VisionError {
    #[error("color conversion failed: {0}")]
    Conversion(String),
    #[error("cascade {name} could not be resolved: {reason}")]
    AssetUnavailable { name: String, reason: String },
    #[error("cascade {name} is malformed: {reason}")]
    MalformedCascade { name: String, reason: String },
}

/// Summary of a loaded detector cascade.
#[derive(Clone, Debug, PartialEq)]
pub struct CascadeSummary {
    pub name: String,
    pub stage_count: usize,
    pub window: (u32, u32),
}

impl CascadeSummary {
    /// A cascade with no stages (or no detection window) cannot detect
    /// anything.
    pub fn is_empty(&self) -> bool {
        self.stage_count == 0 || self.window.0 == 0 || self.window.1 == 0
    }
}

/// The local image-processing capabilities the backend's pipeline relies on.
pub trait VisionToolkit {
    /// Converts a 3-channel frame to single-channel luma.
    fn to_grayscale(&self, frame: &Frame) -> Result<Frame, VisionError>;

    /// Resolves and parses a pretrained detector cascade by file name.
    fn load_cascade(&self, name: &str) -> Result<CascadeSummary, VisionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(25, (24, 24), false)]
    #[case(0, (24, 24), true)]
    #[case(3, (0, 20), true)]
    #[case(3, (20, 0), true)]
    fn test_cascade_summary_is_empty(
        #[case] stage_count: usize,
        #[case] window: (u32, u32),
        #[case] expected: bool,
    ) {
        let summary = CascadeSummary {
            name: "haarcascade_eye.xml".to_string(),
            stage_count,
            window,
        };
        assert_eq!(summary.is_empty(), expected);
    }
}
