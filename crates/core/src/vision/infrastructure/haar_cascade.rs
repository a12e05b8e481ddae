use std::fs;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CascadeParseError {
    #[error("failed to read cascade: {0}")]
    Io(String),
    #[error("not an OpenCV storage document")]
    NotOpencvStorage,
    #[error("no cascade classifier found")]
    NoCascade,
    #[error("missing or invalid <{0}>")]
    Field(&'static str),
}

/// Header of an OpenCV Haar/LBP cascade classifier file.
///
/// Only the structure is validated; stage weights are not interpreted. Both
/// the current `opencv-cascade-classifier` layout and the legacy
/// `opencv-haar-classifier` layout are accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct HaarCascade {
    pub window: (u32, u32),
    pub stage_count: usize,
}

impl HaarCascade {
    pub fn load(path: &Path) -> Result<Self, CascadeParseError> {
        let xml = fs::read_to_string(path).map_err(|e| CascadeParseError::Io(e.to_string()))?;
        Self::parse(&xml)
    }

    pub fn parse(xml: &str) -> Result<Self, CascadeParseError> {
        let storage_start = xml
            .find("<opencv_storage>")
            .ok_or(CascadeParseError::NotOpencvStorage)?;
        let storage = &xml[storage_start..];

        if let Some(start) = storage.find("<cascade") {
            parse_current(&storage[start..])
        } else if storage.contains("opencv-haar-classifier") {
            parse_legacy(storage)
        } else {
            Err(CascadeParseError::NoCascade)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stage_count == 0
    }
}

fn parse_current(cascade: &str) -> Result<HaarCascade, CascadeParseError> {
    let width = parse_field(cascade, "width")?;
    let height = parse_field(cascade, "height")?;
    let stage_count: usize = parse_field(cascade, "stageNum")?;
    if stage_count > 0 && !cascade.contains("<stages>") {
        return Err(CascadeParseError::Field("stages"));
    }

    Ok(HaarCascade {
        window: (width, height),
        stage_count,
    })
}

fn parse_legacy(storage: &str) -> Result<HaarCascade, CascadeParseError> {
    let size = tag_text(storage, "size").ok_or(CascadeParseError::Field("size"))?;
    let mut dims = size.split_whitespace().map(str::parse::<u32>);
    let (Some(Ok(width)), Some(Ok(height))) = (dims.next(), dims.next()) else {
        return Err(CascadeParseError::Field("size"));
    };

    Ok(HaarCascade {
        window: (width, height),
        stage_count: storage.matches("<stage_threshold>").count(),
    })
}

fn parse_field<T: std::str::FromStr>(
    section: &str,
    tag: &'static str,
) -> Result<T, CascadeParseError> {
    tag_text(section, tag)
        .and_then(|text| text.parse().ok())
        .ok_or(CascadeParseError::Field(tag))
}

/// Trimmed text of the first `<tag>...</tag>` element in `section`.
fn tag_text<'a>(section: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = section.find(&open)? + open.len();
    let end = start + section[start..].find(&close)?;
    Some(section[start..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT: &str = r#"<?xml version="1.0"?>
<opencv_storage>
<cascade type_id="opencv-cascade-classifier"><stageType>BOOST</stageType>
  <featureType>HAAR</featureType>
  <height>24</height>
  <width>24</width>
  <stageParams>
    <maxWeakCount>211</maxWeakCount></stageParams>
  <stageNum>25</stageNum>
  <stages>
    <_>
      <maxWeakCount>9</maxWeakCount>
      <stageThreshold>-5.0425500869750977e+00</stageThreshold></_></stages>
</cascade>
</opencv_storage>
"#;

    const LEGACY: &str = r#"<?xml version="1.0"?>
<opencv_storage>
<haarcascade_frontalface_alt type_id="opencv-haar-classifier">
  <size>20 20</size>
  <stages>
    <_>
      <trees></trees>
      <stage_threshold>0.8226</stage_threshold>
      <parent>-1</parent></_>
    <_>
      <trees></trees>
      <stage_threshold>6.9566</stage_threshold>
      <parent>0</parent></_></stages></haarcascade_frontalface_alt>
</opencv_storage>
"#;

    #[test]
    fn test_parse_current_layout() {
        let cascade = HaarCascade::parse(CURRENT).unwrap();
        assert_eq!(cascade.window, (24, 24));
        assert_eq!(cascade.stage_count, 25);
        assert!(!cascade.is_empty());
    }

    #[test]
    fn test_parse_legacy_layout_counts_stages() {
        let cascade = HaarCascade::parse(LEGACY).unwrap();
        assert_eq!(cascade.window, (20, 20));
        assert_eq!(cascade.stage_count, 2);
    }

    #[test]
    fn test_zero_stage_cascade_is_empty() {
        let xml = CURRENT.replace("<stageNum>25</stageNum>", "<stageNum>0</stageNum>");
        assert!(HaarCascade::parse(&xml).unwrap().is_empty());
    }

    #[test]
    fn test_html_error_page_is_rejected() {
        let result = HaarCascade::parse("<html><body>404: Not Found</body></html>");
        assert_eq!(result, Err(CascadeParseError::NotOpencvStorage));
    }

    #[test]
    fn test_storage_without_cascade_is_rejected() {
        let xml = "<?xml version=\"1.0\"?>\n<opencv_storage>\n<rows>3</rows>\n</opencv_storage>";
        assert_eq!(HaarCascade::parse(xml), Err(CascadeParseError::NoCascade));
    }

    #[test]
    fn test_missing_window_is_reported() {
        let xml = CURRENT.replace("<width>24</width>", "");
        assert_eq!(
            HaarCascade::parse(&xml),
            Err(CascadeParseError::Field("width"))
        );
    }

    #[test]
    fn test_stage_count_without_stages_is_rejected() {
        let start = CURRENT.find("<stages>").unwrap();
        let end = CURRENT.find("</stages>").unwrap() + "</stages>".len();
        let xml = format!("{}{}", &CURRENT[..start], &CURRENT[end..]);
        assert_eq!(
            HaarCascade::parse(&xml),
            Err(CascadeParseError::Field("stages"))
        );
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("haarcascade_eye.xml");
        fs::write(&path, CURRENT).unwrap();
        assert_eq!(HaarCascade::load(&path).unwrap().stage_count, 25);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = HaarCascade::load(Path::new("/nonexistent/haarcascade_eye.xml"));
        assert!(matches!(result, Err(CascadeParseError::Io(_))));
    }
}
