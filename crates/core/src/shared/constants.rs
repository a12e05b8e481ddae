use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CAMERA_INDEX: u32 = 0;
pub const DEFAULT_TEST_USER_ID: &str = "test_user_001";
pub const DEFAULT_TEST_SESSION_ID: &str = "test_session_001";

pub const FACE_REGISTER_PATH: &str = "/face/register";
pub const ATTENDANCE_PROCESS_PATH: &str = "/attendance/process";

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
pub const REGISTER_TIMEOUT: Duration = Duration::from_secs(10);
pub const PROCESS_TIMEOUT: Duration = Duration::from_secs(15);

/// Matches the default quality OpenCV uses for `.jpg` encoding.
pub const JPEG_QUALITY: u8 = 95;

/// Size of the blank image used by the toolkit self-test.
pub const SELF_TEST_IMAGE_SIZE: u32 = 100;

pub const FACE_CASCADE_NAME: &str = "haarcascade_frontalface_default.xml";
pub const FACE_CASCADE_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/4.x/data/haarcascades/haarcascade_frontalface_default.xml";

pub const EYE_CASCADE_NAME: &str = "haarcascade_eye.xml";
pub const EYE_CASCADE_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/4.x/data/haarcascades/haarcascade_eye.xml";

/// Packets read from a capture device before giving up on a decodable frame.
/// Some webcams emit several empty or partial packets while warming up.
pub const CAMERA_MAX_PACKETS: usize = 120;

pub const RULE_WIDTH: usize = 50;
