pub mod attendance_processing_use_case;
pub mod check_outcome;
pub mod endpoint_reachability_use_case;
pub mod face_registration_use_case;
mod frame_submission;
pub mod reporter;
pub mod system_test_use_case;
pub mod vision_self_test_use_case;
