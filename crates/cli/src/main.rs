use std::path::PathBuf;
use std::process;

use clap::Parser;

use secureattend_core::api::infrastructure::http_attendance_client::HttpAttendanceClient;
use secureattend_core::capture::domain::frame_source::FrameSource;
use secureattend_core::capture::infrastructure::ffmpeg_camera::FfmpegCamera;
use secureattend_core::capture::infrastructure::image_file_source::ImageFileSource;
use secureattend_core::diagnostics::reporter::ConsoleReporter;
use secureattend_core::diagnostics::system_test_use_case::SystemTestUseCase;
use secureattend_core::shared::config::DiagnosticConfig;
use secureattend_core::shared::constants::{
    DEFAULT_BASE_URL, DEFAULT_CAMERA_INDEX, DEFAULT_TEST_SESSION_ID, DEFAULT_TEST_USER_ID,
};
use secureattend_core::vision::infrastructure::image_vision_toolkit::ImageVisionToolkit;

/// End-to-end check of a SecureAttend camera and backend.
#[derive(Parser)]
#[command(name = "secureattend-check")]
struct Cli {
    /// Backend base URL.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Capture device index.
    #[arg(long, default_value_t = DEFAULT_CAMERA_INDEX)]
    camera_index: u32,

    /// User id sent with the registration request.
    #[arg(long, default_value = DEFAULT_TEST_USER_ID)]
    user_id: String,

    /// Session id sent with the attendance request.
    #[arg(long, default_value = DEFAULT_TEST_SESSION_ID)]
    session_id: String,

    /// Use a still image instead of the camera.
    #[arg(long)]
    frame: Option<PathBuf>,

    /// Directory holding the cascade XML files, checked before downloading.
    #[arg(long)]
    cascade_dir: Option<PathBuf>,

    /// Also probe the admin dashboard endpoints.
    #[arg(long)]
    include_admin: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = build_config(&cli);
    let source: Box<dyn FrameSource> = match &cli.frame {
        Some(path) => Box::new(ImageFileSource::new(path)),
        None => Box::new(FfmpegCamera::new(config.camera_index)),
    };
    log::info!("frame source: {}", source.describe());

    let api = HttpAttendanceClient::new(&config.base_url)?;
    let toolkit = ImageVisionToolkit::new(config.cascade_dir.clone());

    let report = SystemTestUseCase::new(source, Box::new(api), Box::new(toolkit), &config)
        .execute(&mut ConsoleReporter);
    log::debug!("verdict: {:?}", report.verdict);

    Ok(())
}

fn build_config(cli: &Cli) -> DiagnosticConfig {
    let config = DiagnosticConfig {
        base_url: cli.base_url.clone(),
        camera_index: cli.camera_index,
        user_id: cli.user_id.clone(),
        session_id: cli.session_id.clone(),
        cascade_dir: cli.cascade_dir.clone(),
        ..DiagnosticConfig::default()
    };
    if cli.include_admin {
        config.with_admin_endpoints()
    } else {
        config
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.base_url.starts_with("http://") && !cli.base_url.starts_with("https://") {
        return Err(format!(
            "Base URL must start with http:// or https://, got {}",
            cli.base_url
        )
        .into());
    }
    if cli.user_id.trim().is_empty() {
        return Err("User id must not be empty".into());
    }
    if cli.session_id.trim().is_empty() {
        return Err("Session id must not be empty".into());
    }
    if let Some(frame) = &cli.frame {
        if !frame.is_file() {
            return Err(format!("Frame image not found: {}", frame.display()).into());
        }
    }
    if let Some(dir) = &cli.cascade_dir {
        if !dir.is_dir() {
            return Err(format!("Cascade directory not found: {}", dir.display()).into());
        }
    }
    Ok(())
}
