use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetResolveError {
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write asset to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Resolve a detector asset by name, checking local copies before downloading.
///
/// Resolution order:
/// 1. User cache directory (platform-specific)
/// 2. Bundled directory (e.g. a distro's `haarcascades` folder)
/// 3. Download from URL to cache
pub fn resolve(
    name: &str,
    url: &str,
    bundled_dir: Option<&Path>,
) -> Result<PathBuf, AssetResolveError> {
    resolve_in(&asset_cache_dir()?, name, url, bundled_dir)
}

/// Same as [`resolve`] but against an explicit cache directory.
pub fn resolve_in(
    cache_dir: &Path,
    name: &str,
    url: &str,
    bundled_dir: Option<&Path>,
) -> Result<PathBuf, AssetResolveError> {
    let cached_path = cache_dir.join(name);
    if cached_path.exists() {
        log::debug!("Using cached asset {}", cached_path.display());
        return Ok(cached_path);
    }

    if let Some(dir) = bundled_dir {
        let bundled_path = dir.join(name);
        if bundled_path.exists() {
            log::debug!("Using bundled asset {}", bundled_path.display());
            return Ok(bundled_path);
        }
    }

    fs::create_dir_all(cache_dir).map_err(AssetResolveError::CacheDir)?;
    log::info!("Downloading {name} from {url}");
    download(url, &cached_path)?;
    Ok(cached_path)
}

/// Platform-specific asset cache directory.
///
/// - macOS: `~/Library/Application Support/SecureAttend/cascades/`
/// - Linux: `$XDG_CACHE_HOME/SecureAttend/cascades/` or `~/.cache/SecureAttend/cascades/`
/// - Windows: `%LOCALAPPDATA%/SecureAttend/cascades/`
pub fn asset_cache_dir() -> Result<PathBuf, AssetResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("SecureAttend").join("cascades"))
            .ok_or(AssetResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("SecureAttend").join("cascades"))
            .ok_or(AssetResolveError::NoCacheDir)
    }
}

fn download(url: &str, dest: &Path) -> Result<(), AssetResolveError> {
    let temp_path = dest.with_extension("part");

    let result = download_inner(url, dest, &temp_path);

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn download_inner(url: &str, dest: &Path, temp_path: &Path) -> Result<(), AssetResolveError> {
    let mut response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| AssetResolveError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let mut file = fs::File::create(temp_path).map_err(write_error(temp_path))?;

    // Cascade files are around 1MB, so a single buffered copy is enough.
    let mut body = Vec::new();
    response
        .read_to_end(&mut body)
        .map_err(write_error(temp_path))?;
    file.write_all(&body).map_err(write_error(temp_path))?;
    file.flush().map_err(write_error(temp_path))?;
    drop(file);

    fs::rename(temp_path, dest).map_err(write_error(dest))?;
    log::debug!("Saved {} bytes to {}", body.len(), dest.display());

    Ok(())
}

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> AssetResolveError {
    let path = path.to_path_buf();
    move |source| AssetResolveError::Write { path, source }
}
