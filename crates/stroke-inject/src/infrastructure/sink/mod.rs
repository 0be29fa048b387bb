//! Event sink implementations and driver start-up checks.
//!
//! The production sink talks to the Interception kernel driver through
//! `interception.dll` and only compiles on Windows.  [`mock::RecordingSink`]
//! is available everywhere for tests and dry runs.
//!
//! Start-up is all-or-nothing: the host must be Windows, the driver files must
//! be installed, the library must load, and one keyboard plus one mouse
//! device must be present.  Any failure is a [`StartupError`] and there is no
//! retry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::application::sequencer::EventSink;
use crate::infrastructure::storage::config::DriverConfig;

pub mod mock;

#[cfg(target_os = "windows")]
pub mod interception;

/// Error type for opening the driver-backed sink.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("the interception driver is only supported on Windows (running on {0})")]
    UnsupportedPlatform(String),

    #[error(
        "required driver not found: {0:?}; install Interception (https://github.com/oblitum/Interception)"
    )]
    MissingDriver(PathBuf),

    #[error("failed to load {library:?}: {reason}")]
    LibraryLoad { library: PathBuf, reason: String },

    #[error("failed to create an interception context")]
    ContextCreation,

    #[error("failed to get keyboard device")]
    NoKeyboardDevice,

    #[error("failed to get mouse device")]
    NoMouseDevice,
}

/// Fails unless running on the operating system the driver targets.
///
/// # Errors
///
/// Returns [`StartupError::UnsupportedPlatform`] on any non-Windows host.
pub fn check_platform() -> Result<(), StartupError> {
    if cfg!(target_os = "windows") {
        Ok(())
    } else {
        Err(StartupError::UnsupportedPlatform(
            std::env::consts::OS.to_string(),
        ))
    }
}

/// Fails on the first driver file that does not exist.
///
/// # Errors
///
/// Returns [`StartupError::MissingDriver`] naming the missing file.
pub fn check_driver_files<P: AsRef<Path>>(paths: &[P]) -> Result<(), StartupError> {
    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StartupError::MissingDriver(path.to_path_buf()));
        }
    }
    Ok(())
}

/// Runs the start-up checks and opens the driver-backed sink.
///
/// # Errors
///
/// Returns the first [`StartupError`] encountered.
pub fn open_event_sink(config: &DriverConfig) -> Result<Arc<dyn EventSink>, StartupError> {
    check_platform()?;
    check_driver_files(&config.required_files)?;

    #[cfg(target_os = "windows")]
    {
        let sink = interception::InterceptionSink::open(&config.library)?;
        tracing::info!(
            keyboard = sink.keyboard_device(),
            mouse = sink.mouse_device(),
            "interception devices acquired"
        );
        Ok(Arc::new(sink))
    }

    #[cfg(not(target_os = "windows"))]
    {
        Err(StartupError::UnsupportedPlatform(
            std::env::consts::OS.to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_platform_matches_target_os() {
        let result = check_platform();
        if cfg!(target_os = "windows") {
            assert!(result.is_ok());
        } else {
            assert!(matches!(result, Err(StartupError::UnsupportedPlatform(_))));
        }
    }

    #[test]
    fn test_check_driver_files_reports_first_missing_file() {
        // Arrange: the crate manifest exists, the second path does not
        let present = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let missing = PathBuf::from("/nonexistent/drivers/keyboard.sys");

        // Act
        let result = check_driver_files(&[present, missing.clone()]);

        // Assert
        match result {
            Err(StartupError::MissingDriver(path)) => assert_eq!(path, missing),
            other => panic!("expected MissingDriver, got {other:?}"),
        }
    }

    #[test]
    fn test_check_driver_files_accepts_empty_list() {
        let none: [PathBuf; 0] = [];
        assert!(check_driver_files(&none).is_ok());
    }

    #[test]
    fn test_missing_driver_message_points_to_installer() {
        let err = StartupError::MissingDriver(PathBuf::from("C:/Windows/System32/drivers/mouse.sys"));
        assert!(err.to_string().contains("install Interception"));
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_open_event_sink_fails_off_windows() {
        let result = open_event_sink(&DriverConfig::default());
        assert!(matches!(result, Err(StartupError::UnsupportedPlatform(_))));
    }
}
