use std::path::Path;

use crate::error::MobilizeError;
use crate::pipeline::TargetFormat;

/// The destination root must already exist as a directory.
pub fn check_destination(output: &Path) -> Result<(), MobilizeError> {
    if !output.exists() {
        return Err(MobilizeError::MissingDestination(output.to_path_buf()));
    }
    if !output.is_dir() {
        return Err(MobilizeError::NotADirectory(output.to_path_buf()));
    }
    Ok(())
}

/// Every tool the chosen encoder shells out to must be on `PATH`.
pub fn check_tools(format: TargetFormat) -> Result<(), MobilizeError> {
    for &tool in format.required_tools() {
        if which::which(tool).is_err() {
            return Err(MobilizeError::MissingTool(tool));
        }
    }
    Ok(())
}
