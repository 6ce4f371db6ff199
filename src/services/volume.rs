//! System output volume readings

use std::sync::{Arc, Mutex};

use tokio::process::Command;
use tracing::debug;

use crate::{controller::VolumeReader, error::VolumeReadError};

/// Last known output volume, shared between the monitor task or API and the
/// controller. `None` means no usable reading.
#[derive(Debug, Clone, Default)]
pub struct VolumeCell {
    level: Arc<Mutex<Option<f32>>>,
}

impl VolumeCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, level: Option<f32>) {
        if let Ok(mut current) = self.level.lock() {
            *current = level;
        }
    }

    pub fn get(&self) -> Option<f32> {
        self.level.lock().ok().and_then(|level| *level)
    }
}

impl VolumeReader for VolumeCell {
    fn read_current_volume(&self) -> Result<f32, VolumeReadError> {
        self.get().ok_or(VolumeReadError::Unavailable)
    }
}

/// Read the default sink volume with `wpctl`
pub async fn read_system_volume() -> Result<f32, VolumeReadError> {
    let output = Command::new("wpctl")
        .args(["get-volume", "@DEFAULT_AUDIO_SINK@"])
        .output()
        .await
        .map_err(|e| VolumeReadError::Command(format!("failed to execute wpctl: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VolumeReadError::Command(format!(
            "wpctl get-volume failed: {}",
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let level = parse_wpctl_volume(&stdout)?;
    debug!("System volume is {:.2}", level);
    Ok(level)
}

/// Parse `Volume: 0.40` or `Volume: 1.00 [MUTED]`.
///
/// A muted sink reads as 0.0. Boosted levels above 1.0 are clamped to 1.0.
pub fn parse_wpctl_volume(output: &str) -> Result<f32, VolumeReadError> {
    let line = output.trim();
    let value = line
        .strip_prefix("Volume:")
        .and_then(|rest| rest.split_whitespace().next())
        .ok_or_else(|| VolumeReadError::Parse(line.to_string()))?;

    let level: f32 = value
        .parse()
        .map_err(|_| VolumeReadError::Parse(line.to_string()))?;

    if !level.is_finite() || level < 0.0 {
        return Err(VolumeReadError::Parse(line.to_string()));
    }

    if line.contains("[MUTED]") {
        return Ok(0.0);
    }

    Ok(level.min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_muted_output() {
        assert_eq!(parse_wpctl_volume("Volume: 0.40\n"), Ok(0.4));
        assert_eq!(parse_wpctl_volume("Volume: 1.00"), Ok(1.0));
        assert_eq!(parse_wpctl_volume("Volume: 1.00 [MUTED]"), Ok(0.0));
        assert_eq!(parse_wpctl_volume("Volume: 1.25"), Ok(1.0));
    }

    #[test]
    fn rejects_unexpected_output() {
        assert!(matches!(parse_wpctl_volume(""), Err(VolumeReadError::Parse(_))));
        assert!(matches!(
            parse_wpctl_volume("Volume: loud"),
            Err(VolumeReadError::Parse(_))
        ));
        assert!(matches!(
            parse_wpctl_volume("Volume: -0.5"),
            Err(VolumeReadError::Parse(_))
        ));
    }

    #[test]
    fn empty_cell_reads_as_unavailable() {
        let cell = VolumeCell::new();
        assert_eq!(cell.read_current_volume(), Err(VolumeReadError::Unavailable));

        cell.set(Some(0.7));
        assert_eq!(cell.read_current_volume(), Ok(0.7));

        cell.set(None);
        assert_eq!(cell.get(), None);
    }
}
