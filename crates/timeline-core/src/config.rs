use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::layout::DEFAULT_MIN_WIDTH_PERCENT;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Bounds and stepping for the zoom multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    #[serde(default = "default_zoom_min")]
    pub min: f64,
    #[serde(default = "default_zoom_max")]
    pub max: f64,
    #[serde(default = "default_zoom_step")]
    pub step: f64,
    #[serde(default = "default_zoom_reset")]
    pub reset: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: default_zoom_min(),
            max: default_zoom_max(),
            step: default_zoom_step(),
            reset: default_zoom_reset(),
        }
    }
}

impl ZoomConfig {
    /// Reject bounds that would make zooming meaningless.
    ///
    /// # Errors
    ///
    /// Fails when any value is not finite, `min` is not positive,
    /// `min > max`, `step <= 1`, or the reset level falls outside `[min, max]`.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("min", self.min),
            ("max", self.max),
            ("step", self.step),
            ("reset", self.reset),
        ] {
            if !value.is_finite() {
                bail!("zoom.{key} must be a finite number, got {value}");
            }
        }
        if !(self.min > 0.0) {
            bail!("zoom.min must be positive, got {}", self.min);
        }
        if self.min > self.max {
            bail!("zoom.min ({}) exceeds zoom.max ({})", self.min, self.max);
        }
        if !(self.step > 1.0) {
            bail!("zoom.step must be greater than 1, got {}", self.step);
        }
        if self.reset < self.min || self.reset > self.max {
            bail!(
                "zoom.reset ({}) must lie within [{}, {}]",
                self.reset,
                self.min,
                self.max
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_min_width_percent")]
    pub min_width_percent: f64,
    /// Terminal rows per lane in the interactive view.
    #[serde(default = "default_lane_height")]
    pub lane_height: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_width_percent: default_min_width_percent(),
            lane_height: default_lane_height(),
        }
    }
}

/// Tallest lane the interactive view will draw.
pub const MAX_LANE_HEIGHT: u16 = 16;

impl LayoutConfig {
    /// # Errors
    ///
    /// Fails when `min_width_percent` is not a finite value in `0..=100`, or
    /// `lane_height` is outside `1..=MAX_LANE_HEIGHT`.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.min_width_percent) {
            bail!(
                "layout.min_width_percent must lie within [0, 100], got {}",
                self.min_width_percent
            );
        }
        if !(1..=MAX_LANE_HEIGHT).contains(&self.lane_height) {
            bail!(
                "layout.lane_height must lie within [1, {MAX_LANE_HEIGHT}], got {}",
                self.lane_height
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
}

/// Load `<project_root>/.timeline/config.toml`, or defaults when absent.
///
/// # Errors
///
/// Fails when the file exists but cannot be read, parsed, or validated.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".timeline/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    config
        .zoom
        .validate()
        .with_context(|| format!("Invalid zoom settings in {}", path.display()))?;
    config
        .layout
        .validate()
        .with_context(|| format!("Invalid layout settings in {}", path.display()))?;

    debug!(path = %path.display(), "loaded project config");
    Ok(config)
}

/// Load `<config_dir>/timeline/config.toml`, or defaults when absent.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("timeline/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Project settings plus user preferences.
///
/// # Errors
///
/// Propagates errors from either config file.
pub fn resolve_config(project_root: &Path) -> Result<EffectiveConfig> {
    Ok(EffectiveConfig {
        project: load_project_config(project_root)?,
        user: load_user_config()?,
    })
}

const fn default_zoom_min() -> f64 {
    1.0
}

const fn default_zoom_max() -> f64 {
    8.0
}

const fn default_zoom_step() -> f64 {
    1.5
}

const fn default_zoom_reset() -> f64 {
    1.0
}

const fn default_min_width_percent() -> f64 {
    DEFAULT_MIN_WIDTH_PERCENT
}

const fn default_lane_height() -> u16 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_project_config(root: &Path, content: &str) {
        let dir = root.join(".timeline");
        std::fs::create_dir_all(&dir).expect("create .timeline");
        std::fs::write(dir.join("config.toml"), content).expect("write config");
    }

    #[test]
    fn missing_project_config_uses_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert_eq!(cfg, ProjectConfig::default());
        assert!((cfg.zoom.min - 1.0).abs() < f64::EPSILON);
        assert!((cfg.zoom.max - 8.0).abs() < f64::EPSILON);
        assert!((cfg.zoom.step - 1.5).abs() < f64::EPSILON);
        assert_eq!(cfg.layout.lane_height, 3);
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        write_project_config(root.path(), "[zoom]\nmax = 4.0\n");
        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert!((cfg.zoom.max - 4.0).abs() < f64::EPSILON);
        assert!((cfg.zoom.min - 1.0).abs() < f64::EPSILON);
        assert_eq!(cfg.layout, LayoutConfig::default());
    }

    #[test]
    fn inverted_zoom_bounds_are_rejected() {
        let root = tempfile::tempdir().expect("tempdir");
        write_project_config(root.path(), "[zoom]\nmin = 4.0\nmax = 2.0\nreset = 3.0\n");
        let err = load_project_config(root.path()).expect_err("min > max must fail");
        assert!(format!("{err:#}").contains("exceeds zoom.max"));
    }

    #[test]
    fn step_must_grow() {
        let cfg = ZoomConfig {
            step: 1.0,
            ..ZoomConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn reset_outside_bounds_is_rejected() {
        let cfg = ZoomConfig {
            reset: 9.0,
            ..ZoomConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn nan_zoom_bounds_are_rejected() {
        let root = tempfile::tempdir().expect("tempdir");
        write_project_config(root.path(), "[zoom]\nmax = nan\n");
        let err = load_project_config(root.path()).expect_err("nan max must fail");
        assert!(format!("{err:#}").contains("zoom.max must be a finite number"));

        let cfg: ProjectConfig = toml::from_str("[zoom]\nreset = nan\n").expect("parse");
        assert!(cfg.zoom.validate().is_err());

        let cfg: ProjectConfig = toml::from_str("[zoom]\nmax = inf\n").expect("parse");
        assert!(cfg.zoom.validate().is_err());
    }

    #[test]
    fn lane_height_must_be_drawable() {
        let root = tempfile::tempdir().expect("tempdir");
        write_project_config(root.path(), "[layout]\nlane_height = 65535\n");
        let err = load_project_config(root.path()).expect_err("huge lane height must fail");
        assert!(format!("{err:#}").contains("layout.lane_height"));

        let zero = LayoutConfig {
            lane_height: 0,
            ..LayoutConfig::default()
        };
        assert!(zero.validate().is_err());
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn min_width_percent_must_be_a_percentage() {
        for bad in [-1.0, 100.5, f64::NAN, f64::INFINITY] {
            let cfg = LayoutConfig {
                min_width_percent: bad,
                ..LayoutConfig::default()
            };
            assert!(cfg.validate().is_err(), "{bad} should be rejected");
        }
        let root = tempfile::tempdir().expect("tempdir");
        write_project_config(root.path(), "[layout]\nmin_width_percent = 250.0\n");
        assert!(load_project_config(root.path()).is_err());
    }

    #[test]
    fn malformed_toml_reports_path() {
        let root = tempfile::tempdir().expect("tempdir");
        write_project_config(root.path(), "[zoom\nmax = ");
        let err = load_project_config(root.path()).expect_err("bad toml must fail");
        assert!(format!("{err}").contains("config.toml"));
    }

    #[test]
    fn user_config_parses_output() {
        let cfg: UserConfig = toml::from_str("output = \"json\"\n").expect("parse");
        assert_eq!(cfg.output.as_deref(), Some("json"));
    }
}
