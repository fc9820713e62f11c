//! Engine settings and per-component tuning
//!
//! Defines all configurable options for the humanization engine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::timing::DelayProfile;

/// Main settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Real-world length of one game tick (ms)
    pub tick_duration_ms: u32,
    /// Emit per-draw debug log lines
    pub debug_logging: bool,
    /// Fixed session seed (random when absent)
    pub seed: Option<u64>,
    /// Click point sampling
    pub click: ClickSettings,
    /// Camera rotation and pitch motion
    pub camera: CameraSettings,
    /// Idle camera fidgets
    pub fidget: FidgetSettings,
    /// Item disposal sequencing
    pub disposal: DisposalSettings,
    /// Extra delay profiles, shadowing built-ins of the same name
    pub profiles: Vec<DelayProfile>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_duration_ms: 600,
            debug_logging: false,
            seed: None,
            click: ClickSettings::default(),
            camera: CameraSettings::default(),
            fidget: FidgetSettings::default(),
            disposal: DisposalSettings::default(),
            profiles: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file and validate them
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Settings with rarer fidgets and slower disposal
    pub fn relaxed_preset() -> Self {
        Self {
            fidget: FidgetSettings {
                mean_interval_secs: 90.0,
                cluster_probability: 0.10,
                ..Default::default()
            },
            disposal: DisposalSettings {
                min_batch: 1,
                max_batch: 3,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Settings for an attentive player: frequent fidgets, quick sweeps
    pub fn focused_preset() -> Self {
        Self {
            fidget: FidgetSettings {
                mean_interval_secs: 30.0,
                cluster_probability: 0.20,
                ..Default::default()
            },
            disposal: DisposalSettings {
                min_batch: 3,
                max_batch: 6,
                max_missed: 4,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_duration_ms == 0 {
            return Err(ConfigError::Invalid("tick_duration_ms must be positive".into()));
        }
        self.click.validate()?;
        self.camera.validate()?;
        self.fidget.validate()?;
        self.disposal.validate()?;
        Ok(())
    }
}

fn check_probability(name: &str, p: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(ConfigError::Invalid(format!("{name} must be in [0, 1], got {p}")));
    }
    Ok(())
}

/// Non-negative finite quantity
fn check_non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid(format!(
            "{name} must be a finite non-negative number, got {value}"
        )));
    }
    Ok(())
}

fn check_order<T: PartialOrd + std::fmt::Display>(
    name: &str,
    min: T,
    max: T,
) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::Invalid(format!(
            "{name}: min {min} exceeds max {max}"
        )));
    }
    Ok(())
}

/// Click point sampling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickSettings {
    /// Rejection attempts before falling back to the box centre
    pub max_attempts: u32,
    /// Gaussian standard deviation as a fraction of box size
    pub spread: f64,
    /// Centre bias used when the caller gives none
    pub default_center_bias: f64,
    /// Default jitter offset (pixels)
    pub jitter: i32,
}

impl Default for ClickSettings {
    fn default() -> Self {
        Self {
            max_attempts: 50,
            spread: 0.2,
            default_center_bias: 0.75,
            jitter: 2,
        }
    }
}

impl ClickSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        check_probability("click.default_center_bias", self.default_center_bias)?;
        if !self.spread.is_finite() || self.spread < 0.0 {
            return Err(ConfigError::Invalid("click.spread must not be negative".into()));
        }
        Ok(())
    }
}

/// Camera rotation settings (angles in cyclic units, 2048 = 360 degrees)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Deltas at or below this are not worth rotating for
    pub rotation_threshold: i32,
    /// Shortest smoothed rotation (ms)
    pub min_rotation_ms: u32,
    /// Longest smoothed rotation (ms)
    pub max_rotation_ms: u32,
    /// Fewest interpolation steps
    pub min_steps: u32,
    /// Most interpolation steps
    pub max_steps: u32,
    /// Angular units covered per step before the cap applies
    pub units_per_step: u32,
    /// Half-angle (degrees) inside which a target counts as visible
    pub visibility_degrees: f64,
    /// Aim offset (degrees) used when turning to make a target visible
    pub visibility_randomness_degrees: f64,
    /// Lowest pitch
    pub pitch_min: i32,
    /// Highest pitch
    pub pitch_max: i32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            rotation_threshold: 50,
            min_rotation_ms: 200,
            max_rotation_ms: 800,
            min_steps: 5,
            max_steps: 100,
            units_per_step: 20,
            visibility_degrees: 90.0,
            visibility_randomness_degrees: 15.0,
            pitch_min: 128,
            pitch_max: 383,
        }
    }
}

impl CameraSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        check_order("camera.rotation_ms", self.min_rotation_ms, self.max_rotation_ms)?;
        check_order("camera.steps", self.min_steps, self.max_steps)?;
        check_order("camera.pitch", self.pitch_min, self.pitch_max)?;
        if self.min_steps == 0 || self.units_per_step == 0 {
            return Err(ConfigError::Invalid(
                "camera.min_steps and camera.units_per_step must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Idle fidget scheduling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FidgetSettings {
    /// Mean gap between fidgets (seconds)
    pub mean_interval_secs: f64,
    /// Shortest normally scheduled gap (seconds)
    pub min_interval_secs: f64,
    /// Hard floor between two fidgets (seconds)
    pub cooldown_secs: f64,
    /// Chance a fidget is followed by a quick follow-up
    pub cluster_probability: f64,
    /// Shortest follow-up gap (seconds)
    pub cluster_min_secs: f64,
    /// Longest follow-up gap (seconds)
    pub cluster_max_secs: f64,
    /// Chance a fidget also moves the pitch
    pub pitch_probability: f64,
    /// Standard deviation of the yaw magnitude draw
    pub magnitude_sd: f64,
    /// Added to every yaw magnitude
    pub magnitude_base: f64,
    /// Largest yaw magnitude
    pub magnitude_cap: f64,
    /// Shortest pitch motion (ms)
    pub pitch_min_ms: u32,
    /// Longest pitch motion (ms)
    pub pitch_max_ms: u32,
    /// Fewest pitch steps
    pub pitch_min_steps: u32,
    /// Most pitch steps
    pub pitch_max_steps: u32,
    /// Chance the pitch target lands mid-range
    pub pitch_mid_probability: f64,
    /// Chance the pitch target lands near the top; the rest goes low
    pub pitch_high_probability: f64,
}

impl Default for FidgetSettings {
    fn default() -> Self {
        Self {
            mean_interval_secs: 45.0,
            min_interval_secs: 20.0,
            cooldown_secs: 15.0,
            cluster_probability: 0.15,
            cluster_min_secs: 5.0,
            cluster_max_secs: 15.0,
            pitch_probability: 0.30,
            magnitude_sd: 200.0,
            magnitude_base: 50.0,
            magnitude_cap: 600.0,
            pitch_min_ms: 200,
            pitch_max_ms: 600,
            pitch_min_steps: 3,
            pitch_max_steps: 20,
            pitch_mid_probability: 0.70,
            pitch_high_probability: 0.15,
        }
    }
}

impl FidgetSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        check_probability("fidget.cluster_probability", self.cluster_probability)?;
        check_probability("fidget.pitch_probability", self.pitch_probability)?;
        check_probability("fidget.pitch_mid_probability", self.pitch_mid_probability)?;
        check_probability("fidget.pitch_high_probability", self.pitch_high_probability)?;
        check_probability(
            "fidget.pitch_mid_probability + pitch_high_probability",
            self.pitch_mid_probability + self.pitch_high_probability,
        )?;
        check_order("fidget.cluster_secs", self.cluster_min_secs, self.cluster_max_secs)?;
        check_order("fidget.pitch_ms", self.pitch_min_ms, self.pitch_max_ms)?;
        check_order("fidget.pitch_steps", self.pitch_min_steps, self.pitch_max_steps)?;
        check_non_negative("fidget.mean_interval_secs", self.mean_interval_secs)?;
        check_non_negative("fidget.min_interval_secs", self.min_interval_secs)?;
        check_non_negative("fidget.cooldown_secs", self.cooldown_secs)?;
        check_non_negative("fidget.cluster_min_secs", self.cluster_min_secs)?;
        check_non_negative("fidget.cluster_max_secs", self.cluster_max_secs)?;
        if self.mean_interval_secs <= 0.0 {
            return Err(ConfigError::Invalid("fidget.mean_interval_secs must be positive".into()));
        }
        for (name, value) in [
            ("fidget.magnitude_sd", self.magnitude_sd),
            ("fidget.magnitude_base", self.magnitude_base),
            ("fidget.magnitude_cap", self.magnitude_cap),
        ] {
            check_non_negative(name, value)?;
        }
        if self.pitch_min_steps == 0 {
            return Err(ConfigError::Invalid("fidget.pitch_min_steps must be positive".into()));
        }
        Ok(())
    }
}

/// Item disposal settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisposalSettings {
    /// Slot grid columns
    pub columns: usize,
    /// Slot grid rows
    pub rows: usize,
    /// Exclusive upper bound on deliberately missed items
    pub max_missed: usize,
    /// Smallest batch per tick
    pub min_batch: usize,
    /// Largest batch per tick
    pub max_batch: usize,
}

impl Default for DisposalSettings {
    fn default() -> Self {
        Self {
            columns: 4,
            rows: 7,
            max_missed: 6,
            min_batch: 2,
            max_batch: 5,
        }
    }
}

impl DisposalSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::Invalid("disposal grid must be non-empty".into()));
        }
        if self.min_batch == 0 {
            return Err(ConfigError::Invalid("disposal.min_batch must be positive".into()));
        }
        check_order("disposal.batch", self.min_batch, self.max_batch)
    }
}
