use crate::menu::{LayerSpec, LayoutError, RingLayout};
use directories::ProjectDirs;
use orbit::trail::{DEFAULT_CAPACITY, TrailError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LayerConfig {
    pub radius: f64,
    pub segments: usize,
    #[serde(default = "default_gap_angle")]
    pub gap_angle: u32,
    #[serde(default = "default_spacing")]
    pub spacing: f64,
}

impl LayerConfig {
    pub fn new(radius: f64, segments: usize) -> Self {
        Self {
            radius,
            segments,
            gap_angle: default_gap_angle(),
            spacing: default_spacing(),
        }
    }
}

impl From<&LayerConfig> for LayerSpec {
    fn from(cfg: &LayerConfig) -> Self {
        LayerSpec::new(cfg.radius, cfg.segments, cfg.gap_angle, cfg.spacing)
    }
}

fn default_gap_angle() -> u32 {
    5
}

fn default_spacing() -> f64 {
    10.0
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Children per node at each depth; depth `d` fills ring `d`.
    pub branching: Vec<usize>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            branching: vec![5, 6, 4, 8],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BallConfig {
    pub inner_radius: f64,
    pub window_size: f64,
    pub ball_radius: Option<f64>,
    pub snap_threshold: f64,
    pub trail_capacity: usize,
    pub hover_poll_ms: u64,
    pub jelly_strength: f64,
    pub layers: Vec<LayerConfig>,
    pub menu: MenuConfig,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            inner_radius: 40.0,
            window_size: 760.0,
            ball_radius: None,
            snap_threshold: 48.0,
            trail_capacity: DEFAULT_CAPACITY,
            hover_poll_ms: crate::menu::HOVER_POLL_MS,
            jelly_strength: 0.35,
            layers: vec![
                LayerConfig::new(100.0, 5),
                LayerConfig::new(200.0, 6),
                LayerConfig::new(300.0, 4),
                LayerConfig::new(350.0, 8),
            ],
            menu: MenuConfig::default(),
        }
    }
}

impl BallConfig {
    pub fn ball_radius(&self) -> f64 {
        self.ball_radius.unwrap_or(self.inner_radius)
    }

    pub fn layout(&self) -> Result<RingLayout, LayoutError> {
        RingLayout::new(
            self.inner_radius,
            self.layers.iter().map(LayerSpec::from).collect(),
        )
    }

    /// Checks everything the ball cannot start without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout()?;
        if self.trail_capacity == 0 {
            return Err(TrailError::ZeroCapacity.into());
        }
        if self.hover_poll_ms == 0 {
            return Err(ConfigError::HoverPollInterval);
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid ring layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("Invalid trail: {0}")]
    Trail(#[from] TrailError),
    #[error("Hover poll interval must be at least 1 ms")]
    HoverPollInterval,
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "keruis", "floatball").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("FLOATBALL")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Layers the user config file, `FLOATBALL_*` variables and `extra` (in that
/// order of precedence, lowest first).
pub fn load_config(extra: Option<&Path>) -> Result<BallConfig, ConfigError> {
    let mut builder = config::Config::builder();

    match get_config_path() {
        Ok(path) => builder = builder.add_source(config::File::from(path).required(false)),
        Err(e) => log::debug!("Skipping user config: {}", e),
    }
    builder = builder.add_source(environment());
    if let Some(path) = extra {
        builder = builder.add_source(config::File::from(path).required(true));
    }

    let cfg: BallConfig = builder.build()?.try_deserialize()?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn parse_config(toml: &str) -> Result<BallConfig, ConfigError> {
    let cfg: BallConfig = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize()?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_or_default() -> BallConfig {
    match load_config(None) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Falling back to default config: {}", e);
            BallConfig::default()
        }
    }
}
