use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Headless terrain streaming driver", long_about = None)]
pub struct Cli {
    /// Driver config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Fixed world seed; random when absent
    #[arg(long)]
    pub seed: Option<u64>,
    /// Chunks kept active around the observer
    #[arg(long)]
    pub render_distance: Option<i32>,
    /// Precompute worker threads
    #[arg(long)]
    pub workers: Option<usize>,
    /// Observer steps to simulate
    #[arg(long)]
    pub steps: Option<u32>,
    /// Worldgen parameter file (TOML)
    #[arg(long)]
    pub worldgen: Option<PathBuf>,
    /// Mining time overrides (TOML)
    #[arg(long)]
    pub mining: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "d_render_distance")]
    pub render_distance: i32,
    #[serde(default = "d_workers")]
    pub workers: usize,
    #[serde(default)]
    pub worldgen: Option<PathBuf>,
    #[serde(default)]
    pub mining: Option<PathBuf>,
    #[serde(default)]
    pub walk: Walk,
}

/// Scripted observer path: straight steps along x and z, digging the
/// cell under the feet every `dig_every` steps.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Walk {
    #[serde(default = "d_steps")]
    pub steps: u32,
    #[serde(default = "d_stride")]
    pub stride_x: i32,
    #[serde(default)]
    pub stride_z: i32,
    #[serde(default = "d_dig_every")]
    pub dig_every: u32,
    #[serde(default = "d_dt")]
    pub dt: f32,
}

fn d_render_distance() -> i32 {
    4
}
fn d_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
fn d_steps() -> u32 {
    64
}
fn d_stride() -> i32 {
    4
}
fn d_dig_every() -> u32 {
    8
}
fn d_dt() -> f32 {
    1.0 / 30.0
}

impl Default for Walk {
    fn default() -> Self {
        Self {
            steps: d_steps(),
            stride_x: d_stride(),
            stride_z: 0,
            dig_every: d_dig_every(),
            dt: d_dt(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            render_distance: d_render_distance(),
            workers: d_workers(),
            worldgen: None,
            mining: None,
            walk: Walk::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: AppConfig = toml::from_str(s)?;
        if cfg.render_distance < 0 {
            return Err(format!("render_distance must be >= 0, got {}", cfg.render_distance).into());
        }
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Config file (or defaults) with command line flags applied on top.
    pub fn resolve(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let mut cfg = match &cli.config {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        if cli.seed.is_some() {
            cfg.seed = cli.seed;
        }
        if let Some(r) = cli.render_distance {
            cfg.render_distance = r.max(0);
        }
        if let Some(w) = cli.workers {
            cfg.workers = w.max(1);
        }
        if let Some(steps) = cli.steps {
            cfg.walk.steps = steps;
        }
        if cli.worldgen.is_some() {
            cfg.worldgen = cli.worldgen.clone();
        }
        if cli.mining.is_some() {
            cfg.mining = cli.mining.clone();
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.render_distance, 4);
        assert_eq!(cfg.walk, Walk::default());
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn file_values_and_flags_combine() {
        let cfg = AppConfig::from_toml_str(
            r#"
            seed = 42
            render_distance = 2
            [walk]
            steps = 10
            stride_z = -3
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.walk.steps, 10);
        assert_eq!(cfg.walk.stride_x, 4);
        assert_eq!(cfg.walk.stride_z, -3);

        let cli = Cli {
            seed: Some(7),
            render_distance: Some(1),
            ..Cli::default()
        };
        let merged = AppConfig::resolve(&cli).unwrap();
        assert_eq!(merged.seed, Some(7));
        assert_eq!(merged.render_distance, 1);
    }

    #[test]
    fn negative_render_distance_is_rejected() {
        assert!(AppConfig::from_toml_str("render_distance = -1").is_err());
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["terrace", "--seed", "9", "--render-distance", "3", "--steps", "5"]);
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.render_distance, Some(3));
        assert_eq!(cli.steps, Some(5));
    }
}
