use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default)]
    pub trees: Trees,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldSection {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_load_radius")]
    pub load_radius: i32,
}
fn default_seed() -> i32 {
    12345
}
fn default_load_radius() -> i32 {
    1
}
impl Default for WorldSection {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            load_radius: default_load_radius(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Octave {
    pub frequency: f64,
    pub amplitude: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Terrain {
    #[serde(default = "default_base")]
    pub base: f64,
    #[serde(default = "default_octaves")]
    pub octaves: [Octave; 3],
}
fn default_base() -> f64 {
    3.0
}
fn default_octaves() -> [Octave; 3] {
    [
        Octave {
            frequency: 0.1,
            amplitude: 2.0,
        },
        Octave {
            frequency: 0.05,
            amplitude: 4.0,
        },
        Octave {
            frequency: 0.02,
            amplitude: 1.0,
        },
    ]
}
impl Default for Terrain {
    fn default() -> Self {
        Self {
            base: default_base(),
            octaves: default_octaves(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Trees {
    #[serde(default = "default_tree_stride")]
    pub stride: i32,
    #[serde(default = "default_tree_density")]
    pub density: f32,
    #[serde(default = "default_tree_jitter")]
    pub jitter: i32,
    #[serde(default = "default_trunk_min")]
    pub trunk_min: i32,
    #[serde(default = "default_trunk_max")]
    pub trunk_max: i32,
}
fn default_tree_stride() -> i32 {
    10
}
fn default_tree_density() -> f32 {
    0.15
}
fn default_tree_jitter() -> i32 {
    3
}
fn default_trunk_min() -> i32 {
    4
}
fn default_trunk_max() -> i32 {
    6
}
impl Default for Trees {
    fn default() -> Self {
        Self {
            stride: default_tree_stride(),
            density: default_tree_density(),
            jitter: default_tree_jitter(),
            trunk_min: default_trunk_min(),
            trunk_max: default_trunk_max(),
        }
    }
}

// Flattened params used in tight loops (snapshot of config)
#[derive(Clone, Debug, PartialEq)]
pub struct WorldGenParams {
    pub seed: i32,
    pub load_radius: i32,
    pub base_height: f64,
    pub octaves: [Octave; 3],
    pub tree_stride: i32,
    pub tree_density: f32,
    pub tree_jitter: i32,
    pub trunk_min: i32,
    pub trunk_max: i32,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        Self {
            seed: cfg.world.seed,
            load_radius: cfg.world.load_radius,
            base_height: cfg.terrain.base,
            octaves: cfg.terrain.octaves,
            tree_stride: cfg.trees.stride,
            tree_density: cfg.trees.density,
            tree_jitter: cfg.trees.jitter,
            trunk_min: cfg.trees.trunk_min,
            trunk_max: cfg.trees.trunk_max,
        }
    }

    pub fn with_seed(self, seed: i32) -> Self {
        Self { seed, ..self }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.load_radius < 0 {
            return Err(ConfigError::Invalid(format!(
                "world.load_radius must be >= 0 (got {})",
                self.load_radius
            )));
        }
        if !self.base_height.is_finite()
            || self
                .octaves
                .iter()
                .any(|o| !o.frequency.is_finite() || !o.amplitude.is_finite())
        {
            return Err(ConfigError::Invalid(
                "terrain base and octaves must be finite".into(),
            ));
        }
        if self.tree_stride <= 0 {
            return Err(ConfigError::Invalid(format!(
                "trees.stride must be > 0 (got {})",
                self.tree_stride
            )));
        }
        if self.tree_jitter < 0 || self.tree_jitter * 2 >= self.tree_stride {
            return Err(ConfigError::Invalid(format!(
                "trees.jitter must be in 0..stride/2 (got {} with stride {})",
                self.tree_jitter, self.tree_stride
            )));
        }
        if !(0.0..=1.0).contains(&self.tree_density) {
            return Err(ConfigError::Invalid(format!(
                "trees.density must be within [0, 1] (got {})",
                self.tree_density
            )));
        }
        if self.trunk_min < 1 || self.trunk_min > self.trunk_max {
            return Err(ConfigError::Invalid(format!(
                "trees.trunk_min..trunk_max must be a non-empty positive range (got {}..{})",
                self.trunk_min, self.trunk_max
            )));
        }
        Ok(())
    }
}

pub fn parse_params(src: &str) -> Result<WorldGenParams, ConfigError> {
    let cfg: WorldGenConfig = toml::from_str(src)?;
    let params = WorldGenParams::from_config(&cfg);
    params.validate()?;
    Ok(params)
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenParams, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_params(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let p = parse_params("").expect("defaults");
        assert_eq!(p, WorldGenParams::default());
        assert_eq!(p.seed, 12345);
        assert_eq!(p.load_radius, 1);
        assert_eq!(p.tree_stride, 10);
        assert_eq!((p.trunk_min, p.trunk_max), (4, 6));
    }

    #[test]
    fn partial_sections_override() {
        let p = parse_params(
            r#"
            [world]
            seed = 7
            [trees]
            density = 0.5
            "#,
        )
        .expect("parse");
        assert_eq!(p.seed, 7);
        assert_eq!(p.load_radius, 1);
        assert_eq!(p.tree_density, 0.5);
        assert_eq!(p.tree_jitter, 3);
    }

    #[test]
    fn octaves_table_array() {
        let p = parse_params(
            r#"
            [terrain]
            base = 10.0
            octaves = [
                { frequency = 0.2, amplitude = 1.0 },
                { frequency = 0.1, amplitude = 2.0 },
                { frequency = 0.01, amplitude = 3.0 },
            ]
            "#,
        )
        .expect("parse");
        assert_eq!(p.base_height, 10.0);
        assert_eq!(p.octaves[2].amplitude, 3.0);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            parse_params("[trees]\ntrunk_min = 7\ntrunk_max = 4\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            parse_params("[trees]\nstride = 0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            parse_params("[trees]\njitter = 5\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            parse_params("[trees]\ndensity = 1.5\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            parse_params("[world]\nload_radius = -1\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            parse_params("[world\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_params_from_path(Path::new("/definitely/not/here.toml"));
        assert!(matches!(err, Err(ConfigError::Io { .. })));
    }
}
