use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Error, Result};

/// Physical constants for the chain, read by every node update.
///
/// Any field missing from a config file keeps its default.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mass: f32,
    pub gravity: f32,
    pub spring_constant: f32,
    pub damping: f32,
    /// Separation at which the spring between neighbours is slack.
    pub rest_length: f32,
    /// Hard ceiling on the separation between neighbours.
    pub max_length: f32,
    /// Fixed integration step in seconds; not derived from wall-clock time.
    pub time_step: f32,
    pub node_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mass: 40.,
            gravity: 25.,
            spring_constant: 10000.,
            damping: 25.,
            rest_length: 2.,
            max_length: 10.,
            time_step: 0.06,
            node_count: 75,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .map_err(|source| Error::Io { path: path.to_owned(), source })?;
        let config = Self::from_json(&data)?;
        debug!(?path, ?config, "loaded config");
        Ok(config)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let scalars = [
            ("mass", self.mass),
            ("gravity", self.gravity),
            ("spring_constant", self.spring_constant),
            ("damping", self.damping),
            ("rest_length", self.rest_length),
            ("max_length", self.max_length),
            ("time_step", self.time_step),
        ];
        for &(name, value) in scalars.iter() {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(name));
            }
        }

        for &(name, value) in [("mass", self.mass), ("time_step", self.time_step), ("rest_length", self.rest_length)].iter() {
            if value <= 0. {
                return Err(ConfigError::NotPositive(name, value));
            }
        }

        for &(name, value) in [("spring_constant", self.spring_constant), ("damping", self.damping)].iter() {
            if value < 0. {
                return Err(ConfigError::Negative(name, value));
            }
        }

        if self.max_length < self.rest_length {
            return Err(ConfigError::CeilingBelowRest { rest: self.rest_length, max: self.max_length });
        }

        if self.node_count < 2 {
            return Err(ConfigError::TooFewNodes(self.node_count));
        }

        Ok(())
    }

    /// Mass divided by the squared time step; dividing a force by this gives
    /// the displacement it produces over one step.
    pub fn inertia(&self) -> f32 {
        self.mass / (self.time_step * self.time_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "gravity": 10.0, "node_count": 3 }"#).unwrap();
        assert_eq!(config.gravity, 10.);
        assert_eq!(config.node_count, 3);
        assert_eq!(config.mass, 40.);
        assert_eq!(config.time_step, 0.06);
    }

    #[test]
    fn rejects_ceiling_below_rest() {
        let config = Config { rest_length: 5., max_length: 4., ..Config::default() };
        assert_eq!(config.validate(), Err(ConfigError::CeilingBelowRest { rest: 5., max: 4. }));
    }

    #[test]
    fn rejects_zero_time_step() {
        let config = Config { time_step: 0., ..Config::default() };
        assert_eq!(config.validate(), Err(ConfigError::NotPositive("time_step", 0.)));
    }

    #[test]
    fn rejects_non_finite() {
        let config = Config { spring_constant: f32::INFINITY, ..Config::default() };
        assert_eq!(config.validate(), Err(ConfigError::NotFinite("spring_constant")));
    }

    #[test]
    fn rejects_single_node() {
        let err = Config::from_json(r#"{ "node_count": 1 }"#).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::TooFewNodes(1))));
    }

    #[test]
    fn inertia_uses_squared_step() {
        let config = Config { mass: 2., time_step: 0.5, ..Config::default() };
        assert_eq!(config.inertia(), 8.);
    }
}
