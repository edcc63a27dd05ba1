use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
    #[error("{0} must be greater than zero, got {1}")]
    NotPositive(&'static str, f32),
    #[error("{0} must not be negative, got {1}")]
    Negative(&'static str, f32),
    #[error("max length {max} is shorter than rest length {rest}")]
    CeilingBelowRest { rest: f32, max: f32 },
    #[error("a chain needs at least 2 nodes, got {0}")]
    TooFewNodes(usize),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
