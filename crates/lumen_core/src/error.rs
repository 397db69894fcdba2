//! Error types for lumen_core
//!
//! Component interactions never fail; errors only arise at the edges, when
//! configuration is read from or written to disk.

use std::io;
use thiserror::Error;

/// Errors that can occur while loading or validating Lumen configuration
#[derive(Error, Debug)]
pub enum LumenError {
    /// IO error when reading or writing a config file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The config file is not valid TOML or doesn't match the schema
    #[error("Config parsing failed: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The config could not be serialized
    #[error("Config serialization failed: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// The config parsed but holds a value no component can use
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for lumen_core operations
pub type Result<T> = std::result::Result<T, LumenError>;
