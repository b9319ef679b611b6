//! Codec config loader (strict parsing).

pub mod schema;

use std::fs;

use icwire_core::error::{IcWireError, Result};

pub use schema::{CodecConfig, CodecSection, RegistrySection};

pub fn load_from_file(path: &str) -> Result<CodecConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| IcWireError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<CodecConfig> {
    let cfg: CodecConfig = serde_yaml::from_str(s)
        .map_err(|e| IcWireError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
