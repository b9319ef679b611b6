use serde::Deserialize;

use icwire_core::error::{IcWireError, Result};
use icwire_core::payload::UnknownValues;
use icwire_core::registry::ConflictPolicy;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    pub version: u32,

    #[serde(default)]
    pub codec: CodecSection,

    #[serde(default)]
    pub registry: RegistrySection,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            version: 1,
            codec: CodecSection::default(),
            registry: RegistrySection::default(),
        }
    }
}

impl CodecConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(IcWireError::UnsupportedVersion(
                u8::try_from(self.version).unwrap_or(u8::MAX),
            ));
        }

        self.codec.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecSection {
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

impl Default for CodecSection {
    fn default() -> Self {
        Self {
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

impl CodecSection {
    pub fn validate(&self) -> Result<()> {
        if !(64..=67_108_864).contains(&self.max_frame_bytes) {
            return Err(IcWireError::Config(
                "codec.max_frame_bytes must be between 64 and 67108864".into(),
            ));
        }
        Ok(())
    }
}

fn default_max_frame_bytes() -> usize {
    4 * 1024 * 1024
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    #[serde(default)]
    pub on_conflict: ConflictPolicy,

    #[serde(default)]
    pub unknown_values: UnknownValues,
}
