use std::time::Duration;

use config::builder::DefaultState;
use config::{ConfigBuilder, FileFormat};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::MemberError;

pub const DEFAULT_OBSOLETE_EXPIRY_MS: u64 = 86_400_000;
pub const DEFAULT_PENDING_TIMEOUT_MS: u64 = 900_000;

/// Timing knobs the cleanup side of the controller applies to member records.
///
/// Values are resolved in order: built-in defaults, an optional YAML file,
/// then `MEMBER_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MemberConfig {
    /// How long an obsolete member lingers before it may be terminated.
    pub obsolete_expiry_ms: u64,
    /// How long a member may stay unlaunched before it counts as stuck.
    pub pending_timeout_ms: u64,
}

impl Default for MemberConfig {
    fn default() -> MemberConfig {
        MemberConfig {
            obsolete_expiry_ms: DEFAULT_OBSOLETE_EXPIRY_MS,
            pending_timeout_ms: DEFAULT_PENDING_TIMEOUT_MS,
        }
    }
}

impl MemberConfig {
    pub fn from_env() -> Result<MemberConfig, MemberError> {
        let conf = apply_default(config::Config::builder())?
            .add_source(config::Environment::with_prefix("member").try_parsing(true))
            .build()?;

        finish(conf.try_deserialize()?)
    }

    pub fn from_file(path: &str) -> Result<MemberConfig, MemberError> {
        let conf = apply_default(config::Config::builder())?
            .add_source(config::File::new(path, FileFormat::Yaml))
            .add_source(config::Environment::with_prefix("member").try_parsing(true))
            .build()?;

        finish(conf.try_deserialize()?)
    }

    pub fn obsolete_grace(&self) -> Duration {
        Duration::from_millis(self.obsolete_expiry_ms)
    }

    pub fn pending_timeout(&self) -> Duration {
        Duration::from_millis(self.pending_timeout_ms)
    }

    fn validate(&self) -> Result<(), MemberError> {
        if self.obsolete_expiry_ms == 0 {
            return Err(MemberError::InvalidConfig(
                "obsolete_expiry_ms must be greater than zero".to_string(),
            ));
        }
        if self.pending_timeout_ms == 0 {
            return Err(MemberError::InvalidConfig(
                "pending_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn apply_default(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, MemberError> {
    Ok(builder
        .set_default("obsolete_expiry_ms", DEFAULT_OBSOLETE_EXPIRY_MS as i64)?
        .set_default("pending_timeout_ms", DEFAULT_PENDING_TIMEOUT_MS as i64)?)
}

fn finish(conf: MemberConfig) -> Result<MemberConfig, MemberError> {
    match conf.validate() {
        Ok(_) => {
            debug!(?conf, "member config loaded");
            Ok(conf)
        }
        Err(e) => {
            warn!(error = %e, "rejecting member config");
            Err(e)
        }
    }
}
