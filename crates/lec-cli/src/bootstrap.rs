use anyhow::Context;
use lec_config::LecternConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration (with `.env`) and apply global flags.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<LecternConfig> {
    let config = LecternConfig::load_with_dotenv().context("failed to load lectern configuration")?;
    Ok(apply_flags(config, flags))
}

/// `--local` switches remote generation off regardless of configuration.
pub fn apply_flags(mut config: LecternConfig, flags: &GlobalFlags) -> LecternConfig {
    if flags.local {
        if config.ai.enabled {
            tracing::debug!("--local given; remote generation disabled for this run");
        }
        config.ai.enabled = false;
    }
    config
}
