use crate::domain::AvailabilityProbe;
use crate::infra::config::{AppConfig, config_path, install_default_config};
use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

pub fn install(config_dir: &Path) -> Result<()> {
    info!("Preparando config em {:?}", config_dir);

    if install_default_config(config_dir)? {
        info!("Config criado em {:?}", config_path(config_dir));
    } else {
        warn!("{:?} já existe, nada alterado", config_path(config_dir));
    }

    Ok(())
}

/// Reports binary and config availability. Returns whether everything was found.
pub fn doctor(config_dir: &Path, config: &AppConfig, probe: &dyn AvailabilityProbe) -> bool {
    let binary = config.binary();
    let binary_ok = probe.is_available(binary);
    if binary_ok {
        info!("{binary} disponível");
    } else {
        warn!("{binary} não encontrado no PATH");
    }

    let config_ok = config_path(config_dir).exists();
    if config_ok {
        info!("Config: {:?}", config_path(config_dir));
    } else {
        warn!(
            "Config ausente em {:?} (use 'boxdeck setup'); usando padrões",
            config_dir
        );
    }

    binary_ok && config_ok
}
