use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::protocol::ProtocolVariant;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub battle_feed_url: String,
    pub protocol: ProtocolVariant,
    pub http_bind: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            battle_feed_url: "ws://localhost:15455".to_owned(),
            protocol: ProtocolVariant::JsonRpc,
            http_bind: "127.0.0.1:38470".to_owned(),
        }
    }
}

impl OverlayConfig {
    pub fn load_or_create() -> Result<(Self, PathBuf)> {
        let config_dir = dirs::config_dir()
            .context("unable to locate OS config directory")?
            .join("winrate-overlay");
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("failed creating config dir at {}", config_dir.display()))?;

        let config_path = config_dir.join("config.json");
        if !config_path.exists() {
            let default = Self::default();
            default.save(&config_path)?;
            return Ok((default, config_path));
        }

        let text = fs::read_to_string(&config_path)
            .with_context(|| format!("failed reading {}", config_path.display()))?;
        let config = serde_json::from_str::<Self>(&text)
            .with_context(|| format!("invalid json in {}", config_path.display()))?;
        Ok((config, config_path))
    }

    pub fn save(&self, path: &PathBuf) -> Result<()> {
        let payload = serde_json::to_string_pretty(self).context("failed serializing config")?;
        fs::write(path, payload).with_context(|| format!("failed writing {}", path.display()))?;
        Ok(())
    }
}
