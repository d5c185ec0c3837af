// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use anyhow::Result;
use rai_core::ErrorAnalysisSettings;
use rai_core::fs::PersistenceLayout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "RAI_CONFIG";
pub const STATE_DIR_ENV: &str = "RAI_STATE_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaiCliConfig {
    /// Saved error analysis state the commands operate on
    pub state_dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<PathBuf>,
    pub layout: PersistenceLayout,
}

impl Default for RaiCliConfig {
    fn default() -> Self {
        Self {
            state_dir: dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("rai").join("error_analysis"),
            schema_path: None,
            layout: PersistenceLayout::default(),
        }
    }
}

impl RaiCliConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn resolve_config(cli_config: Option<PathBuf>, cli_state_dir: Option<PathBuf>) -> Result<Self> {
        Self::resolve_with(
            cli_config,
            cli_state_dir,
            std::env::var(CONFIG_ENV).ok().map(PathBuf::from),
            std::env::var(STATE_DIR_ENV).ok().map(PathBuf::from),
        )
    }

    /// Command line values win over the environment, which wins over the defaults
    pub fn resolve_with(cli_config: Option<PathBuf>, cli_state_dir: Option<PathBuf>, env_config: Option<PathBuf>, env_state_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = match cli_config.or(env_config) {
            Some(config_path) => Self::load_from_file(config_path)?,
            None => Self::default(),
        };

        if let Some(state_dir) = cli_state_dir.or(env_state_dir) {
            config.state_dir = state_dir;
        }

        Ok(config)
    }

    pub fn settings(&self) -> ErrorAnalysisSettings {
        ErrorAnalysisSettings {
            layout: self.layout.clone(),
            schema_path: self.schema_path.clone(),
        }
    }
}
