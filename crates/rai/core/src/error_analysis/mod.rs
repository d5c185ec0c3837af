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

//! Error Analysis
//!
//! This module manages error analysis configurations and the error reports
//! computed for them.
//!
//! # Usage
//!
//! ```ignore
//! use rai_core::error_analysis::{ErrorAnalysisConfig, ErrorAnalysisManager};
//! use rai_core::Manager;
//!
//! let mut manager: ErrorAnalysisManager<MyAnalyzer> = ErrorAnalysisManager::new(&context)?;
//! manager.add(ErrorAnalysisConfig::default())?;
//! manager.add(ErrorAnalysisConfig::default().with_max_depth(4).with_filter_features(["age"]))?;
//! manager.compute()?;
//! manager.save(Path::new("./insights/error_analysis"))?;
//!
//! let restored: ErrorAnalysisManager<MyAnalyzer> = ErrorAnalysisManager::load("./insights/error_analysis", &context)?;
//! ```

pub mod config;
pub mod manager;
pub mod report;
pub mod store;

pub use config::ErrorAnalysisConfig;
pub use manager::{ErrorAnalysisListing, ErrorAnalysisManager};
pub use report::{ErrorAnalysisData, ErrorReport};
pub use store::PersistedEntry;

use crate::fs::PersistenceLayout;
use rai_common::{InsightsError, InsightsResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Persistence and validation settings of the error analysis manager
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorAnalysisSettings {
    pub layout: PersistenceLayout,
    /// Schema document replacing the bundled report schema
    pub schema_path: Option<PathBuf>,
}

/// Fails with a missing field error unless `value` is an object holding every key in `fields`
pub(crate) fn require_fields(value: &Value, fields: &[&'static str]) -> InsightsResult<()> {
    let Some(object) = value.as_object() else {
        return Err(InsightsError::Json(serde::de::Error::custom("expected a JSON object")));
    };

    match fields.iter().find(|field| !object.contains_key(**field)) {
        Some(missing) => Err(InsightsError::Json(serde::de::Error::missing_field(*missing))),
        None => Ok(()),
    }
}
