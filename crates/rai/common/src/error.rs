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

//! Error types shared by the insights managers

use thiserror::Error;

/// Errors that can occur while configuring, computing or persisting a manager
#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("User config validation failed: {0}")]
    UserConfigValidation(String),

    #[error("Duplicate manager config: {0}")]
    DuplicateManagerConfig(String),

    #[error("The number of configs {configs} doesn't match the number of results {results}")]
    ConfigAndResultMismatch { configs: usize, results: usize },

    #[error("Schema validation failed: {0}")]
    SchemaValidation(String),

    #[error("Invalid schema document: {0}")]
    InvalidSchema(String),

    #[error("Invalid persisted state at {path}: {reason}")]
    InvalidPersistedState { path: String, reason: String },

    #[error("Analyzer error: {0}")]
    Analyzer(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InsightsError {
    /// Shorthand for a user configuration error
    pub fn user_config(message: impl Into<String>) -> Self {
        Self::UserConfigValidation(message.into())
    }
}

pub type InsightsResult<T> = Result<T, InsightsError>;
