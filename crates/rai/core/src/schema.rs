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

//! Report Schema Validation
//!
//! Every error report is validated against a fixed JSON Schema document
//! both when it is computed and when it is loaded back from disk. The
//! default document ships with the crate and is embedded at compile time.

use rai_common::{InsightsError, InsightsResult};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// File name of the bundled error analysis output schema
pub const ERROR_ANALYSIS_SCHEMA_FILE: &str = "error_analysis_output_v0.0.json";

const ERROR_ANALYSIS_SCHEMA: &str = include_str!("../schemas/error_analysis_output_v0.0.json");

/// Compiled JSON Schema for report validation
pub struct ReportSchema {
    source: String,
    validator: jsonschema::Validator,
}

impl ReportSchema {
    /// The bundled error analysis output schema
    pub fn error_analysis() -> InsightsResult<Self> {
        let document: Value = serde_json::from_str(ERROR_ANALYSIS_SCHEMA)?;
        Self::compile(ERROR_ANALYSIS_SCHEMA_FILE, &document)
    }

    /// Load and compile a schema document from disk
    pub fn from_path(path: impl AsRef<Path>) -> InsightsResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let document: Value = serde_json::from_str(&content)?;
        Self::compile(&path.display().to_string(), &document)
    }

    /// Use the schema at `path` when given, the bundled one otherwise
    pub fn resolve(path: Option<&Path>) -> InsightsResult<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::error_analysis(),
        }
    }

    /// Compile an in-memory schema document
    pub fn compile(source: &str, document: &Value) -> InsightsResult<Self> {
        let validator = jsonschema::validator_for(document).map_err(|e| InsightsError::InvalidSchema(format!("{source}: {e}")))?;
        Ok(Self {
            source: source.to_string(),
            validator,
        })
    }

    /// Where this schema was loaded from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Validate `instance`, reporting every violation
    pub fn validate(&self, instance: &Value) -> InsightsResult<()> {
        let violations: Vec<String> = self.validator.iter_errors(instance).map(|error| error.to_string()).collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(InsightsError::SchemaValidation(violations.join("; ")))
        }
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }
}

impl fmt::Debug for ReportSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportSchema").field("source", &self.source).finish()
    }
}
