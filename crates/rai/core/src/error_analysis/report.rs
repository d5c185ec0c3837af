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

//! Error reports and their dashboard projection

use super::require_fields;
use rai_common::InsightsResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Version tag written into every report
pub const REPORT_VERSION: &str = "1.0";

/// Result of one error analysis run
///
/// The tree and matrix payloads are produced by the analyzer and kept as
/// JSON; their shape is enforced by the report schema, not by this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub json_tree: Vec<Value>,
    #[serde(default)]
    pub tree_features: Option<Vec<String>>,
    /// `None` when no filter features were requested
    pub json_matrix: Option<Value>,
    #[serde(default)]
    pub matrix_features: Option<Vec<String>>,
    #[serde(default)]
    pub importances: Option<Vec<f64>>,
    #[serde(default)]
    pub root_stats: Option<Value>,
    #[serde(default)]
    pub metadata: Option<Value>,
    pub id: String,
    pub version: String,
}

impl ErrorReport {
    /// Create a report with a fresh id
    pub fn new(json_tree: Vec<Value>, json_matrix: Option<Value>, tree_features: Vec<String>, matrix_features: Option<Vec<String>>) -> Self {
        Self {
            json_tree,
            tree_features: Some(tree_features),
            json_matrix,
            matrix_features,
            importances: None,
            root_stats: None,
            metadata: None,
            id: Uuid::new_v4().to_string(),
            version: REPORT_VERSION.to_string(),
        }
    }

    pub fn with_importances(mut self, importances: Vec<f64>) -> Self {
        self.importances = Some(importances);
        self
    }

    pub fn with_root_stats(mut self, root_stats: Value) -> Self {
        self.root_stats = Some(root_stats);
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// JSON value form, as validated against the report schema
    pub fn to_value(&self) -> InsightsResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json(&self) -> InsightsResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize a report; `jsonTree`, `jsonMatrix`, `id` and `version` are required
    pub fn from_json(json: &str) -> InsightsResult<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn from_value(value: Value) -> InsightsResult<Self> {
        require_fields(&value, &["jsonTree", "jsonMatrix", "id", "version"])?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Dashboard view of one configuration, recomputed from the analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorAnalysisData {
    pub max_depth: usize,
    pub num_leaves: usize,
    pub min_child_samples: usize,
    pub tree: Vec<Value>,
    pub matrix: Value,
    pub importances: Vec<f64>,
    /// Display name of the analyzer metric
    pub metric: String,
}
