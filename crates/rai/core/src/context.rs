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

//! Parent insights context handed to managers on load

use crate::data::{Dataset, Model};
use serde_json::Value;
use std::sync::Arc;

/// Live model and test data owned by the parent insights object
///
/// Persisted manager state only holds configurations and results. When a
/// manager is loaded it is rebound to the model and data in this context.
#[derive(Debug, Clone)]
pub struct InsightsContext {
    pub model: Option<Arc<dyn Model>>,
    /// Test dataset including the target column
    pub test: Dataset,
    pub target_column: String,
    pub classes: Option<Vec<Value>>,
    pub categorical_features: Option<Vec<String>>,
}

impl InsightsContext {
    pub fn new(model: Option<Arc<dyn Model>>, test: Dataset, target_column: impl Into<String>) -> Self {
        Self {
            model,
            test,
            target_column: target_column.into(),
            classes: None,
            categorical_features: None,
        }
    }

    pub fn with_classes(mut self, classes: Vec<Value>) -> Self {
        self.classes = Some(classes);
        self
    }

    pub fn with_categorical_features<S: Into<String>>(mut self, features: impl IntoIterator<Item = S>) -> Self {
        self.categorical_features = Some(features.into_iter().map(Into::into).collect());
        self
    }
}
