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

//! Error Analyzer Interface
//!
//! The analyzer builds the failure-inducing decision tree, the error matrix
//! and the feature importances for a model. The managers treat it as an
//! opaque collaborator: they construct it from [`AnalyzerInputs`] and call
//! the operations of [`ErrorAnalyzer`] with the parameters of each
//! registered configuration.

pub mod metric;

pub use metric::Metric;

use crate::data::{Dataset, Model, Series};
use crate::error_analysis::ErrorReport;
use rai_common::InsightsResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Surrogate tree hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Maximum depth of the tree
    pub max_depth: usize,
    /// Maximum number of leaves in the tree
    pub num_leaves: usize,
    /// Minimal number of rows required to create a leaf
    pub min_child_samples: usize,
}

/// Everything an analyzer is constructed from
#[derive(Debug, Clone)]
pub struct AnalyzerInputs {
    pub model: Option<Arc<dyn Model>>,
    /// Feature columns only, label removed
    pub dataset: Arc<Dataset>,
    pub true_y: Arc<Series>,
    pub feature_names: Vec<String>,
    pub categorical_features: Option<Vec<String>>,
    pub classes: Option<Vec<Value>>,
}

/// Operations the managers need from an error analyzer
pub trait ErrorAnalyzer {
    /// Build an analyzer bound to a fixed model, dataset and label series
    fn build(inputs: AnalyzerInputs) -> InsightsResult<Self>
    where
        Self: Sized;

    /// The model under analysis, if one is bound
    fn model(&self) -> Option<&Arc<dyn Model>>;

    /// Metric used for tree nodes and matrix cells
    fn metric(&self) -> Metric;

    /// Compute a complete error report for one set of parameters
    fn create_error_report(&self, filter_features: Option<&[String]>, params: TreeParams, compute_importances: bool) -> InsightsResult<ErrorReport>;

    /// Compute the error tree as a flat list of JSON nodes
    fn compute_error_tree(&self, features: &[String], filters: Option<&[Value]>, composite_filters: Option<&[Value]>, params: TreeParams) -> InsightsResult<Vec<Value>>;

    /// Compute the error matrix over one or two features
    fn compute_matrix(&self, features: &[String], filters: Option<&[Value]>, composite_filters: Option<&[Value]>) -> InsightsResult<Value>;

    /// Compute global feature importances, one per feature name
    fn compute_importances(&self) -> InsightsResult<Vec<f64>>;
}
