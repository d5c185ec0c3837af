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

//! Shared fixtures for the error analysis integration tests

#![allow(dead_code)]

use rai_core::{AnalyzerInputs, Dataset, ErrorAnalyzer, ErrorReport, InsightsContext, InsightsError, InsightsResult, Metric, Model, Series, TreeParams};
use serde_json::{Value, json};
use std::cell::Cell;
use std::sync::Arc;

/// Reports requested with this depth carry a tree node that violates the schema
pub const INVALID_REPORT_DEPTH: usize = 13;

/// Reports requested with this leaf count fail inside the analyzer
pub const FAILING_REPORT_LEAVES: usize = 17;

/// Predicts the first feature of every row
#[derive(Debug)]
pub struct EchoModel;

impl Model for EchoModel {
    fn predict(&self, dataset: &Dataset) -> InsightsResult<Series> {
        Ok(dataset.rows().iter().map(|row| row[0].clone()).collect())
    }
}

/// Analyzer returning canned trees and matrices while counting calls
pub struct StubAnalyzer {
    pub inputs: AnalyzerInputs,
    pub report_calls: Cell<usize>,
    pub tree_calls: Cell<usize>,
    pub matrix_calls: Cell<usize>,
    pub importance_calls: Cell<usize>,
}

impl StubAnalyzer {
    fn tree(&self, params: TreeParams) -> Vec<Value> {
        let size = self.inputs.dataset.len();
        let mut root = json!({
            "id": 0,
            "parentId": null,
            "nodeIndex": 0,
            "nodeName": "0",
            "size": size,
            "error": 1,
            "metricName": self.metric().display_name(),
            "metricValue": 1.0 / size.max(1) as f64,
            "isErrorMetric": self.metric().is_error_metric()
        });
        if params.max_depth == INVALID_REPORT_DEPTH {
            root["size"] = json!(-1);
        }

        let leaf = json!({
            "id": 1,
            "parentId": 0,
            "nodeIndex": 1,
            "condition": format!("{} <= 40", self.inputs.feature_names[0]),
            "method": "less and equal",
            "arg": 40,
            "size": size / 2,
            "error": 0,
            "pathFromRoot": []
        });
        vec![root, leaf]
    }

    fn matrix(&self, features: &[String]) -> Value {
        let values: Vec<String> = features.iter().map(|feature| format!("{feature}-bin")).collect();
        json!({
            "category1": {"values": values, "intervalMin": 0, "intervalMax": 100},
            "matrix": [[{"count": self.inputs.dataset.len(), "falseCount": 1}]]
        })
    }
}

impl ErrorAnalyzer for StubAnalyzer {
    fn build(inputs: AnalyzerInputs) -> InsightsResult<Self> {
        Ok(Self {
            inputs,
            report_calls: Cell::new(0),
            tree_calls: Cell::new(0),
            matrix_calls: Cell::new(0),
            importance_calls: Cell::new(0),
        })
    }

    fn model(&self) -> Option<&Arc<dyn Model>> {
        self.inputs.model.as_ref()
    }

    fn metric(&self) -> Metric {
        Metric::ErrorRate
    }

    fn create_error_report(&self, filter_features: Option<&[String]>, params: TreeParams, compute_importances: bool) -> InsightsResult<ErrorReport> {
        self.report_calls.set(self.report_calls.get() + 1);
        if params.num_leaves == FAILING_REPORT_LEAVES {
            return Err(InsightsError::Analyzer(format!("surrogate tree could not be trained with {} leaves", params.num_leaves)));
        }

        let matrix = filter_features.map(|features| self.matrix(features));
        let mut report = ErrorReport::new(self.tree(params), matrix, self.inputs.feature_names.clone(), filter_features.map(<[String]>::to_vec));
        if compute_importances {
            report = report.with_importances(self.importances());
        }
        Ok(report.with_metadata(json!({"maxDepth": params.max_depth, "numLeaves": params.num_leaves})))
    }

    fn compute_error_tree(&self, _features: &[String], _filters: Option<&[Value]>, _composite_filters: Option<&[Value]>, params: TreeParams) -> InsightsResult<Vec<Value>> {
        self.tree_calls.set(self.tree_calls.get() + 1);
        Ok(self.tree(params))
    }

    fn compute_matrix(&self, features: &[String], _filters: Option<&[Value]>, _composite_filters: Option<&[Value]>) -> InsightsResult<Value> {
        self.matrix_calls.set(self.matrix_calls.get() + 1);
        Ok(self.matrix(features))
    }

    fn compute_importances(&self) -> InsightsResult<Vec<f64>> {
        self.importance_calls.set(self.importance_calls.get() + 1);
        Ok(self.importances())
    }
}

impl StubAnalyzer {
    fn importances(&self) -> Vec<f64> {
        let count = self.inputs.feature_names.len().max(1);
        vec![1.0 / count as f64; self.inputs.feature_names.len()]
    }
}

/// Small credit dataset with an `approved` target column
pub fn credit_dataset() -> Dataset {
    Dataset::new(
        vec!["age".to_string(), "income".to_string(), "city".to_string(), "approved".to_string()],
        vec![
            vec![json!(25), json!(32000.0), json!("Leeds"), json!(0)],
            vec![json!(41), json!(58000.0), json!("York"), json!(1)],
            vec![json!(37), json!(47000.0), json!("Leeds"), json!(1)],
            vec![json!(52), json!(61000.0), json!("Bath"), json!(0)],
        ],
    )
    .unwrap()
}

pub fn context() -> InsightsContext {
    InsightsContext::new(Some(Arc::new(EchoModel)), credit_dataset(), "approved")
        .with_classes(vec![json!(0), json!(1)])
        .with_categorical_features(["city"])
}

pub fn context_without_model() -> InsightsContext {
    InsightsContext::new(None, credit_dataset(), "approved")
}
