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

//! Tabular data and model handles
//!
//! A [`Dataset`] is a small row-major table of JSON scalar cells. It carries
//! just enough structure for the managers to split off the label column and
//! hand features, labels and feature names to the analyzer.

use rai_common::{InsightsError, InsightsResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One column of values, such as the true labels
pub type Series = Vec<Value>;

/// Row-major table with named columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Create a dataset, checking that every row matches the column count
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> InsightsResult<Self> {
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != columns.len()) {
            return Err(InsightsError::user_config(format!(
                "Row {index} has {} values but the dataset has {} columns",
                row.len(),
                columns.len()
            )));
        }

        let mut seen = std::collections::HashSet::new();
        if let Some(duplicate) = columns.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(InsightsError::user_config(format!("Duplicate column name: {duplicate}")));
        }

        Ok(Self { columns, rows })
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Split off `target` and return the remaining features together with the target values
    pub fn drop_column(&self, target: &str) -> InsightsResult<(Dataset, Series)> {
        let index = self
            .column_index(target)
            .ok_or_else(|| InsightsError::user_config(format!("Target column '{target}' not found in dataset")))?;

        let mut columns = self.columns.clone();
        columns.remove(index);

        let mut labels = Vec::with_capacity(self.rows.len());
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                labels.push(row.remove(index));
                row
            })
            .collect();

        Ok((Dataset { columns, rows }, labels))
    }
}

/// A trained model the analyzer can query
///
/// Implementations wrap whatever inference backend produced the model. The
/// managers never call the model directly; they only hand it to the analyzer.
pub trait Model: fmt::Debug {
    /// Predict one value per row
    fn predict(&self, dataset: &Dataset) -> InsightsResult<Series>;

    /// Class probabilities per row, for classifiers that expose them
    fn predict_proba(&self, _dataset: &Dataset) -> Option<InsightsResult<Vec<Vec<f64>>>> {
        None
    }
}
