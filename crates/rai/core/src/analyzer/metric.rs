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

use serde::{Deserialize, Serialize};
use std::fmt;

/// Metric the analyzer uses to score tree nodes and matrix cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    MeanAbsoluteError,
    MeanSquaredError,
    MedianAbsoluteError,
    R2Score,
    F1Score,
    MacroF1Score,
    MicroF1Score,
    PrecisionScore,
    MacroPrecisionScore,
    MicroPrecisionScore,
    RecallScore,
    MacroRecallScore,
    MicroRecallScore,
    AccuracyScore,
    ErrorRate,
}

impl Metric {
    /// Human-readable name shown in the dashboard
    pub fn display_name(&self) -> &'static str {
        match self {
            Metric::MeanAbsoluteError => "Mean absolute error",
            Metric::MeanSquaredError => "Mean squared error",
            Metric::MedianAbsoluteError => "Median absolute error",
            Metric::R2Score => "R2 score",
            Metric::F1Score => "F1 score",
            Metric::MacroF1Score => "Macro F1 score",
            Metric::MicroF1Score => "Micro F1 score",
            Metric::PrecisionScore => "Precision score",
            Metric::MacroPrecisionScore => "Macro precision score",
            Metric::MicroPrecisionScore => "Micro precision score",
            Metric::RecallScore => "Recall score",
            Metric::MacroRecallScore => "Macro recall score",
            Metric::MicroRecallScore => "Micro recall score",
            Metric::AccuracyScore => "Accuracy score",
            Metric::ErrorRate => "Error rate",
        }
    }

    /// Whether lower values mean better model performance
    pub fn is_error_metric(&self) -> bool {
        matches!(self, Metric::MeanAbsoluteError | Metric::MeanSquaredError | Metric::MedianAbsoluteError | Metric::ErrorRate)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
