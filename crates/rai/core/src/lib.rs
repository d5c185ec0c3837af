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

//! Responsible-AI insights core
//!
//! Managers, data handles and persistence for the insights toolkit. The
//! error analysis manager registers analysis configurations against a
//! model and test dataset, computes schema-validated error reports through
//! an [`analyzer::ErrorAnalyzer`], and saves them as a directory of
//! config/report entries.

pub mod analyzer;
pub mod context;
pub mod data;
pub mod error_analysis;
pub mod fs;
pub mod schema;

pub use analyzer::{AnalyzerInputs, ErrorAnalyzer, Metric, TreeParams};
pub use context::InsightsContext;
pub use data::{Dataset, Model, Series};
pub use error_analysis::{ErrorAnalysisConfig, ErrorAnalysisData, ErrorAnalysisManager, ErrorAnalysisSettings, ErrorReport};
pub use rai_common::{BaseConfig, InsightsError, InsightsResult, Manager};
pub use schema::ReportSchema;
