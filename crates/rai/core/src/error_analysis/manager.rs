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

//! Error Analysis Manager
//!
//! Registers error analysis configurations against one model and test
//! dataset, computes a report per configuration through the bound analyzer,
//! and persists configurations and reports as a directory of entries.

use super::store;
use super::{ErrorAnalysisConfig, ErrorAnalysisData, ErrorAnalysisSettings, ErrorReport};
use crate::analyzer::{AnalyzerInputs, ErrorAnalyzer};
use crate::context::InsightsContext;
use crate::data::{Dataset, Series};
use crate::schema::ReportSchema;
use rai_common::{BaseConfig, InsightsError, InsightsResult, Manager, ManagerNames};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Snapshot returned by [`Manager::list`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorAnalysisListing {
    pub manager_type: String,
    /// Registered configurations in registration order
    pub reports: Vec<ErrorAnalysisConfig>,
}

/// Manager for discovering where a model makes errors
pub struct ErrorAnalysisManager<A: ErrorAnalyzer> {
    dataset: Arc<Dataset>,
    true_y: Arc<Series>,
    feature_names: Vec<String>,
    classes: Option<Vec<Value>>,
    categorical_features: Option<Vec<String>>,
    configs: Vec<ErrorAnalysisConfig>,
    reports: Vec<ErrorReport>,
    analyzer: A,
    schema: ReportSchema,
    settings: ErrorAnalysisSettings,
}

impl<A: ErrorAnalyzer> ErrorAnalysisManager<A> {
    /// Create a manager for the model and test data of `context`
    pub fn new(context: &InsightsContext) -> InsightsResult<Self> {
        Self::with_settings(context, ErrorAnalysisSettings::default())
    }

    pub fn with_settings(context: &InsightsContext, settings: ErrorAnalysisSettings) -> InsightsResult<Self> {
        let schema = ReportSchema::resolve(settings.schema_path.as_deref())?;
        Self::bind(context, settings, schema, Vec::new(), Vec::new())
    }

    /// Restore a manager saved under `path` and rebind it to `context`
    pub fn load(path: impl AsRef<Path>, context: &InsightsContext) -> InsightsResult<Self> {
        Self::load_with_settings(path, context, ErrorAnalysisSettings::default())
    }

    pub fn load_with_settings(path: impl AsRef<Path>, context: &InsightsContext, settings: ErrorAnalysisSettings) -> InsightsResult<Self> {
        let path = path.as_ref();
        let schema = ReportSchema::resolve(settings.schema_path.as_deref())?;

        let entries = store::read_entries(path, &settings.layout, &schema)?;
        let (configs, reports): (Vec<_>, Vec<_>) = entries.into_iter().map(|entry| (entry.config, entry.report)).unzip();
        info!("Loaded {} error analysis entries from {}", configs.len(), path.display());

        Self::bind(context, settings, schema, configs, reports)
    }

    fn bind(context: &InsightsContext, settings: ErrorAnalysisSettings, schema: ReportSchema, configs: Vec<ErrorAnalysisConfig>, reports: Vec<ErrorReport>) -> InsightsResult<Self> {
        let (features, true_y) = context.test.drop_column(&context.target_column)?;
        let feature_names = features.columns().to_vec();
        let dataset = Arc::new(features);
        let true_y = Arc::new(true_y);

        let analyzer = A::build(AnalyzerInputs {
            model: context.model.clone(),
            dataset: Arc::clone(&dataset),
            true_y: Arc::clone(&true_y),
            feature_names: feature_names.clone(),
            categorical_features: context.categorical_features.clone(),
            classes: context.classes.clone(),
        })?;

        Ok(Self {
            dataset,
            true_y,
            feature_names,
            classes: context.classes.clone(),
            categorical_features: context.categorical_features.clone(),
            configs,
            reports,
            analyzer,
            schema,
            settings,
        })
    }

    /// Register a configuration to be computed later
    pub fn add(&mut self, config: ErrorAnalysisConfig) -> InsightsResult<()> {
        if self.analyzer.model().is_none() {
            return Err(InsightsError::user_config("Model is required for error analysis"));
        }

        let config = ErrorAnalysisConfig { is_computed: false, ..config };
        config.validate(&self.feature_names)?;

        if config.is_duplicate(&self.configs) {
            return Err(InsightsError::DuplicateManagerConfig(
                "Duplicate config specified for error analysis, config already added".to_string(),
            ));
        }

        info!(
            "Registered error analysis config max_depth={} num_leaves={} min_child_samples={} filter_features={:?}",
            config.max_depth, config.num_leaves, config.min_child_samples, config.filter_features
        );
        self.configs.push(config);
        Ok(())
    }

    /// Recompute the dashboard view of every registered configuration
    ///
    /// This always calls the analyzer; computed reports are not reused. The
    /// matrix spans all features regardless of each config's filter features.
    pub fn get_data(&self) -> InsightsResult<Vec<ErrorAnalysisData>> {
        let metric = self.analyzer.metric().display_name().to_string();
        let listing = self.list();

        listing
            .reports
            .iter()
            .map(|config| -> InsightsResult<ErrorAnalysisData> {
                let tree = self.analyzer.compute_error_tree(&self.feature_names, None, None, config.tree_params())?;
                let matrix = self.analyzer.compute_matrix(&self.feature_names, None, None)?;
                let importances = self.analyzer.compute_importances()?;

                Ok(ErrorAnalysisData {
                    max_depth: config.max_depth,
                    num_leaves: config.num_leaves,
                    min_child_samples: config.min_child_samples,
                    tree,
                    matrix,
                    importances,
                    metric: metric.clone(),
                })
            })
            .collect()
    }

    /// Registered configurations in registration order
    pub fn configs(&self) -> &[ErrorAnalysisConfig] {
        &self.configs
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Feature columns of the bound dataset
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn true_y(&self) -> &Series {
        &self.true_y
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn classes(&self) -> Option<&[Value]> {
        self.classes.as_deref()
    }

    pub fn categorical_features(&self) -> Option<&[String]> {
        self.categorical_features.as_deref()
    }

    pub fn settings(&self) -> &ErrorAnalysisSettings {
        &self.settings
    }
}

impl<A: ErrorAnalyzer> Manager for ErrorAnalysisManager<A> {
    type Output = ErrorReport;
    type Listing = ErrorAnalysisListing;

    fn name(&self) -> &'static str {
        ManagerNames::ERROR_ANALYSIS
    }

    fn compute(&mut self) -> InsightsResult<()> {
        for config in self.configs.iter_mut() {
            if config.is_computed {
                debug!("Skipping computed error analysis config max_depth={}", config.max_depth);
                continue;
            }

            let report = self.analyzer.create_error_report(config.filter_features.as_deref(), config.tree_params(), true)?;
            config.is_computed = true;

            if let Err(e) = self.schema.validate(&report.to_value()?) {
                warn!("Error report {} failed schema validation: {}", report.id, e);
                return Err(e);
            }

            info!("Computed error report {} for max_depth={} num_leaves={}", report.id, config.max_depth, config.num_leaves);
            self.reports.push(report);
        }

        Ok(())
    }

    fn get(&self) -> &[ErrorReport] {
        &self.reports
    }

    fn list(&self) -> ErrorAnalysisListing {
        ErrorAnalysisListing {
            manager_type: self.name().to_string(),
            reports: self.configs.clone(),
        }
    }

    fn save(&self, path: &Path) -> InsightsResult<()> {
        if self.configs.len() != self.reports.len() {
            return Err(InsightsError::ConfigAndResultMismatch {
                configs: self.configs.len(),
                results: self.reports.len(),
            });
        }

        let written = store::write_entries(path, self.configs.iter().zip(self.reports.iter()), &self.settings.layout)?;
        info!("Saved {} error analysis entries to {}", written, path.display());
        Ok(())
    }
}
