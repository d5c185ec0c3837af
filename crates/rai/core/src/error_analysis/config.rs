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

//! Error analysis configuration

use super::require_fields;
use crate::analyzer::TreeParams;
use rai_common::{BaseConfig, InsightsError, InsightsResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const DEFAULT_NUM_LEAVES: usize = 31;
pub const DEFAULT_MIN_CHILD_SAMPLES: usize = 20;

/// Maximum number of features the error matrix can be filtered on
pub const MAX_FILTER_FEATURES: usize = 2;

/// Parameters for one error analysis run
///
/// Two configurations are equal when their tunable parameters match;
/// `is_computed` is bookkeeping and does not take part in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorAnalysisConfig {
    /// Maximum depth of the tree
    pub max_depth: usize,
    /// Number of leaves in the tree
    pub num_leaves: usize,
    /// Minimal number of rows required to create one leaf
    pub min_child_samples: usize,
    /// One or two features used for the matrix filter
    pub filter_features: Option<Vec<String>>,
    /// Whether a report has been computed for this configuration
    pub is_computed: bool,
}

impl ErrorAnalysisConfig {
    /// Create an uncomputed configuration
    pub fn new(max_depth: usize, num_leaves: usize, min_child_samples: usize, filter_features: Option<Vec<String>>) -> Self {
        Self {
            max_depth,
            num_leaves,
            min_child_samples,
            filter_features,
            is_computed: false,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_num_leaves(mut self, num_leaves: usize) -> Self {
        self.num_leaves = num_leaves;
        self
    }

    pub fn with_min_child_samples(mut self, min_child_samples: usize) -> Self {
        self.min_child_samples = min_child_samples;
        self
    }

    pub fn with_filter_features<S: Into<String>>(mut self, features: impl IntoIterator<Item = S>) -> Self {
        self.filter_features = Some(features.into_iter().map(Into::into).collect());
        self
    }

    /// Tree hyperparameters of this configuration
    pub fn tree_params(&self) -> TreeParams {
        TreeParams {
            max_depth: self.max_depth,
            num_leaves: self.num_leaves,
            min_child_samples: self.min_child_samples,
        }
    }

    /// Check the parameters against the features available for analysis
    pub fn validate(&self, feature_names: &[String]) -> InsightsResult<()> {
        if self.max_depth == 0 {
            return Err(InsightsError::user_config("max_depth must be at least 1"));
        }
        if self.num_leaves < 2 {
            return Err(InsightsError::user_config(format!("num_leaves must be at least 2, got {}", self.num_leaves)));
        }

        if let Some(features) = &self.filter_features {
            if features.is_empty() || features.len() > MAX_FILTER_FEATURES {
                return Err(InsightsError::user_config(format!(
                    "filter_features must contain one or two feature names, got {}",
                    features.len()
                )));
            }
            if let Some(unknown) = features.iter().find(|feature| !feature_names.contains(feature)) {
                return Err(InsightsError::user_config(format!("Unknown filter feature: {unknown}")));
            }
        }

        Ok(())
    }

    /// Serialize to indented JSON
    pub fn to_json(&self) -> InsightsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON; all five fields must be present
    pub fn from_json(json: &str) -> InsightsResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        require_fields(&value, &["max_depth", "num_leaves", "min_child_samples", "filter_features", "is_computed"])?;
        Ok(serde_json::from_value(value)?)
    }
}

impl Default for ErrorAnalysisConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH, DEFAULT_NUM_LEAVES, DEFAULT_MIN_CHILD_SAMPLES, None)
    }
}

impl PartialEq for ErrorAnalysisConfig {
    fn eq(&self, other: &Self) -> bool {
        self.max_depth == other.max_depth
            && self.num_leaves == other.num_leaves
            && self.min_child_samples == other.min_child_samples
            && self.filter_features == other.filter_features
    }
}

impl BaseConfig for ErrorAnalysisConfig {
    fn is_computed(&self) -> bool {
        self.is_computed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn features() -> Vec<String> {
        vec!["age".to_string(), "income".to_string(), "city".to_string()]
    }

    #[test]
    fn test_defaults() {
        let config = ErrorAnalysisConfig::default();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.num_leaves, 31);
        assert_eq!(config.min_child_samples, 20);
        assert!(config.filter_features.is_none());
        assert!(!config.is_computed);
    }

    #[test]
    fn test_equality_ignores_is_computed() {
        let mut computed = ErrorAnalysisConfig::default();
        computed.is_computed = true;
        assert_eq!(computed, ErrorAnalysisConfig::default());
        assert!(computed.is_duplicate(&[ErrorAnalysisConfig::default()]));
    }

    #[test]
    fn test_filter_features_order_matters() {
        let first = ErrorAnalysisConfig::default().with_filter_features(["age", "income"]);
        let second = ErrorAnalysisConfig::default().with_filter_features(["income", "age"]);
        assert_ne!(first, second);
    }

    #[test]
    fn test_validate() {
        let names = features();
        assert!(ErrorAnalysisConfig::default().validate(&names).is_ok());
        assert!(ErrorAnalysisConfig::default().with_filter_features(["age"]).validate(&names).is_ok());

        let too_many = ErrorAnalysisConfig::default().with_filter_features(["age", "income", "city"]);
        assert!(matches!(too_many.validate(&names), Err(InsightsError::UserConfigValidation(_))));

        let empty = ErrorAnalysisConfig::default().with_filter_features(Vec::<String>::new());
        assert!(empty.validate(&names).is_err());

        let unknown = ErrorAnalysisConfig::default().with_filter_features(["height"]);
        let err = unknown.validate(&names).unwrap_err();
        assert!(err.to_string().contains("height"));

        assert!(ErrorAnalysisConfig::default().with_max_depth(0).validate(&names).is_err());
        assert!(ErrorAnalysisConfig::default().with_num_leaves(1).validate(&names).is_err());
    }

    #[test]
    fn test_json_layout() {
        let mut config = ErrorAnalysisConfig::new(4, 15, 10, Some(vec!["age".to_string()]));
        config.is_computed = true;

        let value: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "max_depth": 4,
                "num_leaves": 15,
                "min_child_samples": 10,
                "filter_features": ["age"],
                "is_computed": true
            })
        );

        let restored = ErrorAnalysisConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(restored, config);
        assert!(restored.is_computed);
    }

    #[test]
    fn test_from_json_requires_all_fields() {
        let partial = r#"{"max_depth": 3, "num_leaves": 31, "min_child_samples": 20, "is_computed": false}"#;
        let err = ErrorAnalysisConfig::from_json(partial).unwrap_err();
        assert!(err.to_string().contains("filter_features"));

        let explicit_null = r#"{"max_depth": 3, "num_leaves": 31, "min_child_samples": 20, "filter_features": null, "is_computed": false}"#;
        assert_eq!(ErrorAnalysisConfig::from_json(explicit_null).unwrap(), ErrorAnalysisConfig::default());
    }

    proptest! {
        #[test]
        fn prop_equality_is_structural(depth in 1usize..16, leaves in 2usize..64, samples in 0usize..100, computed in any::<bool>()) {
            let base = ErrorAnalysisConfig::new(depth, leaves, samples, None);
            let mut flagged = base.clone();
            flagged.is_computed = computed;
            prop_assert_eq!(&base, &flagged);

            let deeper = base.clone().with_max_depth(depth + 1);
            prop_assert_ne!(&base, &deeper);
        }
    }
}
