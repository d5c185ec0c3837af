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

//! Reading and writing persisted error analysis entries

use super::{ErrorAnalysisConfig, ErrorReport};
use crate::fs::{DirectoryManager, PersistenceLayout};
use crate::schema::ReportSchema;
use rai_common::{InsightsError, InsightsResult};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// One config and report pair read back from disk
#[derive(Debug, Clone)]
pub struct PersistedEntry {
    /// Name of the entry sub-directory
    pub sub_directory: String,
    pub config: ErrorAnalysisConfig,
    pub report: ErrorReport,
}

/// Write each config and report pair into a fresh entry under `path`
pub fn write_entries<'a>(path: &Path, entries: impl IntoIterator<Item = (&'a ErrorAnalysisConfig, &'a ErrorReport)>, layout: &PersistenceLayout) -> InsightsResult<usize> {
    fs::create_dir_all(path)?;

    let mut written = 0;
    for (config, report) in entries {
        let directory_manager = DirectoryManager::new(path, layout.clone())?;

        directory_manager.create_config_directory()?;
        fs::write(directory_manager.config_file_path(), config.to_json()?)?;

        directory_manager.create_data_directory()?;
        fs::write(directory_manager.report_file_path(), report.to_json()?)?;

        debug!("Wrote error analysis entry {}", directory_manager.sub_directory_name());
        written += 1;
    }

    Ok(written)
}

/// Read the config of one entry
pub fn read_config(directory_manager: &DirectoryManager) -> InsightsResult<ErrorAnalysisConfig> {
    let path = directory_manager.config_file_path();
    let content = read_entry_file(&path)?;
    ErrorAnalysisConfig::from_json(&content)
}

/// Read the raw JSON of one entry's report
pub fn read_report_value(directory_manager: &DirectoryManager) -> InsightsResult<Value> {
    let path = directory_manager.report_file_path();
    let content = read_entry_file(&path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Read one entry's report, validating it against `schema`
pub fn read_report(directory_manager: &DirectoryManager, schema: &ReportSchema) -> InsightsResult<ErrorReport> {
    let value = read_report_value(directory_manager)?;
    schema.validate(&value)?;

    ErrorReport::from_value(value)
}

/// Read every entry under `path` in creation order
///
/// Fails when two entries hold equal configs, which happens when state is
/// saved twice into the same directory.
pub fn read_entries(path: &Path, layout: &PersistenceLayout, schema: &ReportSchema) -> InsightsResult<Vec<PersistedEntry>> {
    let mut entries: Vec<PersistedEntry> = Vec::new();

    for sub_directory in DirectoryManager::list_sub_directories(path)? {
        let directory_manager = DirectoryManager::with_sub_directory(path, sub_directory.clone(), layout.clone());
        let config = read_config(&directory_manager)?;
        if let Some(existing) = entries.iter().find(|entry| entry.config == config) {
            return Err(InsightsError::InvalidPersistedState {
                path: directory_manager.entry_path().display().to_string(),
                reason: format!("config duplicates entry {}", existing.sub_directory),
            });
        }
        let report = read_report(&directory_manager, schema)?;

        debug!("Read error analysis entry {}", sub_directory);
        entries.push(PersistedEntry { sub_directory, config, report });
    }

    Ok(entries)
}

fn read_entry_file(path: &Path) -> InsightsResult<String> {
    if !path.is_file() {
        return Err(InsightsError::InvalidPersistedState {
            path: path.display().to_string(),
            reason: "file is missing".to_string(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn computed_config(max_depth: usize) -> ErrorAnalysisConfig {
        let mut config = ErrorAnalysisConfig::default().with_max_depth(max_depth);
        config.is_computed = true;
        config
    }

    fn report() -> ErrorReport {
        ErrorReport::new(vec![json!({"id": 0, "parentId": null, "size": 10, "error": 1})], None, vec!["age".to_string()], None)
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let layout = PersistenceLayout::default();
        let schema = ReportSchema::error_analysis().unwrap();

        let configs = vec![computed_config(3), computed_config(5)];
        let reports = vec![report(), report()];

        let written = write_entries(temp_dir.path(), configs.iter().zip(reports.iter()), &layout).unwrap();
        assert_eq!(written, 2);
        assert!(temp_dir.path().join("0000").join("config").join("config.json").is_file());
        assert!(temp_dir.path().join("0001").join("data").join("report.json").is_file());

        let entries = read_entries(temp_dir.path(), &layout, &schema).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].config, configs[0]);
        assert_eq!(entries[1].config, configs[1]);
        assert!(entries[1].config.is_computed);
        assert_eq!(entries[0].report, reports[0]);
        assert_eq!(entries[1].sub_directory, "0001");
    }

    #[test]
    fn test_missing_report_file() {
        let temp_dir = TempDir::new().unwrap();
        let layout = PersistenceLayout::default();
        let directory_manager = DirectoryManager::new(temp_dir.path(), layout.clone()).unwrap();
        directory_manager.create_config_directory().unwrap();
        fs::write(directory_manager.config_file_path(), computed_config(3).to_json().unwrap()).unwrap();

        let err = read_entries(temp_dir.path(), &layout, &ReportSchema::error_analysis().unwrap()).unwrap_err();
        assert!(matches!(err, InsightsError::InvalidPersistedState { .. }));
    }

    #[test]
    fn test_schema_violation_on_read() {
        let temp_dir = TempDir::new().unwrap();
        let layout = PersistenceLayout::default();
        write_entries(temp_dir.path(), [(&computed_config(3), &report())], &layout).unwrap();

        let report_path = temp_dir.path().join("0000").join("data").join("report.json");
        fs::write(&report_path, json!({"jsonTree": [{"id": "root"}], "jsonMatrix": null, "id": "x", "version": "1.0"}).to_string()).unwrap();

        let err = read_entries(temp_dir.path(), &layout, &ReportSchema::error_analysis().unwrap()).unwrap_err();
        assert!(matches!(err, InsightsError::SchemaValidation(_)));
    }

    #[test]
    fn test_duplicate_entries_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let layout = PersistenceLayout::default();
        write_entries(temp_dir.path(), [(&computed_config(3), &report())], &layout).unwrap();
        write_entries(temp_dir.path(), [(&computed_config(3), &report())], &layout).unwrap();

        let err = read_entries(temp_dir.path(), &layout, &ReportSchema::error_analysis().unwrap()).unwrap_err();
        match err {
            InsightsError::InvalidPersistedState { path, reason } => {
                assert!(path.ends_with("0001"));
                assert!(reason.contains("0000"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let entries = read_entries(temp_dir.path(), &PersistenceLayout::default(), &ReportSchema::error_analysis().unwrap()).unwrap();
        assert!(entries.is_empty());
    }
}
