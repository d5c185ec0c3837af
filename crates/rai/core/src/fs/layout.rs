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
use std::fs;
use std::io::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory and file names used when persisting manager state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceLayout {
    pub config_dir: String,
    pub data_dir: String,
    pub config_file: String,
    pub report_file: String,
    /// Zero padding of generated sub-directory names
    pub index_width: usize,
}

impl Default for PersistenceLayout {
    /// Returns the layout written by the error analysis manager.
    fn default() -> Self {
        Self {
            config_dir: "config".to_string(),
            data_dir: "data".to_string(),
            config_file: "config.json".to_string(),
            report_file: "report.json".to_string(),
            index_width: 4,
        }
    }
}

/// Enum representing the two kinds of directories inside one state entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryDirectory {
    Config,
    Data,
}

/// Locates or creates the paired config and data directories of one state entry.
///
/// Entries live in sub-directories of a parent path. Generated sub-directory
/// names are zero-padded indices so that listing them restores creation order.
#[derive(Debug, Clone)]
pub struct DirectoryManager {
    parent: PathBuf,
    sub_directory: String,
    layout: PersistenceLayout,
}

impl DirectoryManager {
    /// Allocates the next free entry index under `parent`.
    pub fn new(parent: impl AsRef<Path>, layout: PersistenceLayout) -> Result<Self> {
        let parent = parent.as_ref().to_path_buf();
        let next = Self::next_index(&parent)?;
        let sub_directory = format!("{:0width$}", next, width = layout.index_width);
        debug!("Allocated state entry {} under {}", sub_directory, parent.display());
        Ok(Self { parent, sub_directory, layout })
    }

    /// Binds to an existing (or explicitly named) entry.
    pub fn with_sub_directory(parent: impl AsRef<Path>, sub_directory: impl Into<String>, layout: PersistenceLayout) -> Self {
        Self {
            parent: parent.as_ref().to_path_buf(),
            sub_directory: sub_directory.into(),
            layout,
        }
    }

    /// Name of the entry sub-directory.
    pub fn sub_directory_name(&self) -> &str {
        &self.sub_directory
    }

    /// Path of the entry sub-directory.
    pub fn entry_path(&self) -> PathBuf {
        self.parent.join(&self.sub_directory)
    }

    /// Returns the path of one of the entry's directories without creating it.
    pub fn directory(&self, kind: EntryDirectory) -> PathBuf {
        let name = match kind {
            EntryDirectory::Config => &self.layout.config_dir,
            EntryDirectory::Data => &self.layout.data_dir,
        };
        self.entry_path().join(name)
    }

    /// Ensures one of the entry's directories exists and returns its path.
    pub fn create_directory(&self, kind: EntryDirectory) -> Result<PathBuf> {
        let path = self.directory(kind);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    pub fn create_config_directory(&self) -> Result<PathBuf> {
        self.create_directory(EntryDirectory::Config)
    }

    pub fn create_data_directory(&self) -> Result<PathBuf> {
        self.create_directory(EntryDirectory::Data)
    }

    pub fn get_config_directory(&self) -> PathBuf {
        self.directory(EntryDirectory::Config)
    }

    pub fn get_data_directory(&self) -> PathBuf {
        self.directory(EntryDirectory::Data)
    }

    /// Path of the entry's config file.
    pub fn config_file_path(&self) -> PathBuf {
        self.get_config_directory().join(&self.layout.config_file)
    }

    /// Path of the entry's report file.
    pub fn report_file_path(&self) -> PathBuf {
        self.get_data_directory().join(&self.layout.report_file)
    }

    /// Lists entry sub-directories of `parent` in creation order.
    ///
    /// Numeric names sort by value; any other names follow in lexical order.
    pub fn list_sub_directories(parent: impl AsRef<Path>) -> Result<Vec<String>> {
        let parent = parent.as_ref();
        let mut names = Vec::new();

        if !parent.exists() {
            return Ok(names);
        }

        for entry in fs::read_dir(parent)? {
            let entry = entry?;
            if entry.file_type()?.is_dir()
                && let Some(name) = entry.file_name().to_str()
            {
                names.push(name.to_string());
            }
        }

        names.sort_by(|a, b| match (a.parse::<u64>(), b.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        });
        Ok(names)
    }

    /// Returns the next available entry index under `parent`.
    pub fn next_index(parent: impl AsRef<Path>) -> Result<u64> {
        let names = Self::list_sub_directories(parent)?;
        Ok(names.iter().filter_map(|name| name.parse::<u64>().ok()).max().map_or(0, |max| max + 1))
    }
}
