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

//! Manager contracts
//!
//! A manager owns an ordered list of configurations and the results computed
//! for them. The parent insights object only talks to managers through the
//! [`Manager`] trait; configurations share the duplicate detection of
//! [`BaseConfig`].

use crate::InsightsResult;
use serde::Serialize;
use std::path::Path;

/// Registered manager names
pub struct ManagerNames;

impl ManagerNames {
    pub const ERROR_ANALYSIS: &'static str = "error_analysis";
}

/// Keys shared by every manager listing
pub struct ListProperties;

impl ListProperties {
    pub const MANAGER_TYPE: &'static str = "manager_type";
}

/// Common behaviour of manager configurations
pub trait BaseConfig: PartialEq + Sized {
    /// Whether a result has already been computed for this configuration
    fn is_computed(&self) -> bool;

    /// Returns true if an equal configuration is already present in `existing`
    fn is_duplicate(&self, existing: &[Self]) -> bool {
        existing.iter().any(|config| config == self)
    }
}

/// Contract implemented by every insights manager
pub trait Manager {
    /// Result type produced for one configuration
    type Output;

    /// Serializable snapshot returned by [`Manager::list`]
    type Listing: Serialize;

    /// Manager type name used in listings
    fn name(&self) -> &'static str;

    /// Compute results for every configuration that has not been computed yet
    fn compute(&mut self) -> InsightsResult<()>;

    /// Computed results, in configuration order
    fn get(&self) -> &[Self::Output];

    /// Snapshot of the registered configurations
    fn list(&self) -> Self::Listing;

    /// Persist configurations and results under `path`
    ///
    /// Entries are added after any already present, so saving the same
    /// state twice into one directory leaves it unloadable.
    fn save(&self, path: &Path) -> InsightsResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct DepthConfig {
        depth: u32,
    }

    impl BaseConfig for DepthConfig {
        fn is_computed(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_is_duplicate() {
        let existing = vec![DepthConfig { depth: 1 }, DepthConfig { depth: 2 }];
        assert!(DepthConfig { depth: 2 }.is_duplicate(&existing));
        assert!(!DepthConfig { depth: 3 }.is_duplicate(&existing));
        assert!(!DepthConfig { depth: 1 }.is_duplicate(&[]));
    }
}
