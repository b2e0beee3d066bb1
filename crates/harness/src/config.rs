//! Harness configuration via TOML
//!
//! Every field has a default, so an empty file (or no file at all) gives
//! the reference configuration: six names, six colors, the usual id and
//! measurement ranges, no result printing, partial-index drift preserved.

use crate::error::{HarnessError, HarnessResult};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;

/// What to do with a namespace whose indexes were only partly added
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialIndexPolicy {
    /// Leave the namespace as the store has it
    #[default]
    Keep,
    /// Drop the namespace before returning the index error
    DropNamespace,
}

/// Half-open integer range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    /// Inclusive lower bound
    pub start: i64,
    /// Exclusive upper bound
    pub end: i64,
}

impl IntRange {
    /// `[start, end)`
    pub const fn new(start: i64, end: i64) -> Self {
        IntRange { start, end }
    }

    /// As a std range
    pub fn as_range(&self) -> Range<i64> {
        self.start..self.end
    }

    /// Whether `v` lies inside
    pub fn contains(&self, v: i64) -> bool {
        self.as_range().contains(&v)
    }
}

/// Pools and ranges fixture records are drawn from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Name pool
    pub names: Vec<String>,
    /// Color pool
    pub colors: Vec<String>,
    /// Identifier range
    pub id: IntRange,
    /// Foreign-key identifier range
    pub fk_id: IntRange,
    /// Weight range
    pub weight: IntRange,
    /// Height range
    pub height: IntRange,
    /// Seed for reproducible draws; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            names: strings(&["bubble", "dog", "tomorrow", "car", "dinner", "dish"]),
            colors: strings(&["red", "green", "blue", "yellow", "purple", "orange"]),
            id: IntRange::new(0, 10_000),
            fk_id: IntRange::new(700_000, 710_000),
            weight: IntRange::new(0, 1_000),
            height: IntRange::new(0, 1_000),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Reject empty pools and empty ranges
    pub fn validate(&self) -> HarnessResult<()> {
        for (label, pool) in [("names", &self.names), ("colors", &self.colors)] {
            if pool.is_empty() {
                return Err(HarnessError::Config(format!("generator.{} is empty", label)));
            }
        }
        for (label, range) in [
            ("id", self.id),
            ("fk_id", self.fk_id),
            ("weight", self.weight),
            ("height", self.height),
        ] {
            if range.start >= range.end {
                return Err(HarnessError::Config(format!(
                    "generator.{} range [{}, {}) is empty",
                    label, range.start, range.end
                )));
            }
        }
        Ok(())
    }
}

/// Harness configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Render every select as a table
    pub print_results: bool,
    /// Handling of partly indexed namespaces
    pub partial_index_policy: PartialIndexPolicy,
    /// Fixture generator settings
    pub generator: GeneratorConfig,
}

impl HarnessConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> HarnessResult<Self> {
        let config: HarnessConfig = toml::from_str(text)
            .map_err(|e| HarnessError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: &Path) -> HarnessResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HarnessError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Check every section
    pub fn validate(&self) -> HarnessResult<()> {
        self.generator.validate()
    }

    /// Commented default config file content
    pub fn default_toml() -> &'static str {
        r#"# docfix harness configuration
#
# Render each select as a tab-separated table on the test output
print_results = false

# What to do when an index fails after the namespace was opened:
#   "keep"           = leave the partly indexed namespace in the store (default)
#   "drop_namespace" = drop it before returning the index error
partial_index_policy = "keep"

[generator]
names = ["bubble", "dog", "tomorrow", "car", "dinner", "dish"]
colors = ["red", "green", "blue", "yellow", "purple", "orange"]
id = { start = 0, end = 10000 }
fk_id = { start = 700000, end = 710000 }
weight = { start = 0, end = 1000 }
height = { start = 0, end = 1000 }
# seed = 42
"#
    }
}
