//! Fixture data generator
//!
//! Draws synthetic records from bounded pools and ranges. Draws are
//! independent: nothing but the RNG state carries from one call to the next.

use crate::config::{GeneratorConfig, IntRange};
use crate::error::HarnessResult;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One synthetic or caller-supplied record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixtureRecord {
    /// Identifier
    pub id: i64,
    /// Foreign-key identifier
    pub fk_id: i64,
    /// Drawn from the name pool
    pub name: String,
    /// Drawn from the color pool
    pub color: String,
    /// Measurement
    pub weight: i64,
    /// Measurement
    pub height: i64,
}

impl FixtureRecord {
    /// Record with explicit values
    pub fn new(
        id: i64,
        fk_id: i64,
        name: impl Into<String>,
        color: impl Into<String>,
        weight: i64,
        height: i64,
    ) -> Self {
        FixtureRecord {
            id,
            fk_id,
            name: name.into(),
            color: color.into(),
            weight,
            height,
        }
    }
}

type Pool = SmallVec<[String; 6]>;

/// Random record source
#[derive(Debug, Clone)]
pub struct FixtureGenerator {
    names: Pool,
    colors: Pool,
    id: IntRange,
    fk_id: IntRange,
    weight: IntRange,
    height: IntRange,
    rng: StdRng,
}

impl FixtureGenerator {
    /// Generator over `config`, seeded from `config.seed` or entropy
    pub fn from_config(config: &GeneratorConfig) -> HarnessResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Generator over `config` with a fixed seed
    pub fn seeded(config: &GeneratorConfig, seed: u64) -> HarnessResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &GeneratorConfig, rng: StdRng) -> HarnessResult<Self> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: &GeneratorConfig, rng: StdRng) -> Self {
        FixtureGenerator {
            names: config.names.iter().cloned().collect(),
            colors: config.colors.iter().cloned().collect(),
            id: config.id,
            fk_id: config.fk_id,
            weight: config.weight,
            height: config.height,
            rng,
        }
    }

    /// Draw one record
    pub fn generate(&mut self) -> FixtureRecord {
        let name = self.pick_name();
        let color = self.pick_color();
        FixtureRecord {
            id: self.rng.gen_range(self.id.as_range()),
            fk_id: self.rng.gen_range(self.fk_id.as_range()),
            name,
            color,
            weight: self.rng.gen_range(self.weight.as_range()),
            height: self.rng.gen_range(self.height.as_range()),
        }
    }

    /// Draw `count` records
    pub fn generate_many(&mut self, count: usize) -> Vec<FixtureRecord> {
        (0..count).map(|_| self.generate()).collect()
    }

    /// Name pool
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Color pool
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    fn pick_name(&mut self) -> String {
        let idx = self.rng.gen_range(0..self.names.len());
        self.names[idx].clone()
    }

    fn pick_color(&mut self) -> String {
        let idx = self.rng.gen_range(0..self.colors.len());
        self.colors[idx].clone()
    }
}

impl Default for FixtureGenerator {
    /// Reference pools and ranges, seeded from entropy
    fn default() -> Self {
        Self::build(&GeneratorConfig::default(), StdRng::from_entropy())
    }
}
