//! # Unit Configuration
//!
//! Selects how unit identifiers are generated and builds a [`UnitFactory`]
//! around the chosen [`IdSource`]. Loadable from JSON:
//!
//! ```json
//! { "ids": { "strategy": "random", "seed": 42 } }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ids::{IdSource, RandomIds, SequentialIds};
use crate::model::{IncrementalUnit, Value};
use crate::{Error, Result};

// ============================================================================
// Configuration
// ============================================================================

/// Identifier generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum IdStrategy {
    /// Monotonic counter starting at `start`.
    Sequential {
        #[serde(default = "default_start")]
        start: u64,
    },

    /// Random 64-bit ids; `seed` makes the sequence reproducible.
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
}

fn default_start() -> u64 { 1 }

impl Default for IdStrategy {
    fn default() -> Self {
        IdStrategy::Sequential { start: default_start() }
    }
}

impl IdStrategy {
    /// Instantiate the identifier source this strategy describes.
    pub fn source(&self) -> Arc<dyn IdSource> {
        match *self {
            IdStrategy::Sequential { start } => Arc::new(SequentialIds::starting_at(start)),
            IdStrategy::Random { seed: Some(seed) } => Arc::new(RandomIds::seeded(seed)),
            IdStrategy::Random { seed: None } => Arc::new(RandomIds::new()),
        }
    }
}

/// Configuration for creating units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitConfig {
    #[serde(default)]
    pub ids: IdStrategy,
}

impl UnitConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn build(&self) -> UnitFactory {
        UnitFactory::with_source(self.ids.source())
    }
}

// ============================================================================
// UnitFactory
// ============================================================================

/// Creates units from one shared identifier source.
///
/// Cloning the factory shares the source, so clones never hand out the same
/// sequential id twice.
#[derive(Clone)]
pub struct UnitFactory {
    ids: Arc<dyn IdSource>,
}

impl UnitFactory {
    pub fn new(ids: impl IdSource + 'static) -> Self {
        Self::with_source(Arc::new(ids))
    }

    pub fn with_source(ids: Arc<dyn IdSource>) -> Self {
        Self { ids }
    }

    /// Factory over a counter starting at 1.
    pub fn sequential() -> Self {
        Self::new(SequentialIds::new())
    }

    pub fn ids(&self) -> &dyn IdSource {
        self.ids.as_ref()
    }

    pub fn unit(&self, variable: impl Into<String>, payload: impl Into<Value>) -> IncrementalUnit {
        IncrementalUnit::new(self.ids.as_ref(), variable, payload)
    }

    pub fn unit_from_text(&self, variable: impl Into<String>, text: &str) -> IncrementalUnit {
        IncrementalUnit::from_text(self.ids.as_ref(), variable, text)
    }

    /// See [`IncrementalUnit::branch`].
    pub fn branch(&self, unit: &IncrementalUnit) -> IncrementalUnit {
        unit.branch(self.ids.as_ref())
    }
}

impl Default for UnitFactory {
    fn default() -> Self { Self::sequential() }
}

impl std::fmt::Debug for UnitFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitFactory").finish_non_exhaustive()
    }
}
