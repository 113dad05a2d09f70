//! # incremental-units: Hypothesis Nodes for Incremental Processing
//!
//! The node abstraction of an incremental hypothesis graph: each
//! [`IncrementalUnit`] holds one partial piece of information (a word
//! fragment, a predicted action, a realised utterance segment) and weighted
//! back-references to the units that justified it.
//!
//! ## Design Principles
//!
//! 1. **Identity is injected**: ids come from an [`IdSource`] the owning graph controls
//! 2. **Identity ≠ content**: `==` compares ids, [`IncrementalUnit::same_content`] compares state
//! 3. **Rejections are values**: invalid weights return [`Error::InvalidWeight`] and log a warning
//! 4. **Pure data**: no I/O, no locks, no async inside a unit
//!
//! ## Quick Start
//!
//! ```rust
//! use incremental_units::{IncrementalUnit, SequentialIds};
//!
//! # fn example() -> incremental_units::Result<()> {
//! let ids = SequentialIds::new();
//! let hello = IncrementalUnit::from_text(&ids, "u_u", "hello");
//! let mut hello_world = IncrementalUnit::from_text(&ids, "u_u", "hello world");
//!
//! hello_world.connect(&hello, 0.8)?;
//! assert_eq!(hello_world.weight_of(hello.id()), Some(0.8));
//! assert_eq!(hello.weight_of(hello_world.id()), None);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Identifier Strategies
//!
//! | Strategy | Type | Uniqueness |
//! |----------|------|------------|
//! | Sequential | [`SequentialIds`] | Guaranteed until `u64` wrap-around |
//! | Random | [`RandomIds`] | Probabilistic, collisions not detected |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod ids;
pub mod config;
pub mod rules;
pub mod speech;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{IncrementalUnit, UnitId, Value, MIN_WEIGHT, MAX_WEIGHT, is_valid_weight};

// ============================================================================
// Re-exports: Identity & configuration
// ============================================================================

pub use ids::{IdSource, SequentialIds, RandomIds};
pub use config::{UnitConfig, IdStrategy, UnitFactory};

// ============================================================================
// Re-exports: Collaborators
// ============================================================================

pub use rules::{ModelType, RuleBucket, RuleBuckets};
pub use speech::{SpeechSynthesiser, RecordingSynthesiser, TracingSynthesiser};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Invalid weight {weight} for connection {unit} -> {previous}: must lie in [0, 1]")]
    InvalidWeight { unit: UnitId, previous: UnitId, weight: f64 },

    #[error("Unit {previous} is not connected to {unit}")]
    NotConnected { unit: UnitId, previous: UnitId },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown model type: {0}")]
    UnknownModelType(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),
}

pub type Result<T> = std::result::Result<T, Error>;
