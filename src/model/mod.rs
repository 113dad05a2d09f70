//! # Incremental Unit Model
//!
//! The node type of the incremental hypothesis graph and the payload values
//! it carries. Units reference their predecessors by [`UnitId`] only, so a
//! graph structure can own and traverse them without borrowing across nodes.
//!
//! Design rule: this module is pure data: no I/O, no shared state, no async.

pub mod unit;
pub mod value;

pub use unit::{IncrementalUnit, UnitId, MIN_WEIGHT, MAX_WEIGHT, is_valid_weight};
pub use value::Value;
