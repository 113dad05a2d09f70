//! Rule buckets grouped by model type.
//!
//! Rules themselves are opaque here; this module only groups them under the
//! closed set of processing directions a dialogue domain declares.

use std::fmt;
use std::str::FromStr;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Processing direction a group of rules belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModelType {
    UserRealisation,
    UserPrediction,
    UserTransition,
    #[serde(rename = "SYSTEM_ACTIONVALUE")]
    SystemActionValue,
    SystemRealisation,
    SystemTransition,
}

impl ModelType {
    pub const ALL: [ModelType; 6] = [
        ModelType::UserRealisation,
        ModelType::UserPrediction,
        ModelType::UserTransition,
        ModelType::SystemActionValue,
        ModelType::SystemRealisation,
        ModelType::SystemTransition,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModelType::UserRealisation => "USER_REALISATION",
            ModelType::UserPrediction => "USER_PREDICTION",
            ModelType::UserTransition => "USER_TRANSITION",
            ModelType::SystemActionValue => "SYSTEM_ACTIONVALUE",
            ModelType::SystemRealisation => "SYSTEM_REALISATION",
            ModelType::SystemTransition => "SYSTEM_TRANSITION",
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(
            self,
            ModelType::UserRealisation | ModelType::UserPrediction | ModelType::UserTransition
        )
    }

    pub fn is_system(&self) -> bool {
        !self.is_user()
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        ModelType::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownModelType(s.to_owned()))
    }
}

// ============================================================================
// Buckets
// ============================================================================

/// Rules of one model type, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleBucket<R> {
    model_type: ModelType,
    rules: Vec<R>,
}

impl<R> RuleBucket<R> {
    pub fn new(model_type: ModelType) -> Self {
        Self { model_type, rules: Vec::new() }
    }

    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    pub fn add_rule(&mut self, rule: R) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[R] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// One [`RuleBucket`] per model type, created on first use.
#[derive(Debug, Clone)]
pub struct RuleBuckets<R> {
    buckets: HashMap<ModelType, RuleBucket<R>>,
}

impl<R> RuleBuckets<R> {
    pub fn new() -> Self {
        Self { buckets: HashMap::new() }
    }

    pub fn bucket(&self, model_type: ModelType) -> Option<&RuleBucket<R>> {
        self.buckets.get(&model_type)
    }

    pub fn add_rule(&mut self, model_type: ModelType, rule: R) {
        self.buckets
            .entry(model_type)
            .or_insert_with(|| RuleBucket::new(model_type))
            .add_rule(rule);
    }

    /// Rules registered under `model_type`; empty if none.
    pub fn rules(&self, model_type: ModelType) -> &[R] {
        self.bucket(model_type).map(RuleBucket::rules).unwrap_or(&[])
    }

    pub fn total_rules(&self) -> usize {
        self.buckets.values().map(RuleBucket::len).sum()
    }
}

impl<R> Default for RuleBuckets<R> {
    fn default() -> Self { Self::new() }
}
