//! Incremental unit: one node of the hypothesis graph.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::Value;
use crate::ids::IdSource;
use crate::{Error, Result};

/// Opaque unit identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub u64);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lowest admissible connection weight.
pub const MIN_WEIGHT: f64 = 0.0;
/// Highest admissible connection weight.
pub const MAX_WEIGHT: f64 = 1.0;

/// True when `weight` lies in `[MIN_WEIGHT, MAX_WEIGHT]`. NaN is never valid.
pub fn is_valid_weight(weight: f64) -> bool {
    (MIN_WEIGHT..=MAX_WEIGHT).contains(&weight)
}

/// A timestamped, identity-keyed piece of partial information.
///
/// A unit carries:
/// - a variable label (e.g. `"u_u"`) naming the channel it belongs to,
/// - a [`Value`] payload, replaced wholesale on revision,
/// - the wall-clock time it was created,
/// - weighted links to the predecessor units that justify it.
///
/// Equality and hashing look at [`UnitId`] only. Two units with the same id
/// are the same logical unit even when their content differs, which is what
/// [`shadow_copy`](Self::shadow_copy) relies on. Use
/// [`same_content`](Self::same_content) to compare state.
///
/// Units have no interior synchronization; share one across threads only
/// behind the owning graph's lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncrementalUnit {
    id: UnitId,
    variable: String,
    payload: Value,
    timestamp: DateTime<Utc>,
    /// predecessor id → confidence in [0, 1]
    #[serde(deserialize_with = "deserialize_connections")]
    connections: HashMap<UnitId, f64>,
}

impl IncrementalUnit {
    /// Create a unit with an id drawn from `ids`, stamped with the current time.
    pub fn new<S>(ids: &S, variable: impl Into<String>, payload: impl Into<Value>) -> Self
    where
        S: IdSource + ?Sized,
    {
        Self::with_id(ids.next_id(), variable, payload)
    }

    /// Create a unit whose payload is parsed from raw text (see [`Value::parse`]).
    pub fn from_text<S>(ids: &S, variable: impl Into<String>, text: &str) -> Self
    where
        S: IdSource + ?Sized,
    {
        Self::new(ids, variable, Value::parse(text))
    }

    /// Create a unit under an id chosen by the caller.
    ///
    /// The caller is responsible for uniqueness; prefer [`new`](Self::new).
    pub fn with_id(id: UnitId, variable: impl Into<String>, payload: impl Into<Value>) -> Self {
        Self {
            id,
            variable: variable.into(),
            payload: payload.into(),
            timestamp: Utc::now(),
            connections: HashMap::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn set_variable(&mut self, variable: impl Into<String>) {
        self.variable = variable.into();
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Replace the payload, returning the previous one. No merging takes place.
    pub fn set_payload(&mut self, payload: impl Into<Value>) -> Value {
        std::mem::replace(&mut self.payload, payload.into())
    }

    /// Creation time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    // ========================================================================
    // Connections
    // ========================================================================

    /// Ids of the units that immediately precede this one. Order is unspecified.
    pub fn predecessor_ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.connections.keys().copied()
    }

    /// `(predecessor id, weight)` pairs. Order is unspecified.
    pub fn connections(&self) -> impl Iterator<Item = (UnitId, f64)> + '_ {
        self.connections.iter().map(|(id, w)| (*id, *w))
    }

    pub fn is_connected_to(&self, previous: UnitId) -> bool {
        self.connections.contains_key(&previous)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Link this unit to `previous` with confidence `weight`.
    ///
    /// Re-connecting the same predecessor overwrites its weight; the replaced
    /// weight is returned. A weight outside `[0, 1]` leaves the unit untouched,
    /// logs a warning and returns [`Error::InvalidWeight`].
    pub fn connect(&mut self, previous: &IncrementalUnit, weight: f64) -> Result<Option<f64>> {
        self.connect_id(previous.id, weight)
    }

    /// Same as [`connect`](Self::connect), keyed by the predecessor's id.
    pub fn connect_id(&mut self, previous: UnitId, weight: f64) -> Result<Option<f64>> {
        if !is_valid_weight(weight) {
            warn!(unit = %self.id, previous = %previous, weight, "ill-formed weight, units not connected");
            return Err(Error::InvalidWeight { unit: self.id, previous, weight });
        }
        Ok(self.connections.insert(previous, weight))
    }

    /// Weight of the link to `previous`, or `None` if there is no link.
    pub fn weight_of(&self, previous: UnitId) -> Option<f64> {
        self.connections.get(&previous).copied()
    }

    /// Weight of the link to `previous`, or `0.0` if there is no link.
    ///
    /// The `0.0` is a "not connected" sentinel, indistinguishable from a link
    /// weighted zero. Use [`weight_of`](Self::weight_of) when that matters.
    pub fn connection_weight(&self, previous: UnitId) -> f64 {
        match self.weight_of(previous) {
            Some(weight) => weight,
            None => {
                warn!(unit = %self.id, previous = %previous, "units are not connected");
                0.0
            }
        }
    }

    /// Weight of the link to `previous`, or [`Error::NotConnected`].
    pub fn require_weight(&self, previous: UnitId) -> Result<f64> {
        self.weight_of(previous)
            .ok_or(Error::NotConnected { unit: self.id, previous })
    }

    // ========================================================================
    // Duplication
    // ========================================================================

    /// Independent copy that keeps this unit's id and timestamp.
    ///
    /// The copy compares equal to the original, but its label, payload and
    /// connections can be changed without affecting it.
    pub fn shadow_copy(&self) -> Self {
        self.clone()
    }

    /// Copy of content and connections under a fresh id and timestamp.
    pub fn branch<S>(&self, ids: &S) -> Self
    where
        S: IdSource + ?Sized,
    {
        Self {
            connections: self.connections.clone(),
            ..Self::new(ids, self.variable.clone(), self.payload.clone())
        }
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Same logical unit (same id), whatever the content.
    pub fn same_unit(&self, other: &IncrementalUnit) -> bool {
        self.id == other.id
    }

    /// Same label, payload, timestamp and connections, whatever the id.
    pub fn same_content(&self, other: &IncrementalUnit) -> bool {
        self.variable == other.variable
            && self.payload == other.payload
            && self.timestamp == other.timestamp
            && self.connections == other.connections
    }
}

impl PartialEq for IncrementalUnit {
    fn eq(&self, other: &Self) -> bool {
        self.same_unit(other)
    }
}

impl Eq for IncrementalUnit {}

impl Hash for IncrementalUnit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for IncrementalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+:{}", self.variable, self.payload)
    }
}

fn deserialize_connections<'de, D>(deserializer: D) -> std::result::Result<HashMap<UnitId, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let connections = HashMap::<UnitId, f64>::deserialize(deserializer)?;
    if let Some((id, weight)) = connections.iter().find(|(_, w)| !is_valid_weight(**w)) {
        return Err(serde::de::Error::custom(format!(
            "connection to {id} has weight {weight} outside [0, 1]"
        )));
    }
    Ok(connections)
}
