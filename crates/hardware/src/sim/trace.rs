//! Cycle Trace Format and Loader.
//!
//! A trace records the hazard unit's inputs for consecutive cycles, as captured
//! by a pipeline model or written by hand for a test program. It provides:
//! 1. **Format:** `{ "cycles": [ <snapshot>, ... ] }` where every stage and field of
//!    a snapshot may be omitted (register 0, flags false).
//! 2. **Loading:** Parsing from a string or a file on disk.
//! 3. **Writing:** Serializing a trace back to JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::TraceError;
use crate::core::pipeline::latches::HazardSnapshot;

/// A sequence of per-cycle hazard snapshots.
///
/// # Examples
///
/// ```
/// use hdu_core::sim::Trace;
///
/// let trace = Trace::from_json(r#"{
///     "cycles": [
///         { "execute": { "rd": 1, "is_load": true }, "decode": { "rs1": 1, "is_jump": true } },
///         {}
///     ]
/// }"#).unwrap();
/// assert_eq!(trace.len(), 2);
/// assert!(trace.cycles[0].execute.is_load);
/// assert_eq!(trace.cycles[1].decode.rs1.val(), 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// One snapshot per cycle, in cycle order.
    #[serde(default)]
    pub cycles: Vec<HazardSnapshot>,
}

impl Trace {
    /// Wraps an existing list of snapshots.
    pub const fn new(cycles: Vec<HazardSnapshot>) -> Self {
        Self { cycles }
    }

    /// Parses a trace from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Parse`] if the document is not a valid trace.
    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Io`] if the file cannot be read and
    /// [`TraceError::Parse`] if its contents are not a valid trace.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Serializes the trace as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, TraceError> {
        serde_json::to_string_pretty(self).map_err(TraceError::Serialize)
    }

    /// Number of cycles in the trace.
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    /// Returns `true` if the trace holds no cycles.
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}

impl FromIterator<HazardSnapshot> for Trace {
    fn from_iter<I: IntoIterator<Item = HazardSnapshot>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
