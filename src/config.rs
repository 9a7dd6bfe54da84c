//! Run configuration for the shortest-path engine.
//!
//! Knobs come from the environment the same way the rest of the crate's
//! tuning variables do, or from JSON supplied by an embedding application.

use serde::{Deserialize, Serialize};

pub const ENV_HEAP_RESERVE: &str = "CSR_SSSP_HEAP_RESERVE";
pub const ENV_TRACE: &str = "CSR_SSSP_TRACE";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DijkstraConfig {
    /// Heap slots reserved up front; capped at the vertex count per run.
    pub heap_reserve: usize,
    /// Print a one-line summary to stderr after every run.
    pub trace: bool,
}

impl Default for DijkstraConfig {
    fn default() -> Self { Self { heap_reserve: 1024, trace: false } }
}

impl DijkstraConfig {
    /// Defaults overridden by `CSR_SSSP_HEAP_RESERVE` / `CSR_SSSP_TRACE`.
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let d = Self::default();
        let heap_reserve = std::env::var(ENV_HEAP_RESERVE).ok().and_then(|v| v.trim().parse().ok()).unwrap_or(d.heap_reserve);
        let trace = std::env::var(ENV_TRACE).ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(d.trace);
        Self { heap_reserve, trace }
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> { serde_json::from_str(s) }

    pub fn to_json(&self) -> String {
        // plain struct of scalars; serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}
