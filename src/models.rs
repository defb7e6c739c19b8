//! Wire types for the blackbox `/vram` telemetry schema.

use serde::{Deserialize, Serialize};

/// One point-in-time reading of GPU memory state.
///
/// Decoded best-effort: unknown fields are ignored and missing fields
/// take their zero value, so a server omitting a counter still yields
/// a usable snapshot. Counters are not validated against each other;
/// malformed upstream data must not crash the consumer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Total VRAM available on the GPU
    #[serde(default)]
    pub total_vram_bytes: i64,
    /// What CUDA/NVML reports as allocated (vLLM preallocates)
    #[serde(default)]
    pub allocated_vram_bytes: i64,
    /// Actual used KV cache bytes
    #[serde(default)]
    pub used_kv_cache_bytes: i64,
    /// Prefix cache hit rate as a percentage (0.0-100.0, not a fraction)
    #[serde(default)]
    pub prefix_cache_hit_rate: f64,
    /// Per-model breakdown, kept in server-reported order
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

/// Per-model memory breakdown within a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub model_id: String,
    /// The model's serving port
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub allocated_vram_bytes: i64,
    #[serde(default)]
    pub used_kv_cache_bytes: i64,
}
