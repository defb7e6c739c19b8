//! Pure text rendering of snapshots.
//!
//! Everything here is deterministic for a given snapshot and ordinal;
//! deciding when and where to display the block is the caller's
//! concern.

use crate::models::{ModelInfo, Snapshot};
use std::fmt::Write;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const RULE_WIDTH: usize = 80;

/// KV-cache usage as a share of total VRAM, in percent.
///
/// 0 when the snapshot reports no total VRAM, so a zeroed or
/// malformed snapshot never divides by zero.
pub fn kv_cache_usage_percent(snap: &Snapshot) -> f64 {
    percent(snap.used_kv_cache_bytes, snap.total_vram_bytes)
}

/// Per-model KV usage as a share of the model's allocation, in percent.
pub fn model_kv_percent(model: &ModelInfo) -> f64 {
    percent(model.used_kv_cache_bytes, model.allocated_vram_bytes)
}

fn percent(num: i64, den: i64) -> f64 {
    if den > 0 {
        num as f64 / den as f64 * 100.0
    } else {
        0.0
    }
}

fn gib(bytes: i64) -> f64 {
    bytes as f64 / GIB
}

/// Render one snapshot as a multi-line report block.
pub fn render_snapshot(ordinal: u64, snap: &Snapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Snapshot #{ordinal}");
    let _ = writeln!(out, "{}", "─".repeat(RULE_WIDTH));

    let _ = writeln!(out, "📊 KEY METRICS:");
    let _ = writeln!(
        out,
        "   Prefix Cache Hit Rate: {:.2}%",
        snap.prefix_cache_hit_rate
    );
    let _ = writeln!(
        out,
        "   KV Cache Usage:        {:.2}% ({:.2} GB / {:.2} GB total)",
        kv_cache_usage_percent(snap),
        gib(snap.used_kv_cache_bytes),
        gib(snap.total_vram_bytes)
    );

    let _ = writeln!(out, "\n💾 VRAM DETAILS:");
    let _ = writeln!(
        out,
        "   Total VRAM:     {:.2} GB ({} bytes)",
        gib(snap.total_vram_bytes),
        snap.total_vram_bytes
    );
    let _ = writeln!(
        out,
        "   Allocated VRAM: {:.2} GB ({} bytes)",
        gib(snap.allocated_vram_bytes),
        snap.allocated_vram_bytes
    );
    let _ = writeln!(
        out,
        "   Used KV Cache:  {:.2} GB ({} bytes)",
        gib(snap.used_kv_cache_bytes),
        snap.used_kv_cache_bytes
    );

    if snap.models.is_empty() {
        let _ = writeln!(out, "\n⚠️  No models deployed");
    } else {
        let _ = writeln!(out, "\n🤖 MODELS ({}):", snap.models.len());
        for (i, model) in snap.models.iter().enumerate() {
            let _ = writeln!(out, "   [{}] {} (port {})", i + 1, model.model_id, model.port);
            let _ = writeln!(
                out,
                "        VRAM: {:.2} GB | KV Cache: {:.2} GB ({:.1}%)",
                gib(model.allocated_vram_bytes),
                gib(model.used_kv_cache_bytes),
                model_kv_percent(model)
            );
        }
    }

    let _ = write!(out, "{}", "═".repeat(RULE_WIDTH));
    out
}
