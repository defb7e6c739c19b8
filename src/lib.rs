//! vramwatch - live VRAM/KV-cache telemetry from a blackbox server
//!
//! Connects to the server's `/vram/stream` SSE endpoint, decodes the
//! periodic JSON snapshots it pushes, and renders each one as a
//! terminal report.
//!
//! This library exposes modules for use in integration tests.

pub mod cli;
pub mod client;
pub mod consumer;
pub mod models;
pub mod render;
pub mod sse;
