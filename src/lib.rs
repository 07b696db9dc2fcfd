//! Purpose: Shared core library crate used by the `culvert` CLI and tests.
//! Exports: `api` (stable surface), `core` (stream helpers, cause-chain tools, errors).
//! Role: Internal library backing the binary; not yet a stable public SDK.
//! Invariants: Treat the crate API as internal until a dedicated library release.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
