//! # Engine Module
//!
//! The indexing and aggregation algorithms that turn a chain layout, a confidence
//! record and interface residue sets into summary scores.
//!
//! - **Chain-pair selection** ([`pairs`]) - Gathers pairwise-matrix blocks between
//!   chain groups in both directions and summarizes them
//! - **Interface aggregation** ([`aggregate`]) - Plain and contact-area weighted
//!   averages of per-residue scores over interface residues
//! - **Statistics** ([`stats`]) - Median and mean with explicit empty-input errors
//! - **Configuration** ([`config`]) - Report parameters and their builder
//! - **Error Handling** ([`error`]) - `EngineError` and its error kinds
//! - **Progress Monitoring** ([`progress`]) - Callbacks for batch progress
//!
//! Everything here is synchronous and works on immutable inputs; batch callers may
//! evaluate independent models in parallel.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod pairs;
pub mod progress;
pub mod stats;
