//! # afiface Core Library
//!
//! Chain-aware extraction and aggregation of per-residue and pairwise confidence
//! scores from multi-chain structure predictions.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data models (`SequenceLayout`,
//!   `ConfidenceRecord`, `InterfaceSet`), chain label utilities and readers for
//!   FASTA, model output, contact tables and score files.
//!
//! - **[`engine`]: The Logic Core.** Chain-pair block selection, interface
//!   aggregation, statistics and the error taxonomy shared by all operations.
//!
//! - **[`workflows`]: The Public API.** Complete report builders (chain-pair PAE,
//!   interface pLDDT, batch model summaries, score collection, prediction job
//!   input) for end users.

pub mod core;
pub mod engine;
pub mod workflows;
