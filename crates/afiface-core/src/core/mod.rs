//! # Core Module
//!
//! Stateless building blocks shared by the engine and the workflows.
//!
//! - **Models** ([`models`]) - Chain layout over the concatenated residue ordering,
//!   the per-model confidence record and interface residue sets
//! - **Input** ([`io`]) - FASTA, model confidence documents, contact tables and score files
//! - **Utilities** ([`utils`]) - The chain label alphabet

pub mod io;
pub mod models;
pub mod utils;
