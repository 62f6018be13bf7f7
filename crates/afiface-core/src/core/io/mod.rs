//! Readers for the data consumed by the engine: chain sequences ([`fasta`]),
//! per-model confidence documents ([`model_data`]), inter-chain contact tables
//! ([`contacts`]) and plain-text score files ([`scores`]).

pub mod contacts;
pub mod fasta;
pub mod model_data;
pub mod scores;
