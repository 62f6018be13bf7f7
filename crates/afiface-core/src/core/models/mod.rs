//! # Core Models Module
//!
//! Data structures describing one structure prediction: how chains are laid out
//! over the concatenated residue ordering ([`layout`]), the confidence arrays
//! indexed by that ordering ([`record`]), and which residues sit at inter-chain
//! interfaces ([`interface`]).
//!
//! All models are immutable once built. A caller processing many predictions
//! builds one independent set of models per prediction.

pub mod interface;
pub mod layout;
pub mod record;
