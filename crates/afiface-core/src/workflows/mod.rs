//! End-to-end report builders that tie the loaders in [`crate::core`] to the
//! algorithms in [`crate::engine`].

pub mod af3_input;
pub mod interface_plddt;
pub mod pair_pae;
pub mod summary;
