//! Cross-cutting pieces used by main and the use cases.

pub mod config;
pub mod scratch_dir;

pub use scratch_dir::ScratchDir;
