//! Report module - rendering and exporting scoring results

pub mod export;
pub mod summary;

pub use export::*;
pub use summary::*;
