//! Core receipt types, validation, configuration and numbering.
//!
//! Everything here is independent of the PDF backend: the counter store and
//! allocator, the record model and its builder, and money formatting.

mod builder;
mod config;
mod counter;
mod error;
mod fees;
mod money;
mod numbering;
mod types;
mod validation;

pub use builder::*;
pub use config::*;
pub use counter::*;
pub use error::*;
pub use fees::*;
pub use money::*;
pub use numbering::*;
pub use types::*;
pub use validation::*;

pub(crate) use validation::ensure_valid;
