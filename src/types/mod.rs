//! Type definitions for userstats

mod error;
mod record;
mod summary;

pub use error::*;
pub use record::*;
pub use summary::*;
