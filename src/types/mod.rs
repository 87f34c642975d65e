//! Data types for the spanning-cell grid.

mod cell;
mod content;
mod location;

pub use cell::*;
pub use content::*;
pub use location::*;
