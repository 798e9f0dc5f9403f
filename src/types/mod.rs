//! Data types for the disposition editor.

mod cell;
mod disposition;
mod region;
mod selection;

pub use cell::*;
pub use disposition::*;
pub use region::*;
pub use selection::*;
