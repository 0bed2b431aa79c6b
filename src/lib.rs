mod cell;
mod error;
pub mod lazy;
pub mod matrix;

pub use cell::{CacheCell, CacheSlot};
pub use error::InvertError;
pub use lazy::{resolve, try_resolve};
pub use matrix::{cache_solve, invert, CacheMatrix, Inversion};
