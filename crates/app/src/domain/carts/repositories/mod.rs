//! Carts Repositories

mod carts;
mod lines;

pub use carts::*;
pub use lines::*;
