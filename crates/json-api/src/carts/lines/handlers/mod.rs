//! Cart Line Handlers

pub(crate) mod add;
pub(crate) mod remove;
pub(crate) mod set_quantity;
