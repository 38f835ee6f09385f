//! Cart Models

use jiff::Timestamp;

use crate::{
    domain::products::models::{Product, ProductUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Cart Model
///
/// The stored cart row; its line items live in [`CartLine`] rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub uuid: CartUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Line Model
///
/// One stored (product reference, quantity) pair. The reference is weak:
/// the product may no longer exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub product: ProductUuid,
    pub quantity: u64,
}

/// New Cart Line Model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartLine {
    pub product: ProductUuid,
    pub quantity: u64,
}

/// Populated Cart Model
///
/// A cart with its line items joined against the current products and
/// totalled. Lines whose product no longer exists are absent.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulatedCart {
    pub uuid: CartUuid,
    pub lines: Vec<PopulatedLine>,
    pub total: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Populated Line Model
#[derive(Debug, Clone, PartialEq)]
pub struct PopulatedLine {
    pub product: Product,
    pub quantity: u64,
    pub line_total: u64,
}
