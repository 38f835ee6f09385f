//! Read-time cart totals.
//!
//! Stored lines reference products weakly, so the join happens here: each
//! line is resolved against the products fetched for the cart, dangling
//! references are dropped from the presented result (never from storage),
//! and per-line and per-cart totals are computed.

use rustc_hash::FxHashMap;

use crate::domain::{
    carts::models::{CartLine, PopulatedLine},
    products::models::{Product, ProductUuid},
};

/// Resolves stored lines against the given products, preserving line order.
///
/// Returns the resolvable lines with their totals and the cart total.
pub(crate) fn populate_lines(
    lines: &[CartLine],
    products: &FxHashMap<ProductUuid, Product>,
) -> (Vec<PopulatedLine>, u64) {
    let populated: Vec<PopulatedLine> = lines
        .iter()
        .filter_map(|line| {
            products.get(&line.product).map(|product| PopulatedLine {
                product: product.clone(),
                quantity: line.quantity,
                line_total: line.quantity.saturating_mul(product.price),
            })
        })
        .collect();

    let total = populated
        .iter()
        .fold(0_u64, |sum, line| sum.saturating_add(line.line_total));

    (populated, total)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn make_product(uuid: ProductUuid, price: u64) -> Product {
        Product {
            uuid,
            title: "Product".to_string(),
            category: None,
            stock: 0,
            price,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn totals_are_summed_over_lines() {
        let p1 = ProductUuid::new();
        let p2 = ProductUuid::new();

        let products: FxHashMap<_, _> = [
            (p1, make_product(p1, 10)),
            (p2, make_product(p2, 5)),
        ]
        .into_iter()
        .collect();

        let lines = [
            CartLine { product: p1, quantity: 2 },
            CartLine { product: p2, quantity: 1 },
        ];

        let (populated, total) = populate_lines(&lines, &products);

        assert_eq!(populated.len(), 2, "both lines resolve");
        assert_eq!(populated[0].line_total, 20);
        assert_eq!(populated[1].line_total, 5);
        assert_eq!(total, 25);
    }

    #[test]
    fn dangling_lines_are_dropped() {
        let p1 = ProductUuid::new();
        let p2 = ProductUuid::new();

        let products: FxHashMap<_, _> = [(p1, make_product(p1, 10))].into_iter().collect();

        let lines = [
            CartLine { product: p1, quantity: 2 },
            CartLine { product: p2, quantity: 1 },
        ];

        let (populated, total) = populate_lines(&lines, &products);

        assert_eq!(populated.len(), 1, "the dangling line is dropped");
        assert_eq!(populated[0].product.uuid, p1);
        assert_eq!(total, 20);
    }

    #[test]
    fn empty_cart_totals_zero() {
        let (populated, total) = populate_lines(&[], &FxHashMap::default());

        assert!(populated.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn line_order_is_preserved() {
        let p1 = ProductUuid::new();
        let p2 = ProductUuid::new();
        let p3 = ProductUuid::new();

        let products: FxHashMap<_, _> = [
            (p1, make_product(p1, 1)),
            (p2, make_product(p2, 2)),
            (p3, make_product(p3, 3)),
        ]
        .into_iter()
        .collect();

        let lines = [
            CartLine { product: p3, quantity: 1 },
            CartLine { product: p1, quantity: 1 },
            CartLine { product: p2, quantity: 1 },
        ];

        let (populated, _) = populate_lines(&lines, &products);

        let order: Vec<ProductUuid> = populated.iter().map(|l| l.product.uuid).collect();

        assert_eq!(order, vec![p3, p1, p2], "insertion order survives the join");
    }
}
