//! Guest cart merging.

use crate::domain::carts::data::CartLine;

/// Merge a guest cart into the server cart.
///
/// Quantities for the same product and variant are summed. Server lines keep their
/// order, followed by guest-only lines in the order they were given. Stock limits are
/// applied by the caller.
#[must_use]
pub fn merge_cart_lines(server: &[CartLine], guest: &[CartLine]) -> Vec<CartLine> {
    let mut merged: Vec<CartLine> = Vec::with_capacity(server.len() + guest.len());

    for line in server.iter().chain(guest) {
        if line.quantity == 0 {
            continue;
        }

        match merged.iter_mut().find(|existing| existing.same_line(line)) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => merged.push(*line),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use crate::domain::products::records::{ProductUuid, ProductVariantUuid};

    use super::*;

    fn line(
        product_uuid: ProductUuid,
        variant_uuid: Option<ProductVariantUuid>,
        quantity: u32,
    ) -> CartLine {
        CartLine {
            product_uuid,
            variant_uuid,
            quantity,
        }
    }

    #[test]
    fn sums_quantities_for_matching_lines() {
        let product = ProductUuid::new();

        let merged = merge_cart_lines(&[line(product, None, 2)], &[line(product, None, 3)]);

        assert_eq!(merged, vec![line(product, None, 5)]);
    }

    #[test]
    fn variants_of_the_same_product_stay_separate() {
        let product = ProductUuid::new();
        let small = ProductVariantUuid::new();
        let large = ProductVariantUuid::new();

        let merged = merge_cart_lines(
            &[line(product, Some(small), 1)],
            &[line(product, Some(large), 1), line(product, None, 1)],
        );

        assert_eq!(
            merged,
            vec![
                line(product, Some(small), 1),
                line(product, Some(large), 1),
                line(product, None, 1),
            ]
        );
    }

    #[test]
    fn duplicate_guest_lines_collapse() {
        let product = ProductUuid::new();

        let merged = merge_cart_lines(&[], &[line(product, None, 1), line(product, None, 4)]);

        assert_eq!(merged, vec![line(product, None, 5)]);
    }

    #[test]
    fn zero_quantity_lines_are_dropped() {
        let product = ProductUuid::new();

        assert!(merge_cart_lines(&[], &[line(product, None, 0)]).is_empty());
    }

    #[test]
    fn empty_guest_cart_leaves_server_cart_unchanged() {
        let server = vec![line(ProductUuid::new(), None, 2)];

        assert_eq!(merge_cart_lines(&server, &[]), server);
    }

    #[test]
    fn quantities_saturate_instead_of_wrapping() {
        let product = ProductUuid::new();

        let merged = merge_cart_lines(&[line(product, None, u32::MAX)], &[line(product, None, 1)]);

        assert_eq!(merged[0].quantity, u32::MAX);
    }
}
