//! Test Helpers

use crate::domain::{
    addresses::{
        data::NewAddress,
        records::{AddressKind, AddressUuid},
    },
    carts::{data::NewCartItem, records::CartItemUuid},
    orders::{
        data::{AddressChoice, NewOrder},
        records::OrderUuid,
        snapshots::AddressSnapshot,
    },
    products::{
        data::NewProduct,
        records::{ProductUuid, ProductVariantUuid},
    },
};

pub(crate) fn new_product(uuid: ProductUuid, name: &str, price: u64, stock: u32) -> NewProduct {
    let slug = name.trim().to_lowercase().replace(' ', "-");

    NewProduct {
        uuid,
        name: name.to_string(),
        slug: format!("{slug}-{}", uuid.into_uuid().simple()),
        description: Some(format!("{name} attar")),
        sku: None,
        price,
        original_price: None,
        stock,
        images: vec![format!("https://cdn.example.com/{slug}.jpg")],
        category_uuid: None,
        active: true,
    }
}

pub(crate) fn new_cart_item(
    product: ProductUuid,
    variant: Option<ProductVariantUuid>,
    quantity: u32,
) -> NewCartItem {
    NewCartItem {
        uuid: CartItemUuid::new(),
        product_uuid: product,
        variant_uuid: variant,
        quantity,
    }
}

pub(crate) fn new_address(kind: AddressKind, is_default: bool) -> NewAddress {
    NewAddress {
        uuid: AddressUuid::new(),
        kind,
        full_name: "Aisha Khan".to_string(),
        phone: Some("+91 98765 43210".to_string()),
        line1: "12 Ittar Gali".to_string(),
        line2: None,
        city: "Kannauj".to_string(),
        state: "Uttar Pradesh".to_string(),
        postal_code: "209725".to_string(),
        country: "IN".to_string(),
        is_default,
    }
}

pub(crate) fn inline_address() -> AddressSnapshot {
    AddressSnapshot {
        full_name: "Aisha Khan".to_string(),
        phone: None,
        line1: "12 Ittar Gali".to_string(),
        line2: None,
        city: "Kannauj".to_string(),
        state: "Uttar Pradesh".to_string(),
        postal_code: "209725".to_string(),
        country: "IN".to_string(),
    }
}

/// Cash-on-delivery order shipping to [`inline_address`].
pub(crate) fn new_order() -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        shipping_address: AddressChoice::Inline(inline_address()),
        billing_address: None,
        payment_method: None,
        coupon_code: None,
        notes: None,
        idempotency_key: None,
    }
}
