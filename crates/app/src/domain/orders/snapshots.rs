//! Point-in-time copies embedded in orders.
//!
//! These are serialised into `JSONB` columns and never rewritten, so later edits to a
//! product or a saved address do not alter order history.

use serde::{Deserialize, Serialize};

use crate::domain::addresses::records::AddressRecord;

/// A product as it was when the order was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub variant_name: Option<String>,
    pub variant_sku: Option<String>,
    pub price: u64,

    #[serde(default)]
    pub images: Vec<String>,
}

/// A postal address copied onto an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSnapshot {
    pub full_name: String,
    pub phone: Option<String>,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// An address field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    /// No address was supplied and none is saved.
    Address,

    /// A saved address of the other kind was chosen.
    Kind,
    FullName,
    Line1,
    City,
    State,
    PostalCode,
    Country,
}

impl AddressField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Kind => "kind",
            Self::FullName => "full_name",
            Self::Line1 => "line1",
            Self::City => "city",
            Self::State => "state",
            Self::PostalCode => "postal_code",
            Self::Country => "country",
        }
    }
}

impl AddressSnapshot {
    /// Required fields that are blank.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<AddressField> {
        [
            (AddressField::FullName, &self.full_name),
            (AddressField::Line1, &self.line1),
            (AddressField::City, &self.city),
            (AddressField::State, &self.state),
            (AddressField::PostalCode, &self.postal_code),
            (AddressField::Country, &self.country),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

impl From<AddressRecord> for AddressSnapshot {
    fn from(address: AddressRecord) -> Self {
        Self {
            full_name: address.full_name,
            phone: address.phone,
            line1: address.line1,
            line2: address.line2,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn address() -> AddressSnapshot {
        AddressSnapshot {
            full_name: "Noor Rahman".to_string(),
            phone: None,
            line1: "12 Perfume Lane".to_string(),
            line2: None,
            city: "Hyderabad".to_string(),
            state: "Telangana".to_string(),
            postal_code: "500001".to_string(),
            country: "IN".to_string(),
        }
    }

    #[test]
    fn complete_address_has_no_missing_fields() {
        assert!(address().missing_fields().is_empty());
    }

    #[test]
    fn blank_fields_are_reported_in_order() {
        let snapshot = AddressSnapshot {
            city: " ".to_string(),
            full_name: String::new(),
            ..address()
        };

        assert_eq!(
            snapshot.missing_fields(),
            vec![AddressField::FullName, AddressField::City]
        );
    }

    #[test]
    fn product_snapshot_tolerates_missing_images() -> TestResult {
        let snapshot: ProductSnapshot = serde_json::from_value(json!({
            "name": "Oud",
            "description": null,
            "sku": null,
            "variant_name": null,
            "variant_sku": null,
            "price": 1000
        }))?;

        assert!(snapshot.images.is_empty());

        Ok(())
    }
}
