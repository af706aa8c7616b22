use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::ProductId;

/// Store-assigned identity of a persisted sale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaleId(pub i64);

/// An immutable purchase record. `total` is the price at the time of sale times
/// the quantity and is never recomputed against later catalog prices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    pub quantity: i64,
    pub date: DateTime<Utc>,
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::{Sale, SaleId};
    use crate::domain::product::ProductId;

    #[test]
    fn sale_serializes_with_wire_field_names() {
        let sale = Sale {
            id: SaleId(7),
            product_id: ProductId(1),
            quantity: 2,
            date: Utc::now(),
            total: Decimal::new(2000, 2),
        };

        let json = serde_json::to_value(&sale).expect("serialize");
        assert_eq!(json["id"], 7);
        assert_eq!(json["productId"], 1);
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["total"], 20.0);
    }
}
