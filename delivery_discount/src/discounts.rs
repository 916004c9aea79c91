use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::scalars::*;

#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "camelCase"))]
pub struct FunctionResult {
    pub discounts: Vec<Discount>,
    pub discount_application_strategy: DiscountApplicationStrategy,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Deserialize)]
#[serde(rename_all(
    serialize = "SCREAMING_SNAKE_CASE",
    deserialize = "SCREAMING_SNAKE_CASE"
))]
pub enum DiscountApplicationStrategy {
    First,
    Maximum,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
pub struct Discount {
    pub value: Value,
    pub targets: Vec<Target>,
    pub message: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "camelCase"))]
pub enum Value {
    FixedAmount(FixedAmount),
    Percentage(Percentage),
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "camelCase"))]
pub struct FixedAmount {
    pub amount: Decimal,
    pub applies_to_each_item: Option<Boolean>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
pub struct Percentage {
    pub value: Decimal,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "camelCase"))]
pub enum Target {
    ProductVariant {
        id: ID,
        quantity: Option<Int>,
    },
    #[serde(rename_all(serialize = "camelCase", deserialize = "camelCase"))]
    OrderSubtotal { excluded_variant_ids: Vec<ID> },
}

pub const NO_DISCOUNT: FunctionResult = FunctionResult {
    discounts: vec![],
    discount_application_strategy: DiscountApplicationStrategy::First,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_host_shape() {
        let result = FunctionResult {
            discounts: vec![
                Discount {
                    value: Value::Percentage(Percentage { value: Decimal(10.0) }),
                    targets: vec![Target::ProductVariant {
                        id: "gid://shopify/ProductVariant/1".to_string(),
                        quantity: None,
                    }],
                    message: Some("Korting".to_string()),
                },
                Discount {
                    value: Value::FixedAmount(FixedAmount {
                        amount: Decimal(1.8),
                        applies_to_each_item: None,
                    }),
                    targets: vec![Target::OrderSubtotal {
                        excluded_variant_ids: vec![],
                    }],
                    message: None,
                },
            ],
            discount_application_strategy: DiscountApplicationStrategy::First,
        };

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({
                "discounts": [
                    {
                        "value": { "percentage": { "value": "10.0" } },
                        "targets": [
                            { "productVariant": { "id": "gid://shopify/ProductVariant/1" } }
                        ],
                        "message": "Korting"
                    },
                    {
                        "value": { "fixedAmount": { "amount": "1.8" } },
                        "targets": [ { "orderSubtotal": { "excludedVariantIds": [] } } ]
                    }
                ],
                "discountApplicationStrategy": "FIRST"
            })
        );
    }

    #[test]
    fn test_no_discount() {
        assert_eq!(
            serde_json::to_value(NO_DISCOUNT).unwrap(),
            serde_json::json!({ "discounts": [], "discountApplicationStrategy": "FIRST" })
        );
    }
}
