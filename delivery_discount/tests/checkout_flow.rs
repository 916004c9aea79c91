use delivery_discount::calculator::{compute_discounts, DiscountSource};
use delivery_discount::config::FunctionConfig;
use delivery_discount::input::{Attribute, DeliveryGroup, DeliveryOption, Input};
use delivery_discount::scalars::Decimal;
use delivery_discount::session::{AttributeChange, DeliverySession, DELIVERY_TYPE_ATTRIBUTE};

fn base_input() -> Input {
    serde_json::from_value(serde_json::json!({
        "cart": {
            "lines": [
                { "id": "gid://shopify/CartLine/1", "quantity": 2,
                  "merchandise": { "__typename": "ProductVariant", "id": "gid://shopify/ProductVariant/1" } }
            ],
            "cost": { "subtotalAmount": { "amount": "100.0" } },
            "buyerIdentity": {
                "customer": {
                    "id": "gid://shopify/Customer/9",
                    "hasTags": [ { "hasTag": true, "tag": "member" } ]
                }
            }
        },
        "shop": {
            "deliveryDiscountSettings": { "value": "[{\"type\":\"pickup\",\"enabled\":true,\"discountValue\":2}]" },
            "customerTagDiscountRules": { "value": "[{\"customerTag\":\"MEMBER\",\"discountPercentage\":10,\"enabled\":true}]" }
        }
    }))
    .unwrap()
}

fn delivery_groups(selected: &str) -> Vec<DeliveryGroup> {
    let option = |handle: &str, title: &str| DeliveryOption {
        handle: handle.to_string(),
        title: Some(title.to_string()),
        ..Default::default()
    };
    vec![DeliveryGroup {
        selected_delivery_option: Some(option(selected, "")),
        delivery_options: vec![
            option("store", "Ophalen in de winkel"),
            option("home", "Bezorging aan huis"),
        ],
    }]
}

/// Applies the session's attribute changes to the cart, as the host would.
fn apply(input: &mut Input, changes: Vec<AttributeChange>) {
    for AttributeChange::UpdateAttribute { key, value } in changes {
        if key == DELIVERY_TYPE_ATTRIBUTE {
            input.cart.attribute = Some(Attribute {
                key: Some(key),
                value: Some(value),
            });
        }
    }
}

fn pickup_amount(input: &Input) -> Option<Decimal> {
    let context = input.checkout_context(&FunctionConfig::default());
    compute_discounts(&context, &input.shop.rules())
        .into_iter()
        .find(|instruction| instruction.source == DiscountSource::Pickup)
        .map(|instruction| instruction.value)
}

#[test]
fn test_pickup_discount_follows_delivery_selection() {
    let mut input = base_input();
    let mut session = DeliverySession::new(FunctionConfig::default().classifier());

    assert_eq!(pickup_amount(&input), None);

    apply(&mut input, session.observe(&delivery_groups("store")));
    assert_eq!(pickup_amount(&input), Some(Decimal(1.8)));
    assert_eq!(pickup_amount(&input), Some(Decimal(1.8)));

    apply(&mut input, session.observe(&delivery_groups("home")));
    assert_eq!(pickup_amount(&input), None);

    apply(&mut input, session.observe(&[]));
    assert_eq!(
        input.cart.attribute.as_ref().and_then(|attribute| attribute.value.as_deref()),
        Some("")
    );
    assert_eq!(pickup_amount(&input), None);
}

#[test]
fn test_stale_pickup_attribute_is_cleared_on_load() {
    let mut input = base_input();
    input.cart.attribute = Some(Attribute {
        key: Some(DELIVERY_TYPE_ATTRIBUTE.to_string()),
        value: Some("pickup".to_string()),
    });
    assert_eq!(pickup_amount(&input), Some(Decimal(1.8)));

    let mut session = DeliverySession::new(FunctionConfig::default().classifier());
    apply(&mut input, session.observe(&delivery_groups("not-offered")));
    assert_eq!(pickup_amount(&input), None);
}
