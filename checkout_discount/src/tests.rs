use super::*;
use delivery_discount::run_function_with_input;

const DELIVERY_RULES: &str = r#"[{"id":"1","name":"Afhalen","type":"pickup","enabled":true,"discountType":"percentage","discountValue":2},{"id":"2","name":"Verzenden","type":"shipping","enabled":true,"discountType":"fixed","discountValue":5}]"#;

const TAG_RULES: &str = r#"[{"id":"t1","customerTag":"wholesale","discountPercentage":10,"discountName":"","enabled":true},{"id":"t2","customerTag":"gold","discountPercentage":20,"discountName":"Gold","enabled":true}]"#;

fn input(
    delivery_type: Option<&str>,
    customer: serde_json::Value,
    configuration: Option<serde_json::Value>,
) -> String {
    serde_json::json!({
        "cart": {
            "lines": [
                {
                    "id": "gid://shopify/CartLine/0",
                    "quantity": 5,
                    "merchandise": { "__typename": "ProductVariant", "id": "gid://shopify/ProductVariant/0" }
                },
                {
                    "id": "gid://shopify/CartLine/1",
                    "quantity": 1,
                    "merchandise": { "__typename": "ProductVariant", "id": "gid://shopify/ProductVariant/1" }
                }
            ],
            "cost": { "subtotalAmount": { "amount": "100.0", "currencyCode": "EUR" } },
            "buyerIdentity": { "customer": customer },
            "attribute": delivery_type.map(|value| serde_json::json!({ "value": value })),
            "deliveryGroups": []
        },
        "shop": {
            "deliveryDiscountSettings": { "value": DELIVERY_RULES },
            "customerTagDiscountRules": { "value": TAG_RULES }
        },
        "discountNode": {
            "metafield": configuration.map(|config| serde_json::json!({ "value": config.to_string() }))
        }
    })
    .to_string()
}

fn wholesale_customer() -> serde_json::Value {
    serde_json::json!({
        "id": "gid://shopify/Customer/1",
        "hasTags": [
            { "hasTag": true, "tag": "wholesale" },
            { "hasTag": false, "tag": "gold" }
        ]
    })
}

fn customer_deployment() -> Option<serde_json::Value> {
    Some(serde_json::json!({ "discount": "customer" }))
}

#[test]
fn test_pickup_compounds_on_tag_discount() -> Result<()> {
    let result = run_function_with_input(run, &input(Some("pickup"), wholesale_customer(), None))?;
    let expected = serde_json::json!({
        "discounts": [
            {
                "value": { "fixedAmount": { "amount": "1.8" } },
                "targets": [ { "orderSubtotal": { "excludedVariantIds": [] } } ],
                "message": "2% Pickup Korting"
            }
        ],
        "discountApplicationStrategy": "FIRST"
    });
    assert_eq!(serde_json::to_value(&result)?, expected);
    Ok(())
}

#[test]
fn test_customer_deployment_emits_tag_discount() -> Result<()> {
    let result = run_function_with_input(
        run,
        &input(Some("pickup"), wholesale_customer(), customer_deployment()),
    )?;
    let expected = serde_json::json!({
        "discounts": [
            {
                "value": { "percentage": { "value": "10.0" } },
                "targets": [
                    { "productVariant": { "id": "gid://shopify/ProductVariant/0" } },
                    { "productVariant": { "id": "gid://shopify/ProductVariant/1" } }
                ],
                "message": "Korting"
            }
        ],
        "discountApplicationStrategy": "FIRST"
    });
    assert_eq!(serde_json::to_value(&result)?, expected);
    Ok(())
}

#[test]
fn test_shipping_has_no_pickup_discount() -> Result<()> {
    let result =
        run_function_with_input(run, &input(Some("shipping"), wholesale_customer(), None))?;
    assert_eq!(result, discounts::NO_DISCOUNT);

    let result = run_function_with_input(
        run,
        &input(Some("shipping"), wholesale_customer(), customer_deployment()),
    )?;
    assert_eq!(result.discounts.len(), 1);
    assert_eq!(result.discounts[0].message.as_deref(), Some("Korting"));
    Ok(())
}

#[test]
fn test_guest_pickup() -> Result<()> {
    let result =
        run_function_with_input(run, &input(Some("pickup"), serde_json::Value::Null, None))?;
    let expected = serde_json::json!({
        "discounts": [
            {
                "value": { "fixedAmount": { "amount": "2.0" } },
                "targets": [ { "orderSubtotal": { "excludedVariantIds": [] } } ],
                "message": "2% Pickup Korting"
            }
        ],
        "discountApplicationStrategy": "FIRST"
    });
    assert_eq!(serde_json::to_value(&result)?, expected);
    Ok(())
}

#[test]
fn test_guest_shipping_gets_nothing() -> Result<()> {
    let result = run_function_with_input(run, &input(None, serde_json::Value::Null, None))?;
    assert_eq!(result, discounts::NO_DISCOUNT);
    Ok(())
}

#[test]
fn test_customer_override() -> Result<()> {
    let customer = serde_json::json!({
        "id": "gid://shopify/Customer/2",
        "hasTags": [ { "hasTag": true, "tag": "gold" } ],
        "discountPercentage": { "value": "15" }
    });
    let result = run_function_with_input(
        run,
        &input(Some("pickup"), customer.clone(), customer_deployment()),
    )?;
    assert_eq!(
        serde_json::to_value(&result.discounts[0].value)?,
        serde_json::json!({ "percentage": { "value": "15.0" } })
    );

    let result = run_function_with_input(run, &input(Some("pickup"), customer, None))?;
    assert_eq!(
        serde_json::to_value(&result.discounts[0].value)?,
        serde_json::json!({ "fixedAmount": { "amount": "1.7" } })
    );
    Ok(())
}

#[test]
fn test_pickup_label() -> Result<()> {
    let config = serde_json::json!({ "discount": "pickup", "pickupLabel": "afhaalkorting" });
    let result = run_function_with_input(
        run,
        &input(Some("pickup"), wholesale_customer(), Some(config)),
    )?;
    let expected = serde_json::json!({
        "discounts": [
            {
                "value": { "fixedAmount": { "amount": "1.8" } },
                "targets": [ { "orderSubtotal": { "excludedVariantIds": [] } } ],
                "message": "2% afhaalkorting"
            }
        ],
        "discountApplicationStrategy": "FIRST"
    });
    assert_eq!(serde_json::to_value(&result)?, expected);
    Ok(())
}

#[test]
fn test_malformed_rules() -> Result<()> {
    let mut payload: serde_json::Value =
        serde_json::from_str(&input(Some("pickup"), wholesale_customer(), None))?;
    payload["shop"]["deliveryDiscountSettings"]["value"] = serde_json::json!("[{");
    payload["shop"]["customerTagDiscountRules"]["value"] = serde_json::json!("nope");
    let result = run_function_with_input(run, &payload.to_string())?;
    assert_eq!(result, discounts::NO_DISCOUNT);
    Ok(())
}

#[test]
fn test_empty_cart() -> Result<()> {
    let mut payload: serde_json::Value =
        serde_json::from_str(&input(Some("pickup"), wholesale_customer(), None))?;
    payload["cart"]["lines"] = serde_json::json!([]);
    let result = run_function_with_input(run, &payload.to_string())?;
    assert_eq!(result, discounts::NO_DISCOUNT);
    Ok(())
}
