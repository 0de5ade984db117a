//! Decoding of market price payloads.
//!
//! The endpoint wraps its payload as `{"result": {"data": ...}}`, or in a
//! one-element array of those in batch mode. A proxy may forward the bare
//! payload instead. The payload is either a map from item code to price or a
//! list of `{"itemCode": ..., "price": ...}` entries. Entries without a
//! numeric price are skipped rather than failing the whole snapshot.

use fightforge_core::ItemPrices;
use serde_json::Value;

use crate::error::PriceError;

/// Decodes a price snapshot from a JSON body.
///
/// # Examples
///
/// ```
/// use fightforge_core::{ItemCode, ItemPrices};
/// use fightforge_prices::decode_prices;
///
/// let body = r#"{"result": {"data": {"bread": 0.9, "steel": 2.1}}}"#;
/// let prices = decode_prices(body).unwrap();
/// assert_eq!(prices.get(ItemCode::Steel), 2.1);
/// ```
pub fn decode_prices(body: &str) -> Result<ItemPrices, PriceError> {
    let value: Value = serde_json::from_str(body)?;
    decode_value(&value)
}

fn decode_value(value: &Value) -> Result<ItemPrices, PriceError> {
    let payload = unwrap_envelope(value);
    match payload {
        Value::Object(map) => Ok(ItemPrices::from_pairs(
            map.iter()
                .filter_map(|(code, v)| price_of(v).map(|p| (code.clone(), p))),
        )),
        Value::Array(entries) => Ok(ItemPrices::from_pairs(entries.iter().filter_map(|entry| {
            let code = entry.get("itemCode")?.as_str()?;
            let price = entry.get("price").and_then(price_of)?;
            Some((code.to_string(), price))
        }))),
        other => Err(PriceError::Decode(format!(
            "expected an object or array of prices, got {}",
            kind(other)
        ))),
    }
}

fn unwrap_envelope(value: &Value) -> &Value {
    let single = match value {
        Value::Array(items) if items.len() == 1 && items[0].get("result").is_some() => &items[0],
        other => other,
    };
    single
        .get("result")
        .and_then(|r| r.get("data"))
        .map(|data| data.get("json").unwrap_or(data))
        .unwrap_or(single)
}

fn price_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Object(_) => value.get("price").and_then(Value::as_f64),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
