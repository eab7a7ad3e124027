// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn call_value_wire_format() {
    let value = CallValue::Tuple(vec![
        CallValue::Bool(true),
        CallValue::Uint(5_000_000_000_000_000_000),
        CallValue::Bytes(vec![0xab]),
    ]);
    let json = serde_json::to_value(&value).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "type": "tuple",
            "value": [
                { "type": "bool", "value": true },
                { "type": "uint", "value": "5000000000000000000" },
                { "type": "bytes", "value": "0xab" },
            ]
        })
    );
}

#[test]
fn uint_accepts_numeric_json() {
    let value: CallValue =
        serde_json::from_value(serde_json::json!({ "type": "uint", "value": 42 })).unwrap();
    assert_eq!(value.as_uint(), Some(42));
}

#[test]
fn receipt_defaults_fee_and_logs() {
    let receipt: TxReceipt = serde_json::from_value(serde_json::json!({
        "hash": "0x01",
        "success": true,
        "gas_used": 21000,
        "block": 7,
    }))
    .unwrap();
    assert_eq!(receipt.fee_paid, 0);
    assert!(receipt.logs.is_empty());
    assert!(receipt.event("UpkeepRegistered").is_none());
}

#[test]
fn accessors_reject_other_variants() {
    assert_eq!(CallValue::Uint(1).as_bool(), None);
    assert_eq!(CallValue::Bool(true).as_uint(), None);
    assert_eq!(CallValue::String("0xabc".into()).as_address(), Some("0xabc"));
    assert!(CallValue::Bool(false).as_tuple().is_none());
}
