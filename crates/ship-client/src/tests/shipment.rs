use crate::Shipment;

use googletest::prelude::*;
use serde_json::json;

#[test]
fn given_numeric_id_then_read_as_string() {
    let shipment: Shipment = serde_json::from_value(json!({
        "shipmentRequestID": 17,
        "topic": "Fibre reels to Bangkok",
        "request_status": "pending",
        "due_date": null
    }))
    .unwrap();

    assert_that!(shipment.id.as_str(), eq("17"));
    assert_that!(shipment.topic.as_deref(), some(eq("Fibre reels to Bangkok")));
    assert_that!(shipment.due_date, none());
    assert_that!(shipment.remark, none());
}

#[test]
fn given_string_id_then_kept() {
    let shipment: Shipment =
        serde_json::from_value(json!({ "shipmentRequestID": "SR-0042" })).unwrap();

    assert_that!(shipment.id.as_str(), eq("SR-0042"));
}

#[test]
fn given_missing_id_then_rejected() {
    let result = serde_json::from_value::<Shipment>(json!({ "topic": "x" }));

    assert!(result.is_err());
}

#[test]
fn given_shipment_when_serialized_then_api_field_names_kept() {
    let shipment: Shipment = serde_json::from_value(json!({ "shipmentRequestID": 1 })).unwrap();

    let value = serde_json::to_value(&shipment).unwrap();

    assert_that!(value["shipmentRequestID"].as_str(), some(eq("1")));
}
