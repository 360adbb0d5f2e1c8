//! Raw JSON in, raw JSON out.
//!
//! A transport deserializes a `Command`, calls `respond`, and serializes the
//! `Response`. These tests pin the JSON shapes that contract depends on.

use serde_json::{json, Value};
use watchvault::{Command, Executor, Response};

use crate::quick_setup;

fn send(ex: &Executor, request: Value) -> Value {
    let cmd: Command = serde_json::from_value(request).expect("request must be a valid command");
    serde_json::to_value(ex.respond(cmd)).unwrap()
}

#[test]
fn alice_scenario_over_json() {
    let (_vault, ex) = quick_setup();

    let created = send(&ex, json!({"CreateCollection": {"owner": "alice"}}));
    assert_eq!(created["ok"], json!(true));
    assert_eq!(created["output"]["Child"]["key"], json!("collection_1"));

    let added = send(
        &ex,
        json!({"AddWatch": {
            "domain": "Collections",
            "parent": "collection_1",
            "watch": {"brand": "Omega", "model": "Speedmaster"}
        }}),
    );
    assert_eq!(added["output"]["Watch"]["watchID"], json!(1));

    let read = send(
        &ex,
        json!({"ReadChild": {"domain": "Collections", "key": "collection_1"}}),
    );
    assert_eq!(
        read["output"]["Child"]["record"]["Collection"],
        json!({
            "owner": "alice",
            "watches": [{"watchID": 1, "brand": "Omega", "model": "Speedmaster"}]
        })
    );

    send(
        &ex,
        json!({"DeleteWatch": {"domain": "Collections", "parent": "collection_1", "watch_id": 1}}),
    );
    let read = send(
        &ex,
        json!({"ReadChild": {"domain": "Collections", "key": "collection_1"}}),
    );
    assert_eq!(
        read["output"]["Child"]["record"]["Collection"],
        json!({"owner": "alice", "watches": []})
    );
}

#[test]
fn missing_record_response() {
    let (_vault, ex) = quick_setup();
    let resp = send(
        &ex,
        json!({"ReadChild": {"domain": "Providers", "key": "provider_7"}}),
    );
    assert_eq!(resp["ok"], json!(false));
    assert_eq!(resp["code"], json!("NotFound"));
    assert!(resp["message"].as_str().unwrap().contains("provider_7"));
    assert!(resp.get("output").is_none());
}

#[test]
fn rejected_fields_are_reported_on_success() {
    let (_vault, ex) = quick_setup();
    send(&ex, json!({"CreateCollection": {"owner": "alice"}}));
    let resp = send(
        &ex,
        json!({"PatchChild": {
            "domain": "Collections",
            "key": "collection_1",
            "patch": {"owner": "bob", "watches": [], "nickname": "b"}
        }}),
    );
    assert_eq!(resp["ok"], json!(true));
    let report = &resp["output"]["Patched"]["report"];
    assert_eq!(report["applied"], json!(["owner"]));
    assert_eq!(
        report["rejected"],
        json!([
            {"field": "nickname", "issue": "unknown"},
            {"field": "watches", "issue": "immutable"}
        ])
    );
}

#[test]
fn data_round_trip_over_json() {
    let (_vault, ex) = quick_setup();
    let put = send(
        &ex,
        json!({"DataPut": {"key": "featured", "value": {"ids": [1, 2, 3]}}}),
    );
    assert!(put["output"]["Version"].is_u64());
    let got = send(&ex, json!({"DataGet": {"key": "featured"}}));
    assert_eq!(got["output"]["Value"], json!({"ids": [1, 2, 3]}));
}

#[test]
fn response_deserializes_back() {
    let (_vault, ex) = quick_setup();
    let resp = ex.respond(Command::Ping);
    let json = serde_json::to_string(&resp).unwrap();
    let back: Response = serde_json::from_str(&json).unwrap();
    assert_eq!(back, resp);
}
