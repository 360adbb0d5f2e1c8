//! Serialization tests for Command, Output and Error.
//!
//! Transports send these enums as JSON, so each shape must survive a
//! round trip and keep the stored field names of records.

use serde_json::json;

use crate::types::*;
use crate::{Command, Error, Output, Response, WatchField, WatchRecord};

/// Helper to test round-trip serialization of a Command.
fn test_command_round_trip(cmd: Command) {
    let json = serde_json::to_string(&cmd).expect("Failed to serialize command");
    let restored: Command = serde_json::from_str(&json).expect("Failed to deserialize command");
    assert_eq!(cmd, restored, "Command round-trip failed for: {}", json);
}

/// Helper to test round-trip serialization of an Output.
fn test_output_round_trip(output: Output) {
    let json = serde_json::to_string(&output).expect("Failed to serialize output");
    let restored: Output = serde_json::from_str(&json).expect("Failed to deserialize output");
    assert_eq!(output, restored, "Output round-trip failed for: {}", json);
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn test_command_ping() {
    test_command_round_trip(Command::Ping);
}

#[test]
fn test_command_patch_child() {
    test_command_round_trip(Command::PatchChild {
        domain: DomainKind::Providers,
        key: "provider_3".into(),
        patch: json!({"website": "example.ch", "bogus": [1, 2]})
            .as_object()
            .cloned()
            .unwrap(),
    });
}

#[test]
fn test_command_add_watch_uses_record_field_names() {
    let cmd = Command::AddWatch {
        domain: DomainKind::Collections,
        parent: "collection_1".into(),
        watch: WatchRecord::default()
            .with(WatchField::RefNumber, "5711/1A")
            .with(WatchField::AcquisitionDate, "2019-02-11"),
    };
    let v = serde_json::to_value(&cmd).unwrap();
    assert_eq!(v["AddWatch"]["watch"]["refNumber"], json!("5711/1A"));
    assert_eq!(v["AddWatch"]["watch"]["acquisitionDate"], json!("2019-02-11"));
    test_command_round_trip(cmd);
}

#[test]
fn test_command_create_provider_optional_fields() {
    let cmd: Command =
        serde_json::from_value(json!({"CreateProvider": {"brand": "Tudor"}})).unwrap();
    assert_eq!(
        cmd,
        Command::CreateProvider {
            brand: Some(json!("Tudor")),
            website: None,
            country_origin: None,
        }
    );
}

#[test]
fn test_command_unknown_field_rejected() {
    let result: std::result::Result<Command, _> = serde_json::from_value(json!({
        "ReadChild": {"domain": "Collections", "key": "collection_1", "extra": true}
    }));
    assert!(result.is_err());
}

#[test]
fn test_command_add_watch_unknown_field_rejected() {
    let result: std::result::Result<Command, _> = serde_json::from_value(json!({
        "AddWatch": {
            "domain": "Collections",
            "parent": "collection_1",
            "watch": {"brand": "Omega", "price": 10}
        }
    }));
    assert!(result.is_err());
}

#[test]
fn test_command_unit_variant_as_string() {
    let cmd: Command = serde_json::from_str("\"Keys\"").unwrap();
    assert_eq!(cmd, Command::Keys);
}

// =============================================================================
// Outputs
// =============================================================================

#[test]
fn test_output_child() {
    test_output_round_trip(Output::Child {
        key: "collection_1".into(),
        record: Record::Collection(crate::CollectionRecord::new("alice")),
    });
}

#[test]
fn test_output_patched_with_rejections() {
    let report: PatchReport = serde_json::from_value(json!({
        "applied": ["brand"],
        "rejected": [{"field": "watchID", "issue": "immutable"}]
    }))
    .unwrap();
    test_output_round_trip(Output::Patched {
        target: PatchedRecord::Watch {
            parent: "provider_1".into(),
            watch: WatchRecord {
                watch_id: 4,
                ..WatchRecord::default()
            },
        },
        report,
    });
}

#[test]
fn test_output_value_and_keys() {
    test_output_round_trip(Output::Value(json!({"nested": [1, null, "x"]})));
    test_output_round_trip(Output::Keys(vec!["Collections".into(), "watchID_counter".into()]));
    test_output_round_trip(Output::Created(false));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_error_round_trip() {
    let err = Error::WatchNotFound {
        parent: "collection_2".into(),
        watch_id: 9,
    };
    let json = serde_json::to_string(&err).unwrap();
    let restored: Error = serde_json::from_str(&json).unwrap();
    assert_eq!(err, restored);
    assert_eq!(restored.code(), "NotFound");
}

#[test]
fn test_response_envelope_shape() {
    let failed: Response = Err::<Output, _>(Error::KeyNotFound { key: "k".into() }).into();
    assert_eq!(
        serde_json::to_value(&failed).unwrap(),
        json!({"ok": false, "code": "NotFound", "message": "key not found: k"})
    );

    let ok: Response = Ok(Output::Unit).into();
    assert_eq!(
        serde_json::to_value(&ok).unwrap(),
        json!({"ok": true, "output": "Unit"})
    );
}
