//! Lifecycle tests across both domains.

use serde_json::json;
use watchvault::{
    Command, DocumentView, DomainKind, Error, Output, PatchedRecord, Record, WatchField,
    WatchRecord,
};

use crate::{child_key, patch, quick_setup};

#[test]
fn collection_keys_are_never_reused() {
    let (_vault, ex) = quick_setup();
    let k1 = child_key(ex.execute(Command::CreateCollection { owner: "a".into() }).unwrap());
    let k2 = child_key(ex.execute(Command::CreateCollection { owner: "b".into() }).unwrap());
    ex.execute(Command::DeleteChild {
        domain: DomainKind::Collections,
        key: k2.clone(),
    })
    .unwrap();
    let k3 = child_key(ex.execute(Command::CreateCollection { owner: "c".into() }).unwrap());

    assert_eq!(
        (k1.as_str(), k2.as_str(), k3.as_str()),
        ("collection_1", "collection_2", "collection_3")
    );
    assert_eq!(
        ex.execute(Command::ListChildren {
            domain: DomainKind::Collections
        })
        .unwrap(),
        Output::Keys(vec![k1, k3])
    );
}

#[test]
fn deleted_child_is_not_found() {
    let (_vault, ex) = quick_setup();
    let key = child_key(ex.execute(Command::CreateCollection { owner: "a".into() }).unwrap());
    ex.execute(Command::DeleteChild {
        domain: DomainKind::Collections,
        key: key.clone(),
    })
    .unwrap();
    let err = ex
        .execute(Command::ReadChild {
            domain: DomainKind::Collections,
            key,
        })
        .unwrap_err();
    assert!(matches!(err, Error::RecordNotFound { .. }));
}

#[test]
fn watch_ids_are_unique_across_domains_and_parents() {
    let (_vault, ex) = quick_setup();
    let c = child_key(ex.execute(Command::CreateCollection { owner: "a".into() }).unwrap());
    let p = child_key(
        ex.execute(Command::CreateProvider {
            brand: Some(json!("Omega")),
            website: None,
            country_origin: None,
        })
        .unwrap(),
    );

    let mut ids = Vec::new();
    for (domain, parent) in [
        (DomainKind::Collections, &c),
        (DomainKind::Providers, &p),
        (DomainKind::Collections, &c),
    ] {
        match ex
            .execute(Command::AddWatch {
                domain,
                parent: parent.clone(),
                watch: WatchRecord::default(),
            })
            .unwrap()
        {
            Output::Watch(w) => ids.push(w.watch_id),
            other => panic!("Expected Watch, got {:?}", other),
        }
    }
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn patch_with_unknown_field_still_applies_known_fields() {
    let (_vault, ex) = quick_setup();
    let c = child_key(ex.execute(Command::CreateCollection { owner: "a".into() }).unwrap());
    ex.execute(Command::AddWatch {
        domain: DomainKind::Collections,
        parent: c.clone(),
        watch: WatchRecord::default().with(WatchField::Brand, "Omega"),
    })
    .unwrap();

    let out = ex
        .execute(Command::PatchWatch {
            domain: DomainKind::Collections,
            parent: c.clone(),
            watch_id: 1,
            patch: patch(json!({"model": "Speedmaster", "price": 1})),
        })
        .unwrap();
    let Output::Patched { target, report } = out else {
        panic!("Expected Patched output");
    };
    assert_eq!(report.applied, vec!["model".to_string()]);
    assert_eq!(report.rejected[0].field, "price");
    let PatchedRecord::Watch { watch, .. } = target else {
        panic!("Expected patched watch");
    };
    assert_eq!(watch.brand, Some(json!("Omega")));
    assert_eq!(watch.model, Some(json!("Speedmaster")));
}

#[test]
fn provider_patch_persists() {
    let (_vault, ex) = quick_setup();
    let p = child_key(
        ex.execute(Command::CreateProvider {
            brand: Some(json!("Grand Seiko")),
            website: None,
            country_origin: Some(json!("JP")),
        })
        .unwrap(),
    );
    ex.execute(Command::PatchChild {
        domain: DomainKind::Providers,
        key: p.clone(),
        patch: patch(json!({"website": "grand-seiko.com", "countryOrigin": null})),
    })
    .unwrap();

    match ex
        .execute(Command::ReadChild {
            domain: DomainKind::Providers,
            key: p,
        })
        .unwrap()
    {
        Output::Child {
            record: Record::Provider(r),
            ..
        } => {
            assert_eq!(r.website, Some(json!("grand-seiko.com")));
            assert_eq!(r.country_origin, None);
            assert_eq!(r.brand, Some(json!("Grand Seiko")));
        }
        other => panic!("Expected Provider child, got {:?}", other),
    }
}

#[test]
fn roots_are_required() {
    let vault = watchvault::Vault::in_memory().unwrap();
    let ex = watchvault::Executor::new(vault);
    let err = ex
        .execute(Command::ListChildren {
            domain: DomainKind::Providers,
        })
        .unwrap_err();
    assert!(matches!(err, Error::RootNotFound { .. }));
    assert_eq!(ex.execute(Command::Keys).unwrap(), Output::Keys(vec![]));
}

#[test]
fn rewinding_a_counter_through_data_put_is_refused() {
    let (_vault, ex) = quick_setup();
    let first = child_key(ex.execute(Command::CreateCollection { owner: "a".into() }).unwrap());
    ex.execute(Command::DeleteChild {
        domain: DomainKind::Collections,
        key: first.clone(),
    })
    .unwrap();

    for counter in ["collectionID_counter", "provider_counter", "watchID_counter"] {
        let err = ex
            .execute(Command::DataPut {
                key: counter.into(),
                value: json!(0),
            })
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }), "{}: {:?}", counter, err);
    }
    assert_eq!(
        ex.execute(Command::DataGet {
            key: "collectionID_counter".into()
        })
        .unwrap(),
        Output::Value(json!(1))
    );

    let next = child_key(ex.execute(Command::CreateCollection { owner: "b".into() }).unwrap());
    assert_eq!(first, "collection_1");
    assert_eq!(next, "collection_2");
}

#[test]
fn overwriting_a_root_through_data_put_is_refused() {
    let (_vault, ex) = quick_setup();
    let key = child_key(ex.execute(Command::CreateCollection { owner: "a".into() }).unwrap());

    for root in ["Collections", "Providers"] {
        let err = ex
            .execute(Command::DataPut {
                key: root.into(),
                value: json!([1, 2]),
            })
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }), "{}: {:?}", root, err);
    }

    match ex
        .execute(Command::ReadRoot {
            domain: DomainKind::Collections,
        })
        .unwrap()
    {
        Output::Document(DocumentView::Collections(doc)) => {
            assert_eq!(doc.len(), 1);
            assert!(doc.contains(&key));
        }
        other => panic!("Expected Collections document, got {:?}", other),
    }
    assert!(ex
        .execute(Command::ReadRoot {
            domain: DomainKind::Providers
        })
        .is_ok());
}
