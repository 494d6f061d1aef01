mod support;

use pretty_assertions::assert_eq;
use rowboat::driver::UpdateSpec;
use rowboat::{Executor, Record, RecordSchema, Value};
use std::sync::Arc;
use support::{document_record, row, MockStore};

#[tokio::test]
async fn document_update_sends_only_dirty_fields() {
    let (mut record, store) = document_record(row(&[
        ("_id", 1.into()),
        ("title", "old-title".into()),
        ("body", "unchanged".into()),
    ]));

    record.set("title", "new-title").await.unwrap();
    record.save().await.unwrap();

    let log = store.log();
    assert_eq!(log.updated.len(), 1);
    assert_eq!(log.updated[0].0, Value::from(1));
    assert_eq!(
        log.updated[0].1,
        UpdateSpec::new(row(&[("title", "new-title".into())]))
    );
    assert!(!record.is_modified());
}

#[tokio::test]
async fn document_update_with_nothing_modified_is_a_noop() {
    let (mut record, store) = document_record(row(&[("_id", 1.into()), ("title", "old".into())]));

    record.save().await.unwrap();
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn document_insert_writes_back_generated_id() {
    let (mut record, store) = document_record(row(&[("title", "new".into())]));
    store.generate_key("65f0c0ffee");

    record.save().await.unwrap();

    assert_eq!(record.get("_id").unwrap(), Value::from("65f0c0ffee"));
    assert_eq!(store.log().inserted.len(), 1);
}

#[tokio::test]
async fn document_insert_applies_encode_hook() {
    let schema = Arc::new(
        RecordSchema::builder("posts")
            .primary_key("_id")
            .encode(|data| {
                let mut doc = data.clone();
                doc.insert("schema_version".into(), 2.into());
                doc
            })
            .build()
            .unwrap(),
    );
    let store = MockStore::new(&["_id", "title"]);
    store.generate_key(1);
    let mut record = Record::new(
        schema,
        Executor::Document(store.clone()),
        row(&[("title", "new".into())]),
    );

    record.save().await.unwrap();

    let inserted = &store.log().inserted[0];
    assert_eq!(inserted.get("schema_version"), Some(&Value::from(2)));
    assert_eq!(inserted.get("title"), Some(&Value::from("new")));
    // the hook transforms the payload, not the record's own data
    assert_eq!(record.data().get("schema_version"), None);
}

#[tokio::test]
async fn document_update_reads_through_encode_hook() {
    let schema = Arc::new(
        RecordSchema::builder("posts")
            .primary_key("_id")
            .encode(|data| {
                let mut doc = data.clone();
                if let Some(title) = doc.get("title").and_then(Value::as_str) {
                    let upper = title.to_uppercase();
                    doc.insert("title".into(), upper.into());
                }
                doc
            })
            .build()
            .unwrap(),
    );
    let store = MockStore::new(&["_id", "title"]);
    let mut record = Record::new(
        schema,
        Executor::Document(store.clone()),
        row(&[("_id", 1.into()), ("title", "old".into())]),
    );

    record.set("title", "new").await.unwrap();
    record.save().await.unwrap();

    let log = store.log();
    assert_eq!(
        log.updated[0].1,
        UpdateSpec::new(row(&[("title", "NEW".into())]))
    );
}

#[tokio::test]
async fn failed_document_update_keeps_dirty_state() {
    let (mut record, store) = document_record(row(&[("_id", 1.into()), ("title", "old".into())]));

    record.set("title", "new").await.unwrap();
    store.fail(true);

    assert!(record.save().await.is_err());
    assert!(record.is_modified());
}
