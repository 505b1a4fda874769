use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tempfile::TempDir;
use user_json_api::store::JsonFile;
use user_json_api::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Doc {
    items: Vec<String>,
}

fn doc_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("doc.json")
}

// ---- bootstrap --------------------------------------------------------------

#[tokio::test]
async fn read_bootstraps_missing_file_with_initial_document() {
    let dir = TempDir::new().unwrap();
    let initial = Doc {
        items: vec!["seed".into()],
    };
    let db = JsonFile::<Doc>::builder(doc_path(&dir))
        .initial_document(initial.clone())
        .build();

    let doc = db.read().await.unwrap();
    assert_eq!(doc, initial);

    // the file was created on disk, not just returned in memory
    let raw = std::fs::read_to_string(doc_path(&dir)).unwrap();
    let on_disk: Doc = serde_json::from_str(&raw).unwrap();
    assert_eq!(on_disk, initial);
}

#[tokio::test]
async fn read_without_initial_document_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let db = JsonFile::<Doc>::open(doc_path(&dir));

    let err = db.read().await.unwrap_err();
    assert!(matches!(err, Error::StorageUnavailable(_)), "got {err:?}");
}

#[tokio::test]
async fn corrupt_json_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(doc_path(&dir), b"{{{ not json").unwrap();
    let db = JsonFile::<Doc>::open(doc_path(&dir));

    let err = db.read().await.unwrap_err();
    assert!(matches!(err, Error::StorageCorrupt(_)), "got {err:?}");
}

// ---- read / write -----------------------------------------------------------

#[tokio::test]
async fn write_then_read_round_trip() {
    let dir = TempDir::new().unwrap();
    let db = JsonFile::<Doc>::open(doc_path(&dir));

    let doc = Doc {
        items: vec!["a".into(), "b".into()],
    };
    db.write(&doc).await.unwrap();
    assert_eq!(db.read().await.unwrap(), doc);
}

#[tokio::test]
async fn pretty_and_compact_output() {
    let dir = TempDir::new().unwrap();

    let pretty = JsonFile::<Doc>::builder(dir.path().join("pretty.json"))
        .initial_document(Doc::default())
        .pretty(true)
        .build();
    pretty.read().await.unwrap();
    let raw = std::fs::read_to_string(dir.path().join("pretty.json")).unwrap();
    assert!(raw.contains('\n'));

    let compact = JsonFile::<Doc>::builder(dir.path().join("compact.json"))
        .initial_document(Doc::default())
        .build();
    compact.read().await.unwrap();
    let raw = std::fs::read_to_string(dir.path().join("compact.json")).unwrap();
    assert!(!raw.contains('\n'));
}

// ---- transactions -----------------------------------------------------------

#[tokio::test]
async fn transaction_persists_and_returns_the_closure_output() {
    let dir = TempDir::new().unwrap();
    let db = JsonFile::<Doc>::builder(doc_path(&dir))
        .initial_document(Doc::default())
        .build();

    let len = db
        .transaction(|doc| {
            doc.items.push("x".into());
            Ok(doc.items.len())
        })
        .await
        .unwrap();
    assert_eq!(len, 1);

    // a fresh store over the same path sees the committed write
    let reopened = JsonFile::<Doc>::open(doc_path(&dir));
    assert_eq!(reopened.read().await.unwrap().items, vec!["x".to_string()]);
}

#[tokio::test]
async fn failed_transaction_leaves_the_file_untouched() {
    let dir = TempDir::new().unwrap();
    let db = JsonFile::<Doc>::builder(doc_path(&dir))
        .initial_document(Doc::default())
        .build();
    db.transaction(|doc| {
        doc.items.push("committed".into());
        Ok(())
    })
    .await
    .unwrap();

    let err = db
        .transaction(|doc| {
            doc.items.push("must not survive".into());
            Err::<(), _>(Error::StorageIo("simulated".into()))
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::StorageIo(_)));

    assert_eq!(
        db.read().await.unwrap().items,
        vec!["committed".to_string()]
    );
}

#[tokio::test]
async fn transaction_observes_the_latest_committed_write() {
    let dir = TempDir::new().unwrap();
    let db = JsonFile::<Doc>::builder(doc_path(&dir))
        .initial_document(Doc::default())
        .build();

    db.write(&Doc {
        items: vec!["from-write".into()],
    })
    .await
    .unwrap();

    db.transaction(|doc| {
        assert_eq!(doc.items, vec!["from-write".to_string()]);
        doc.items.push("from-tx".into());
        Ok(())
    })
    .await
    .unwrap();

    assert_eq!(db.read().await.unwrap().items.len(), 2);
}

#[tokio::test]
async fn concurrent_transactions_all_commit() {
    let dir = TempDir::new().unwrap();
    let db = Arc::new(
        JsonFile::<Doc>::builder(doc_path(&dir))
            .initial_document(Doc::default())
            .build(),
    );

    let mut handles = Vec::new();
    for i in 0..16 {
        let db = Arc::clone(&db);
        handles.push(tokio::spawn(async move {
            db.transaction(move |doc| {
                doc.items.push(format!("item-{i}"));
                Ok(())
            })
            .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let mut items = db.read().await.unwrap().items;
    assert_eq!(items.len(), 16);
    items.sort();
    items.dedup();
    assert_eq!(items.len(), 16, "lost or duplicated a write");
}
