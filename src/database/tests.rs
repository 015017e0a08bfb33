use super::*;
use persistor_syntax::parse_query;
use serde_json::json;
use std::thread;

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn names(documents: &[Document]) -> Vec<&str> {
    documents
        .iter()
        .map(|document| document["name"].as_str().unwrap())
        .collect()
}

fn seeded() -> FakeDatabase {
    let database = FakeDatabase::new();
    for (id, name, age) in [("1", "Joe", 20), ("2", "Chuck", 30), ("3", "Evan", 40)] {
        database.save("patients", doc(json!({ "_id": id, "name": name, "age": age })));
    }
    database
}

#[test]
fn unknown_collection_is_empty() {
    let database = FakeDatabase::new();
    assert!(database.snapshot("nothing").is_empty());
    let predicates = parse_query("age $gt 1").unwrap();
    assert!(database.find("nothing", &predicates).is_empty());
    assert_eq!(database.delete("nothing", &json!({})), Ok(0));
}

#[test]
fn save_assigns_missing_ids() {
    let database = FakeDatabase::new();
    let id = database.save("c", doc(json!({ "name": "Joe" })));
    let id = id.as_str().unwrap();
    assert_eq!(id.len(), 36);
    assert_eq!(database.snapshot("c")[0]["_id"], json!(id));
}

#[test]
fn save_replaces_by_id_in_place() {
    let database = seeded();
    database.save("patients", doc(json!({ "_id": "2", "name": "Charles", "age": 31 })));
    let snapshot = database.snapshot("patients");
    assert_eq!(snapshot.len(), 3);
    assert_eq!(names(&snapshot), ["Joe", "Charles", "Evan"]);
}

#[test]
fn find_keeps_insertion_order() {
    let database = seeded();
    let predicates = parse_query("age $gt 10").unwrap();
    assert_eq!(names(&database.find("patients", &predicates)), ["Joe", "Chuck", "Evan"]);
}

#[test]
fn find_by_filter_agrees_with_find() {
    let database = seeded();
    let predicates = parse_query(r#"age $lt 40 name $in { "Evan", "Chuck" }"#).unwrap();
    let filter = doc_store::translate(&predicates).unwrap();
    assert_eq!(
        database.find_by_filter("patients", &filter).unwrap(),
        database.find("patients", &predicates)
    );
}

#[test]
fn delete_by_matcher() {
    let database = seeded();
    assert_eq!(database.delete("patients", &json!({ "age": { "$gt": 25 } })), Ok(2));
    assert_eq!(names(&database.snapshot("patients")), ["Joe"]);
    assert_eq!(database.delete("patients", &json!({})), Ok(1));
    assert!(database.snapshot("patients").is_empty());
}

#[test]
fn malformed_matcher_is_an_error() {
    let database = seeded();
    assert!(database.delete("patients", &json!({ "$or": [] })).is_err());
    assert!(database.find_by_filter("patients", &json!("x")).is_err());
    assert_eq!(database.snapshot("patients").len(), 3);
}

#[test]
fn snapshots_survive_later_writes() {
    let database = seeded();
    let before = database.snapshot("patients");
    database.delete("patients", &json!({})).unwrap();
    assert_eq!(before.len(), 3);
    assert!(database.snapshot("patients").is_empty());
}

#[test]
fn concurrent_reads_see_whole_writes() {
    let database = Arc::new(FakeDatabase::new());
    let predicates = Arc::new(parse_query("n $gt -1").unwrap());

    let writer = {
        let database = Arc::clone(&database);
        thread::spawn(move || {
            for n in 0..200 {
                database.save("numbers", doc(json!({ "_id": n, "n": n })));
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let database = Arc::clone(&database);
            let predicates = Arc::clone(&predicates);
            thread::spawn(move || {
                for _ in 0..50 {
                    let found = database.find("numbers", &predicates);
                    // a prefix 0..k, never a gap
                    for (i, document) in found.iter().enumerate() {
                        assert_eq!(document["n"], json!(i));
                    }
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(database.snapshot("numbers").len(), 200);
}

#[test]
fn collection_names_are_sorted() {
    let database = seeded();
    database.save("alpha", Document::new());
    assert_eq!(database.collection_names(), ["alpha", "patients"]);
}
