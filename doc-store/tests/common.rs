#![allow(dead_code)]
//! Patient fixture shared by the `doc-store` integration tests.

use doc_store::{Document, FakeCollection};
use serde_json::{Value, json};

pub const IDS: [&str; 3] = [
    "39d6d76f-8572-4a33-a598-bc7dda1da186",
    "39d6d76f-8572-4a33-a598-bc7dda1da194",
    "39d6d76f-8572-4a33-a598-bc7dda1da195",
];

pub const NESTED_ID: &str = "wer326324wey5u45u";

#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: i64,
    pub temperature: f64,
}

impl Patient {
    pub fn to_document(&self) -> Document {
        as_document(json!({
            "_id": self.id,
            "name": self.name,
            "age": self.age,
            "temperature": self.temperature,
        }))
    }
}

/// Zips ids with the fixed names, ages and temperatures.
#[derive(Debug, Default)]
pub struct PatientsBuilder {
    ids: Vec<String>,
}

impl PatientsBuilder {
    const NAMES: [&'static str; 3] = ["Joe", "Chuck", "Evan"];
    const AGES: [i64; 3] = [20, 30, 40];
    const TEMPERATURES: [f64; 3] = [36.7, 37.1, 38.1];

    pub fn ids<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.ids.extend(ids.into_iter().map(str::to_string));
        self
    }

    pub fn build(self) -> Vec<Patient> {
        self.ids
            .into_iter()
            .zip(Self::NAMES)
            .zip(Self::AGES)
            .zip(Self::TEMPERATURES)
            .map(|(((id, name), age), temperature)| Patient {
                id,
                name: name.to_string(),
                age,
                temperature,
            })
            .collect()
    }
}

pub fn nested_document() -> Document {
    as_document(json!({
        "_id": NESTED_ID,
        "person": { "name": "Sam", "age": 56, "temperature": 35.6 },
    }))
}

pub fn patients_collection() -> FakeCollection {
    let mut collection = FakeCollection::new("testcoll2");
    for patient in PatientsBuilder::default().ids(IDS).build() {
        collection.push(patient.to_document());
    }
    collection.push(nested_document());
    collection
}

pub fn as_document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

pub fn ids_of(documents: &[&Document]) -> Vec<String> {
    documents
        .iter()
        .map(|document| document["_id"].as_str().unwrap().to_string())
        .collect()
}

pub fn quoted_ids(ids: &[&str]) -> String {
    ids.iter()
        .map(|id| format!("\"{id}\""))
        .collect::<Vec<_>>()
        .join(",")
}

/// The queries from the persistor's integration suite with their expected ids.
pub fn scenarios() -> Vec<(String, Vec<&'static str>)> {
    vec![
        (format!(" _id $in {{ \"{}\" }} ", IDS[0]), vec![IDS[0]]),
        (
            format!(" _id $in {{ \"{}\" }} name $eq \"Joe\" ", IDS[0]),
            vec![IDS[0]],
        ),
        (
            format!(" _id $in {{ \"{}\" }} name $eq \"Joe\" age $gt 80 ", IDS[0]),
            vec![],
        ),
        (
            format!(
                " _id $in {{ \"{}\" }} name $eq \"Joe\" age $gt 10 temperature $eq 36.7  ",
                IDS[0]
            ),
            vec![IDS[0]],
        ),
        (" age $lt 40 temperature $lt 37.5  ".to_string(), vec![IDS[0], IDS[1]]),
        (format!(" _id $in {{ {} }} ", quoted_ids(&IDS)), IDS.to_vec()),
        (
            " person.name $eq \"Sam\" person.age $lt 60 ".to_string(),
            vec![NESTED_ID],
        ),
    ]
}
