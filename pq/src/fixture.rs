use anyhow::{Context, Result};
use doc_store::{Document, FakeCollection};
use serde::Deserialize;
use std::{fs::File, io::BufReader, path::Path};

#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureFile {
    Documents(Vec<Document>),
    Collection(FakeCollection),
}

/// Reads a fixture file. A bare array of documents gets `default_name`.
pub fn load_fixture(path: &Path, default_name: &str) -> Result<FakeCollection> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open fixture {}", path.display()))?;
    let fixture: FixtureFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to decode fixture {}", path.display()))?;
    Ok(match fixture {
        FixtureFile::Documents(documents) => FakeCollection::with_documents(default_name, documents),
        FixtureFile::Collection(collection) => collection,
    })
}
