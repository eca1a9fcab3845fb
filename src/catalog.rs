use std::path::{Path, PathBuf};

use crate::{
    error::{Error, Result},
    record::Record,
    search::{self, Hit},
};

/// An immutable collection of records loaded from a JSON document.
///
/// The document is a JSON array of flat objects. Records are kept in
/// document order, and each record keeps its own field order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    source: Option<PathBuf>,
    records: Vec<Record>,
}

impl Catalog {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotFound {
                kind: "record document",
                name: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let records: Vec<Record> =
            serde_json::from_str(&content).map_err(|e| Error::Data {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        tracing::info!(
            path = %path.display(),
            records = records.len(),
            "loaded record document"
        );

        Ok(Self {
            source: Some(path.to_path_buf()),
            records,
        })
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            source: None,
            records,
        }
    }

    /// Path the catalog was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct field names, in order of first appearance.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.records.iter().flat_map(Record::names) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    pub fn search(&self, query: Option<&str>) -> Vec<&Record> {
        search::search(query, &self.records)
    }

    pub fn execute_search(&self, query: Option<&str>) -> Vec<Hit<'_>> {
        search::execute_search(query, &self.records)
    }
}
