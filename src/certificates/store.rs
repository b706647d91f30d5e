use crate::certificates::{CertificateRecord, SCHEMA_VERSION};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize certificate collection: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlotDocument {
    schema_version: u32,
    certificates: Vec<CertificateRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SlotDocumentRef<'a> {
    schema_version: u32,
    certificates: &'a [CertificateRecord],
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("USERPROFILE").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_slot_path() -> PathBuf {
    home_dir().join(".vitrine").join("certificates.json")
}

fn normalize(mut records: Vec<CertificateRecord>) -> Vec<CertificateRecord> {
    for record in &mut records {
        if record.file_data_uri.as_deref() == Some("") {
            record.file_data_uri = None;
        }
    }
    records
}

fn parse_slot(data: &[u8], path: &Path) -> Result<Vec<CertificateRecord>, String> {
    let value: serde_json::Value = serde_json::from_slice(data)
        .map_err(|err| format!("failed to parse {}: {err}", path.display()))?;

    // Bare array is the layout the browser predecessor kept in localStorage.
    if value.is_array() {
        return serde_json::from_value(value)
            .map(normalize)
            .map_err(|err| format!("failed to parse legacy records in {}: {err}", path.display()));
    }

    let document: SlotDocument = serde_json::from_value(value)
        .map_err(|err| format!("failed to parse {}: {err}", path.display()))?;
    if document.schema_version != SCHEMA_VERSION {
        return Err(format!(
            "unknown schemaVersion in {}: {}",
            path.display(),
            document.schema_version
        ));
    }
    Ok(normalize(document.certificates))
}

fn read_slot(path: &Path) -> Result<Vec<CertificateRecord>, String> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(format!("failed to read {}: {err}", path.display())),
    };
    parse_slot(&data, path)
}

fn write_slot(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let tmp_path = path.with_extension("json.tmp");

    fs::write(&tmp_path, bytes)?;
    match fs::rename(&tmp_path, path) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if path.exists() {
                fs::remove_file(path)?;
                fs::rename(&tmp_path, path)?;
                Ok(())
            } else {
                Err(rename_err)
            }
        }
    }
}

#[derive(Debug)]
pub struct CertificateStore {
    path: PathBuf,
    records: Vec<CertificateRecord>,
}

impl CertificateStore {
    /// Reads the persisted slot. An absent slot is an empty collection;
    /// unreadable or malformed content also degrades to empty, with the
    /// reason reported as a warning instead of an error.
    pub fn load(path: PathBuf) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        let records = match read_slot(&path) {
            Ok(records) => records,
            Err(warning) => {
                warnings.push(warning);
                Vec::new()
            }
        };
        (Self { path, records }, warnings)
    }

    pub fn records(&self) -> &[CertificateRecord] {
        &self.records
    }

    pub fn add(&mut self, record: CertificateRecord) -> Result<(), StoreError> {
        self.records.push(record);
        self.persist()
    }

    /// Removes the first record with a matching id. `Ok(false)` when no such
    /// record exists; the slot is rewritten only when something was removed.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let Some(index) = self.records.iter().position(|record| record.id == id) else {
            return Ok(false);
        };
        self.records.remove(index);
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<(), StoreError> {
        let document = SlotDocumentRef {
            schema_version: SCHEMA_VERSION,
            certificates: &self.records,
        };
        let bytes = serde_json::to_vec_pretty(&document)?;
        write_slot(&self.path, &bytes).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
