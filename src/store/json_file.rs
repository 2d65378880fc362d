use crate::error::{GraderError, Result};
use crate::store::GradeStore;
use crate::types::report::{ManualOverride, StoredGrade};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const STORE_VERSION: u32 = 1;
pub const DEFAULT_STORE_FILE: &str = ".grader/grades.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreDocument {
    version: u32,
    #[serde(default)]
    grades: BTreeMap<String, StoredGrade>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            grades: BTreeMap::new(),
        }
    }
}

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    document: StoreDocument,
}

impl JsonFileStore {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self {
                path: path.to_path_buf(),
                document: StoreDocument::default(),
            });
        }

        let file = File::open(path)?;
        let document: StoreDocument = serde_json::from_reader(file)?;
        if document.version != STORE_VERSION {
            return Err(GraderError::Store(format!(
                "{}: unsupported store version {}",
                path.display(),
                document.version
            )));
        }
        debug!(path = %path.display(), records = document.grades.len(), "opened grade store");
        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.document.grades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.grades.is_empty()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = AtomicWriteFile::open(&self.path)?;
        serde_json::to_writer_pretty(&mut file, &self.document)?;
        file.commit()?;
        Ok(())
    }

    fn record_mut(&mut self, bill_id: &str) -> Result<&mut StoredGrade> {
        self.document
            .grades
            .get_mut(bill_id)
            .ok_or_else(|| GraderError::BillNotFound(bill_id.to_string()))
    }
}

impl GradeStore for JsonFileStore {
    fn upsert(&mut self, mut record: StoredGrade) -> Result<()> {
        record.bill.state_code = record.bill.state();
        let key = record.bill_id().to_string();
        if let Some(existing) = self.document.grades.get(&key) {
            if record.manual_override.is_none() {
                record.manual_override = existing.manual_override.clone();
            }
        }
        self.document.grades.insert(key, record);
        self.save()
    }

    fn get(&self, bill_id: &str) -> Option<StoredGrade> {
        self.document.grades.get(bill_id).cloned()
    }

    fn records(&self, state: Option<&str>) -> Vec<StoredGrade> {
        let state = state.map(|code| code.trim().to_ascii_uppercase());
        self.document
            .grades
            .values()
            .filter(|record| state.is_none() || record.bill.state() == state)
            .cloned()
            .collect()
    }

    fn set_override(&mut self, bill_id: &str, manual: ManualOverride) -> Result<()> {
        self.record_mut(bill_id)?.manual_override = Some(manual);
        self.save()
    }

    fn clear_override(&mut self, bill_id: &str) -> Result<()> {
        self.record_mut(bill_id)?.manual_override = None;
        self.save()
    }
}
