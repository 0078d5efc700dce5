use super::errors::{AppError, AppResult};
use crate::application::{Store, StoreCommand, StoreSnapshot};
use crate::domain::{BusinessEntitySchema, EntityInput};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub struct FileRepository;

impl FileRepository {
    pub fn save_store(snapshot: &StoreSnapshot, path: &Path) -> AppResult<()> {
        let json = serde_json::to_string_pretty(snapshot).map_err(|e| AppError::json(path, e))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }
        fs::write(path, json).map_err(|e| AppError::io(path, e))?;
        debug!(path = %path.display(), contacts = snapshot.contacts.len(), "store saved");
        Ok(())
    }

    /// Loads a snapshot. A file that does not exist yet is an empty store.
    pub fn load_store(path: &Path) -> AppResult<StoreSnapshot> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no data file yet, starting empty");
                return Ok(StoreSnapshot::default());
            }
            Err(e) => return Err(AppError::io(path, e)),
        };
        let snapshot: StoreSnapshot = serde_json::from_str(&content).map_err(|e| AppError::json(path, e))?;
        debug!(path = %path.display(), contacts = snapshot.contacts.len(), "store loaded");
        Ok(snapshot)
    }
}

/// One line of a contacts CSV file.
#[derive(Debug, Serialize, Deserialize)]
struct ContactRecord {
    #[serde(default)]
    id: String,
    name: String,
    address: String,
    #[serde(default)]
    gst: String,
}

/// Outcome of [`ContactCsv::import`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

pub struct ContactCsv;

impl ContactCsv {
    /// Writes all contacts with the header `id,name,address,gst`.
    pub fn export(store: &dyn Store, path: &Path) -> AppResult<usize> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| AppError::csv(path, e))?;
        for contact in store.contacts() {
            writer
                .serialize(ContactRecord {
                    id: contact.id.clone().unwrap_or_default(),
                    name: contact.name.clone(),
                    address: contact.address.clone(),
                    gst: contact.gst.clone().unwrap_or_default(),
                })
                .map_err(|e| AppError::csv(path, e))?;
        }
        writer.flush().map_err(|e| AppError::io(path, e))?;
        info!(path = %path.display(), count = store.contacts().len(), "contacts exported");
        Ok(store.contacts().len())
    }

    /// Saves every valid row as a contact. Rows that cannot be parsed or
    /// fail validation are skipped and counted.
    pub fn import(store: &mut dyn Store, path: &Path) -> AppResult<ImportSummary> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| AppError::csv(path, e))?;
        let mut summary = ImportSummary::default();

        for (line, record) in reader.deserialize::<ContactRecord>().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    warn!(line = line + 2, error = %e, "skipping unreadable contact row");
                    summary.skipped += 1;
                    continue;
                }
            };

            let input = EntityInput {
                id: Some(record.id.trim().to_string()).filter(|id| !id.is_empty()),
                name: record.name,
                address: record.address,
                gst: record.gst,
            };
            match BusinessEntitySchema::validate(&input) {
                Ok(contact) => {
                    store.dispatch(StoreCommand::SaveContact(contact));
                    summary.imported += 1;
                }
                Err(errors) => {
                    warn!(line = line + 2, %errors, "skipping invalid contact row");
                    summary.skipped += 1;
                }
            }
        }

        info!(path = %path.display(), imported = summary.imported, skipped = summary.skipped, "contacts imported");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::RecordingStore;
    use crate::application::MemoryStore;
    use crate::domain::BusinessEntity;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = MemoryStore::default();
        store.dispatch(StoreCommand::SaveContact(BusinessEntity::new("Acme", "1 Main St")));
        store.dispatch(StoreCommand::AddSenderInfo(BusinessEntity::new("Me", "Here").with_gst("G1")));

        FileRepository::save_store(&store.snapshot(), &path).unwrap();
        let loaded = FileRepository::load_store(&path).unwrap();

        assert_eq!(loaded, store.snapshot());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let loaded = FileRepository::load_store(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, StoreSnapshot::default());
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let err = FileRepository::load_store(&path).unwrap_err();
        assert!(matches!(err, AppError::Json { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_csv_export_then_import() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.csv");

        let source = MemoryStore::with_contacts(vec![
            BusinessEntity::new("Acme", "1 Main St\nSpringfield").with_id("a"),
            BusinessEntity::new("Globex, Inc.", "2 Side St").with_id("b").with_gst("G2"),
        ]);
        assert_eq!(ContactCsv::export(&source, &path).unwrap(), 2);

        let mut target = MemoryStore::default();
        let summary = ContactCsv::import(&mut target, &path).unwrap();

        assert_eq!(summary, ImportSummary { imported: 2, skipped: 0 });
        assert_eq!(target.contacts(), source.contacts());
    }

    #[test]
    fn test_csv_import_skips_invalid_rows_and_assigns_ids() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.csv");
        fs::write(
            &path,
            "id,name,address,gst\n,Acme,1 Main St,\n,,2 Side St,\nx,Initech,,G3\n,Umbrella,4 Hill,G4\n",
        )
        .unwrap();

        let mut store = MemoryStore::default();
        let summary = ContactCsv::import(&mut store, &path).unwrap();

        assert_eq!(summary, ImportSummary { imported: 2, skipped: 2 });
        let names: Vec<_> = store.contacts().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Acme", "Umbrella"]);
        assert!(store.contacts().iter().all(|c| c.id.is_some()));
        assert_eq!(store.contacts()[1].gst.as_deref(), Some("G4"));
    }

    #[test]
    fn test_csv_import_missing_file_fails() {
        let dir = tempdir().unwrap();
        let mut store = MemoryStore::default();
        let err = ContactCsv::import(&mut store, &dir.path().join("none.csv")).unwrap_err();
        assert!(matches!(err, AppError::Csv { .. }));
    }

    #[test]
    fn test_csv_import_dispatches_save_per_valid_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.csv");
        fs::write(&path, "id,name,address,gst
c-1,Acme,1 Main St,
,,2 Side St,
").unwrap();

        let mut store = RecordingStore::default();
        let summary = ContactCsv::import(&mut store, &path).unwrap();

        assert_eq!(summary, ImportSummary { imported: 1, skipped: 1 });
        assert_eq!(
            store.commands,
            vec![StoreCommand::SaveContact(BusinessEntity::new("Acme", "1 Main St").with_id("c-1"))]
        );
    }
}
