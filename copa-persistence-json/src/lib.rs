//! Record store backed by one pretty-printed JSON array per collection.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use copa_app::ports::store::{Collection, RecordStore, StoreError, decode_records};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::ser::PrettyFormatter;

pub const DEFAULT_DATA_DIR: &str = "data";

pub struct JsonFileStore {
    base_dir: PathBuf,
}

impl JsonFileStore {
    /// The directory is created on first save, not here.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn file_name(collection: Collection) -> &'static str {
        match collection {
            Collection::Players => "jogadoras.json",
            Collection::Documents => "documentos.json",
            Collection::Teams => "times.json",
            Collection::Tournaments => "torneios.json",
            Collection::Enrollments => "inscricoes.json",
            Collection::OcrCache => "ocr_cache.json",
        }
    }

    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.base_dir.join(Self::file_name(collection))
    }

    fn encode<T: Serialize>(collection: Collection, records: &[T]) -> Result<Vec<u8>, StoreError> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        records
            .serialize(&mut serializer)
            .map_err(|source| StoreError::Serialization { collection, source })?;
        Ok(buf)
    }
}

impl RecordStore for JsonFileStore {
    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, StoreError> {
        let path = self.collection_path(collection);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { collection, source }),
        };

        let values: Vec<serde_json::Value> = match serde_json::from_str(&contents) {
            Ok(values) => values,
            Err(e) => {
                log::warn!("Unparsable collection {:?}, treating as empty: {}", path, e);
                return Ok(Vec::new());
            }
        };
        decode_records(collection, values)
    }

    fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<(), StoreError> {
        let json = Self::encode(collection, records)?;
        let io_error = |source: std::io::Error| StoreError::Io { collection, source };

        fs::create_dir_all(&self.base_dir).map_err(io_error)?;

        let path = self.collection_path(collection);
        let temp_path = self
            .base_dir
            .join(format!(".{}.tmp", Self::file_name(collection)));
        fs::write(&temp_path, json).map_err(io_error)?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(io_error(e));
        }

        log::debug!("Wrote {} records to {:?}", records.len(), path);
        Ok(())
    }
}
