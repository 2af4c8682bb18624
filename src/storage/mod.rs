use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::prompt::{CollectionError, Prompt, PromptCollection};

const APP_DATA_DIR: &str = ".prompt_manager";
const DATA_FILE_NAME: &str = "prompts.json";
const BACKUP_FILE_NAME: &str = "prompts.json.old.bak";
const JSON_INDENT: &[u8] = b"    ";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("failed to create storage directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read prompt file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("prompt file {path} is corrupted: {source}")]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("prompt file {path} contains duplicate title {title:?}")]
    DuplicateTitle { path: PathBuf, title: String },
    #[error("prompt file {path} contains an empty or whitespace-padded title {title:?}")]
    InvalidTitle { path: PathBuf, title: String },
    #[error("failed to serialize prompts: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to back up {path} to {backup}: {source}")]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write prompt file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// True when the persisted file exists but cannot be trusted.
    pub fn is_corrupt_data(&self) -> bool {
        matches!(
            self,
            StorageError::CorruptData { .. }
                | StorageError::DuplicateTitle { .. }
                | StorageError::InvalidTitle { .. }
        )
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

pub trait PromptStorage {
    fn load(&self) -> StorageResult<PromptCollection>;
    fn save(&self, collection: &PromptCollection) -> StorageResult<()>;
}

/// Flat JSON file with a single-generation backup next to it.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    data_path: PathBuf,
    backup_path: PathBuf,
}

impl JsonFileStorage {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            data_path: dir.join(DATA_FILE_NAME),
            backup_path: dir.join(BACKUP_FILE_NAME),
        }
    }

    pub fn with_default_dir() -> StorageResult<Self> {
        let home = std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .ok_or(StorageError::MissingHomeDirectory)?;
        let dir = PathBuf::from(home).join(APP_DATA_DIR);
        ensure_dir(&dir)?;
        Ok(Self::in_dir(dir))
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    fn backup_current(&self) -> StorageResult<()> {
        if !self.data_path.exists() {
            return Ok(());
        }
        fs::copy(&self.data_path, &self.backup_path).map_err(|source| StorageError::Backup {
            path: self.data_path.clone(),
            backup: self.backup_path.clone(),
            source,
        })?;
        tracing::debug!(backup = %self.backup_path.display(), "refreshed prompt backup");
        Ok(())
    }
}

impl PromptStorage for JsonFileStorage {
    fn load(&self) -> StorageResult<PromptCollection> {
        let raw = match fs::read_to_string(&self.data_path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(
                    path = %self.data_path.display(),
                    "no prompt file yet; starting empty"
                );
                return Ok(PromptCollection::new());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.data_path.clone(),
                    source,
                })
            }
        };

        let prompts: Vec<Prompt> =
            serde_json::from_str(&raw).map_err(|source| StorageError::CorruptData {
                path: self.data_path.clone(),
                source,
            })?;
        let collection =
            PromptCollection::from_prompts(prompts).map_err(|err| match err {
                CollectionError::DuplicateTitle { title } => StorageError::DuplicateTitle {
                    path: self.data_path.clone(),
                    title,
                },
                CollectionError::UnnormalizedTitle { title } => StorageError::InvalidTitle {
                    path: self.data_path.clone(),
                    title,
                },
            })?;
        tracing::info!(
            path = %self.data_path.display(),
            count = collection.len(),
            "loaded prompts"
        );
        Ok(collection)
    }

    fn save(&self, collection: &PromptCollection) -> StorageResult<()> {
        let payload = encode_prompts(collection.all())?;
        self.backup_current()?;

        if let Some(parent) = self.data_path.parent() {
            ensure_dir(parent)?;
        }
        write_replace(&self.data_path, &payload).map_err(|source| StorageError::Write {
            path: self.data_path.clone(),
            source,
        })?;
        tracing::info!(
            path = %self.data_path.display(),
            count = collection.len(),
            "saved prompts"
        );
        Ok(())
    }
}

fn ensure_dir(dir: &Path) -> StorageResult<()> {
    fs::create_dir_all(dir).map_err(|source| StorageError::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    })
}

fn encode_prompts(prompts: &[Prompt]) -> StorageResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    prompts.serialize(&mut serializer)?;
    Ok(buffer)
}

fn write_replace(path: &Path, payload: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(payload)?;
    file.flush()
}
