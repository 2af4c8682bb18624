//! Executes prompt actions that involve I/O (storage, clipboard).

use thiserror::Error;

use crate::clipboard::{ClipboardBackend, ClipboardError};
use crate::prompt::{normalize_title, Prompt, PromptCollection, PromptError, UpsertOutcome};
use crate::storage::{PromptStorage, StorageError, StorageResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    Created { title: String },
    Updated { title: String },
    Deleted { title: String },
    Copied { title: String },
}

impl PromptEvent {
    pub fn status_message(&self) -> String {
        match self {
            PromptEvent::Created { title } => format!("Prompt '{title}' created."),
            PromptEvent::Updated { title } => format!("Prompt '{title}' updated."),
            PromptEvent::Deleted { title } => format!("Prompt '{title}' deleted."),
            PromptEvent::Copied { title } => format!("Prompt '{title}' copied to clipboard."),
        }
    }
}

#[derive(Debug, Error)]
pub enum PromptActionError {
    #[error(transparent)]
    Validation(#[from] PromptError),

    #[error("prompt '{title}' not found")]
    NotFound { title: String },

    #[error("storage error while {operation} '{title}': {source}")]
    Persist {
        operation: &'static str,
        title: String,
        #[source]
        source: StorageError,
    },

    #[error("clipboard error while copying '{title}': {source}")]
    Clipboard {
        title: String,
        #[source]
        source: ClipboardError,
    },
}

impl PromptActionError {
    /// Failures that risk losing data get a blocking dialog.
    pub fn is_data_loss_risk(&self) -> bool {
        matches!(self, PromptActionError::Persist { .. })
    }
}

pub type PromptActionResult<T> = std::result::Result<T, PromptActionError>;

/// The in-memory collection paired with the storage it mirrors.
///
/// Every mutation persists immediately. When persisting fails the collection
/// is restored to its pre-action state, so memory never runs ahead of disk.
#[derive(Debug)]
pub struct PromptSession<S> {
    collection: PromptCollection,
    storage: S,
}

impl<S: PromptStorage> PromptSession<S> {
    pub fn new(storage: S, collection: PromptCollection) -> Self {
        Self {
            collection,
            storage,
        }
    }

    pub fn open(storage: S) -> StorageResult<Self> {
        let collection = storage.load()?;
        Ok(Self::new(storage, collection))
    }

    pub fn collection(&self) -> &PromptCollection {
        &self.collection
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    pub fn prompt(&self, title: &str) -> PromptActionResult<&Prompt> {
        self.collection
            .find_by_title(title)
            .ok_or_else(|| PromptActionError::NotFound {
                title: title.to_string(),
            })
    }

    pub fn save_prompt(
        &mut self,
        raw_title: &str,
        content: &str,
    ) -> PromptActionResult<PromptEvent> {
        let title = normalize_title(raw_title)?.to_string();
        let snapshot = self.collection.clone();
        let outcome = self.collection.upsert(&title, content);

        self.persist_or_rollback(snapshot, "saving", &title)?;
        tracing::info!(title = %title, ?outcome, "prompt saved");
        Ok(match outcome {
            UpsertOutcome::Created => PromptEvent::Created { title },
            UpsertOutcome::Updated => PromptEvent::Updated { title },
        })
    }

    pub fn delete_prompt(&mut self, raw_title: &str) -> PromptActionResult<PromptEvent> {
        let title = normalize_title(raw_title)?.to_string();
        let snapshot = self.collection.clone();
        if !self.collection.delete(&title) {
            return Err(PromptActionError::NotFound { title });
        }

        self.persist_or_rollback(snapshot, "deleting", &title)?;
        tracing::info!(title = %title, "prompt deleted");
        Ok(PromptEvent::Deleted { title })
    }

    pub fn copy_prompt(
        &self,
        title: &str,
        clipboard: &dyn ClipboardBackend,
    ) -> PromptActionResult<PromptEvent> {
        let prompt = self.prompt(title)?;
        clipboard
            .copy_text(&prompt.content)
            .map_err(|source| PromptActionError::Clipboard {
                title: prompt.title.clone(),
                source,
            })?;
        tracing::debug!(title = %prompt.title, "prompt copied to clipboard");
        Ok(PromptEvent::Copied {
            title: prompt.title.clone(),
        })
    }

    fn persist_or_rollback(
        &mut self,
        snapshot: PromptCollection,
        operation: &'static str,
        title: &str,
    ) -> PromptActionResult<()> {
        if let Err(source) = self.storage.save(&self.collection) {
            tracing::error!(
                %title,
                operation,
                err = %source,
                "persisting prompts failed; rolling back"
            );
            self.collection = snapshot;
            return Err(PromptActionError::Persist {
                operation,
                title: title.to_string(),
                source,
            });
        }
        Ok(())
    }
}
