use crate::app::PromptActionError;
use crate::state::StateError;
use crate::storage::StorageError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error("failed to load prompts: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Action(#[from] PromptActionError),
}
