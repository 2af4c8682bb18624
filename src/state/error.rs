use super::event::LifecycleEvent;
use super::model::WindowState;
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("invalid state transition: from {from:?} using event {event:?}")]
    InvalidStateTransition {
        from: WindowState,
        event: LifecycleEvent,
    },
}
