use thiserror::Error;

use scoutpit_core::error::CoreError;
use scoutpit_store::error::StoreError;

#[derive(Debug, Error)]
pub enum ScreenError {
    /// A required field is missing. Nothing was sent to the store.
    #[error("{0}")]
    Validation(String),

    /// No authenticated user; the action was refused before any store call.
    #[error("not logged in")]
    AuthRequired,

    /// An answer was routed to a question that takes a different widget.
    #[error("question {id} does not take this input")]
    WidgetMismatch { id: u8 },

    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store rejected the write. Form state is preserved so the user
    /// can retry the same submission.
    #[error(transparent)]
    Store(#[from] StoreError),
}
