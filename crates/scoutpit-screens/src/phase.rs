/// Submission state shared by both screens. There is no retry state: a
/// failed write returns to `Idle` and the user re-triggers submit with the
/// same or corrected input.
///
/// The flag exists for the rendering layer (disable the submit control
/// while a write is in flight); a duplicate concurrent submission from the
/// same screen is already unrepresentable, since `submit` holds the
/// exclusive borrow across its await.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
}
