use crate::domain::{
    outcome::{AttemptError, ResponseMode},
    user::UserRecord,
};

/// One deletion attempt, or one display of the confirmation form, as reported to
/// observers right before the response is produced.
#[derive(Debug, Clone, Copy)]
pub struct DeletionEvent<'a> {
    /// Configured event name, the effective route unless overridden.
    pub name: &'a str,
    pub error: Option<&'a AttemptError>,
    pub view: Option<&'a str>,
    /// The stored record once it was looked up. Rejections that happen before the
    /// lookup carry no record.
    pub user: Option<&'a UserRecord>,
    pub mode: ResponseMode,
}

impl DeletionEvent<'_> {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Subscriber notified synchronously, in registration order, once per request.
pub trait DeletionObserver: Send + Sync {
    fn notify(&self, event: &DeletionEvent<'_>);
}

impl<F> DeletionObserver for F
where
    F: Fn(&DeletionEvent<'_>) + Send + Sync,
{
    fn notify(&self, event: &DeletionEvent<'_>) {
        self(event)
    }
}
