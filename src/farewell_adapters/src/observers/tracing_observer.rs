use farewell_core::{AttemptError, DeletionEvent, DeletionObserver};

/// Audit trail of every deletion attempt through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl DeletionObserver for TracingObserver {
    fn notify(&self, event: &DeletionEvent<'_>) {
        let user = event.user.map(|u| u.id());
        let view = event.view.unwrap_or("-");

        match event.error {
            None => tracing::info!(
                event = event.name,
                view,
                user,
                mode = ?event.mode,
                "Account deletion step completed"
            ),
            Some(AttemptError::Rejected(reason)) => tracing::warn!(
                event = event.name,
                view,
                user,
                reason = reason.code(),
                "Account deletion rejected"
            ),
            Some(AttemptError::Failed(error)) => tracing::error!(
                event = event.name,
                user,
                error = %error,
                "Account deletion failed"
            ),
        }
    }
}
