//! Framework-agnostic account deletion handlers.
//!
//! Deleting an account is a sensitive operation: routes must only call these once
//! the access-restriction middleware resolved a live session.

use farewell_application::{DeleteAccountUseCase, DeletionAttempt, DeletionOutcome};
use farewell_core::{
    CompletionAction, CompletionContext, PasswordHasher, ResponseBuilder, ResponseMode,
    SessionStore, UserStore, ViewRenderer,
};

use super::{
    HandlerError,
    responder::{DeletionResponder, Reply},
};
use crate::config::Completion;

/// Show the confirmation form. No input, no side effects.
pub fn handle_show_delete_form<V, B>(
    responder: &DeletionResponder<V>,
    mode: ResponseMode,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    V: ViewRenderer,
    B: ResponseBuilder,
{
    let view = responder.config().remove_view();
    responder.respond(Reply::view(view), mode, builder)
}

/// Framework-agnostic account deletion handler.
///
/// Runs the deletion use case and shapes its outcome into a response. Rejections
/// show the confirmation form again with the error. Infrastructure failures are
/// reported to the observers and returned as `HandlerError`.
///
/// # Type Parameters
/// * `U` - User store holding the account
/// * `H` - Password hasher used to re-authenticate
/// * `S` - Session store for ending the session
/// * `V` - View renderer for HTML responses
/// * `B` - Response builder for the framework being used
///
/// # Arguments
/// * `use_case` - The deletion pipeline
/// * `responder` - Observer notification and response emission
/// * `attempt` - Form, session and lookup scope of this request
/// * `path` - Request path, handed to the completion hook
/// * `mode` - How the response is delivered
/// * `builder` - HTTP response builder
#[tracing::instrument(name = "Handle delete account", skip_all, fields(mode = ?mode))]
pub async fn handle_delete_account<U, H, S, V, B>(
    use_case: &DeleteAccountUseCase<U, H, S>,
    responder: &DeletionResponder<V>,
    attempt: DeletionAttempt,
    path: &str,
    mode: ResponseMode,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    U: UserStore,
    H: PasswordHasher,
    S: SessionStore,
    V: ViewRenderer,
    B: ResponseBuilder,
{
    let config = responder.config();
    let session = attempt.session.clone();

    let outcome = match use_case.execute(attempt).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let error = HandlerError::from(e);
            responder.notify_failure(&error, None, mode);
            return Err(error);
        }
    };

    match outcome {
        DeletionOutcome::Rejected { reason, user } => responder.respond(
            Reply::rejected(reason, config.remove_view(), user.as_ref()),
            mode,
            builder,
        ),
        DeletionOutcome::Completed { user } => {
            tracing::info!(user = %user.id(), "Account invalidated and session destroyed");

            let redirect = match config.completion() {
                Completion::Render => None,
                Completion::Redirect(path) => Some(path.clone()),
                Completion::Hook(hook) => {
                    let context = CompletionContext {
                        session: &session,
                        path,
                        mode,
                    };
                    match hook.on_deleted(&user, context).await {
                        Ok(CompletionAction::Proceed) => None,
                        Ok(CompletionAction::Redirect(path)) => Some(path),
                        Err(e) => {
                            let error = HandlerError::from(e);
                            responder.notify_failure(&error, Some(&user), mode);
                            return Err(error);
                        }
                    }
                }
            };

            responder.respond(
                Reply::completed(config.removed_view(), &user, redirect),
                mode,
                builder,
            )
        }
    }
}
