use askama::Template;
use farewell_core::{RenderError, ViewContext, ViewRenderer};

use crate::config::{CONFIRMATION_PHRASE, REMOVE_VIEW, REMOVED_VIEW};

#[derive(Template)]
#[template(path = "delete_account/remove.html")]
struct RemoveTemplate<'a> {
    title: &'a str,
    action: &'a str,
    phrase: &'a str,
    error: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "delete_account/removed.html")]
struct RemovedTemplate<'a> {
    title: &'a str,
    redirect: Option<&'a str>,
}

/// Renders the built-in confirmation form and confirmation page.
///
/// Only the identifiers `delete_account/remove` and `delete_account/removed` are
/// known. Applications with their own views supply their own `ViewRenderer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AskamaViewRenderer;

impl AskamaViewRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ViewRenderer for AskamaViewRenderer {
    fn render(&self, view: &str, context: &ViewContext) -> Result<String, RenderError> {
        let rendered = match view {
            REMOVE_VIEW => RemoveTemplate {
                title: &context.title,
                action: &context.action,
                phrase: CONFIRMATION_PHRASE,
                error: context.error.as_deref(),
            }
            .render(),
            REMOVED_VIEW => RemovedTemplate {
                title: &context.title,
                redirect: context.redirect.as_deref(),
            }
            .render(),
            other => return Err(RenderError::UnknownView(other.to_string())),
        };

        rendered.map_err(|e| RenderError::Template(e.to_string()))
    }
}
