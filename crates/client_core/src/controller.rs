//! View controller: decides whether the list or the form is active and
//! routes user intents to the store, independent of how either view is
//! rendered.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use shared::{
    domain::{Product, ProductId},
    protocol::ProductDraft,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    messages,
    validation::{validate_draft, FieldError},
    BulkRemoveOutcome, ProductApi, ProductStore, StoreError,
};

/// How long transient notifications stay up before auto-dismissal.
pub const NOTIFICATION_AUTO_DISMISS: Duration = Duration::from_secs(3);

/// Blocking yes/no decision collaborator. Destructive operations run only
/// after it answers `true`.
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

/// Transient success/error message display. Auto-dismiss timing
/// ([`NOTIFICATION_AUTO_DISMISS`]) is the implementor's job.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// The list is shown. Initial state, and where every flow ends.
    Browsing,
    /// The form is shown for a new product.
    Creating,
    /// The form is shown for an existing product.
    Editing(ProductId),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Client-side validation rejected the draft; shown inline per field,
    /// nothing was sent to the collaborator.
    #[error("formulário inválido")]
    Invalid(Vec<FieldError>),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct DashboardController<A: ProductApi> {
    store: Arc<ProductStore<A>>,
    prompt: Arc<dyn ConfirmationPrompt>,
    notifier: Arc<dyn Notifier>,
    state: ViewState,
}

impl<A: ProductApi> DashboardController<A> {
    pub fn new(
        store: Arc<ProductStore<A>>,
        prompt: Arc<dyn ConfirmationPrompt>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            prompt,
            notifier,
            state: ViewState::Browsing,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.state
    }

    pub fn store(&self) -> &ProductStore<A> {
        &self.store
    }

    /// The filtered list the browsing view renders.
    pub async fn search(&self, query: &str) -> Vec<Product> {
        self.store.filtered(query).await
    }

    pub fn start_create(&mut self) {
        if self.state == ViewState::Browsing {
            self.state = ViewState::Creating;
        } else {
            debug!(state = ?self.state, "ignoring add intent outside browsing");
        }
    }

    /// Switches to the edit form, but only for an id present in the
    /// current collection; anything else is a defensive no-op.
    pub async fn begin_edit(&mut self, id: ProductId) -> bool {
        if self.state != ViewState::Browsing {
            debug!(state = ?self.state, "ignoring edit intent outside browsing");
            return false;
        }
        if !self.store.contains(&id).await {
            warn!(%id, "edit requested for unknown product id");
            return false;
        }
        self.state = ViewState::Editing(id);
        true
    }

    /// Discards the unsaved draft and returns to the list.
    pub fn cancel(&mut self) {
        self.state = ViewState::Browsing;
    }

    /// Validates and submits the draft of the active form. Validation
    /// failures stay inline and never reach the collaborator; a mutation
    /// failure keeps the form up for retry; success notifies, refreshes
    /// (via the store) and returns to browsing.
    pub async fn submit(&mut self, draft: ProductDraft) -> Result<(), SubmitError> {
        let errors = validate_draft(&draft);
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        let result = match &self.state {
            ViewState::Creating => self
                .store
                .create(&draft)
                .await
                .map(|_| messages::PRODUCT_CREATED),
            ViewState::Editing(id) => self
                .store
                .update(id, &draft)
                .await
                .map(|_| messages::PRODUCT_UPDATED),
            ViewState::Browsing => {
                debug!("ignoring submit intent with no form active");
                return Ok(());
            }
        };

        match result {
            Ok(message) => {
                self.notifier.success(message);
                self.state = ViewState::Browsing;
                Ok(())
            }
            Err(err) => {
                self.notifier.error(&err.to_string());
                Err(err.into())
            }
        }
    }

    /// Deletes one product after confirmation. `Ok(false)` means the
    /// prompt was declined and nothing was touched. Control stays in
    /// browsing regardless of outcome.
    pub async fn request_delete(&mut self, id: &ProductId) -> Result<bool, StoreError> {
        if self.state != ViewState::Browsing {
            debug!(state = ?self.state, "ignoring delete intent outside browsing");
            return Ok(false);
        }
        if !self.prompt.confirm(messages::CONFIRM_DELETE).await {
            return Ok(false);
        }

        match self.store.remove(id).await {
            Ok(()) => {
                self.notifier.success(messages::PRODUCT_DELETED);
                Ok(true)
            }
            Err(err) => {
                self.notifier.error(&err.to_string());
                Err(err)
            }
        }
    }

    /// Bulk variant of [`request_delete`](Self::request_delete). `None`
    /// means the prompt was declined. Partial failure is surfaced as a
    /// count; the outcome carries the failed ids.
    pub async fn request_delete_many(&mut self, ids: &[ProductId]) -> Option<BulkRemoveOutcome> {
        if self.state != ViewState::Browsing || ids.is_empty() {
            return None;
        }
        if !self.prompt.confirm(messages::CONFIRM_DELETE_MANY).await {
            return None;
        }

        let outcome = self.store.remove_many(ids).await;
        if outcome.all_succeeded() {
            self.notifier.success(messages::PRODUCTS_DELETED);
        } else {
            self.notifier
                .error(&format!("Falha ao excluir {} produto(s)", outcome.failed.len()));
        }
        Some(outcome)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
