//! Headless core of the product dashboard: the remote collaborator seam,
//! the product store (single source of truth for the visible collection)
//! and the view controller that routes user intents to it.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{multipart, Client, StatusCode};
use shared::{
    domain::{Product, ProductId},
    error::{ApiError, ErrorCode},
    protocol::{LoginRequest, LoginResponse, ProductDraft, ProductRecord},
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

pub mod controller;
pub mod search;
pub mod session;
pub mod validation;

pub use controller::{
    ConfirmationPrompt, DashboardController, Notifier, SubmitError, ViewState,
    NOTIFICATION_AUTO_DISMISS,
};
pub use session::{InMemorySessionStore, SessionStore};

/// User-facing message catalog. The fetch/login strings are fixed contract
/// text; the rest follows the same voice.
pub mod messages {
    pub const FETCH_FAILED: &str = "Erro ao carregar produtos";
    pub const CREATE_FAILED: &str = "Erro ao criar produto";
    pub const UPDATE_FAILED: &str = "Erro ao atualizar produto";
    pub const DELETE_FAILED: &str = "Erro ao excluir produto";
    pub const LOGIN_FAILED: &str = "Falha no login. Verifique suas credenciais.";
    pub const PRODUCT_CREATED: &str = "Produto criado com sucesso!";
    pub const PRODUCT_UPDATED: &str = "Produto atualizado com sucesso!";
    pub const PRODUCT_DELETED: &str = "Produto excluído com sucesso!";
    pub const PRODUCTS_DELETED: &str = "Produtos excluídos com sucesso!";
    pub const CONFIRM_DELETE: &str = "Tem certeza que deseja excluir este produto?";
    pub const CONFIRM_DELETE_MANY: &str =
        "Tem certeza que deseja excluir os produtos selecionados?";
}

/// Remote product collection collaborator.
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError>;
    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ApiError>;
    async fn update_product(&self, id: &ProductId, draft: &ProductDraft)
        -> Result<Product, ApiError>;
    async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError>;
}

fn map_transport(err: reqwest::Error) -> ApiError {
    if err.is_connect() || err.is_timeout() {
        ApiError::transport(err.to_string())
    } else {
        ApiError::internal(err.to_string())
    }
}

fn code_for_status(status: StatusCode) -> ErrorCode {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorCode::Unauthorized,
        StatusCode::NOT_FOUND => ErrorCode::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorCode::Validation,
        _ => ErrorCode::Internal,
    }
}

fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::new(
            code_for_status(status),
            format!("requisição falhou com status {status}"),
        ))
    }
}

/// REST-backed [`ProductApi`] over `GET/POST /products`,
/// `PUT/DELETE /products/{id}` and `POST /auth/login`. Every request
/// carries the bearer token from the injected session store when present.
pub struct HttpProductApi {
    http: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl HttpProductApi {
    pub fn new(base_url: &str, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        Url::parse(base_url).map_err(|err| {
            ApiError::validation(format!("URL base inválida \"{base_url}\": {err}"))
        })?;
        Ok(Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// `POST /auth/login`; on success the returned token is persisted into
    /// the session store. Nothing is stored on failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(code_for_status(status), messages::LOGIN_FAILED));
        }
        let body: LoginResponse = response
            .json()
            .await
            .map_err(|err| ApiError::internal(format!("resposta de login inválida: {err}")))?;
        self.session.set(body.token);
        info!("login succeeded, session token stored");
        Ok(())
    }

    fn form_for(draft: &ProductDraft) -> Result<multipart::Form, ApiError> {
        let mut form = multipart::Form::new()
            .text("name", draft.name.clone())
            .text("description", draft.description.clone())
            .text("category", draft.category.clone())
            .text("price", draft.price.to_string())
            .text("discount", draft.discount.to_string())
            .text("status", draft.status.code())
            .text("state", draft.condition.code());
        if let Some(image) = &draft.image {
            let mut part =
                multipart::Part::bytes(image.bytes.clone()).file_name(image.filename.clone());
            if let Some(mime) = &image.mime_type {
                part = part.mime_str(mime).map_err(|err| {
                    ApiError::validation(format!("tipo de imagem inválido \"{mime}\": {err}"))
                })?;
            }
            form = form.part("imgProduct", part);
        }
        Ok(form)
    }

    async fn decode_product(response: reqwest::Response) -> Result<Product, ApiError> {
        let record: ProductRecord = response
            .json()
            .await
            .map_err(|err| ApiError::internal(format!("resposta inválida do servidor: {err}")))?;
        record.into_product()
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self
            .authorize(self.http.get(format!("{}/products", self.base_url)))
            .send()
            .await
            .map_err(map_transport)?;
        let records: Vec<ProductRecord> = check(response)?
            .json()
            .await
            .map_err(|err| ApiError::internal(format!("resposta inválida do servidor: {err}")))?;
        records
            .into_iter()
            .map(ProductRecord::into_product)
            .collect()
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        let form = Self::form_for(draft)?;
        let response = self
            .authorize(self.http.post(format!("{}/products", self.base_url)))
            .multipart(form)
            .send()
            .await
            .map_err(map_transport)?;
        Self::decode_product(check(response)?).await
    }

    async fn update_product(
        &self,
        id: &ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, ApiError> {
        let form = Self::form_for(draft)?;
        let response = self
            .authorize(self.http.put(format!("{}/products/{}", self.base_url, id)))
            .multipart(form)
            .send()
            .await
            .map_err(map_transport)?;
        Self::decode_product(check(response)?).await
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        let response = self
            .authorize(self.http.delete(format!("{}/products/{}", self.base_url, id)))
            .send()
            .await
            .map_err(map_transport)?;
        check(response)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Initial load still outstanding; the list cannot be rendered yet.
    #[default]
    Loading,
    Ready,
    /// Collection load failed; holds the fixed user-facing message.
    Failed(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Erro ao carregar produtos")]
    FetchFailed(#[source] ApiError),
    #[error("{message}")]
    MutationFailed {
        message: &'static str,
        #[source]
        source: ApiError,
    },
}

/// Result of a bulk delete. Non-atomic: any subset that succeeded remains
/// deleted; `failed` lists exactly the ids whose requests were rejected.
#[derive(Debug, Default)]
pub struct BulkRemoveOutcome {
    pub removed: Vec<ProductId>,
    pub failed: Vec<(ProductId, ApiError)>,
}

impl BulkRemoveOutcome {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

struct StoreState {
    products: Vec<Product>,
    load_state: LoadState,
    /// Bumped by every local mutation and every refresh start. A refresh
    /// response is applied only if the version it started under is still
    /// current, so an older in-flight response can never overwrite newer
    /// state.
    version: u64,
}

/// Single source of truth for the product collection visible to the UI.
/// All remote product calls go through here; the collection always
/// reflects the last acknowledged fetch or mutation, with the documented
/// optimistic-removal window reconciled by a follow-up refresh.
pub struct ProductStore<A: ProductApi> {
    api: A,
    inner: Mutex<StoreState>,
}

impl<A: ProductApi> ProductStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            inner: Mutex::new(StoreState {
                products: Vec::new(),
                load_state: LoadState::Loading,
                version: 0,
            }),
        }
    }

    pub async fn products(&self) -> Vec<Product> {
        self.inner.lock().await.products.clone()
    }

    pub async fn load_state(&self) -> LoadState {
        self.inner.lock().await.load_state.clone()
    }

    pub async fn contains(&self, id: &ProductId) -> bool {
        self.inner
            .lock()
            .await
            .products
            .iter()
            .any(|product| &product.id == id)
    }

    /// The derived view: the current collection filtered by the free-text
    /// query. An empty query returns the collection unchanged.
    pub async fn filtered(&self, query: &str) -> Vec<Product> {
        let guard = self.inner.lock().await;
        search::filter(&guard.products, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Requests the full collection. On success the local collection is
    /// replaced wholesale and any error state cleared; on failure the
    /// previous collection stays untouched and the load state carries the
    /// fixed message. Stale responses are discarded by version check.
    pub async fn refresh(&self) -> Result<(), StoreError> {
        let version = {
            let mut guard = self.inner.lock().await;
            guard.version += 1;
            guard.version
        };

        match self.api.fetch_products().await {
            Ok(products) => {
                let mut guard = self.inner.lock().await;
                if guard.version != version {
                    debug!("discarding stale refresh response");
                    return Ok(());
                }
                guard.products = products;
                guard.load_state = LoadState::Ready;
                Ok(())
            }
            Err(err) => {
                let mut guard = self.inner.lock().await;
                if guard.version == version {
                    guard.load_state = LoadState::Failed(messages::FETCH_FAILED.to_string());
                }
                warn!(error = %err, "product fetch failed");
                Err(StoreError::FetchFailed(err))
            }
        }
    }

    /// Submits a new product. No local mutation on failure; success
    /// triggers a reconciling refresh (the server assigns the id).
    pub async fn create(&self, draft: &ProductDraft) -> Result<Product, StoreError> {
        let created =
            self.api
                .create_product(draft)
                .await
                .map_err(|source| StoreError::MutationFailed {
                    message: messages::CREATE_FAILED,
                    source,
                })?;
        info!(id = %created.id, "product created");
        if let Err(err) = self.refresh().await {
            warn!(error = %err, "refresh after create failed");
        }
        Ok(created)
    }

    /// Submits changes for an existing product. Same contract as `create`.
    pub async fn update(
        &self,
        id: &ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, StoreError> {
        let updated = self
            .api
            .update_product(id, draft)
            .await
            .map_err(|source| StoreError::MutationFailed {
                message: messages::UPDATE_FAILED,
                source,
            })?;
        info!(id = %updated.id, "product updated");
        if let Err(err) = self.refresh().await {
            warn!(error = %err, "refresh after update failed");
        }
        Ok(updated)
    }

    /// Optimistic delete: the id leaves the local collection immediately,
    /// then the request runs and a reconciling refresh follows on both
    /// outcomes. A rejected delete therefore reappears on reconciliation
    /// and is still reported as an error.
    pub async fn remove(&self, id: &ProductId) -> Result<(), StoreError> {
        {
            let mut guard = self.inner.lock().await;
            guard.version += 1;
            guard.products.retain(|product| &product.id != id);
        }

        let result = self.api.delete_product(id).await;
        if let Err(err) = self.refresh().await {
            warn!(error = %err, "reconciling refresh after remove failed");
        }
        result.map_err(|source| {
            warn!(id = %id, error = %source, "product delete rejected");
            StoreError::MutationFailed {
                message: messages::DELETE_FAILED,
                source,
            }
        })
    }

    /// Concurrent independent deletes; non-atomic. Succeeded ids stay
    /// deleted, failed ids come back with the reconciling refresh, and the
    /// outcome reports exactly which requests failed.
    pub async fn remove_many(&self, ids: &[ProductId]) -> BulkRemoveOutcome {
        {
            let mut guard = self.inner.lock().await;
            guard.version += 1;
            guard.products.retain(|product| !ids.contains(&product.id));
        }

        let results = join_all(ids.iter().map(|id| {
            let api = &self.api;
            async move { (id.clone(), api.delete_product(id).await) }
        }))
        .await;

        if let Err(err) = self.refresh().await {
            warn!(error = %err, "reconciling refresh after bulk remove failed");
        }

        let mut outcome = BulkRemoveOutcome::default();
        for (id, result) in results {
            match result {
                Ok(()) => outcome.removed.push(id),
                Err(err) => {
                    warn!(id = %id, error = %err, "bulk delete rejected for id");
                    outcome.failed.push((id, err));
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod store_tests;

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod http_tests;
