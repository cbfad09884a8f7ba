//! The API client and the paginated fetch protocol.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use loglens_core::{
    ClientError, ClientResult, Envelope, PageResult, RawResponse, Transport, is_allowed_page_size,
};
use loglens_session::SessionManager;

/// Client for the log-analysis backend.
///
/// One instance per process, shared behind an `Arc`. The client never owns
/// authentication truth: the bearer token is read from the session manager
/// on every request, and a canonical 401 is pushed back into it.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    session: Arc<SessionManager>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client over the given transport and API base URL.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: impl Into<String>,
        session: Arc<SessionManager>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn bearer(&self) -> Option<String> {
        self.session.token()
    }

    /// GET an endpoint and normalize its body into the canonical envelope.
    pub(crate) async fn get_envelope(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ClientResult<Envelope> {
        let bearer = self.bearer();
        let response = self
            .transport
            .get(&self.url(path), query, bearer.as_deref())
            .await?;
        Ok(Envelope::from_value(response.json()?))
    }

    /// POST a JSON command and check the envelope for success.
    ///
    /// A canonical 401 invalidates the session; any other non-200 status
    /// becomes an [`ClientError::Api`] carrying the backend description.
    pub(crate) async fn command(&self, path: &str, body: &Value) -> ClientResult<Envelope> {
        let bearer = self.bearer();
        let response = self
            .transport
            .post_json(&self.url(path), body, bearer.as_deref())
            .await?;
        self.check(Envelope::from_value(response.json()?)).await
    }

    /// Pass a successful envelope through; turn failures into errors.
    ///
    /// A canonical 401 invalidates the session before surfacing as
    /// [`ClientError::SessionExpired`].
    pub(crate) async fn check(&self, envelope: Envelope) -> ClientResult<Envelope> {
        if envelope.is_success() {
            return Ok(envelope);
        }
        if envelope.is_session_invalid() {
            self.session.invalidate().await;
            return Err(ClientError::SessionExpired);
        }
        Err(ClientError::api(
            envelope.error_code.clone(),
            envelope.error_desc.clone(),
        ))
    }

    /// POST a JSON body and return the raw response (binary endpoints).
    pub(crate) async fn post_raw(&self, path: &str, body: &Value) -> ClientResult<RawResponse> {
        let bearer = self.bearer();
        Ok(self
            .transport
            .post_json(&self.url(path), body, bearer.as_deref())
            .await?)
    }

    /// Fetch one page of a list resource, falling back to the
    /// non-paginated variant on transport failure.
    ///
    /// The fallback fires only for transport-level failures (no response,
    /// or a non-2xx response with no parseable body) and at most once; an
    /// application-level error envelope never triggers it. A failing
    /// fallback is terminal and surfaces as an application failure.
    pub(crate) async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        filter: Option<(&str, &str)>,
        page: u32,
        size: u32,
        list_fields: &[&str],
    ) -> ClientResult<PageResult<T>> {
        if !is_allowed_page_size(size) {
            return Err(ClientError::Validation {
                field: "size".to_string(),
                message: format!("{size} is not an allowed page size"),
            });
        }

        let mut query: Vec<(String, String)> = Vec::new();
        if let Some((key, value)) = filter {
            query.push((key.to_string(), value.to_string()));
        }
        let filter_only = query.clone();
        query.push(("page".to_string(), page.to_string()));
        query.push(("size".to_string(), size.to_string()));

        match self.get_envelope(path, &query).await {
            Ok(envelope) => self.page_from_envelope(envelope, list_fields, true).await,
            Err(ClientError::Transport(err)) => {
                warn!(path, %err, "paginated request failed, retrying without pagination");
                match self.get_envelope(path, &filter_only).await {
                    Ok(envelope) => self.page_from_envelope(envelope, list_fields, false).await,
                    Err(ClientError::Transport(err)) => Err(ClientError::api(
                        None,
                        Some(format!("request failed after fallback: {err}")),
                    )),
                    Err(other) => Err(other),
                }
            },
            Err(other) => Err(other),
        }
    }

    /// Fetch a whole (non-paginated) list resource.
    ///
    /// A canonical 404 is an empty list, not an error.
    pub(crate) async fn fetch_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
        list_fields: &[&str],
    ) -> ClientResult<Vec<T>> {
        let envelope = self.get_envelope(path, query).await?;
        let page = self
            .page_from_envelope(envelope, list_fields, false)
            .await?;
        Ok(page.items)
    }

    async fn page_from_envelope<T: DeserializeOwned>(
        &self,
        envelope: Envelope,
        list_fields: &[&str],
        paginated: bool,
    ) -> ClientResult<PageResult<T>> {
        if envelope.is_success() {
            let items: Vec<T> = envelope.decode_list(list_fields);
            let (total_pages, total_elements) = if paginated {
                (envelope.total_pages(), envelope.total_elements())
            } else {
                // Non-paginated variant: everything arrived at once.
                let count = u64::try_from(items.len()).unwrap_or(u64::MAX);
                (u32::from(!items.is_empty()), count)
            };
            debug!(rows = items.len(), total_elements, "page decoded");
            let mut result = PageResult {
                items,
                total_pages,
                total_elements,
                notice: None,
            };
            result.notice = envelope.message();
            return Ok(result);
        }

        if envelope.is_session_invalid() {
            self.session.invalidate().await;
            return Err(ClientError::SessionExpired);
        }

        if envelope.is_not_found() {
            let notice = envelope
                .error_desc
                .clone()
                .unwrap_or_else(|| "no results found".to_string());
            return Ok(PageResult::empty().with_notice(notice));
        }

        Err(ClientError::api(
            envelope.error_code.clone(),
            envelope.error_desc.clone(),
        ))
    }
}
