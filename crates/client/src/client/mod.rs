//! Typed wrapper around the remote expense store.

use api_types::{
    ErrorBody,
    expense::{ExpenseBody, ExpenseView},
};
use engine::{
    Amount, Category, EngineError, Expense, ExpenseDraft, ExpenseId, ValidDraft, format_date,
    normalize_date,
};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    session::Session,
};

const EXPENSES_PATH: &str = "api/expenses";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Local validation failed; nothing was sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// No token, or the server answered 401. The session has been cleared.
    #[error("not authenticated")]
    Unauthenticated,
    /// 404 on an update or delete of a single expense.
    #[error("expense not found")]
    NotFound,
    /// No response at all (connection refused, timeout, broken body).
    #[error("server unreachable: {0}")]
    Unavailable(#[source] reqwest::Error),
    #[error("server error ({status}): {}", describe_body(.body))]
    ServerError { status: StatusCode, body: String },
}

impl From<EngineError> for ClientError {
    fn from(value: EngineError) -> Self {
        match value {
            EngineError::InvalidInput(message) => Self::InvalidInput(message),
        }
    }
}

/// Prefers the `error` field of a JSON error body, falls back to the raw text.
fn describe_body(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if body.trim().is_empty() => "empty response".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseClient {
    base_url: Url,
    http: reqwest::Client,
    session: Session,
}

impl ExpenseClient {
    pub fn new(config: &AppConfig, session: Session) -> Result<Self> {
        let mut base_url = Url::parse(config.base_url.trim())
            .map_err(|err| AppError::InvalidConfig(format!("invalid base_url: {err}")))?;
        // `Url::join` drops the last path segment unless it ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            base_url,
            http,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// `GET /api/expenses`
    pub async fn list(&self) -> std::result::Result<Vec<Expense>, ClientError> {
        let url = self.collection_url()?;
        let (status, body) = self.execute(Method::GET, url, None).await?;
        let views: Vec<ExpenseView> = decode(status, &body)?;
        views
            .into_iter()
            .map(|view| expense_from_view(view).map_err(|err| malformed(status, &body, err)))
            .collect()
    }

    /// `POST /api/expenses`
    pub async fn create(&self, draft: &ExpenseDraft) -> std::result::Result<Expense, ClientError> {
        let payload = to_body(draft.validate()?);
        let url = self.collection_url()?;
        let (status, body) = self.execute(Method::POST, url, Some(&payload)).await?;
        decode_expense(status, &body)
    }

    /// `PUT /api/expenses/{id}`
    pub async fn update(
        &self,
        id: &ExpenseId,
        draft: &ExpenseDraft,
    ) -> std::result::Result<Expense, ClientError> {
        let payload = to_body(draft.validate()?);
        let url = self.item_url(id)?;
        let (status, body) = self.execute(Method::PUT, url, Some(&payload)).await?;
        decode_expense(status, &body)
    }

    /// `DELETE /api/expenses/{id}`
    pub async fn delete(&self, id: &ExpenseId) -> std::result::Result<(), ClientError> {
        let url = self.item_url(id)?;
        self.execute(Method::DELETE, url, None).await?;
        Ok(())
    }

    fn collection_url(&self) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(EXPENSES_PATH)
            .map_err(|err| ClientError::InvalidInput(format!("invalid base_url: {err}")))
    }

    fn item_url(&self, id: &ExpenseId) -> std::result::Result<Url, ClientError> {
        if id.as_str().trim().is_empty() {
            return Err(ClientError::InvalidInput("expense id is empty".to_string()));
        }
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidInput("base_url cannot be a base".to_string()))?
            .push(id.as_str());
        Ok(url)
    }

    /// Sends one authenticated request and classifies the outcome.
    async fn execute(
        &self,
        method: Method,
        url: Url,
        payload: Option<&ExpenseBody>,
    ) -> std::result::Result<(StatusCode, String), ClientError> {
        let token = self.session.token().ok_or(ClientError::Unauthenticated)?;

        tracing::debug!("{method} {url}");
        let mut req = self.http.request(method.clone(), url.clone()).bearer_auth(token);
        if let Some(payload) = payload {
            req = req.json(payload);
        }

        let res = req.send().await.map_err(ClientError::Unavailable)?;
        let status = res.status();
        let body = res.text().await.map_err(ClientError::Unavailable)?;
        tracing::debug!("{method} {url} -> {status}");

        if status.is_success() {
            return Ok((status, body));
        }

        let err = match status {
            StatusCode::UNAUTHORIZED => {
                tracing::warn!("server rejected the session token, clearing it");
                self.session.clear();
                ClientError::Unauthenticated
            }
            // Elsewhere a 404 means a wrong base_url, not a missing record.
            StatusCode::NOT_FOUND if method == Method::PUT || method == Method::DELETE => {
                ClientError::NotFound
            }
            _ => ClientError::ServerError { status, body },
        };
        Err(err)
    }
}

fn decode_expense(status: StatusCode, body: &str) -> std::result::Result<Expense, ClientError> {
    let view: ExpenseView = decode(status, body)?;
    expense_from_view(view).map_err(|err| malformed(status, body, err))
}

fn expense_from_view(view: ExpenseView) -> std::result::Result<Expense, EngineError> {
    Ok(Expense {
        id: ExpenseId::new(view.id),
        amount: Amount::new(view.amount)?,
        category: view.category.parse::<Category>()?,
        description: view.description,
        date: normalize_date(&view.date)?,
    })
}

fn to_body(draft: ValidDraft) -> ExpenseBody {
    ExpenseBody {
        description: draft.description,
        amount: draft.amount.value(),
        category: draft.category.as_str().to_string(),
        date: format_date(draft.date),
    }
}

fn decode<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> std::result::Result<T, ClientError> {
    serde_json::from_str(body).map_err(|err| malformed(status, body, err))
}

/// A 2xx answer we cannot make sense of is still the server's fault.
fn malformed(status: StatusCode, body: &str, err: impl std::fmt::Display) -> ClientError {
    tracing::warn!("unexpected response body ({status}): {err}");
    ClientError::ServerError {
        status,
        body: body.to_string(),
    }
}
