//! An HTTP client for the finance API.

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde_json::Value;

use crate::{
    api::{
        error::ApiError,
        models::{AccessToken, Credentials, ErrorBody, ImportSummary, NewCategory},
    },
    category::CategorySet,
    transaction::{NewTransaction, Transaction, TransactionId, TransactionType, decode_transactions},
};

/// The number of transactions requested per page, the API's default limit.
pub const TRANSACTION_PAGE_SIZE: usize = 100;

/// A client for the finance API rooted at a base URL.
///
/// Cloning is cheap, clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the API at `base_url`, e.g. "http://localhost:8000".
    ///
    /// # Errors
    /// Returns [ApiError::InvalidUrl] if `base_url` is not an absolute HTTP(S) URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ApiError::InvalidUrl(base_url.to_owned()))?;

        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    /// Join `segments` onto the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Fetch every transaction of the user that `token` belongs to.
    ///
    /// The API returns at most [TRANSACTION_PAGE_SIZE] transactions per
    /// request, so pages are requested until one comes back short.
    /// If `query` is given, the API only returns transactions whose
    /// description or category contains it.
    pub async fn list_transactions(
        &self,
        token: &str,
        query: Option<&str>,
    ) -> Result<Vec<Transaction>, ApiError> {
        let mut transactions = Vec::new();
        let mut skip = 0;

        loop {
            let mut url = self.url(&["api", "transactions"])?;
            url.query_pairs_mut()
                .append_pair("skip", &skip.to_string())
                .append_pair("limit", &TRANSACTION_PAGE_SIZE.to_string());
            if let Some(query) = query.filter(|query| !query.is_empty()) {
                url.query_pairs_mut().append_pair("query", query);
            }

            let payload: Value = send(self.http.get(url).bearer_auth(token))
                .await?
                .json()
                .await?;

            // Count raw entries, since malformed ones are dropped when decoding.
            let page_length = payload.as_array().map_or(0, Vec::len);
            transactions.extend(decode_transactions(payload));

            if page_length < TRANSACTION_PAGE_SIZE {
                break;
            }

            skip += page_length;
            tracing::debug!("Fetched {skip} transactions, requesting the next page");
        }

        Ok(transactions)
    }

    /// Find a single transaction by ID.
    ///
    /// The API has no endpoint for a single transaction, so this searches the full list.
    ///
    /// # Returns
    /// `None` if the user has no transaction with the ID `id`.
    pub async fn find_transaction(
        &self,
        token: &str,
        id: TransactionId,
    ) -> Result<Option<Transaction>, ApiError> {
        let transactions = self.list_transactions(token, None).await?;

        Ok(transactions
            .into_iter()
            .find(|transaction| transaction.id == id))
    }

    pub async fn create_transaction(
        &self,
        token: &str,
        transaction: &NewTransaction,
    ) -> Result<(), ApiError> {
        let url = self.url(&["api", "transactions"])?;
        send(self.http.post(url).bearer_auth(token).json(transaction)).await?;

        Ok(())
    }

    /// Replace the fields of the transaction `id` with `transaction`.
    pub async fn update_transaction(
        &self,
        token: &str,
        id: TransactionId,
        transaction: &NewTransaction,
    ) -> Result<(), ApiError> {
        let url = self.url(&["api", "transactions", &id.to_string()])?;
        send(self.http.put(url).bearer_auth(token).json(transaction)).await?;

        Ok(())
    }

    pub async fn delete_transaction(&self, token: &str, id: TransactionId) -> Result<(), ApiError> {
        let url = self.url(&["api", "transactions", &id.to_string()])?;
        send(self.http.delete(url).bearer_auth(token)).await?;

        Ok(())
    }

    pub async fn list_categories(&self, token: &str) -> Result<CategorySet, ApiError> {
        let url = self.url(&["api", "categories"])?;
        let categories = send(self.http.get(url).bearer_auth(token))
            .await?
            .json()
            .await?;

        Ok(categories)
    }

    pub async fn create_category(&self, token: &str, category: &NewCategory) -> Result<(), ApiError> {
        let url = self.url(&["api", "categories"])?;
        send(self.http.post(url).bearer_auth(token).json(category)).await?;

        Ok(())
    }

    /// Delete a category. The API moves its transactions to the fallback category.
    pub async fn delete_category(
        &self,
        token: &str,
        type_: TransactionType,
        name: &str,
    ) -> Result<(), ApiError> {
        let url = self.url(&["api", "categories", type_.as_str(), name])?;
        send(self.http.delete(url).bearer_auth(token)).await?;

        Ok(())
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let url = self.url(&["auth", "register"])?;
        send(self.http.post(url).json(credentials)).await?;

        Ok(())
    }

    /// Exchange a username and password for an access token.
    ///
    /// # Errors
    /// Wrong credentials give [ApiError::RequestFailed] with status 401 rather
    /// than [ApiError::Unauthorized], since there is no session to discard.
    pub async fn log_in(&self, credentials: &Credentials) -> Result<AccessToken, ApiError> {
        let url = self.url(&["auth", "token"])?;
        let response = self.http.post(url).form(credentials).send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(request_failed(response).await);
        }

        let token = check_status(response).await?.json().await?;

        Ok(token)
    }

    pub async fn delete_account(&self, token: &str) -> Result<(), ApiError> {
        let url = self.url(&["auth", "delete-account"])?;
        send(self.http.delete(url).bearer_auth(token)).await?;

        Ok(())
    }

    /// Fetch all of the user's data as the API represents it.
    ///
    /// The payload is kept as raw JSON so that an export can be imported again unchanged.
    pub async fn export_data(&self, token: &str) -> Result<Value, ApiError> {
        let url = self.url(&["auth", "export-data"])?;
        let data = send(self.http.get(url).bearer_auth(token))
            .await?
            .json()
            .await?;

        Ok(data)
    }

    pub async fn import_data(&self, token: &str, data: &Value) -> Result<ImportSummary, ApiError> {
        let url = self.url(&["auth", "import-data"])?;
        let summary = send(self.http.post(url).bearer_auth(token).json(data))
            .await?
            .json()
            .await?;

        Ok(summary)
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request.send().await?;

    check_status(response).await
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!("The finance API rejected the access token");
        return Err(ApiError::Unauthorized);
    }

    if !status.is_success() {
        return Err(request_failed(response).await);
    }

    Ok(response)
}

async fn request_failed(response: Response) -> ApiError {
    let status = response.status();
    let detail = match response.json::<ErrorBody>().await {
        Ok(body) => body.message(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("API request failed")
            .to_owned(),
    };

    tracing::warn!("Finance API request failed with status {status}: {detail}");

    ApiError::RequestFailed { status, detail }
}
