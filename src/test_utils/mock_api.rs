//! An in-process stand-in for the finance API.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    api::{ApiClient, Credentials, NewCategory},
    auth::{DEFAULT_COOKIE_DURATION, Session},
    category::{CategorySet, FALLBACK_CATEGORY},
    transaction::{NewTransaction, Transaction, TransactionId, TransactionType},
};

pub(crate) const TEST_USERNAME: &str = "alice";
pub(crate) const TEST_PASSWORD: &str = "correct horse battery staple";
pub(crate) const TEST_TOKEN: &str = "token-alice";

/// The session a logged in [TEST_USERNAME] would have.
pub(crate) fn test_session() -> Session {
    Session::new(
        TEST_TOKEN.to_owned(),
        TEST_USERNAME.to_owned(),
        DEFAULT_COOKIE_DURATION,
    )
}

const DEFAULT_EXPENSE_CATEGORIES: [&str; 7] = ["餐飲", "交通", "購物", "娛樂", "居家", "醫療", "其他"];
const DEFAULT_INCOME_CATEGORIES: [&str; 5] = ["薪資", "獎金", "投資", "副業", "其他"];

type Rejection = (StatusCode, Json<Value>);

#[derive(Debug)]
struct MockUser {
    password: String,
    transactions: Vec<Transaction>,
    categories: CategorySet,
}

impl MockUser {
    fn new(password: &str) -> Self {
        Self {
            password: password.to_owned(),
            transactions: Vec::new(),
            categories: CategorySet {
                expense: DEFAULT_EXPENSE_CATEGORIES.map(str::to_owned).to_vec(),
                income: DEFAULT_INCOME_CATEGORIES.map(str::to_owned).to_vec(),
            },
        }
    }

    fn categories_mut(&mut self, type_: TransactionType) -> &mut Vec<String> {
        match type_ {
            TransactionType::Expense => &mut self.categories.expense,
            TransactionType::Income => &mut self.categories.income,
        }
    }
}

#[derive(Debug, Default)]
struct MockData {
    users: HashMap<String, MockUser>,
    next_id: TransactionId,
    last_query: Option<String>,
    /// Returned verbatim by the transaction list endpoint when set.
    raw_transactions: Option<Value>,
    reject_log_ins: bool,
}

impl MockData {
    fn authenticate(&mut self, headers: &HeaderMap) -> Result<&mut MockUser, Rejection> {
        let username = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer token-"))
            .map(str::to_owned);

        match username.and_then(|username| self.users.get_mut(&username)) {
            Some(user) => Ok(user),
            None => Err(reject(
                StatusCode::UNAUTHORIZED,
                "Could not validate credentials",
            )),
        }
    }

    fn next_id(&mut self) -> TransactionId {
        self.next_id += 1;
        self.next_id
    }
}

type SharedData = Arc<Mutex<MockData>>;

fn reject(status: StatusCode, detail: &str) -> Rejection {
    (status, Json(json!({ "detail": detail })))
}

/// A running mock finance API with one registered user, [TEST_USERNAME].
pub(crate) struct MockApi {
    base_url: String,
    data: SharedData,
}

impl MockApi {
    pub(crate) async fn start() -> Self {
        let mut data = MockData::default();
        data.users
            .insert(TEST_USERNAME.to_owned(), MockUser::new(TEST_PASSWORD));
        let data = Arc::new(Mutex::new(data));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind mock API listener");
        let address = listener
            .local_addr()
            .expect("Could not get mock API address");
        let router = mock_router(data.clone());

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Mock API server failed");
        });

        Self {
            base_url: format!("http://{address}"),
            data,
        }
    }

    pub(crate) fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url).expect("Could not create API client")
    }

    pub(crate) fn insert_transaction(&self, transaction: NewTransaction) -> Transaction {
        let mut data = self.data.lock().unwrap();
        let id = data.next_id();
        let transaction = with_id(id, transaction);
        data.users
            .get_mut(TEST_USERNAME)
            .expect("Test user missing")
            .transactions
            .push(transaction.clone());

        transaction
    }

    pub(crate) fn transactions(&self) -> Vec<Transaction> {
        self.data.lock().unwrap().users[TEST_USERNAME]
            .transactions
            .clone()
    }

    pub(crate) fn categories(&self) -> CategorySet {
        self.data.lock().unwrap().users[TEST_USERNAME]
            .categories
            .clone()
    }

    pub(crate) fn has_user(&self, username: &str) -> bool {
        self.data.lock().unwrap().users.contains_key(username)
    }

    pub(crate) fn last_query(&self) -> Option<String> {
        self.data.lock().unwrap().last_query.clone()
    }

    /// Make every log-in request fail with a 503.
    pub(crate) fn reject_log_ins(&self) {
        self.data.lock().unwrap().reject_log_ins = true;
    }

    pub(crate) fn set_raw_transactions(&self, payload: Value) {
        self.data.lock().unwrap().raw_transactions = Some(payload);
    }
}

fn with_id(id: TransactionId, transaction: NewTransaction) -> Transaction {
    Transaction {
        id,
        type_: transaction.type_,
        description: transaction.description,
        amount: transaction.amount,
        category: transaction.category,
        date: transaction.date,
    }
}

fn mock_router(data: SharedData) -> Router {
    Router::new()
        .route(
            "/api/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/api/transactions/{transaction_id}",
            put(update_transaction).delete(delete_transaction),
        )
        .route("/api/categories", get(list_categories).post(create_category))
        .route("/api/categories/{type}/{name}", delete(delete_category))
        .route("/auth/register", post(register))
        .route("/auth/token", post(log_in))
        .route("/auth/delete-account", delete(delete_account))
        .route("/auth/export-data", get(export_data))
        .route("/auth/import-data", post(import_data))
        .with_state(data)
}

/// The finance API's page size when no `limit` is given.
const DEFAULT_LIMIT: usize = 100;

#[derive(Deserialize)]
struct ListQuery {
    query: Option<String>,
    #[serde(default)]
    skip: usize,
    limit: Option<usize>,
}

async fn list_transactions(
    State(data): State<SharedData>,
    headers: HeaderMap,
    Query(ListQuery { query, skip, limit }): Query<ListQuery>,
) -> Result<Json<Value>, Rejection> {
    let mut data = data.lock().unwrap();
    data.last_query = query.clone();
    let raw_transactions = data.raw_transactions.clone();
    let user = data.authenticate(&headers)?;

    if let Some(payload) = raw_transactions {
        return Ok(Json(payload));
    }

    let transactions: Vec<&Transaction> = user
        .transactions
        .iter()
        .filter(|transaction| match &query {
            Some(query) => {
                transaction.description.contains(query.as_str())
                    || transaction.category.contains(query.as_str())
            }
            None => true,
        })
        .skip(skip)
        .take(limit.unwrap_or(DEFAULT_LIMIT))
        .collect();

    Ok(Json(json!(transactions)))
}

async fn create_transaction(
    State(data): State<SharedData>,
    headers: HeaderMap,
    Json(transaction): Json<NewTransaction>,
) -> Result<Json<Transaction>, Rejection> {
    let mut data = data.lock().unwrap();
    let id = data.next_id();
    let user = data.authenticate(&headers)?;
    let transaction = with_id(id, transaction);
    user.transactions.push(transaction.clone());

    Ok(Json(transaction))
}

async fn update_transaction(
    State(data): State<SharedData>,
    headers: HeaderMap,
    Path(transaction_id): Path<TransactionId>,
    Json(update): Json<NewTransaction>,
) -> Result<Json<Transaction>, Rejection> {
    let mut data = data.lock().unwrap();
    let user = data.authenticate(&headers)?;

    let transaction = user
        .transactions
        .iter_mut()
        .find(|transaction| transaction.id == transaction_id)
        .ok_or_else(|| {
            reject(
                StatusCode::NOT_FOUND,
                "Transaction not found or you don't have permission to edit it",
            )
        })?;
    *transaction = with_id(transaction_id, update);

    Ok(Json(transaction.clone()))
}

async fn delete_transaction(
    State(data): State<SharedData>,
    headers: HeaderMap,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Value>, Rejection> {
    let mut data = data.lock().unwrap();
    let user = data.authenticate(&headers)?;

    let position = user
        .transactions
        .iter()
        .position(|transaction| transaction.id == transaction_id)
        .ok_or_else(|| {
            reject(
                StatusCode::NOT_FOUND,
                "Transaction not found or you don't have permission to delete it",
            )
        })?;
    user.transactions.remove(position);

    Ok(Json(json!({ "message": "Transaction deleted successfully" })))
}

async fn list_categories(
    State(data): State<SharedData>,
    headers: HeaderMap,
) -> Result<Json<CategorySet>, Rejection> {
    let mut data = data.lock().unwrap();
    let user = data.authenticate(&headers)?;

    Ok(Json(user.categories.clone()))
}

async fn create_category(
    State(data): State<SharedData>,
    headers: HeaderMap,
    Json(category): Json<NewCategory>,
) -> Result<Json<NewCategory>, Rejection> {
    let mut data = data.lock().unwrap();
    let user = data.authenticate(&headers)?;

    if user.categories.contains(category.type_, &category.name) {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "Category already exists for this user",
        ));
    }
    user.categories_mut(category.type_)
        .push(category.name.clone());

    Ok(Json(category))
}

async fn delete_category(
    State(data): State<SharedData>,
    headers: HeaderMap,
    Path((type_, name)): Path<(TransactionType, String)>,
) -> Result<Json<Value>, Rejection> {
    let mut data = data.lock().unwrap();
    let user = data.authenticate(&headers)?;

    let categories = user.categories_mut(type_);
    let position = categories
        .iter()
        .position(|category| *category == name)
        .ok_or_else(|| {
            reject(
                StatusCode::NOT_FOUND,
                "Category not found or you don't have permission to delete it",
            )
        })?;
    categories.remove(position);

    for transaction in user
        .transactions
        .iter_mut()
        .filter(|transaction| transaction.type_ == type_ && transaction.category == name)
    {
        transaction.category = FALLBACK_CATEGORY.to_owned();
    }

    Ok(Json(json!({ "name": name, "type": type_ })))
}

async fn register(
    State(data): State<SharedData>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Value>, Rejection> {
    let mut data = data.lock().unwrap();

    if data.users.contains_key(&credentials.username) {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "Username already registered",
        ));
    }
    data.users.insert(
        credentials.username.clone(),
        MockUser::new(&credentials.password),
    );

    Ok(Json(json!({ "username": credentials.username })))
}

async fn log_in(
    State(data): State<SharedData>,
    Form(credentials): Form<Credentials>,
) -> Result<Json<Value>, Rejection> {
    let data = data.lock().unwrap();

    if data.reject_log_ins {
        return Err(reject(
            StatusCode::SERVICE_UNAVAILABLE,
            "Log in is unavailable",
        ));
    }

    match data.users.get(&credentials.username) {
        Some(user) if user.password == credentials.password => Ok(Json(json!({
            "access_token": format!("token-{}", credentials.username),
            "token_type": "bearer",
        }))),
        _ => Err(reject(
            StatusCode::UNAUTHORIZED,
            "Incorrect username or password",
        )),
    }
}

async fn delete_account(
    State(data): State<SharedData>,
    headers: HeaderMap,
) -> Result<Json<Value>, Rejection> {
    let mut data = data.lock().unwrap();
    data.authenticate(&headers)?;

    let username = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer token-"))
        .unwrap_or_default()
        .to_owned();
    data.users.remove(&username);

    Ok(Json(json!({ "message": "Account deleted successfully" })))
}

async fn export_data(
    State(data): State<SharedData>,
    headers: HeaderMap,
) -> Result<Json<Value>, Rejection> {
    let mut data = data.lock().unwrap();
    let user = data.authenticate(&headers)?;

    let custom_categories: Vec<NewCategory> = [TransactionType::Expense, TransactionType::Income]
        .into_iter()
        .flat_map(|type_| {
            let defaults: &[&str] = match type_ {
                TransactionType::Expense => &DEFAULT_EXPENSE_CATEGORIES,
                TransactionType::Income => &DEFAULT_INCOME_CATEGORIES,
            };

            user.categories
                .for_type(type_)
                .iter()
                .filter(|name| !defaults.contains(&name.as_str()))
                .map(move |name| NewCategory {
                    name: name.clone(),
                    type_,
                })
                .collect::<Vec<_>>()
        })
        .collect();

    Ok(Json(json!({
        "transactions": user.transactions,
        "custom_categories": custom_categories,
    })))
}

#[derive(Deserialize)]
struct ImportPayload {
    transactions: Vec<NewTransaction>,
    custom_categories: Vec<NewCategory>,
}

async fn import_data(
    State(data): State<SharedData>,
    headers: HeaderMap,
    Json(payload): Json<ImportPayload>,
) -> Result<Json<Value>, Rejection> {
    let mut data = data.lock().unwrap();
    let first_id = data.next_id;
    data.next_id += payload.transactions.len() as TransactionId;
    let user = data.authenticate(&headers)?;

    let mut imported_categories = 0;
    for category in payload.custom_categories {
        if !user.categories.contains(category.type_, &category.name) {
            user.categories_mut(category.type_).push(category.name);
            imported_categories += 1;
        }
    }

    let imported_transactions = payload.transactions.len();
    for (offset, transaction) in payload.transactions.into_iter().enumerate() {
        let id = first_id + offset as TransactionId + 1;
        user.transactions.push(with_id(id, transaction));
    }

    Ok(Json(json!({
        "imported_transactions": imported_transactions,
        "imported_categories": imported_categories,
    })))
}
