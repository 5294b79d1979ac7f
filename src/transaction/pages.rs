//! The pages for creating, editing and copying a transaction.

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    api::ApiClient,
    auth::Session,
    category::CategorySet,
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, submit_button},
    navigation::NavBar,
    timezone::local_today,
    transaction::{
        core::{Transaction, TransactionId},
        form::{TransactionFormDefaults, transaction_form_fields},
    },
};

/// Where a transaction form sends its data.
enum FormAction {
    Create,
    Update(TransactionId),
}

fn transaction_form_view(
    title: &str,
    action: FormAction,
    defaults: &TransactionFormDefaults<'_>,
    categories: &CategorySet,
) -> Markup {
    let active_endpoint = match action {
        FormAction::Create => endpoints::NEW_TRANSACTION_VIEW,
        FormAction::Update(_) => endpoints::EDIT_TRANSACTION_VIEW,
    };
    let nav_bar = NavBar::new(active_endpoint).into_html();
    let fields = transaction_form_fields(defaults, categories);

    let form = match action {
        FormAction::Create => html! {
            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { (title) }
                (fields)
                (submit_button("Save Transaction", BUTTON_PRIMARY_STYLE))
            }
        },
        FormAction::Update(transaction_id) => html! {
            form
                hx-put=(format_endpoint(endpoints::TRANSACTION, transaction_id))
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { (title) }
                (fields)
                (submit_button("Update Transaction", BUTTON_PRIMARY_STYLE))
            }
        },
    };

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            div class="w-full max-w-md" { (form) }
        }
    };

    base(title, &[], &content)
}

/// The state needed for the transaction form pages.
#[derive(Debug, Clone)]
pub struct TransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Taipei".
    pub local_timezone: String,
    pub api: ApiClient,
}

impl FromRef<AppState> for TransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            api: state.api.clone(),
        }
    }
}

async fn fetch_categories(api: &ApiClient, session: &Session) -> Result<CategorySet, Error> {
    api.list_categories(&session.access_token)
        .await
        .inspect_err(|error| tracing::error!("Could not fetch categories: {error}"))
        .map_err(Error::from)
}

async fn fetch_transaction(
    api: &ApiClient,
    session: &Session,
    transaction_id: TransactionId,
) -> Result<Transaction, Error> {
    api.find_transaction(&session.access_token, transaction_id)
        .await
        .inspect_err(|error| {
            tracing::error!("Could not fetch transaction {transaction_id}: {error}")
        })?
        .ok_or(Error::NotFound)
}

/// Renders the page for creating a transaction.
pub async fn get_new_transaction_page(
    State(state): State<TransactionPageState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let categories = fetch_categories(&state.api, &session).await?;
    let today = local_today(&state.local_timezone)?;

    Ok(transaction_form_view(
        "New Transaction",
        FormAction::Create,
        &TransactionFormDefaults::blank(today),
        &categories,
    )
    .into_response())
}

/// Renders the page for editing a transaction.
pub async fn get_edit_transaction_page(
    State(state): State<TransactionPageState>,
    Extension(session): Extension<Session>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let transaction = fetch_transaction(&state.api, &session, transaction_id).await?;
    let categories = fetch_categories(&state.api, &session).await?;

    Ok(transaction_form_view(
        "Edit Transaction",
        FormAction::Update(transaction_id),
        &defaults_from(&transaction, transaction.date),
        &categories,
    )
    .into_response())
}

/// Renders the new transaction page filled in from an existing transaction.
///
/// The copy is dated today and is saved as a new transaction.
pub async fn get_copy_transaction_page(
    State(state): State<TransactionPageState>,
    Extension(session): Extension<Session>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let transaction = fetch_transaction(&state.api, &session, transaction_id).await?;
    let categories = fetch_categories(&state.api, &session).await?;
    let today = local_today(&state.local_timezone)?;

    Ok(transaction_form_view(
        "Copy Transaction",
        FormAction::Create,
        &defaults_from(&transaction, today),
        &categories,
    )
    .into_response())
}

fn defaults_from(transaction: &Transaction, date: time::Date) -> TransactionFormDefaults<'_> {
    TransactionFormDefaults {
        transaction_type: transaction.type_,
        description: Some(&transaction.description),
        amount: Some(transaction.amount),
        category: Some(&transaction.category),
        date,
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension,
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use time::{OffsetDateTime, macros::date};

    use crate::{
        auth::Session,
        endpoints::{self, format_endpoint},
        test_utils::{
            MockApi, assert_form_input, assert_form_input_with_value,
            assert_form_select, assert_hx_endpoint, assert_valid_html, must_get_form,
            parse_html_document, test_session,
        },
        transaction::core::{NewTransaction, TransactionType},
    };

    use super::{
        TransactionPageState, get_copy_transaction_page, get_edit_transaction_page,
        get_new_transaction_page,
    };

    fn session() -> Extension<Session> {
        Extension(test_session())
    }

    fn state(mock: &MockApi) -> State<TransactionPageState> {
        State(TransactionPageState {
            local_timezone: "Etc/UTC".to_owned(),
            api: mock.client(),
        })
    }

    fn lunch() -> NewTransaction {
        NewTransaction {
            type_: TransactionType::Expense,
            description: "lunch".to_owned(),
            amount: 12.5,
            category: "餐飲".to_owned(),
            date: date!(2025 - 10 - 01),
        }
    }

    /// The placeholder followed by the default expense and income categories.
    const CATEGORY_OPTIONS: [&str; 13] = [
        "", "餐飲", "交通", "購物", "娛樂", "居家", "醫療", "其他", "薪資", "獎金", "投資", "副業",
        "其他",
    ];

    #[tokio::test]
    async fn new_transaction_page_displays_form() {
        let mock = MockApi::start().await;

        let response = get_new_transaction_page(state(&mock), session())
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_form_input(&form, "description", "text");
        assert_form_input(&form, "amount", "number");
        assert_form_input_with_value(
            &form,
            "date",
            "date",
            &OffsetDateTime::now_utc().date().to_string(),
        );
        assert_form_select(&form, "category", &CATEGORY_OPTIONS, Some(""));
    }

    #[tokio::test]
    async fn edit_page_prefills_transaction() {
        let mock = MockApi::start().await;
        let transaction = mock.insert_transaction(lunch());

        let response =
            get_edit_transaction_page(state(&mock), session(), Path(transaction.id))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let form = must_get_form(&document);
        assert_hx_endpoint(
            &form,
            &format_endpoint(endpoints::TRANSACTION, transaction.id),
            "hx-put",
        );
        assert_form_input_with_value(&form, "description", "text", "lunch");
        assert_form_input_with_value(&form, "amount", "number", "12.50");
        assert_form_input_with_value(&form, "date", "date", "2025-10-01");
        assert_form_select(&form, "category", &CATEGORY_OPTIONS, Some("餐飲"));
    }

    #[tokio::test]
    async fn copy_page_uses_today_and_posts_new_transaction() {
        let mock = MockApi::start().await;
        let transaction = mock.insert_transaction(lunch());

        let response =
            get_copy_transaction_page(state(&mock), session(), Path(transaction.id))
                .await
                .into_response();

        let document = parse_html_document(response).await;
        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_form_input_with_value(&form, "description", "text", "lunch");
        assert_form_input_with_value(
            &form,
            "date",
            "date",
            &OffsetDateTime::now_utc().date().to_string(),
        );
    }

    #[tokio::test]
    async fn edit_page_for_unknown_transaction_is_not_found() {
        let mock = MockApi::start().await;

        let response = get_edit_transaction_page(state(&mock), session(), Path(404))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn expired_token_redirects_to_log_out() {
        let mock = MockApi::start().await;
        let mut expired = session();
        expired.0.access_token = "token-nobody".to_owned();

        let response = get_new_transaction_page(state(&mock), expired)
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            endpoints::LOG_OUT
        );
    }
}
