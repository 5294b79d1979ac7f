//! Download the transactions visible on the dashboard as a CSV file.

use axum::{
    Extension,
    extract::{FromRef, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use serde::Serialize;

use crate::{
    AppState, Error,
    api::ApiClient,
    auth::Session,
    category::CategorySet,
    state::{ViewEvent, ViewState},
    timezone::local_today,
    transaction::{FilterQuery, FilterSpec, Transaction, TransactionType, WeekStart},
};

/// The state needed to export transactions.
#[derive(Debug, Clone)]
pub struct ExportState {
    pub local_timezone: String,
    pub week_start: WeekStart,
    pub api: ApiClient,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            week_start: state.week_start,
            api: state.api.clone(),
        }
    }
}

/// One line of the CSV file. The field order sets the column order.
#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "type")]
    type_: TransactionType,
    description: &'a str,
    amount: f64,
    category: &'a str,
    date: String,
}

impl<'a> From<&'a Transaction> for CsvRow<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        Self {
            type_: transaction.type_,
            description: &transaction.description,
            amount: transaction.amount,
            category: &transaction.category,
            date: transaction.date.to_string(),
        }
    }
}

/// Write `transactions` as CSV with the header `type,description,amount,category,date`.
///
/// # Errors
///
/// Returns [Error::CSVExportError] if a row cannot be written.
pub fn transactions_to_csv(transactions: &[Transaction]) -> Result<Vec<u8>, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if transactions.is_empty() {
        writer
            .write_record(["type", "description", "amount", "category", "date"])
            .map_err(|error| Error::CSVExportError(error.to_string()))?;
    }

    for transaction in transactions {
        writer
            .serialize(CsvRow::from(transaction))
            .map_err(|error| Error::CSVExportError(error.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::CSVExportError(error.to_string()))
}

/// A route handler that downloads the filtered transactions, newest first.
///
/// Takes the same query parameters as the dashboard.
pub async fn export_transactions_endpoint(
    State(state): State<ExportState>,
    Extension(session): Extension<Session>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let transactions = state
        .api
        .list_transactions(&session.access_token, None)
        .await
        .inspect_err(|error| tracing::error!("Could not fetch transactions for export: {error}"))?;

    let view = ViewState::new(today, state.week_start)
        .apply(ViewEvent::DataLoaded {
            transactions,
            categories: CategorySet::default(),
        })
        .apply(ViewEvent::FilterChanged(FilterSpec::from(query)));

    let csv = transactions_to_csv(&view.visible_transactions())
        .inspect_err(|error| tracing::error!("Could not export transactions: {error}"))?;
    let disposition = format!("attachment; filename=\"transactions-{today}.csv\"");

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use axum::{Extension, extract::State, http::StatusCode};
    use axum_extra::extract::Query;
    use time::{OffsetDateTime, macros::date};

    use crate::{
        test_utils::{MockApi, get_header, response_text, test_session},
        transaction::{FilterQuery, NewTransaction, Transaction, TransactionType, WeekStart},
    };

    use super::{ExportState, export_transactions_endpoint, transactions_to_csv};

    fn new_transaction(
        type_: TransactionType,
        description: &str,
        amount: f64,
        category: &str,
        date: time::Date,
    ) -> NewTransaction {
        NewTransaction {
            type_,
            description: description.to_owned(),
            amount,
            category: category.to_owned(),
            date,
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let transactions = [Transaction {
            id: 1,
            type_: TransactionType::Expense,
            description: "coffee, large".to_owned(),
            amount: 4.5,
            category: "餐飲".to_owned(),
            date: date!(2025 - 10 - 03),
        }];

        let csv = String::from_utf8(transactions_to_csv(&transactions).unwrap()).unwrap();

        assert_eq!(
            csv,
            "type,description,amount,category,date\n\
             expense,\"coffee, large\",4.5,餐飲,2025-10-03\n"
        );
    }

    #[test]
    fn empty_export_still_has_header() {
        let csv = String::from_utf8(transactions_to_csv(&[]).unwrap()).unwrap();

        assert_eq!(csv, "type,description,amount,category,date\n");
    }

    #[tokio::test]
    async fn exports_filtered_transactions_newest_first() {
        let mock = MockApi::start().await;
        mock.insert_transaction(new_transaction(
            TransactionType::Expense,
            "lunch",
            12.0,
            "餐飲",
            date!(2025 - 10 - 01),
        ));
        mock.insert_transaction(new_transaction(
            TransactionType::Income,
            "pay",
            3000.0,
            "薪資",
            date!(2025 - 10 - 02),
        ));
        mock.insert_transaction(new_transaction(
            TransactionType::Expense,
            "dinner",
            20.0,
            "餐飲",
            date!(2025 - 10 - 03),
        ));
        let state = ExportState {
            local_timezone: "Etc/UTC".to_owned(),
            week_start: WeekStart::Sunday,
            api: mock.client(),
        };
        let query = FilterQuery {
            category: Some("餐飲".to_owned()),
            ..Default::default()
        };

        let response =
            export_transactions_endpoint(State(state), Extension(test_session()), Query(query))
                .await
                .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            get_header(&response, "content-disposition"),
            format!(
                "attachment; filename=\"transactions-{}.csv\"",
                OffsetDateTime::now_utc().date()
            )
        );
        assert_eq!(
            response_text(response).await,
            "type,description,amount,category,date\n\
             expense,dinner,20.0,餐飲,2025-10-03\n\
             expense,lunch,12.0,餐飲,2025-10-01\n"
        );
    }
}
