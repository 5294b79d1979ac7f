//! Download and restore a JSON backup of the user's data.

use axum::{
    Extension,
    extract::{FromRef, Multipart, State, multipart::Field},
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use axum_htmx::HX_TRIGGER;
use serde_json::Value;

use crate::{
    AppState, Error,
    alert::Alert,
    api::{ApiClient, ImportSummary},
    auth::Session,
    timezone::local_today,
    transaction::TRANSACTIONS_CHANGED_EVENT,
};

/// The keys every backup file must have.
const BACKUP_KEYS: [&str; 2] = ["transactions", "custom_categories"];

/// The state needed to download a backup.
#[derive(Debug, Clone)]
pub struct BackupState {
    pub local_timezone: String,
    pub api: ApiClient,
}

impl FromRef<AppState> for BackupState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            api: state.api.clone(),
        }
    }
}

/// Keep the characters that are safe in a quoted header filename.
fn file_name_safe(username: &str) -> String {
    username
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// A route handler that downloads the user's data as pretty-printed JSON.
pub async fn export_account_data(
    State(state): State<BackupState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let data = state
        .api
        .export_data(&session.access_token)
        .await
        .inspect_err(|error| tracing::error!("Could not export account data: {error}"))?;

    let body = serde_json::to_vec_pretty(&data)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;
    let disposition = format!(
        "attachment; filename=\"stashup-data-{}-{today}.json\"",
        file_name_safe(&session.username)
    );

    Ok((
        [
            (CONTENT_TYPE, "application/json".to_owned()),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// Check that `data` is JSON with the keys of a backup file.
///
/// # Errors
///
/// Returns [Error::NotJSON] if `data` is not JSON and
/// [Error::InvalidImportData] if it is not a JSON object with both backup keys.
fn parse_backup(data: &[u8]) -> Result<Value, Error> {
    let backup: Value = serde_json::from_slice(data).map_err(|error| {
        tracing::debug!("Uploaded backup is not JSON: {error}");
        Error::NotJSON
    })?;

    let missing: Vec<&str> = BACKUP_KEYS
        .into_iter()
        .filter(|key| backup.get(key).is_none())
        .collect();

    if missing.is_empty() {
        Ok(backup)
    } else {
        Err(Error::InvalidImportData(format!(
            "The file is missing: {}.",
            missing.join(", ")
        )))
    }
}

async fn read_json_field(field: Field<'_>) -> Result<Vec<u8>, Error> {
    let file_name = field.file_name().unwrap_or_default().to_owned();
    let is_json = field.content_type() == Some("application/json")
        || file_name.to_lowercase().ends_with(".json");

    if !is_json {
        return Err(Error::NotJSON);
    }

    let data = field.bytes().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError("Could not read data from multipart form field.".to_owned())
    })?;

    tracing::debug!("Received file '{file_name}' that is {} bytes", data.len());

    Ok(data.to_vec())
}

fn import_summary_alert(summary: ImportSummary) -> Alert {
    Alert::Success {
        message: "Import complete".to_owned(),
        details: format!(
            "Imported {} transaction(s) and {} categor{}.",
            summary.imported_transactions,
            summary.imported_categories,
            if summary.imported_categories == 1 { "y" } else { "ies" }
        ),
    }
}

/// A route handler that restores a backup uploaded as a multipart form with one `.json` file.
///
/// Responds with an alert that reports how many records were added.
pub async fn import_account_data(
    State(api): State<ApiClient>,
    Extension(session): Extension<Session>,
    mut multipart: Multipart,
) -> Response {
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            return Error::MultipartError("No file was uploaded".to_owned()).into_alert_response();
        }
        Err(error) => {
            tracing::error!("Could not parse multipart form: {error}");
            return Error::MultipartError(error.to_string()).into_alert_response();
        }
    };

    let backup = match read_json_field(field).await.and_then(|data| parse_backup(&data)) {
        Ok(backup) => backup,
        Err(error) => return error.into_alert_response(),
    };

    match api.import_data(&session.access_token, &backup).await {
        Ok(summary) => {
            tracing::info!(
                "Imported {} transactions and {} categories for {}",
                summary.imported_transactions,
                summary.imported_categories,
                session.username
            );

            (
                StatusCode::OK,
                [(HX_TRIGGER, TRANSACTIONS_CHANGED_EVENT)],
                import_summary_alert(summary).into_html(),
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("Could not import account data: {error}");
            Error::from(error).into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension,
        body::Body,
        extract::{FromRequest, Multipart, State},
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use time::{OffsetDateTime, macros::date};

    use crate::{
        Error,
        test_utils::{MockApi, get_header, response_text, test_session},
        transaction::{NewTransaction, TransactionType},
    };

    use super::{
        BackupState, export_account_data, file_name_safe, import_account_data, parse_backup,
    };

    const BOUNDARY: &str = "----stashup-test-boundary";

    async fn multipart(file_name: &str, content_type: &str, data: &str) -> Multipart {
        let body = format!(
            "--{BOUNDARY}\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
            Content-Type: {content_type}\r\n\
            \r\n\
            {data}\r\n\
            --{BOUNDARY}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        Multipart::from_request(request, &()).await.unwrap()
    }

    fn backup() -> Value {
        json!({
            "transactions": [{
                "type": "expense",
                "description": "lunch",
                "amount": 12.5,
                "category": "餐飲",
                "date": "2025-10-01"
            }],
            "custom_categories": [{ "name": "寵物", "type": "expense" }]
        })
    }

    #[test]
    fn backup_needs_both_keys() {
        assert!(parse_backup(backup().to_string().as_bytes()).is_ok());
        assert_eq!(
            parse_backup(br#"{"transactions": []}"#),
            Err(Error::InvalidImportData(
                "The file is missing: custom_categories.".to_owned()
            ))
        );
        assert_eq!(
            parse_backup(b"[1, 2]"),
            Err(Error::InvalidImportData(
                "The file is missing: transactions, custom_categories.".to_owned()
            ))
        );
        assert_eq!(parse_backup(b"not json"), Err(Error::NotJSON));
    }

    #[test]
    fn unsafe_file_name_characters_are_replaced() {
        assert_eq!(file_name_safe("alice"), "alice");
        assert_eq!(file_name_safe("a\"b c/é"), "a_b_c__");
    }

    #[tokio::test]
    async fn export_downloads_pretty_json() {
        let mock = MockApi::start().await;
        mock.insert_transaction(NewTransaction {
            type_: TransactionType::Expense,
            description: "lunch".to_owned(),
            amount: 12.5,
            category: "餐飲".to_owned(),
            date: date!(2025 - 10 - 01),
        });
        let state = BackupState {
            local_timezone: "Etc/UTC".to_owned(),
            api: mock.client(),
        };

        let response = export_account_data(State(state), Extension(test_session()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_header(&response, "content-type"), "application/json");
        assert_eq!(
            get_header(&response, "content-disposition"),
            format!(
                "attachment; filename=\"stashup-data-alice-{}.json\"",
                OffsetDateTime::now_utc().date()
            )
        );
        let text = response_text(response).await;
        assert!(text.contains('\n'), "want pretty printed JSON, got {text}");
        let data: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(data["transactions"][0]["description"], "lunch");
        assert!(data["custom_categories"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn import_reports_counts() {
        let mock = MockApi::start().await;

        let response = import_account_data(
            State(mock.client()),
            Extension(test_session()),
            multipart("backup.json", "application/json", &backup().to_string()).await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let text = response_text(response).await;
        assert!(
            text.contains("Imported 1 transaction(s) and 1 category."),
            "unexpected alert: {text}"
        );
        assert_eq!(mock.transactions().len(), 1);
        assert!(mock.categories().expense.iter().any(|name| name == "寵物"));
    }

    #[tokio::test]
    async fn import_rejects_non_json_file() {
        let mock = MockApi::start().await;

        let response = import_account_data(
            State(mock.client()),
            Extension(test_session()),
            multipart("transactions.csv", "text/csv", "type,amount").await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(mock.transactions().is_empty());
    }

    #[tokio::test]
    async fn import_rejects_json_without_backup_keys() {
        let mock = MockApi::start().await;

        let response = import_account_data(
            State(mock.client()),
            Extension(test_session()),
            multipart("backup.json", "application/json", r#"{"transactions": []}"#).await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let text = response_text(response).await;
        assert!(text.contains("custom_categories"), "unexpected alert: {text}");
    }
}
