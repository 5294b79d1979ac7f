//! Dashboard HTTP handler and page layout.

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};

use crate::{
    AppState, Error,
    api::ApiClient,
    auth::Session,
    dashboard::{
        cards::summary_cards_view, charts::expense_chart_view, filter_form::filter_form_view,
        tables::transactions_table,
    },
    endpoints,
    html::{ECHARTS_URL, HeadElement, base, link},
    navigation::NavBar,
    state::{ViewEvent, ViewState},
    timezone::local_today,
    transaction::{FilterQuery, FilterSpec, TRANSACTIONS_CHANGED_EVENT, WeekStart},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Taipei".
    pub local_timezone: String,
    pub week_start: WeekStart,
    pub api: ApiClient,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            week_start: state.week_start,
            api: state.api.clone(),
        }
    }
}

/// Display the user's transactions, narrowed by the filter in the query string.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(session): Extension<Session>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let token = &session.access_token;

    let (transactions, categories) = tokio::try_join!(
        state.api.list_transactions(token, None),
        state.api.list_categories(token),
    )
    .inspect_err(|error| tracing::error!("Could not load dashboard data: {error}"))?;

    let view = ViewState::new(today, state.week_start)
        .apply(ViewEvent::DataLoaded {
            transactions,
            categories,
        })
        .apply(ViewEvent::FilterChanged(FilterSpec::from(query)));

    Ok(dashboard_view(&view).into_response())
}

/// The URL of the dashboard showing `filter`.
fn dashboard_url(filter: &FilterSpec) -> String {
    let query = filter.to_query_string();

    if query.is_empty() {
        endpoints::DASHBOARD_VIEW.to_owned()
    } else {
        format!("{}?{query}", endpoints::DASHBOARD_VIEW)
    }
}

/// The swappable part of the dashboard.
///
/// Reloads itself when a transaction or category is deleted elsewhere on the page.
fn dashboard_content(view: &ViewState, body: Markup) -> Markup {
    html! {
        div
            id="dashboard-content"
            hx-get=(dashboard_url(&view.filter))
            hx-trigger={ (TRANSACTIONS_CHANGED_EVENT) " from:body" }
            hx-select="#dashboard-content"
            hx-swap="outerHTML"
            hx-disinherit="*"
            class="flex flex-col items-center gap-6 px-2 lg:px-6 py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (body)
        }
    }
}

fn no_data_view(view: &ViewState) -> Markup {
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "add a transaction");
    let account_link = link(endpoints::ACCOUNT_VIEW, "import a backup");

    dashboard_content(
        view,
        html! {
            h2 class="text-xl font-bold" { "Nothing here yet..." }

            p
            {
                "Your totals and charts will show up here once you "
                (new_transaction_link) " or " (account_link) "."
            }
        },
    )
}

fn dashboard_view(view: &ViewState) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = if view.has_data() {
        let summary = view.summary();

        dashboard_content(
            view,
            html! {
                (filter_form_view(&view.filter, &view.categories))
                (summary_cards_view(&summary.totals))
                (expense_chart_view(&summary.breakdown, view.filter.period.label()))
                (transactions_table(&summary.transactions))
            },
        )
    } else {
        no_data_view(view)
    };

    let page = html! {
        (nav_bar)
        (content)
    };

    base(
        "Dashboard",
        &[HeadElement::ScriptLink(ECHARTS_URL.to_owned())],
        &page,
    )
}
