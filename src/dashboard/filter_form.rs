//! The dashboard filter controls.

use maud::{Markup, html};

use crate::{
    category::CategorySet,
    endpoints,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE},
    transaction::{ALL_CATEGORIES, CategoryFilter, FilterSpec, Period},
};

/// The URL that downloads the transactions matching `filter` as CSV.
pub(super) fn export_url(filter: &FilterSpec) -> String {
    let query = filter.to_query_string();

    if query.is_empty() {
        endpoints::TRANSACTIONS_EXPORT.to_owned()
    } else {
        format!("{}?{query}", endpoints::TRANSACTIONS_EXPORT)
    }
}

fn period_select(selected: Period) -> Markup {
    html! {
        div
        {
            label for="period" class=(FORM_LABEL_STYLE) { "Period" }

            select name="period" id="period" class=(FORM_TEXT_INPUT_STYLE)
            {
                @for period in Period::ALL {
                    option value=(period.as_query_value()) selected[period == selected]
                    {
                        (period.label())
                    }
                }
            }
        }
    }
}

/// A category select over every category name, whatever its type.
///
/// A selected category that the user no longer has is still offered.
fn category_select(categories: &CategorySet, selected: &CategoryFilter) -> Markup {
    let names = categories.unique_names();
    let missing_selection = match selected {
        CategoryFilter::Named(name) if !names.contains(&name.as_str()) => Some(name.as_str()),
        _ => None,
    };

    html! {
        div
        {
            label for="category" class=(FORM_LABEL_STYLE) { "Category" }

            select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
            {
                option value=(ALL_CATEGORIES) selected[*selected == CategoryFilter::All]
                {
                    "All categories"
                }

                @for name in names {
                    option value=(name) selected[selected.as_query_value() == name
                        && *selected != CategoryFilter::All]
                    {
                        (name)
                    }
                }

                @if let Some(name) = missing_selection {
                    option value=(name) selected { (name) }
                }
            }
        }
    }
}

/// The period, category, keyword and custom date controls.
///
/// Any change reloads the dashboard content and records the filter in the URL.
pub(super) fn filter_form_view(filter: &FilterSpec, categories: &CategorySet) -> Markup {
    let is_custom = filter.period == Period::Custom;

    html! {
        form
            id="filter-form"
            hx-get=(endpoints::DASHBOARD_VIEW)
            hx-trigger="change, submit"
            hx-target="#dashboard-content"
            hx-select="#dashboard-content"
            hx-swap="outerHTML"
            hx-push-url="true"
            hx-target-error="#alert-container"
            class="w-full grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4 items-end"
        {
            (period_select(filter.period))
            (category_select(categories, &filter.category))

            div
            {
                label for="keyword" class=(FORM_LABEL_STYLE) { "Keyword" }

                input
                    type="search"
                    name="keyword"
                    id="keyword"
                    placeholder="Description or category"
                    value=(filter.keyword)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            a href=(export_url(filter)) download class=(LINK_STYLE) { "Export CSV" }

            @if is_custom {
                div
                {
                    label for="start_date" class=(FORM_LABEL_STYLE) { "From" }

                    input
                        type="date"
                        name="start_date"
                        id="start_date"
                        value=[filter.start_date]
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="end_date" class=(FORM_LABEL_STYLE) { "To" }

                    input
                        type="date"
                        name="end_date"
                        id="end_date"
                        value=[filter.end_date]
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }
        }
    }
}
