//! The categories page: one table per transaction type and a form for adding a category.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    api::ApiClient,
    auth::Session,
    category::{CategorySet, FALLBACK_CATEGORY},
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, CATEGORY_BADGE_STYLE, FORM_LABEL_STYLE,
        FORM_RADIO_GROUP_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, submit_button, text_input,
    },
    navigation::NavBar,
    transaction::{TransactionType, type_radio},
};

/// Render the categories page.
pub async fn get_categories_page(
    State(api): State<ApiClient>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let categories = api
        .list_categories(&session.access_token)
        .await
        .inspect_err(|error| tracing::error!("Could not fetch categories: {error}"))?;

    Ok(categories_view(&categories).into_response())
}

/// The URL that deletes the category `name` of type `type_`.
pub(super) fn delete_category_url(type_: TransactionType, name: &str) -> String {
    let query = serde_urlencoded::to_string([("type", type_.as_str()), ("name", name)])
        .inspect_err(|error| tracing::error!("Could not encode category {name}: {error}"))
        .unwrap_or_default();

    format!("{}?{query}", endpoints::CATEGORIES_API)
}

fn category_row(type_: TransactionType, name: &str) -> Markup {
    let confirm_message = format!(
        "Are you sure you want to delete '{name}'? \
        Its transactions will be reclassified as '{FALLBACK_CATEGORY}'."
    );

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (name) }
            }

            td class=(TABLE_CELL_STYLE)
            {
                button
                    hx-delete=(delete_category_url(type_, name))
                    hx-confirm=(confirm_message)
                    hx-target="closest tr"
                    hx-target-error="#alert-container"
                    hx-swap="delete"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

fn category_table(type_: TransactionType, names: &[String]) -> Markup {
    html! {
        section id={ (type_.as_str()) "-categories" } class="w-full dark:bg-gray-800"
        {
            h2 class="text-lg font-semibold mb-2" { (type_.label()) }

            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for name in names {
                        (category_row(type_, name))
                    }

                    @if names.is_empty() {
                        tr
                        {
                            td
                                colspan="2"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                "No " (type_.label().to_lowercase()) " categories yet."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn new_category_form() -> Markup {
    html! {
        form
            hx-post=(endpoints::CATEGORIES_API)
            hx-target-error="#alert-container"
            class="w-full space-y-4"
        {
            (text_input("name", "New category", "", false))

            div
            {
                span class=(FORM_LABEL_STYLE) { "Type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    (type_radio(TransactionType::Expense, true))
                    (type_radio(TransactionType::Income, false))
                }
            }

            (submit_button("Add Category", BUTTON_PRIMARY_STYLE))
        }
    }
}

fn categories_view(categories: &CategorySet) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-2xl space-y-8"
            {
                h1 class="text-xl font-bold" { "Categories" }

                (new_category_form())

                @for type_ in [TransactionType::Expense, TransactionType::Income] {
                    (category_table(type_, categories.for_type(type_)))
                }
            }
        }
    };

    base("Categories", &[], &content)
}
