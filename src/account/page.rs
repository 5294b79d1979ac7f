//! The account page: backup download, backup upload and account deletion.

use axum::{
    Extension,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    auth::Session,
    endpoints,
    html::{
        BUTTON_DANGER_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, base, submit_button,
    },
    navigation::NavBar,
};

const SECTION_STYLE: &str = "w-full space-y-4 p-4 rounded-lg bg-white dark:bg-gray-800 \
    border border-gray-200 dark:border-gray-700";

fn export_section() -> Markup {
    html! {
        section id="export" class=(SECTION_STYLE)
        {
            h2 class="text-lg font-semibold" { "Back up your data" }

            p
            {
                "Download your transactions and custom categories as a JSON file."
            }

            a href=(endpoints::ACCOUNT_EXPORT) download class=(LINK_STYLE) { "Download backup" }
        }
    }
}

fn import_form() -> Markup {
    html! {
        section id="import" class=(SECTION_STYLE)
        {
            h2 class="text-lg font-semibold" { "Restore a backup" }

            form
                hx-post=(endpoints::ACCOUNT_IMPORT)
                enctype="multipart/form-data"
                hx-disabled-elt="#file, #submit-button"
                hx-indicator="#indicator"
                hx-target="#alert-container"
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                div
                {
                    label for="file" class=(FORM_LABEL_STYLE) { "Backup file" }

                    input
                        id="file"
                        type="file"
                        name="file"
                        accept=".json,application/json"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                (submit_button("Import", BUTTON_PRIMARY_STYLE))
            }
        }
    }
}

fn delete_form(username: &str) -> Markup {
    html! {
        section id="delete-account" class=(SECTION_STYLE)
        {
            h2 class="text-lg font-semibold text-red-600 dark:text-red-400" { "Delete account" }

            p
            {
                "This permanently deletes your account, transactions and categories. "
                "Type your username to confirm."
            }

            form
                hx-delete=(endpoints::ACCOUNT)
                hx-confirm="Delete your account and all of its data? This cannot be undone."
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                div
                {
                    label for="confirm_username" class=(FORM_LABEL_STYLE) { "Username" }

                    input
                        id="confirm_username"
                        type="text"
                        name="confirm_username"
                        placeholder=(username)
                        autocomplete="off"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_DANGER_STYLE) { "Delete my account" }
            }
        }
    }
}

fn account_view(username: &str) -> Markup {
    let nav_bar = NavBar::new(endpoints::ACCOUNT_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-xl space-y-6"
            {
                h1 class="text-xl font-bold" { "Account" }

                p { "Logged in as " strong id="username" { (username) } }

                (export_section())
                (import_form())
                (delete_form(username))
            }
        }
    };

    base("Account", &[], &content)
}

/// Render the account page for the logged in user.
pub async fn get_account_page(Extension(session): Extension<Session>) -> Response {
    account_view(&session.username).into_response()
}
