//! The form shared by the new, edit and copy transaction pages.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    category::CategorySet,
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    transaction::core::{NewTransaction, TransactionType},
};

/// The values a transaction form starts with.
pub struct TransactionFormDefaults<'a> {
    pub transaction_type: TransactionType,
    pub description: Option<&'a str>,
    pub amount: Option<f64>,
    pub category: Option<&'a str>,
    pub date: Date,
}

impl TransactionFormDefaults<'_> {
    /// An empty expense dated `today`.
    pub fn blank(today: Date) -> Self {
        Self {
            transaction_type: TransactionType::Expense,
            description: None,
            amount: None,
            category: None,
            date: today,
        }
    }
}

/// A radio button for choosing the transaction type, submitted as `type`.
pub fn type_radio(type_: TransactionType, checked: bool) -> Markup {
    let id = format!("transaction-type-{type_}");

    html! {
        div class="flex items-center gap-3"
        {
            input
                name="type"
                id=(id)
                type="radio"
                value=(type_.as_str())
                checked[checked]
                required
                tabindex="0"
                class=(FORM_RADIO_INPUT_STYLE);

            label for=(id) class=(FORM_RADIO_LABEL_STYLE) { (type_.label()) }
        }
    }
}

/// The category select, grouped by transaction type.
///
/// A default category that is not in `categories` is still offered so that
/// editing an old transaction does not silently change its category.
fn category_select(categories: &CategorySet, defaults: &TransactionFormDefaults<'_>) -> Markup {
    let selected = defaults.category;
    let is_unknown = selected
        .is_some_and(|category| !categories.contains(defaults.transaction_type, category));

    html! {
        select name="category" id="category" required class=(FORM_TEXT_INPUT_STYLE)
        {
            option value="" disabled selected[selected.is_none()] { "Select a category" }

            @for type_ in [TransactionType::Expense, TransactionType::Income] {
                optgroup label=(type_.label())
                {
                    @for name in categories.for_type(type_) {
                        option
                            value=(name)
                            selected[type_ == defaults.transaction_type && selected == Some(name.as_str())]
                        {
                            (name)
                        }
                    }

                    @if is_unknown && type_ == defaults.transaction_type {
                        @if let Some(category) = selected {
                            option value=(category) selected { (category) }
                        }
                    }
                }
            }
        }
    }
}

pub fn transaction_form_fields(
    defaults: &TransactionFormDefaults<'_>,
    categories: &CategorySet,
) -> Markup {
    let is_expense = defaults.transaction_type == TransactionType::Expense;
    let amount_str = defaults.amount.map(|amount| format!("{amount:.2}"));

    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Transaction type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                (type_radio(TransactionType::Expense, is_expense))
                (type_radio(TransactionType::Income, !is_expense))
            }
        }

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                required
                autofocus
                value=[defaults.description]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                min="0.01"
                placeholder="0.00"
                required
                value=[amount_str.as_deref()]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="category" class=(FORM_LABEL_STYLE) { "Category" }

            (category_select(categories, defaults))
        }

        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { "Date" }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

/// The form data for creating or replacing a transaction.
// Must use axum_extra's Form to read this since that parses an empty string
// as None instead of rejecting the request like axum::Form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionForm {
    #[serde(rename = "type")]
    pub type_: TransactionType,
    pub description: String,
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    pub date: Date,
}

impl TransactionForm {
    /// Check the form and turn it into the body the finance API expects.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [Error::EmptyDescription] if the description is blank.
    /// - [Error::InvalidAmount] if the amount is not a finite number greater than zero.
    /// - [Error::EmptyCategory] if no category was chosen.
    pub fn validate(self) -> Result<NewTransaction, Error> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::InvalidAmount(self.amount));
        }

        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .ok_or(Error::EmptyCategory)?;

        Ok(NewTransaction {
            type_: self.type_,
            description: description.to_owned(),
            amount: self.amount,
            category: category.to_owned(),
            date: self.date,
        })
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        Error,
        category::CategorySet,
        transaction::core::{NewTransaction, TransactionType},
    };

    use super::{TransactionForm, TransactionFormDefaults, transaction_form_fields};

    fn categories() -> CategorySet {
        CategorySet {
            expense: vec!["餐飲".to_owned(), "其他".to_owned()],
            income: vec!["薪資".to_owned(), "其他".to_owned()],
        }
    }

    fn render(defaults: &TransactionFormDefaults<'_>) -> Html {
        let fields = transaction_form_fields(defaults, &categories());
        Html::parse_fragment(&fields.into_string())
    }

    fn selected_options(html: &Html) -> Vec<(String, String)> {
        let selector = Selector::parse("select#category option[selected]").unwrap();

        html.select(&selector)
            .map(|option| {
                let group = option
                    .parent()
                    .and_then(scraper::ElementRef::wrap)
                    .and_then(|parent| parent.value().attr("label"))
                    .unwrap_or_default()
                    .to_owned();
                (group, option.value().attr("value").unwrap_or_default().to_owned())
            })
            .collect()
    }

    fn valid_form() -> TransactionForm {
        TransactionForm {
            type_: TransactionType::Expense,
            description: "  lunch ".to_owned(),
            amount: 12.5,
            category: Some("餐飲".to_owned()),
            date: date!(2025 - 10 - 05),
        }
    }

    #[test]
    fn checks_selected_type() {
        for (transaction_type, expected) in [
            (TransactionType::Expense, "expense"),
            (TransactionType::Income, "income"),
        ] {
            let html = render(&TransactionFormDefaults {
                transaction_type,
                ..TransactionFormDefaults::blank(date!(2025 - 10 - 05))
            });

            let checked = Selector::parse("input[name=type][checked]").unwrap();
            let values: Vec<_> = html
                .select(&checked)
                .filter_map(|input| input.value().attr("value"))
                .collect();
            assert_eq!(values, [expected]);
        }
    }

    #[test]
    fn groups_categories_by_type() {
        let html = render(&TransactionFormDefaults::blank(date!(2025 - 10 - 05)));

        let groups = Selector::parse("select#category optgroup").unwrap();
        let got: Vec<(String, usize)> = html
            .select(&groups)
            .map(|group| {
                (
                    group.value().attr("label").unwrap_or_default().to_owned(),
                    group.select(&Selector::parse("option").unwrap()).count(),
                )
            })
            .collect();
        assert_eq!(got, [("Expense".to_owned(), 2), ("Income".to_owned(), 2)]);
    }

    #[test]
    fn selects_default_category_in_matching_group() {
        let html = render(&TransactionFormDefaults {
            transaction_type: TransactionType::Income,
            category: Some("其他"),
            ..TransactionFormDefaults::blank(date!(2025 - 10 - 05))
        });

        assert_eq!(
            selected_options(&html),
            [("Income".to_owned(), "其他".to_owned())]
        );
    }

    #[test]
    fn keeps_unknown_default_category() {
        let html = render(&TransactionFormDefaults {
            category: Some("Pets"),
            ..TransactionFormDefaults::blank(date!(2025 - 10 - 05))
        });

        assert_eq!(
            selected_options(&html),
            [("Expense".to_owned(), "Pets".to_owned())]
        );
    }

    #[test]
    fn prefills_amount_and_date() {
        let html = render(&TransactionFormDefaults {
            amount: Some(7.5),
            ..TransactionFormDefaults::blank(date!(2025 - 10 - 05))
        });

        let amount = Selector::parse("input[name=amount]").unwrap();
        let date = Selector::parse("input[name=date]").unwrap();
        assert_eq!(
            html.select(&amount).next().unwrap().value().attr("value"),
            Some("7.50")
        );
        assert_eq!(
            html.select(&date).next().unwrap().value().attr("value"),
            Some("2025-10-05")
        );
    }

    #[test]
    fn valid_form_trims_description() {
        assert_eq!(
            valid_form().validate(),
            Ok(NewTransaction {
                type_: TransactionType::Expense,
                description: "lunch".to_owned(),
                amount: 12.5,
                category: "餐飲".to_owned(),
                date: date!(2025 - 10 - 05),
            })
        );
    }

    #[test]
    fn rejects_invalid_forms() {
        let cases = [
            (
                TransactionForm {
                    description: "   ".to_owned(),
                    ..valid_form()
                },
                Error::EmptyDescription,
            ),
            (
                TransactionForm {
                    amount: 0.0,
                    ..valid_form()
                },
                Error::InvalidAmount(0.0),
            ),
            (
                TransactionForm {
                    amount: -3.0,
                    ..valid_form()
                },
                Error::InvalidAmount(-3.0),
            ),
            (
                TransactionForm {
                    category: None,
                    ..valid_form()
                },
                Error::EmptyCategory,
            ),
            (
                TransactionForm {
                    category: Some(" ".to_owned()),
                    ..valid_form()
                },
                Error::EmptyCategory,
            ),
        ];

        for (form, want) in cases {
            assert_eq!(form.validate(), Err(want));
        }
    }

    #[test]
    fn rejects_non_finite_amount() {
        let form = TransactionForm {
            amount: f64::INFINITY,
            ..valid_form()
        };

        assert!(matches!(form.validate(), Err(Error::InvalidAmount(_))));
    }
}
