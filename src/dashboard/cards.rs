//! Summary cards for the income, expense and balance of the visible transactions.

use maud::{Markup, html};

use crate::{html::currency_rounded_with_tooltip, transaction::Totals};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";
const TEXT_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TEXT_RED_STYLE: &str = "text-red-600 dark:text-red-400";

fn summary_card(id: &str, title: &str, amount: f64, amount_style: &str) -> Markup {
    html! {
        div id=(id) class=(CARD_STYLE)
        {
            h3 class="text-sm text-gray-600 dark:text-gray-400 mb-1" { (title) }

            div class={ "text-3xl font-bold " (amount_style) }
            {
                (currency_rounded_with_tooltip(amount))
            }
        }
    }
}

/// Renders the income, expense and balance cards.
///
/// Amounts are rounded to whole dollars, the exact amount is shown in a tooltip.
pub(super) fn summary_cards_view(totals: &Totals) -> Markup {
    let balance_style = if totals.balance < 0.0 {
        TEXT_RED_STYLE
    } else {
        TEXT_GREEN_STYLE
    };

    html! {
        section id="summary" class="w-full grid grid-cols-1 sm:grid-cols-3 gap-4"
        {
            (summary_card("total-income", "Income", totals.income, TEXT_GREEN_STYLE))
            (summary_card("total-expense", "Expenses", totals.expense, TEXT_RED_STYLE))
            (summary_card("balance", "Balance", totals.balance, balance_style))
        }
    }
}
