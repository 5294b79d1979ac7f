//! The expense breakdown pie chart.
//!
//! The chart is built with charming and rendered by ECharts in the browser.
//! The initialization script sits next to the chart container so that it runs
//! again when htmx swaps in new dashboard content.

use charming::{
    Chart,
    component::{Legend, Title},
    element::{JsFunction, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::transaction::CategoryBreakdown;

const CHART_ID: &str = "expense-breakdown-chart";

pub(super) fn expense_breakdown_chart(breakdown: &CategoryBreakdown, subtitle: &str) -> Chart {
    let data: Vec<(f64, &str)> = breakdown
        .iter()
        .map(|(category, amount)| ((amount * 100.0).round() / 100.0, category))
        .collect();

    Chart::new()
        .title(Title::new().text("Expenses by category").subtext(subtitle))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom(0))
        .series(Pie::new().name("Expenses").radius("60%").data(data))
}

/// Renders the chart container and its initialization script.
///
/// Shows a short message instead when there are no expenses to chart.
pub(super) fn expense_chart_view(breakdown: &CategoryBreakdown, subtitle: &str) -> Markup {
    if breakdown.is_empty() {
        return html! {
            p id="no-expenses" class="text-gray-600 dark:text-gray-400"
            {
                "No expenses for this filter."
            }
        };
    }

    let options = expense_breakdown_chart(breakdown, subtitle).to_string();

    html! {
        section id="charts" class="w-full"
        {
            div id=(CHART_ID) class="min-h-[380px] rounded dark:bg-gray-100" {}

            script { (chart_script(CHART_ID, &options)) }
        }
    }
}

/// Escape the sequences that would end or comment out an inline script.
///
/// Category names are user data and only ever appear inside JS string
/// literals, where `<\/` and `<\!` mean the same as `</` and `<!`.
fn escape_script_text(text: &str) -> String {
    text.replace("</", "<\\/").replace("<!", "<\\!")
}

fn chart_script(chart_id: &str, options: &str) -> PreEscaped<String> {
    let options = escape_script_text(options);

    PreEscaped(format!(
        r#"(function() {{
            const chartDom = document.getElementById("{chart_id}");
            if (!chartDom || typeof echarts === "undefined") {{
                return;
            }}
            const chart = echarts.init(chartDom);
            chart.setOption({options});

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
            }};
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }})();"#
    ))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}
