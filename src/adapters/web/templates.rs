//! HTML templates and fragment builders.
//!
//! Full pages go through Askama; the fragments HTMX polls every second are
//! built as strings to keep the hot path allocation-light.

use askama::Template;
use axum::response::{Html, IntoResponse, Response};

use crate::domain::holding::Holding;
use crate::domain::layout::TreemapLayout;
use crate::domain::rotation::Countdown;

use super::WebError;

/// Render a full page template, mapping render failures to a 500.
pub fn render_page<T: Template>(template: &T) -> Result<Response, WebError> {
    template
        .render()
        .map(|html| Html(html).into_response())
        .map_err(|e| WebError::internal(format!("template render failed: {}", e)))
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate<'a> {
    pub title: &'a str,
    pub refresh_secs: u64,
}

impl<'a> DashboardTemplate<'a> {
    pub fn fragment(&self) -> String {
        let mut html = String::from("<div id=\"content\">");
        html.push_str(&format!("<h1>{}</h1>", self.title));
        html.push_str(
            "<div id=\"status\" class=\"status\" hx-get=\"/fragment/status\" \
             hx-trigger=\"load, every 1s\" hx-swap=\"innerHTML\"></div>",
        );
        html.push_str(
            "<div id=\"treemap\" class=\"treemap\" hx-get=\"/fragment/treemap\" \
             hx-trigger=\"load, every 1s\" hx-swap=\"innerHTML\"></div>",
        );
        html.push_str(
            "<div id=\"holdings\" class=\"holdings\" hx-get=\"/fragment/holdings\" \
             hx-trigger=\"load\" hx-swap=\"innerHTML\"></div>",
        );
        html.push_str("</div>");
        html
    }
}

/// The treemap fragment: view title plus the rendered chart.
pub fn treemap_fragment_html(layout: &TreemapLayout, svg: &str) -> String {
    let mut html = format!("<h2 class=\"chart-title\">{}</h2>", layout.title);
    if layout.tiles.is_empty() {
        html.push_str(
            "<p class=\"empty\">No quote data yet. The first refresh may take a few seconds.</p>",
        );
    } else {
        html.push_str(&format!("<div class=\"chart\">{}</div>", svg));
    }
    html
}

/// The status fragment: refresh timestamp, staleness marker and countdown.
pub fn status_fragment_html(
    updated_at: Option<&str>,
    update_failed: bool,
    countdown: &Countdown,
) -> String {
    let updated = match (updated_at, update_failed) {
        (Some(ts), false) => format!("Updated {}", ts),
        (Some(ts), true) => format!("Update failed, showing data from {}", ts),
        (None, true) => String::from("Update failed"),
        (None, false) => String::from("Waiting for the first update"),
    };
    let class = if update_failed {
        "updated stale"
    } else {
        "updated"
    };
    format!(
        "<span class=\"{}\">{}</span> <span class=\"countdown\">⏱ {}s</span>",
        class, updated, countdown.remaining_secs
    )
}

/// The holdings fragment: current table plus the add form.
pub fn holdings_fragment_html(holdings: &[Holding]) -> String {
    let mut html = String::from("<h2>Holdings</h2>");

    if holdings.is_empty() {
        html.push_str("<p class=\"empty\">No holdings yet. Add one below.</p>");
    } else {
        html.push_str("<table>");
        html.push_str("<tr><th>Ticker</th><th>Shares</th><th>Avg Price</th><th></th></tr>");
        for holding in holdings {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>$ {:.2}</td>\
                 <td><button hx-post=\"/holdings/{}/delete\" hx-target=\"#holdings\" \
                 hx-swap=\"innerHTML\">Remove</button></td></tr>",
                holding.ticker, holding.shares, holding.avg_price, holding.ticker
            ));
        }
        html.push_str("</table>");
    }

    html.push_str("<form hx-post=\"/holdings\" hx-target=\"#holdings\" hx-swap=\"innerHTML\">");
    html.push_str("<label>Ticker: <input name=\"ticker\" placeholder=\"PETR4.SA\" required></label>");
    html.push_str(
        "<label>Shares: <input name=\"shares\" type=\"number\" min=\"1\" value=\"1\" required></label>",
    );
    html.push_str("<label>Avg price: <input name=\"avg_price\" placeholder=\"0.00\"></label>");
    html.push_str("<button type=\"submit\">Add</button>");
    html.push_str("</form>");
    html
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}

impl<'a> ErrorTemplate<'a> {
    pub fn fragment(&self) -> String {
        format!(
            "<div id=\"error\" class=\"error\"><h1>Error {}</h1><p>{}</p></div>",
            self.status, self.message
        )
    }
}
