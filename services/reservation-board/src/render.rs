//! HTML rendering of the view state. Everything here is pure.

use std::fmt::Write;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::config::DisplayConfig;
use crate::reservation::{DateTimeValue, Reservation, ReservationStatus};
use crate::view::ViewState;

pub const HEADING: &str = "Restaurant Reservations";
pub const EMPTY_PLACEHOLDER: &str = "No reservations available.";
const INVALID_DATE: &str = "Invalid Date";

/// Render the view as an HTML fragment: heading, optional error line, and
/// either the list or the empty placeholder.
pub fn render_fragment(state: &ViewState, display: &DisplayConfig) -> String {
    let error_line = state
        .error()
        .map(|message| {
            format!(
                r#"
    <p class="error" style="color: red;">Error: {}</p>"#,
                escape_html(message)
            )
        })
        .unwrap_or_default();

    let items: String = if state.reservations().is_empty() {
        format!(
            r#"
        <p class="empty">{}</p>"#,
            EMPTY_PLACEHOLDER
        )
    } else {
        state
            .reservations()
            .iter()
            .map(|r| render_item(r, display))
            .collect()
    };

    format!(
        r#"<div class="reservations">
    <h1>{heading}</h1>{error_line}
    <ul>{items}
    </ul>
</div>"#,
        heading = HEADING,
        error_line = error_line,
        items = items,
    )
}

fn render_item(reservation: &Reservation, display: &DisplayConfig) -> String {
    let badge = reservation
        .status_label()
        .map(|label| format!(" {}", status_badge(&label, reservation.status())))
        .unwrap_or_default();

    format!(
        r#"
        <li data-key="{}"><strong>{}</strong> - {} guests at {}{}</li>"#,
        escape_html(&reservation.key()),
        escape_html(&reservation.name_text()),
        escape_html(&reservation.guests_text()),
        escape_html(&format_date_time(reservation.date_time().as_ref(), display)),
        badge
    )
}

/// A colored badge: Confirmed (green), Pending (amber), Canceled (red),
/// anything else gray
fn status_badge(label: &str, status: Option<ReservationStatus>) -> String {
    let (color, bg) = match status {
        Some(ReservationStatus::Confirmed) => ("#155724", "#d4edda"),
        Some(ReservationStatus::Pending) => ("#856404", "#fff3cd"),
        Some(ReservationStatus::Canceled) => ("#721c24", "#f8d7da"),
        None => ("#383d41", "#e2e3e5"),
    };

    format!(
        "<span class=\"status\" style=\"display: inline-block; padding: 0.25em 0.6em; \
         border-radius: 0.25rem; font-size: 0.85em; font-weight: 600; color: {}; \
         background-color: {};\">{}</span>",
        color,
        bg,
        escape_html(label)
    )
}

/// Format a reservation time for display, or `Invalid Date` when it is
/// missing or unparseable
pub fn format_date_time(value: Option<&DateTimeValue>, display: &DisplayConfig) -> String {
    let Some(value) = value else {
        return INVALID_DATE.to_string();
    };
    let formatted = if display.utc {
        value
            .resolve(&Utc)
            .and_then(|dt| format_in(&dt, &display.date_format))
    } else {
        value
            .resolve(&Local)
            .and_then(|dt| format_in(&dt, &display.date_format))
    };
    formatted.unwrap_or_else(|| INVALID_DATE.to_string())
}

fn format_in<Tz: TimeZone>(dt: &DateTime<Tz>, pattern: &str) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    write!(out, "{}", dt.format(pattern)).ok()?;
    Some(out)
}

/// Wrap a fragment in a complete HTML document
pub fn render_page(fragment: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
</head>
<body style="font-family: system-ui, sans-serif; max-width: 960px; margin: 0 auto; padding: 1rem;">
{fragment}
</body>
</html>"#,
        title = HEADING,
        fragment = fragment,
    )
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
