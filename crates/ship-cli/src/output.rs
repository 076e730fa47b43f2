//! Terminal rendering of routes, identities and shipment pages.

use crate::{CliError, CliResult};

use ship_client::{Paginator, Shipment};
use ship_session::{Identity, Route};

use serde_json::{Value, json};

const MAX_CELL_WIDTH: usize = 40;
const EMPTY_CELL: &str = "-";

/// Identity summary safe to print; the credential is never included.
pub fn identity_json(identity: &Identity) -> Value {
    json!({
        "subjectId": identity.subject_id,
        "displayName": identity.display_name,
        "email": identity.email,
        "provider": identity.provider,
        "signedInAt": identity.signed_in_at.to_rfc3339(),
    })
}

pub fn route_json(route: &Route<'_>) -> Value {
    match route {
        Route::Loading => json!({ "route": "loading" }),
        Route::Login { error } => json!({ "route": "login", "error": error }),
        Route::Content(identity) => json!({
            "route": "content",
            "identity": identity_json(identity),
        }),
    }
}

pub fn print_json(value: &Value, pretty: bool) -> CliResult<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };

    println!("{}", output.map_err(CliError::output)?);
    Ok(())
}

pub fn page_json(shipments: &[Shipment], paginator: &Paginator) -> CliResult<Value> {
    let rows = serde_json::to_value(paginator.page_of(shipments)).map_err(CliError::output)?;

    Ok(json!({
        "page": paginator.current_page(),
        "totalPages": paginator.total_pages(),
        "rowsPerPage": paginator.rows_per_page(),
        "totalItems": paginator.total_items(),
        "shipments": rows,
    }))
}

/// Fixed-width table of the current page with a page footer.
pub fn render_table(shipments: &[Shipment], paginator: &Paginator) -> String {
    const HEADERS: [&str; 8] = [
        "ID",
        "Topic",
        "Status",
        "Requested by",
        "Created",
        "Logistics",
        "Due",
        "Remark",
    ];

    let page = paginator.page_of(shipments);
    if page.is_empty() {
        return String::from("No shipment requests found.\n");
    }

    let rows: Vec<[String; 8]> = page
        .iter()
        .map(|s| {
            [
                s.id.clone(),
                cell(&s.topic),
                cell(&s.request_status),
                cell(&s.created_user_name),
                cell(&s.created_date_time),
                cell(&s.logistic_user_name),
                cell(&s.due_date),
                cell(&s.remark),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(rule.join("-+-").as_str());
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }

    let first = paginator.range().start + 1;
    let last = paginator.range().end;
    out.push_str(&format!(
        "\nShowing {first}-{last} of {} | Page {} of {} | {} rows per page\n",
        paginator.total_items(),
        paginator.current_page(),
        paginator.total_pages(),
        paginator.rows_per_page()
    ));
    out
}

fn push_row(out: &mut String, row: &[String; 8], widths: &[usize; 8]) {
    let cells: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(value, &width)| format!("{value:<width$}"))
        .collect();
    out.push_str(cells.join(" | ").trim_end());
    out.push('\n');
}

fn cell(value: &Option<String>) -> String {
    let value = value.as_deref().map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return String::from(EMPTY_CELL);
    }

    if value.chars().count() > MAX_CELL_WIDTH {
        let truncated: String = value.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{truncated}...")
    } else {
        value.to_string()
    }
}
