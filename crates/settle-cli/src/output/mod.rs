use serde::Serialize;
use serde_json::Value;
use settle_core::AggregateRecord;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Header and rows for a table view that should not be derived from JSON keys.
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Like [`render`], but `view` supplies the table layout.
pub fn render_with_view<T: Serialize>(
    value: &T,
    format: OutputFormat,
    view: impl FnOnce() -> TableView,
) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render(value, format);
    }
    let view = view();
    if view.rows.is_empty() {
        return Ok(String::from("(no rows)"));
    }
    let headers = view.headers.iter().map(String::as_str).collect::<Vec<_>>();
    Ok(table::render_table(&headers, &view.rows, table_options()))
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// One row per owner, one column per category in `categories` order, then `total`.
pub fn aggregate_view(records: &[AggregateRecord], categories: &[String]) -> TableView {
    let mut headers = Vec::with_capacity(categories.len() + 2);
    headers.push(String::from("owner"));
    headers.extend(categories.iter().cloned());
    headers.push(String::from("total"));

    let rows = records
        .iter()
        .map(|record| {
            let mut row = Vec::with_capacity(headers.len());
            row.push(record.owner_name.clone());
            row.extend(categories.iter().map(|name| record.count(name).to_string()));
            row.push(record.total().to_string());
            row
        })
        .collect();

    TableView { headers, rows }
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let options = table_options();
    let rows = match serde_json::to_value(value)? {
        Value::Object(map) => {
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            return Ok(table::render_table(&["key", "value"], &rows, options));
        }
        Value::Array(items) if items.is_empty() => return Ok(String::from("(no rows)")),
        Value::Array(items) => items.iter().map(|item| vec![value_to_cell(item)]).collect(),
        scalar => vec![vec![value_to_cell(&scalar)]],
    };
    Ok(table::render_table(&["value"], &rows, options))
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(v) => v.clone(),
        other => other.to_string(),
    }
}
