//! Plain-text rendering of the key table

use crate::domain::api_key::ApiKeyView;

const NAME_HEADER: &str = "NAME";
const USAGE_HEADER: &str = "USAGE";

/// Render rows as an aligned table, one key per line
pub fn render_table(rows: &[ApiKeyView]) -> String {
    if rows.is_empty() {
        return "No API keys. Use `create <name>` to add one.\n".to_string();
    }

    let row_width = rows.len().to_string().len().max(1);
    let name_width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(NAME_HEADER.len());
    let usage_width = rows
        .iter()
        .map(|r| r.usage.to_string().len())
        .max()
        .unwrap_or(0)
        .max(USAGE_HEADER.len());

    let mut out = format!(
        "{:>row_width$}  {:<name_width$}  {:>usage_width$}  KEY\n",
        "#", NAME_HEADER, USAGE_HEADER
    );

    for (i, row) in rows.iter().enumerate() {
        out.push_str(&format!(
            "{:>row_width$}  {:<name_width$}  {:>usage_width$}  {}\n",
            i + 1,
            row.name,
            row.usage,
            row.key
        ));
    }

    out
}
