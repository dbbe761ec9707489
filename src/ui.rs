use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

use crate::rate::ExchangeRate;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Renders a rate snapshot as a table, one row per quoted currency.
pub fn rates_table(rates: &[ExchangeRate], base_currency: &str) -> String {
    let mut table = new_styled_table();

    table.set_header(vec![
        header_cell("Currency"),
        header_cell(&format!("Rate (1 {base_currency})")),
        header_cell("Updated"),
    ]);

    for rate in rates {
        table.add_row(vec![
            Cell::new(&rate.currency_code),
            Cell::new(rate.rate.to_string()).set_alignment(CellAlignment::Right),
            Cell::new(rate.updated_on.format("%Y-%m-%d").to_string())
                .set_alignment(CellAlignment::Right),
        ]);
    }

    let mut output = format!(
        "Reference rates: {}\n\n",
        style_text(base_currency, StyleType::Title)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\n{}",
        style_text("Source: European Central Bank daily feed", StyleType::Subtle)
    ));

    output
}
