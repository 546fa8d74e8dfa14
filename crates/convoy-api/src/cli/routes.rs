//! `convoy routes` - print the edge rewrite table.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use crate::http::rewrite::{RewriteTable, PROJECT_ID_PARAM};

pub fn show_routes(table: &RewriteTable, json: bool) -> Result<()> {
    if json {
        let rules: Vec<serde_json::Value> = table
            .rules()
            .iter()
            .map(|rule| {
                serde_json::json!({
                    "prefix": rule.prefix(),
                    "target": rule.target(),
                    "routing_key": PROJECT_ID_PARAM,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    if table.rules().is_empty() {
        println!();
        println!("  {}", style("No rewrite rules configured.").dim());
        println!();
        return Ok(());
    }

    let mut out = Table::new();
    out.load_preset(presets::UTF8_FULL_CONDENSED);
    out.set_content_arrangement(ContentArrangement::Dynamic);
    out.set_header(vec![
        Cell::new("Monitored prefix").fg(Color::White),
        Cell::new("Target").fg(Color::White),
        Cell::new("Routing key").fg(Color::White),
    ]);

    for rule in table.rules() {
        out.add_row(vec![
            Cell::new(rule.prefix()).fg(Color::Cyan),
            Cell::new(rule.target()),
            Cell::new(PROJECT_ID_PARAM).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{out}");
    println!();
    println!(
        "  {}",
        style(format!("Requests without {PROJECT_ID_PARAM} are not rewritten.")).dim()
    );
    println!();

    Ok(())
}
