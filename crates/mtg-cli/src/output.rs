use chrono::{DateTime, Local, Utc};
use mtg_core::Appointment;
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the headers.
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    println!("{}", render_row(&headers, &widths));
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", rule.join("  "));
    for row in &rows {
        println!("{}", render_row(row, &widths));
    }
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| format!("{cell:width$}", width = widths.get(i).copied().unwrap_or(0)))
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// Local wall-clock rendering, e.g. `Wed Jan 10 2024 10:05`.
pub fn format_when(when: DateTime<Utc>) -> String {
    when.with_timezone(&Local)
        .format("%a %b %e %Y %H:%M")
        .to_string()
}

/// Numbered table of appointments under a heading, or JSON.
pub fn print_appointments(
    heading: &str,
    records: &[&Appointment],
    json: bool,
) -> anyhow::Result<()> {
    if json {
        return print_json(records);
    }

    println!("{heading}");
    if records.is_empty() {
        println!("- none");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![
                (i + 1).to_string(),
                format_when(r.when()),
                if r.is_acknowledged() { "yes" } else { "" }.to_string(),
                r.text().to_string(),
            ]
        })
        .collect();
    print_table(&["#", "WHEN", "ACKED", "TEXT"], rows);
    Ok(())
}
