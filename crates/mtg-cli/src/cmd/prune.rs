use crate::app::App;
use crate::output::print_json;
use anyhow::Context;
use chrono::Local;
use mtg_core::agenda::{self, PruneReport};

pub fn run(app: &mut App, json: bool) -> anyhow::Result<()> {
    let report = agenda::prune(&mut app.store, &Local::now())
        .context("failed to prune appointments")?;

    if json {
        return print_json(&serde_json::json!({
            "removed": report.removed,
            "remaining": report.remaining,
        }));
    }

    print_report(&report);
    Ok(())
}

pub fn print_report(report: &PruneReport) {
    for r in &report.removed {
        println!("Appointment pruned: {}", r.text());
    }
    println!("Appointments pruned: {}.", report.removed_count());
}
