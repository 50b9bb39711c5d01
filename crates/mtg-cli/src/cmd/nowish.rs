use crate::app::App;
use crate::output::print_json;
use anyhow::Context;
use chrono::Local;
use mtg_core::notify::{self, CommandNotifier};
use mtg_core::window;

/// One line, `; `-separated. Prints nothing when nothing is nowish.
pub fn summary(app: &App, json: bool) -> anyhow::Result<()> {
    let records = window::nowish(app.store.records(), &Local::now(), app.radius());
    if json {
        return print_json(&records);
    }
    if let Some(line) = notify::summary_line(records) {
        println!("{line}");
    }
    Ok(())
}

pub fn debug(app: &App, json: bool) -> anyhow::Result<()> {
    let records = window::nowish(app.store.records(), &Local::now(), app.radius());
    if json {
        return print_json(&records);
    }

    println!("nowish non-acked:");
    if records.is_empty() {
        println!("- none");
    }
    for (i, r) in records.iter().enumerate() {
        println!("{}. {}", i + 1, r.text());
    }
    Ok(())
}

pub fn notify(app: &App, json: bool) -> anyhow::Result<()> {
    let notifier = CommandNotifier::from_config(&app.config.notifier);
    let records = app.store.records();
    let sent = notify::notify_nowish(records, &Local::now(), app.radius(), &notifier)
        .context("failed to send notification")?;

    if json {
        print_json(&serde_json::json!({ "notified": sent }))?;
    }
    Ok(())
}
