use crate::app::App;
use crate::output::{format_when, print_json};
use anyhow::Context;
use chrono::Local;
use mtg_core::ack;

pub fn run(app: &mut App, json: bool) -> anyhow::Result<()> {
    let radius = app.radius();
    let acknowledged = ack::acknowledge_nowish(&mut app.store, &Local::now(), radius)
        .context("failed to acknowledge nowish meetings")?;

    if json {
        return print_json(&acknowledged);
    }

    println!("Acknowledging nowish meetings:");
    for (i, r) in acknowledged.iter().enumerate() {
        println!("{}. {} - {}", i + 1, r.text(), format_when(r.when()));
    }
    Ok(())
}
