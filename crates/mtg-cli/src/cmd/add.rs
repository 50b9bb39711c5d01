use crate::app::App;
use crate::output::{format_when, print_json};
use chrono::Local;
use mtg_core::agenda;
use mtg_core::dateparse::CasualDateParser;
use mtg_core::Appointment;

pub fn run(app: &mut App, text: &str, json: bool) -> anyhow::Result<()> {
    let record = agenda::add(&mut app.store, text, &CasualDateParser, &Local::now())?;

    if json {
        print_json(&record)?;
    } else {
        print_added(&record);
    }
    Ok(())
}

pub fn print_added(record: &Appointment) {
    println!("Parsed meeting time: {}", format_when(record.when()));
    println!("Appointment saved.");
}
