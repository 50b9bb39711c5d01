use crate::app::App;
use crate::output::print_appointments;
use chrono::Local;
use mtg_core::window;

pub fn all(app: &App, json: bool) -> anyhow::Result<()> {
    let records = window::all(app.store.records());
    print_appointments("All meetings:", &records, json)
}

pub fn today(app: &App, json: bool) -> anyhow::Result<()> {
    let records = window::today(app.store.records(), &Local::now());
    print_appointments("Today's meetings:", &records, json)
}
