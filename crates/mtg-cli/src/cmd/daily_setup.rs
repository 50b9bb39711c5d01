use crate::app::App;
use crate::output::{format_when, print_json};
use chrono::{DateTime, Local, TimeZone};
use mtg_core::agenda::{self, PruneReport};
use mtg_core::dateparse::{CasualDateParser, DateParser};
use mtg_core::{Appointment, Persistence, Store};
use std::io::{BufRead, Write};

const PROMPT: &str = "Enter an event for today (or press Enter to finish): ";

pub fn run(app: &mut App, json: bool) -> anyhow::Result<()> {
    let report = prune_before_setup(&mut app.store, &Local::now());
    if let Some(report) = report.as_ref().filter(|_| !json) {
        super::prune::print_report(report);
    }

    let stdin = std::io::stdin();
    let added = if json {
        // stdout carries a single JSON document
        prompt_for_appointments(
            &mut app.store,
            &mut stdin.lock(),
            &mut std::io::stderr(),
            &CasualDateParser,
            Local::now,
        )?
    } else {
        prompt_for_appointments(
            &mut app.store,
            &mut stdin.lock(),
            &mut std::io::stdout(),
            &CasualDateParser,
            Local::now,
        )?
    };
    tracing::info!(added = added.len(), "daily setup finished");

    if json {
        let pruned = report.map(|r| r.removed).unwrap_or_default();
        print_json(&serde_json::json!({
            "pruned": pruned,
            "added": added,
        }))?;
    }
    Ok(())
}

/// Prune ahead of the prompt loop. A failure is reported and setup goes on.
pub fn prune_before_setup<P, Tz>(store: &mut Store<P>, now: &DateTime<Tz>) -> Option<PruneReport>
where
    P: Persistence,
    Tz: TimeZone,
{
    match agenda::prune(store, now) {
        Ok(report) => Some(report),
        Err(e) => {
            eprintln!("error: failed to prune appointments: {e}");
            None
        }
    }
}

/// Read one appointment per line until a blank line or end of input.
///
/// A line that cannot be added is reported on stderr and the loop goes on.
/// Returns the appointments that were added.
pub fn prompt_for_appointments<P, R, W, D, Tz>(
    store: &mut Store<P>,
    input: &mut R,
    output: &mut W,
    parser: &D,
    clock: impl Fn() -> DateTime<Tz>,
) -> anyhow::Result<Vec<Appointment>>
where
    P: Persistence,
    R: BufRead,
    W: Write,
    D: DateParser,
    Tz: TimeZone,
{
    let mut added = Vec::new();
    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }
        let text = line.trim();
        if text.is_empty() {
            break;
        }

        match agenda::add(store, text, parser, &clock()) {
            Ok(record) => {
                writeln!(output, "Parsed meeting time: {}", format_when(record.when()))?;
                writeln!(output, "Appointment saved.")?;
                added.push(record);
            }
            Err(e) => eprintln!("error: {e}"),
        }
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeDelta, Utc};
    use mtg_core::MemoryBlob;
    use std::io::Cursor;

    fn clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap()
    }

    fn run_loop(input: &str, store: &mut Store<MemoryBlob>) -> (usize, String) {
        let mut output = Vec::new();
        let added = prompt_for_appointments(
            store,
            &mut Cursor::new(input.as_bytes()),
            &mut output,
            &CasualDateParser,
            clock,
        )
        .unwrap();
        (added.len(), String::from_utf8(output).unwrap())
    }

    #[test]
    fn stops_at_blank_line() {
        let mut store = Store::empty(MemoryBlob::new());
        let (added, output) = run_loop("standup at 9:30am\n\nlunch at noon\n", &mut store);
        assert_eq!(added, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].text(), "standup at 9:30am");
        assert_eq!(output.matches(PROMPT).count(), 2);
    }

    #[test]
    fn stops_at_end_of_input() {
        let mut store = Store::empty(MemoryBlob::new());
        let (added, _) = run_loop("standup at 9:30am\nlunch at noon", &mut store);
        assert_eq!(added, 2);
        let texts: Vec<_> = store.records().iter().map(|r| r.text()).collect();
        assert_eq!(texts, ["standup at 9:30am", "lunch at noon"]);
    }

    #[test]
    fn unparseable_lines_are_skipped() {
        let mut store = Store::empty(MemoryBlob::new());
        let (added, output) = run_loop("water plants\nretro at 4pm\n\n", &mut store);
        assert_eq!(added, 1);
        assert_eq!(store.records()[0].text(), "retro at 4pm");
        assert_eq!(output.matches("Appointment saved.").count(), 1);
        // each addition is flushed on its own
        assert_eq!(store.persistence().writes(), 1);
    }

    #[test]
    fn each_line_uses_a_fresh_reference_time() {
        let mut store = Store::empty(MemoryBlob::new());
        let start = clock();
        let calls = std::cell::Cell::new(0);
        let ticking = || {
            calls.set(calls.get() + 1);
            start + TimeDelta::hours(i64::from(calls.get()))
        };
        let relative = |_: &str, reference: NaiveDateTime| Some(reference);
        prompt_for_appointments(
            &mut store,
            &mut Cursor::new("a\nb\n\n".as_bytes()),
            &mut Vec::<u8>::new(),
            &relative,
            ticking,
        )
        .unwrap();
        let whens: Vec<_> = store.records().iter().map(|r| r.when()).collect();
        assert_eq!(whens, [start + TimeDelta::hours(1), start + TimeDelta::hours(2)]);
    }

    #[test]
    fn failed_prune_is_reported_and_setup_continues() {
        let blob = MemoryBlob::with_contents(
            r#"[{"text":"old","date":"2024-01-01T09:00:00.000Z","acked":false}]"#,
        );
        blob.reject_writes(true);
        let mut store = Store::open(blob, mtg_core::config::CorruptBlobPolicy::Fail).unwrap();

        assert!(prune_before_setup(&mut store, &clock()).is_none());

        // the loop still runs once the store accepts writes again
        store.persistence().reject_writes(false);
        let (added, output) = run_loop("retro at 4pm\n\n", &mut store);
        assert_eq!(added, 1);
        assert!(output.contains("Appointment saved."));
        let texts: Vec<_> = store.records().iter().map(|r| r.text()).collect();
        assert_eq!(texts, ["retro at 4pm"]);
    }
}
