use crate::appointment::Appointment;
use crate::dateparse::DateParser;
use crate::error::{MtgError, Result};
use crate::store::{Persistence, Store};
use crate::window::start_of_day;
use chrono::{DateTime, TimeZone, Utc};

/// Outcome of [`prune`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneReport {
    pub removed: Vec<Appointment>,
    pub remaining: usize,
}

impl PruneReport {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

/// Resolve the date in `text`, then append and save a new appointment.
///
/// The parser works in `now`'s wall-clock time. Nothing is mutated or saved
/// when the text is blank or holds no recognisable date.
pub fn add<P, D, Tz>(
    store: &mut Store<P>,
    text: &str,
    parser: &D,
    now: &DateTime<Tz>,
) -> Result<Appointment>
where
    P: Persistence,
    D: DateParser + ?Sized,
    Tz: TimeZone,
{
    if text.trim().is_empty() {
        return Err(MtgError::EmptyText);
    }
    let when = parser
        .parse(text, now.naive_local())
        .and_then(|local| now.timezone().from_local_datetime(&local).earliest())
        .ok_or_else(|| MtgError::UnparseableDate(text.trim().to_string()))?;

    let record = Appointment::new(text, when.with_timezone(&Utc))?;
    store.append(record.clone());
    store.save()?;
    tracing::info!(text = record.text(), when = %record.when(), "added appointment");
    Ok(record)
}

/// Remove every appointment dated before the start of `now`'s day and save.
pub fn prune<P, Tz>(store: &mut Store<P>, now: &DateTime<Tz>) -> Result<PruneReport>
where
    P: Persistence,
    Tz: TimeZone,
{
    let cutoff = start_of_day(now);
    let removed = store.remove_where(|r| r.when() < cutoff);
    store.save()?;
    tracing::info!(removed = removed.len(), remaining = store.len(), "pruned appointments");
    Ok(PruneReport {
        removed,
        remaining: store.len(),
    })
}
