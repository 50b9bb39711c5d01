use crate::appointment::Appointment;
use crate::error::Result;
use crate::store::{Persistence, Store};
use crate::window::NowishWindow;
use chrono::{DateTime, TimeDelta, TimeZone};

/// Mark every unacknowledged record in the nowish window as acknowledged,
/// save the store, and return the records that changed.
///
/// A second call with the same `now` returns nothing.
pub fn acknowledge_nowish<P, Tz>(
    store: &mut Store<P>,
    now: &DateTime<Tz>,
    radius: TimeDelta,
) -> Result<Vec<Appointment>>
where
    P: Persistence,
    Tz: TimeZone,
{
    let window = NowishWindow::around(now, radius);
    let mut transitioned = Vec::new();
    for record in store.records_mut() {
        if window.selects(record) && record.acknowledge() {
            transitioned.push(record.clone());
        }
    }
    store.save()?;
    tracing::info!(count = transitioned.len(), "acknowledged nowish appointments");
    Ok(transitioned)
}
