//! Time-window selections over the appointment list.
//!
//! Every function here is pure and keeps the input order. The reference
//! instant `now` carries the time zone that decides where a day starts.

use crate::appointment::Appointment;
use chrono::{DateTime, NaiveTime, TimeDelta, TimeZone, Utc};

/// Default half-width of the nowish window.
pub const NOWISH_RADIUS_MINUTES: u32 = 10;

pub fn default_radius() -> TimeDelta {
    TimeDelta::minutes(i64::from(NOWISH_RADIUS_MINUTES))
}

/// The first instant of `now`'s calendar day in `now`'s time zone.
///
/// Usually local midnight. When a DST jump skips midnight the day starts at
/// the first wall-clock minute that exists.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let tz = now.timezone();
    let mut local = now.date_naive().and_time(NaiveTime::MIN);
    while local < now.naive_local() {
        if let Some(start) = tz.from_local_datetime(&local).earliest() {
            return start.with_timezone(&Utc);
        }
        local += TimeDelta::minutes(1);
    }
    now.with_timezone(&Utc)
}

/// The closed interval `[now - radius, now + radius]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NowishWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl NowishWindow {
    pub fn around<Tz: TimeZone>(now: &DateTime<Tz>, radius: TimeDelta) -> Self {
        let now = now.with_timezone(&Utc);
        Self {
            start: now - radius,
            end: now + radius,
        }
    }

    pub fn contains(&self, when: DateTime<Utc>) -> bool {
        self.start <= when && when <= self.end
    }

    /// Unacknowledged and inside the window.
    pub fn selects(&self, record: &Appointment) -> bool {
        !record.is_acknowledged() && self.contains(record.when())
    }
}

pub fn all(records: &[Appointment]) -> Vec<&Appointment> {
    records.iter().collect()
}

/// Records at or after the start of `now`'s day.
///
/// There is no end-of-day bound: appointments on later days are included.
pub fn today<'a, Tz: TimeZone>(
    records: &'a [Appointment],
    now: &DateTime<Tz>,
) -> Vec<&'a Appointment> {
    let start = start_of_day(now);
    records.iter().filter(|r| r.when() >= start).collect()
}

/// Unacknowledged records within `radius` of `now`, either side inclusive.
pub fn nowish<'a, Tz: TimeZone>(
    records: &'a [Appointment],
    now: &DateTime<Tz>,
    radius: TimeDelta,
) -> Vec<&'a Appointment> {
    let window = NowishWindow::around(now, radius);
    records.iter().filter(|r| window.selects(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use chrono_tz::America::Santiago;
    use proptest::prelude::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn appt(text: &str, when: DateTime<Utc>) -> Appointment {
        Appointment::new(text, when).unwrap()
    }

    fn acked(text: &str, when: DateTime<Utc>) -> Appointment {
        let mut a = appt(text, when);
        a.acknowledge();
        a
    }

    fn texts(records: Vec<&Appointment>) -> Vec<&str> {
        records.into_iter().map(|r| r.text()).collect()
    }

    #[test]
    fn start_of_day_zeroes_local_time() {
        let now = utc(2024, 1, 10, 10, 37) + TimeDelta::milliseconds(123);
        assert_eq!(start_of_day(&now), utc(2024, 1, 10, 0, 0));
    }

    #[test]
    fn start_of_day_uses_the_reference_zone() {
        // 01:30 on the 11th in UTC+3 is still 22:30 on the 10th in UTC
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 1, 11, 1, 30, 0).unwrap();
        assert_eq!(start_of_day(&now), utc(2024, 1, 10, 21, 0));
    }

    #[test]
    fn start_of_day_skips_a_midnight_dst_gap() {
        // Santiago jumps from 00:00 -04 to 01:00 -03 on 2023-09-03
        let now = Santiago.with_ymd_and_hms(2023, 9, 3, 10, 0, 0).unwrap();
        let start = start_of_day(&now);
        assert_eq!(start, utc(2023, 9, 3, 4, 0));
        assert_eq!(start.with_timezone(&Santiago).date_naive(), now.date_naive());
    }

    #[test]
    fn today_after_midnight_dst_gap_excludes_late_yesterday() {
        let now = Santiago.with_ymd_and_hms(2023, 9, 3, 10, 0, 0).unwrap();
        let records = vec![
            // 23:30 -04 on the 2nd
            appt("late yesterday", utc(2023, 9, 3, 3, 30)),
            // 01:00 -03 on the 3rd
            appt("first minute", utc(2023, 9, 3, 4, 0)),
        ];
        assert_eq!(texts(today(&records, &now)), ["first minute"]);
    }

    #[test]
    fn all_returns_everything_in_store_order() {
        let records = vec![
            appt("b", utc(2024, 1, 12, 9, 0)),
            acked("a", utc(2023, 1, 1, 9, 0)),
        ];
        assert_eq!(texts(all(&records)), ["b", "a"]);
    }

    #[test]
    fn today_is_lower_bound_only() {
        let now = utc(2024, 1, 10, 10, 0);
        let records = vec![
            appt("yesterday", utc(2024, 1, 9, 23, 59)),
            appt("next year", utc(2025, 6, 1, 9, 0)),
            appt("this morning", utc(2024, 1, 10, 0, 0)),
            acked("acked tonight", utc(2024, 1, 10, 21, 0)),
        ];
        assert_eq!(
            texts(today(&records, &now)),
            ["next year", "this morning", "acked tonight"]
        );
    }

    #[test]
    fn nowish_includes_record_five_minutes_ahead() {
        let now = utc(2024, 1, 10, 10, 0);
        let records = vec![appt("sync", utc(2024, 1, 10, 10, 5))];
        assert_eq!(texts(nowish(&records, &now, default_radius())), ["sync"]);
    }

    #[test]
    fn nowish_bounds_are_inclusive() {
        let now = utc(2024, 1, 10, 10, 0);
        let records = vec![
            appt("too early", utc(2024, 1, 10, 9, 49)),
            appt("lower edge", utc(2024, 1, 10, 9, 50)),
            appt("upper edge", utc(2024, 1, 10, 10, 10)),
            appt("too late", utc(2024, 1, 10, 10, 11)),
        ];
        assert_eq!(
            texts(nowish(&records, &now, default_radius())),
            ["lower edge", "upper edge"]
        );
    }

    #[test]
    fn nowish_skips_acknowledged() {
        let now = utc(2024, 1, 10, 10, 0);
        let records = vec![
            acked("seen", utc(2024, 1, 10, 10, 1)),
            appt("unseen", utc(2024, 1, 10, 10, 2)),
        ];
        assert_eq!(texts(nowish(&records, &now, default_radius())), ["unseen"]);
    }

    fn arb_record() -> impl Strategy<Value = Appointment> {
        // minutes around 2024-01-10T10:00Z, spanning a few days
        (-5_000i64..5_000, any::<bool>()).prop_map(|(offset, is_acked)| {
            let when = utc(2024, 1, 10, 10, 0) + TimeDelta::minutes(offset);
            let mut record = appt(&format!("m{offset}"), when);
            if is_acked {
                record.acknowledge();
            }
            record
        })
    }

    proptest! {
        #[test]
        fn nowish_never_returns_acknowledged(
            records in proptest::collection::vec(arb_record(), 0..40),
            radius in 1i64..120,
        ) {
            let now = utc(2024, 1, 10, 10, 0);
            let selected = nowish(&records, &now, TimeDelta::minutes(radius));
            prop_assert!(selected.iter().all(|r| !r.is_acknowledged()));
            let radius = TimeDelta::minutes(radius);
            prop_assert!(selected
                .iter()
                .all(|r| r.when() >= now - radius && r.when() <= now + radius));
        }

        #[test]
        fn selections_preserve_input_order(
            records in proptest::collection::vec(arb_record(), 0..40),
        ) {
            let now = utc(2024, 1, 10, 10, 0);
            for selected in [today(&records, &now), nowish(&records, &now, default_radius())] {
                let positions: Vec<usize> = selected
                    .iter()
                    .map(|s| records.iter().position(|r| std::ptr::eq(r, *s)).unwrap())
                    .collect();
                prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
