use crate::error::{MtgError, Result};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// A single free-text appointment with the instant it was parsed to.
///
/// `when` is fixed at construction and `acknowledged` only ever flips from
/// `false` to `true` through [`crate::ack::acknowledge_nowish`]. Text rules
/// apply to new appointments only; stored records load as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAppointment")]
pub struct Appointment {
    text: String,
    #[serde(rename = "date", serialize_with = "serialize_millis")]
    when: DateTime<Utc>,
    #[serde(rename = "acked")]
    acknowledged: bool,
}

impl Appointment {
    /// Build an unacknowledged appointment. `when` is truncated to millisecond
    /// precision so the persisted form reads back identically.
    pub fn new(text: impl Into<String>, when: DateTime<Utc>) -> Result<Self> {
        let text = text.into();
        let text = text.trim();
        if text.is_empty() {
            return Err(MtgError::EmptyText);
        }
        Ok(Self {
            text: text.to_string(),
            when: when.trunc_subsecs(3),
            acknowledged: false,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn when(&self) -> DateTime<Utc> {
        self.when
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    /// Returns true if this call changed the state.
    pub(crate) fn acknowledge(&mut self) -> bool {
        let changed = !self.acknowledged;
        self.acknowledged = true;
        changed
    }
}

// ---------------------------------------------------------------------------
// Persisted shape
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RawAppointment {
    text: String,
    date: DateTime<Utc>,
    #[serde(default)]
    acked: bool,
}

impl From<RawAppointment> for Appointment {
    fn from(raw: RawAppointment) -> Self {
        Self {
            text: raw.text,
            when: raw.date,
            acknowledged: raw.acked,
        }
    }
}

fn serialize_millis<S: Serializer>(
    when: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&when.to_rfc3339_opts(SecondsFormat::Millis, true))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
