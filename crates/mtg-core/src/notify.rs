use crate::appointment::Appointment;
use crate::config::{NotifierConfig, MESSAGE_PLACEHOLDER};
use crate::error::{MtgError, Result};
use crate::window;
use chrono::{DateTime, TimeDelta, TimeZone};
use std::process::Command;

/// Delivers a one-line message to the user.
pub trait Notifier {
    fn notify(&self, message: &str) -> Result<()>;
}

/// Runs an external program, e.g. `terminal-notifier` or `notify-send`.
///
/// Every `{message}` in `args` is replaced with the message text. The program
/// is spawned directly, never through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandNotifier {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandNotifier {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &NotifierConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    fn render_args(&self, message: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(MESSAGE_PLACEHOLDER, message))
            .collect()
    }
}

impl Notifier for CommandNotifier {
    fn notify(&self, message: &str) -> Result<()> {
        let program = which::which(&self.program)
            .map_err(|_| MtgError::NotifierNotFound(self.program.clone()))?;
        let status = Command::new(&program)
            .args(self.render_args(message))
            .status()?;
        if !status.success() {
            return Err(MtgError::NotifierFailed {
                program: self.program.clone(),
                status: status.to_string(),
            });
        }
        tracing::debug!(program = %program.display(), "notification sent");
        Ok(())
    }
}

/// Texts joined with `"; "`, or `None` when there is nothing to say.
pub fn summary_line<'a, I>(records: I) -> Option<String>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    let texts: Vec<&str> = records.into_iter().map(|r| r.text()).collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.join("; "))
    }
}

/// Send one notification covering every nowish appointment.
///
/// Returns the message that was sent. Appointments are not acknowledged.
pub fn notify_nowish<N, Tz>(
    records: &[Appointment],
    now: &DateTime<Tz>,
    radius: TimeDelta,
    notifier: &N,
) -> Result<Option<String>>
where
    N: Notifier + ?Sized,
    Tz: TimeZone,
{
    let Some(message) = summary_line(window::nowish(records, now, radius)) else {
        return Ok(None);
    };
    notifier.notify(&message)?;
    tracing::info!(summary = %message, "notified nowish appointments");
    Ok(Some(message))
}
