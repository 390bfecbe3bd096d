//! Collaborators supplied by the host: submit sink and notifier

use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

use crate::core::record::SettingRecord;

/// Severity of a user-visible message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "success",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        f.write_str(s)
    }
}

/// Failure reported by a submit sink
#[derive(Debug, Error, Diagnostic)]
pub enum SinkError {
    #[error("Submission rejected: {0}")]
    #[diagnostic(code(setwiz::form::sink))]
    Rejected(String),

    #[error("Failed to write setting: {0}")]
    #[diagnostic(code(setwiz::form::sink_io))]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize setting: {0}")]
    #[diagnostic(code(setwiz::form::sink_format))]
    Format(String),
}

/// Receives a fully validated record
pub trait SubmitSink {
    fn submit(&mut self, record: &SettingRecord) -> Result<(), SinkError>;
}

/// Displays user-visible messages (toasts, alerts, status lines)
pub trait Notifier {
    fn notify(&mut self, level: NoticeLevel, message: &str);
}

impl<T: SubmitSink + ?Sized> SubmitSink for &mut T {
    fn submit(&mut self, record: &SettingRecord) -> Result<(), SinkError> {
        (**self).submit(record)
    }
}

impl<T: Notifier + ?Sized> Notifier for &mut T {
    fn notify(&mut self, level: NoticeLevel, message: &str) {
        (**self).notify(level, message)
    }
}

/// Collects submitted records in memory
impl SubmitSink for Vec<SettingRecord> {
    fn submit(&mut self, record: &SettingRecord) -> Result<(), SinkError> {
        self.push(record.clone());
        Ok(())
    }
}

/// Collects notices in memory
impl Notifier for Vec<(NoticeLevel, String)> {
    fn notify(&mut self, level: NoticeLevel, message: &str) {
        self.push((level, message.to_string()));
    }
}

/// Discards notices
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Notifier for Silent {
    fn notify(&mut self, level: NoticeLevel, message: &str) {
        tracing::trace!(%level, message, "notice dropped");
    }
}
