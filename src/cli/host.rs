//! Terminal host: notices on stderr, records to stdout or a file

use console::style;
use std::path::PathBuf;

use crate::core::loader::{render_record, save_record, LoadError, RecordFormat};
use crate::core::record::SettingRecord;
use crate::form::host::{NoticeLevel, Notifier, SinkError, SubmitSink};

/// Prints notices to stderr so stdout stays pipeable
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier {
    quiet: bool,
}

impl TerminalNotifier {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&mut self, level: NoticeLevel, message: &str) {
        let icon = match level {
            NoticeLevel::Info => style("→").blue(),
            NoticeLevel::Success => style("✓").green(),
            NoticeLevel::Warning => style("!").yellow(),
            NoticeLevel::Error => style("✗").red(),
        };
        if self.quiet && matches!(level, NoticeLevel::Info | NoticeLevel::Success) {
            return;
        }

        let mut lines = message.lines();
        if let Some(first) = lines.next() {
            eprintln!("{} {}", icon, first);
        }
        for line in lines {
            eprintln!("    {}", style(line).dim());
        }
    }
}

/// Where a submitted record goes
#[derive(Debug, Clone)]
pub enum Destination {
    Stdout(RecordFormat),
    File(PathBuf),
}

/// Writes submitted records to their destination
#[derive(Debug, Clone)]
pub struct RecordSink {
    destination: Destination,
}

impl RecordSink {
    pub fn new(destination: Destination) -> Self {
        Self { destination }
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }
}

impl SubmitSink for RecordSink {
    fn submit(&mut self, record: &SettingRecord) -> Result<(), SinkError> {
        match &self.destination {
            Destination::Stdout(format) => {
                let text =
                    render_record(record, *format).map_err(|e| SinkError::Format(e.to_string()))?;
                print!("{}", text);
                Ok(())
            }
            Destination::File(path) => {
                save_record(record, path).map_err(|e| match e {
                    LoadError::Io { source, .. } => SinkError::Io(source),
                    other => SinkError::Format(other.to_string()),
                })?;
                tracing::info!(path = %path.display(), key = %record.key, "record written");
                Ok(())
            }
        }
    }
}
