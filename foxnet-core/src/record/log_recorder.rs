use super::{Record, RecordValue, Recorder};
use log::info;

/// Writes records to the log at the info level, one line per record.
///
/// Keys are sorted so that consecutive lines line up.
#[derive(Default)]
pub struct LogRecorder {
    prefix: String,
}

impl LogRecorder {
    /// Construct the recorder. `prefix` starts every logged line.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn format(record: &Record) -> String {
        let mut items = record.iter().collect::<Vec<_>>();
        items.sort_by(|a, b| a.0.cmp(b.0));
        items
            .into_iter()
            .map(|(k, v)| match v {
                RecordValue::Scalar(v) => format!("{}={}", k, v),
                RecordValue::DateTime(v) => format!("{}={}", k, v.format("%H:%M:%S")),
                RecordValue::String(v) => format!("{}={}", k, v),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Recorder for LogRecorder {
    fn write(&mut self, record: Record) {
        info!("{}{}", self.prefix, Self::format(&record));
    }
}
