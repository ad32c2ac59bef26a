//! Records of the collection loop.
//!
//! A [`Record`] maps string keys to [`RecordValue`]s. The
//! [`OnlineCollector`](crate::OnlineCollector) writes one record per batch to a
//! [`Recorder`].
//!
//! ```rust
//! use foxnet_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("batch", RecordValue::Scalar(1.0));
//! record.insert("batch_reward", RecordValue::Scalar(-90.0));
//! assert_eq!(record.get_scalar("batch").unwrap(), 1.0);
//! ```
mod base;
mod buffered_recorder;
mod log_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use log_recorder::LogRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
