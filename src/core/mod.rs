pub mod etl;
pub mod source;

pub use crate::domain::model::{JournalRecord, LoadSummary, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
