pub mod archive;
pub mod etl;
pub mod extractor;
pub mod normalize;
pub mod pipeline;
pub mod table;

pub use crate::domain::model::{
    BerryRecord, Diagnostic, Extraction, MutationRecord, RawEntry, RunReport, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
