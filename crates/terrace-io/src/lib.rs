//! File I/O, validation, and serialization for the terrace pipeline.

mod dataset_reader;
mod domain;
mod error;
mod importance_writer;
mod model_format;

pub use dataset_reader::DatasetReader;
pub use domain::Dataset;
pub use error::IoError;
pub use importance_writer::ImportanceWriter;
pub use model_format::{ModelReader, ModelWriter};
