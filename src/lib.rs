pub mod attribution;
pub mod cli;
pub mod error;
pub mod explorer;
pub mod frame;
pub mod git;
pub mod model;
pub mod output;
pub mod report;
pub mod source;

pub use error::{DaymapError, Result};
pub use explorer::Explorer;
pub use frame::Frame;
pub use model::CommitRecord;
pub use source::CommitSource;
