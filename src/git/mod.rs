pub mod repo;

pub use repo::{GitRepo, GitSource, ScanOptions};
