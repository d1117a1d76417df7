use crate::error::Result;
use crate::model::CommitRecord;

/// Where commit history comes from.
///
/// Records are handed to the engine in the source's own order and are
/// aggregated in exactly that order.
pub trait CommitSource {
    fn records(&self) -> Result<Vec<CommitRecord>>;
}

impl CommitSource for Vec<CommitRecord> {
    fn records(&self) -> Result<Vec<CommitRecord>> {
        Ok(self.clone())
    }
}

impl CommitSource for [CommitRecord] {
    fn records(&self) -> Result<Vec<CommitRecord>> {
        Ok(self.to_vec())
    }
}
