pub mod axis;
pub mod filter;
pub mod group;
pub mod index;
pub mod matrix;
pub mod registry;

pub use axis::DateAxis;
pub use filter::VisibilityFilter;
pub use group::{group_key, is_valid_depth, parse_depth, GroupKeyResolver, GROUP_MARKER};
pub use index::{AttributionIndex, Snapshot};
pub use matrix::{build_matrix, Matrix};
pub use registry::{AuthorRegistry, NO_CONTRIBUTOR};
