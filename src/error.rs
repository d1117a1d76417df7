use thiserror::Error;

pub type Result<T> = std::result::Result<T, DaymapError>;

#[derive(Error, Debug)]
pub enum DaymapError {
    #[error("No commits found in history")]
    EmptyHistory,
    #[error("Invalid show-only pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Failed to compile visibility patterns: {0}")]
    PatternCompile(#[source] regex::Error),
    #[error("Git error: {0}")]
    Git(#[from] Box<gix::open::Error>),
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
}

impl DaymapError {
    pub fn invalid_pattern(pattern: &str, source: regex::Error) -> Self {
        DaymapError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        }
    }
}

// gix errors are large; keep the enum small by boxing them.
impl From<gix::open::Error> for DaymapError {
    fn from(err: gix::open::Error) -> Self {
        DaymapError::Git(Box::new(err))
    }
}

impl From<gix::object::find::existing::Error> for DaymapError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        DaymapError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for DaymapError {
    fn from(err: gix::object::commit::Error) -> Self {
        DaymapError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for DaymapError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        DaymapError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for DaymapError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        DaymapError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for DaymapError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        DaymapError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for DaymapError {
    fn from(err: gix::objs::decode::Error) -> Self {
        DaymapError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for DaymapError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        DaymapError::DiffTreeToTree(Box::new(err))
    }
}

impl From<gix::discover::Error> for DaymapError {
    fn from(err: gix::discover::Error) -> Self {
        DaymapError::GitDiscover(Box::new(err))
    }
}
