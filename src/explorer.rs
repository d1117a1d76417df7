use crate::attribution::{parse_depth, GroupKeyResolver, Snapshot, VisibilityFilter};
use crate::error::Result;
use crate::frame::Frame;
use crate::model::CommitRecord;
use crate::source::CommitSource;
use tracing::{debug, warn};

/// Interactive session over one scan of history.
///
/// Changing depth re-aggregates; changing patterns only re-projects.
/// Each rebuild replaces the snapshot and frame whole, and a failed rebuild
/// leaves the previous ones in place.
pub struct Explorer {
    records: Vec<CommitRecord>,
    resolver: GroupKeyResolver,
    filter: VisibilityFilter,
    snapshot: Snapshot,
    frame: Frame,
}

impl Explorer {
    pub fn new(records: Vec<CommitRecord>, depth: u32) -> Result<Self> {
        let mut resolver = GroupKeyResolver::new();
        let snapshot = Snapshot::build(&records, &mut resolver, depth)?;
        let filter = VisibilityFilter::new();
        let frame = Frame::project(&snapshot, &filter);
        Ok(Self {
            records,
            resolver,
            filter,
            snapshot,
            frame,
        })
    }

    pub fn from_source<S: CommitSource + ?Sized>(source: &S, depth: u32) -> Result<Self> {
        Self::new(source.records()?, depth)
    }

    pub fn depth(&self) -> u32 {
        self.snapshot.depth
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn filter(&self) -> &VisibilityFilter {
        &self.filter
    }

    /// Applies a user-typed depth. Input that is not a non-negative integer
    /// is ignored and the current depth kept. Returns whether anything was
    /// rebuilt.
    pub fn set_depth(&mut self, value: &str) -> Result<bool> {
        let Some(depth) = parse_depth(value) else {
            warn!(value, "ignoring invalid folder depth");
            return Ok(false);
        };
        if depth == self.snapshot.depth {
            return Ok(false);
        }
        self.resolver.invalidate();
        let snapshot = Snapshot::build(&self.records, &mut self.resolver, depth)?;
        debug!(depth, "regrouped history");
        self.install(snapshot);
        Ok(true)
    }

    /// Re-reads `source`. If reading or aggregation fails nothing changes.
    pub fn rescan_from<S: CommitSource + ?Sized>(&mut self, source: &S) -> Result<()> {
        self.rescan(source.records()?)
    }

    /// Replaces the scanned history and rebuilds at the current depth.
    pub fn rescan(&mut self, records: Vec<CommitRecord>) -> Result<()> {
        let mut resolver = GroupKeyResolver::new();
        let snapshot = Snapshot::build(&records, &mut resolver, self.snapshot.depth)?;
        self.records = records;
        self.resolver = resolver;
        self.install(snapshot);
        Ok(())
    }

    pub fn hide(&mut self, pattern: &str) -> Result<bool> {
        let changed = self.filter.hide(pattern)?;
        self.refresh_if(changed);
        Ok(changed)
    }

    pub fn unhide(&mut self, pattern: &str) -> Result<bool> {
        let changed = self.filter.unhide(pattern)?;
        self.refresh_if(changed);
        Ok(changed)
    }

    /// Adds a show-only regex. An invalid expression is returned as an
    /// error and neither the filter nor the frame change.
    pub fn show_only(&mut self, pattern: &str) -> Result<bool> {
        let changed = self.filter.show_only(pattern)?;
        self.refresh_if(changed);
        Ok(changed)
    }

    pub fn unshow(&mut self, pattern: &str) -> Result<bool> {
        let changed = self.filter.unshow(pattern)?;
        self.refresh_if(changed);
        Ok(changed)
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.refresh_if(true);
    }

    fn install(&mut self, snapshot: Snapshot) {
        self.frame = Frame::project(&snapshot, &self.filter);
        self.snapshot = snapshot;
    }

    fn refresh_if(&mut self, changed: bool) {
        if changed {
            self.frame = Frame::project(&self.snapshot, &self.filter);
        }
    }
}
