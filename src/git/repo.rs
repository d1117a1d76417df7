use crate::error::{DaymapError, Result};
use crate::model::{CommitRecord, DateRange};
use crate::source::CommitSource;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use gix::object::tree::diff::ChangeDetached;
use gix::{discover, ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub range: DateRange,
    pub include_merges: bool,
    pub progress: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            range: DateRange::default(),
            include_merges: true,
            progress: false,
        }
    }
}

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => std::env::current_dir()?,
        };

        let repo = discover(&repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        debug!(path = %path.display(), "opened repository");

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn resolve_range(&self, since: Option<&str>, until: Option<&str>) -> Result<DateRange> {
        let mut range = DateRange::new();

        let since_dt = since.map(|s| self.parse_commit_or_date(s)).transpose()?;
        let until_dt = until.map(|u| self.parse_commit_or_date(u)).transpose()?;

        if let (Some(s), Some(u)) = (since_dt, until_dt) {
            if s > u {
                return Err(DaymapError::InvalidDate(format!(
                    "Invalid range: since ({s}) is after until ({u})"
                )));
            }
        }

        if let Some(s) = since_dt {
            range = range.with_since(s);
        }
        if let Some(u) = until_dt {
            range = range.with_until(u);
        }

        Ok(range)
    }

    fn parse_commit_or_date(&self, input: &str) -> Result<DateTime<Utc>> {
        if let Some(dt) = parse_date(input) {
            return Ok(dt);
        }

        if let Some(duration) = parse_relative(input) {
            let target = SystemTime::now()
                .checked_sub(duration)
                .ok_or_else(|| DaymapError::InvalidDate(format!("Duration overflow for '{input}'")))?;
            return Ok(DateTime::<Utc>::from(target));
        }

        // Fall back to a revision
        let id = self
            .repo
            .rev_parse_single(input)
            .map_err(|e| DaymapError::Parse(format!("Invalid commit or date '{input}': {e}")))?;

        let commit = id
            .object()?
            .try_into_commit()
            .map_err(|_| DaymapError::Parse(format!("Not a commit: {input}")))?;

        let secs = commit.time()?.seconds;
        DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| DaymapError::InvalidDate(format!("Invalid timestamp: {secs}")))
    }

    /// Commits reachable from HEAD and every reference, one record each,
    /// newest first by commit time. Equal timestamps keep walk order.
    /// Each record is dated by its authored time in the author's offset.
    pub fn collect_records(&self, options: &ScanOptions) -> Result<Vec<CommitRecord>> {
        let tips = self.tips()?;
        debug!(tips = tips.len(), "starting history walk");

        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = tips.into_iter().collect();
        let mut stamped: Vec<(i64, CommitRecord)> = Vec::new();

        let pb = if options.progress {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} {pos}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Walking history...");

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let time = commit.time()?;
            let timestamp = DateTime::from_timestamp(time.seconds, 0)
                .ok_or_else(|| DaymapError::InvalidDate(format!("Invalid timestamp: {}", time.seconds)))?;
            let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();
            stack.extend(parents.iter().copied());

            if !options.range.contains(&timestamp) {
                continue;
            }
            if !options.include_merges && parents.len() > 1 {
                continue;
            }

            let signature = commit.author()?;
            let authored = signature
                .time()
                .map_err(|e| DaymapError::InvalidDate(format!("Invalid author time in {commit_id}: {e}")))?;
            let date = local_day(authored.seconds, authored.offset)?;
            let author = signature.name.to_string();
            let changed_paths = self.changed_paths(commit_id, parents.first().copied())?;

            stamped.push((
                time.seconds,
                CommitRecord {
                    author,
                    date,
                    changed_paths,
                },
            ));
            pb.inc(1);
        }

        pb.finish_and_clear();
        stamped.sort_by(|a, b| b.0.cmp(&a.0));
        debug!(commits = stamped.len(), "history walk finished");
        Ok(stamped.into_iter().map(|(_, record)| record).collect())
    }

    fn tips(&self) -> Result<Vec<ObjectId>> {
        let mut tips = Vec::new();

        // An unborn HEAD is fine as long as some reference exists.
        let mut head = self.repo.head()?;
        if !head.is_unborn() {
            tips.push(head.peel_to_commit_in_place()?.id);
        }

        let platform = self
            .repo
            .references()
            .map_err(|e| DaymapError::GitRepo(format!("Failed to list references: {e}")))?;
        let refs = platform
            .all()
            .map_err(|e| DaymapError::GitRepo(format!("Failed to iterate references: {e}")))?;

        for reference in refs {
            let reference = reference
                .map_err(|e| DaymapError::GitRepo(format!("Failed to read reference: {e}")))?;
            let Some(target) = reference.target().try_id().map(|id| id.to_owned()) else {
                continue;
            };
            let object = self
                .repo
                .find_object(target)?
                .peel_tags_to_end()
                .map_err(|e| DaymapError::GitRepo(format!("Failed to peel {target}: {e}")))?;
            if object.kind == gix::object::Kind::Commit {
                tips.push(object.id);
            } else {
                debug!(reference = %reference.name().as_bstr(), "skipping non-commit reference");
            }
        }

        Ok(tips)
    }

    fn changed_paths(&self, commit_id: ObjectId, parent_id: Option<ObjectId>) -> Result<BTreeSet<String>> {
        let commit_tree = self.repo.find_commit(commit_id)?.tree()?;
        let changes: Vec<ChangeDetached> = match parent_id {
            Some(pid) => {
                let parent_tree = self.repo.find_commit(pid)?.tree()?;
                self.repo
                    .diff_tree_to_tree(Some(&parent_tree), Some(&commit_tree), None)?
            }
            None => self.repo.diff_tree_to_tree(None, Some(&commit_tree), None)?,
        };

        let mut paths = BTreeSet::new();
        for change in changes {
            match change {
                ChangeDetached::Addition { location, entry_mode, .. }
                | ChangeDetached::Deletion { location, entry_mode, .. }
                | ChangeDetached::Modification { location, entry_mode, .. } => {
                    if !entry_mode.is_tree() {
                        paths.insert(location.to_string());
                    }
                }
                ChangeDetached::Rewrite {
                    source_location,
                    location,
                    entry_mode,
                    ..
                } => {
                    if !entry_mode.is_tree() {
                        paths.insert(source_location.to_string());
                        paths.insert(location.to_string());
                    }
                }
            }
        }
        Ok(paths)
    }
}

impl CommitSource for GitRepo {
    fn records(&self) -> Result<Vec<CommitRecord>> {
        self.collect_records(&ScanOptions::default())
    }
}

/// A repository paired with the options to scan it with.
pub struct GitSource<'a> {
    pub repo: &'a GitRepo,
    pub options: ScanOptions,
}

impl CommitSource for GitSource<'_> {
    fn records(&self) -> Result<Vec<CommitRecord>> {
        self.repo.collect_records(&self.options)
    }
}

/// Calendar day of a commit in its own timezone.
fn local_day(seconds: i64, offset: i32) -> Result<NaiveDate> {
    DateTime::from_timestamp(seconds + offset as i64, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| DaymapError::InvalidDate(format!("Invalid timestamp: {seconds}")))
}

fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// "3 weeks ago", "90 days ago", or a humantime span such as "90days" / "-2w".
fn parse_relative(input: &str) -> Option<Duration> {
    let input = input.trim().to_lowercase();

    for (suffix, unit) in [(" days ago", 86_400), (" weeks ago", 7 * 86_400), (" months ago", 30 * 86_400)] {
        if let Some(n) = input.strip_suffix(suffix) {
            if let Some(secs) = n.trim().parse::<u64>().ok().and_then(|n| n.checked_mul(unit)) {
                return Some(Duration::from_secs(secs));
            }
        }
    }

    humantime::parse_duration(input.trim_start_matches('-')).ok()
}
