use crate::attribution::parse_depth;
use crate::cli::CommonArgs;
use crate::error::DaymapError;
use crate::explorer::Explorer;
use crate::git::{GitRepo, GitSource, ScanOptions};
use crate::output;
use crate::source::CommitSource;
use anyhow::Context;
use tracing::warn;

/// Scan the repository and apply depth and patterns from the command line.
fn load(common: &CommonArgs, progress: bool) -> anyhow::Result<(GitRepo, Explorer)> {
    let repo = GitRepo::open(common.repo.as_ref()).context("Failed to open git repository")?;

    let range = repo
        .resolve_range(common.since.as_deref(), common.until.as_deref())
        .context("Failed to resolve date range")?;

    let source = GitSource {
        repo: &repo,
        options: ScanOptions {
            range,
            include_merges: common.include_merges,
            progress,
        },
    };
    let records = source.records().context("Failed to collect commits from repository")?;

    let depth = match parse_depth(&common.depth) {
        Some(depth) => depth,
        None => {
            warn!(depth = %common.depth, "depth must be a non-negative integer; using 0");
            0
        }
    };

    let mut explorer = match Explorer::new(records, depth) {
        Ok(explorer) => explorer,
        Err(DaymapError::EmptyHistory) => anyhow::bail!("No commits found in the selected history"),
        Err(e) => return Err(e).context("Failed to aggregate history"),
    };

    for pattern in &common.hide {
        explorer.hide(pattern).context("Failed to apply hide pattern")?;
    }
    for pattern in &common.only {
        match explorer.show_only(pattern) {
            Ok(_) => {}
            Err(e @ DaymapError::InvalidPattern { .. }) => warn!("{e}; pattern skipped"),
            Err(e) => return Err(e).context("Failed to apply show-only pattern"),
        }
    }

    Ok((repo, explorer))
}

pub fn exec_matrix(common: CommonArgs, json: bool, ndjson: bool, path: Option<String>) -> anyhow::Result<()> {
    let (repo, explorer) = load(&common, !(json || ndjson))?;
    let frame = match path.as_deref() {
        Some(prefix) => explorer.frame().under_path(prefix),
        None => explorer.frame().clone(),
    };

    if json {
        output::matrix_json(&frame, &repo, &common, path.as_deref())?;
    } else if ndjson {
        output::matrix_ndjson(&frame)?;
    } else {
        output::groups_table(&frame)?;
        output::author_legend(&frame)?;
    }

    Ok(())
}

pub fn exec_groups(common: CommonArgs, json: bool, path: Option<String>) -> anyhow::Result<()> {
    let (repo, explorer) = load(&common, !json)?;
    let frame = match path.as_deref() {
        Some(prefix) => explorer.frame().under_path(prefix),
        None => explorer.frame().clone(),
    };

    if json {
        output::groups_json(&frame, &repo, path.as_deref())?;
    } else {
        output::groups_table(&frame)?;
    }

    Ok(())
}

pub fn exec_authors(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    let (repo, explorer) = load(&common, !json)?;

    if json {
        output::authors_json(explorer.frame(), &repo)?;
    } else {
        output::author_legend(explorer.frame())?;
    }

    Ok(())
}
