use crate::attribution::NO_CONTRIBUTOR;
use crate::cli::CommonArgs;
use crate::frame::Frame;
use crate::git::GitRepo;
use crate::model::{AuthorsOutput, GroupsOutput, MatrixOutput, SCHEMA_VERSION};
use anyhow::Result;
use chrono::Utc;
use console::style;

const TABLE_ROWS: usize = 50;

pub fn matrix_output(frame: &Frame, repo: &GitRepo, common: &CommonArgs, path_prefix: Option<&str>) -> MatrixOutput {
    MatrixOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repo.path().to_string_lossy().to_string(),
        depth: frame.depth,
        since: common.since.clone(),
        until: common.until.clone(),
        path_prefix: path_prefix.unwrap_or("").to_string(),
        authors: frame.authors.clone(),
        dates: frame.dates.clone(),
        groups: frame.groups.clone(),
        matrix: frame.matrix.to_nested(),
    }
}

pub fn matrix_json(frame: &Frame, repo: &GitRepo, common: &CommonArgs, path_prefix: Option<&str>) -> Result<()> {
    let output = matrix_output(frame, repo, common, path_prefix);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn matrix_ndjson(frame: &Frame) -> Result<()> {
    for row in frame.rows() {
        println!("{}", serde_json::to_string(&row)?);
    }
    Ok(())
}

pub fn groups_json(frame: &Frame, repo: &GitRepo, path_prefix: Option<&str>) -> Result<()> {
    let output = GroupsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repo.path().to_string_lossy().to_string(),
        depth: frame.depth,
        path_prefix: path_prefix.unwrap_or("").to_string(),
        entries: frame.group_summaries(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn authors_json(frame: &Frame, repo: &GitRepo) -> Result<()> {
    let output = AuthorsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repo.path().to_string_lossy().to_string(),
        authors: frame.author_totals(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn groups_table(frame: &Frame) -> Result<()> {
    if frame.groups.is_empty() {
        println!("No groups to display");
        return Ok(());
    }

    if let (Some(first), Some(last)) = (frame.dates.first(), frame.dates.last()) {
        println!(
            "{} {} to {} ({} days, depth {})",
            style("Attribution").bold(),
            first,
            last,
            frame.dates.len(),
            frame.depth
        );
    }

    println!(
        "{:<50} {:>6} {:>8} {:<12} {:<20}",
        style("Group").bold(),
        style("Days").bold(),
        style("Authors").bold(),
        style("Last active").bold(),
        style("Last author").bold()
    );
    println!("{}", "─".repeat(100));

    let summaries = frame.group_summaries();
    for s in summaries.iter().take(TABLE_ROWS) {
        println!(
            "{:<50} {:>6} {:>8} {:<12} {:<20}",
            s.group,
            s.days_touched,
            s.distinct_authors,
            s.last_active.map(|d| d.to_string()).unwrap_or_default(),
            s.last_author.as_deref().unwrap_or("")
        );
    }
    if summaries.len() > TABLE_ROWS {
        println!("\n... and {} more groups", summaries.len() - TABLE_ROWS);
    }
    Ok(())
}

pub fn author_legend(frame: &Frame) -> Result<()> {
    println!("\n{}", style("Contributors").bold());
    println!("  {:>3}  {}", style(0).dim(), style(frame.author_name(0).unwrap_or(NO_CONTRIBUTOR)).dim());
    for total in frame.author_totals() {
        println!(
            "  {:>3}  {} {}",
            style(total.code).cyan(),
            total.author,
            style(format!("({} days)", total.cells)).dim()
        );
    }
    Ok(())
}
