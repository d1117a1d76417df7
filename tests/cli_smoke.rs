use assert_cmd::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn init_git_repo(dir: &Path) {
    git(dir, &["init", "-b", "master"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "user.email", "you@example.com"]);
    git(dir, &["config", "user.name", "Your Name"]);
}

fn stamp(when: &str) -> String {
    if when.contains('T') {
        format!("{when}+00:00")
    } else {
        format!("{when}T12:00:00+00:00")
    }
}

fn write_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
}

/// Commit whatever is staged, with separate author and committer dates.
fn commit_staged(dir: &Path, author: &str, authored: &str, committed: &str, message: &str) {
    assert!(Command::new("git")
        .args([
            "commit",
            "-m",
            message,
            "--author",
            &format!("{author} <{}@example.com>", author.to_lowercase()),
        ])
        .env("GIT_AUTHOR_DATE", stamp(authored))
        .env("GIT_COMMITTER_DATE", stamp(committed))
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn commit_as(dir: &Path, author: &str, when: &str, name: &str, content: &str) {
    write_file(dir, name, content);
    git(dir, &["add", "."]);
    commit_staged(dir, author, when, when, &format!("touch {name}"));
}

fn run_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut cmd = Command::cargo_bin("daymap").unwrap();
    cmd.current_dir(dir).arg("--repo").arg(dir).args(args);
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

fn strings(v: &serde_json::Value) -> Vec<String> {
    v.as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect()
}

#[test]
fn matrix_json_spans_every_day() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_as(dir.path(), "Alice", "2024-01-01", "src/a.rs", "fn a(){}\n");
    commit_as(dir.path(), "Bob", "2024-01-04", "src/b.rs", "fn b(){}\n");

    let v = run_json(dir.path(), &["matrix", "--json"]);
    let dates = strings(&v["dates"]);
    assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04"]);
    assert_eq!(strings(&v["groups"]), vec!["src/a.rs", "src/b.rs"]);
    assert_eq!(strings(&v["authors"]), vec!["No Contributor", "Alice", "Bob"]);
    assert_eq!(v["matrix"], serde_json::json!([[1, 0, 0, 0], [0, 0, 0, 2]]));
}

#[test]
fn depth_groups_and_latest_author_wins() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_as(dir.path(), "Alice", "2024-02-01", "src/a.rs", "a\n");
    commit_as(dir.path(), "Bob", "2024-02-01T15:00:00", "src/b.rs", "b\n");
    commit_as(dir.path(), "Alice", "2024-02-02", "docs/guide.md", "g\n");

    let v = run_json(dir.path(), &["--depth", "1", "matrix", "--json"]);
    assert_eq!(v["depth"], 1);
    assert_eq!(strings(&v["groups"]), vec!["docs/*", "src/*"]);
    // Bob's commit is the newer one on 2024-02-01, so it holds src/* that day.
    assert_eq!(v["matrix"], serde_json::json!([[0, 1], [2, 0]]));
}

#[test]
fn hide_and_only_patterns_filter_rows() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_as(dir.path(), "Alice", "2024-03-01", "src/main/app.rs", "a\n");
    commit_as(dir.path(), "Alice", "2024-03-02", "src/test/app.rs", "t\n");
    commit_as(dir.path(), "Alice", "2024-03-03", "notes.txt", "n\n");

    let v = run_json(dir.path(), &["--depth", "2", "--hide", "test", "matrix", "--json"]);
    assert_eq!(strings(&v["groups"]), vec!["notes.txt", "src/main/*"]);

    let v = run_json(dir.path(), &["--depth", "2", "--only", "^src/", "matrix", "--json"]);
    assert_eq!(strings(&v["groups"]), vec!["src/main/*", "src/test/*"]);

    // An invalid regex is reported and skipped, not fatal.
    let v = run_json(dir.path(), &["--depth", "2", "--only", "(broken", "matrix", "--json"]);
    assert_eq!(strings(&v["groups"]).len(), 3);
}

#[test]
fn invalid_depth_falls_back_to_files() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_as(dir.path(), "Alice", "2024-04-01", "a/b/c.rs", "c\n");

    let v = run_json(dir.path(), &["--depth", "-3", "matrix", "--json"]);
    assert_eq!(v["depth"], 0);
    assert_eq!(strings(&v["groups"]), vec!["a/b/c.rs"]);
}

#[test]
fn other_branches_are_included() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_as(dir.path(), "Alice", "2024-05-01", "file.txt", "a\n");
    git(dir.path(), &["checkout", "-b", "feat"]);
    commit_as(dir.path(), "Carol", "2024-05-03", "feat.txt", "f\n");
    git(dir.path(), &["checkout", "master"]);

    let v = run_json(dir.path(), &["matrix", "--json"]);
    assert_eq!(strings(&v["groups"]), vec!["feat.txt", "file.txt"]);
    assert!(strings(&v["authors"]).contains(&"Carol".to_string()));
}

#[test]
fn groups_and_authors_json() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_as(dir.path(), "Alice", "2024-06-01", "lib/x.rs", "x\n");
    commit_as(dir.path(), "Bob", "2024-06-02", "lib/y.rs", "y\n");
    commit_as(dir.path(), "Bob", "2024-06-03", "bin/z.rs", "z\n");

    let v = run_json(dir.path(), &["--depth", "1", "groups", "--json", "lib/"]);
    let entries = v["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["group"], "lib/*");
    assert_eq!(entries[0]["days_touched"], 2);
    assert_eq!(entries[0]["last_author"], "Bob");

    let v = run_json(dir.path(), &["authors", "--json"]);
    let authors = v["authors"].as_array().unwrap();
    assert_eq!(authors[0]["author"], "Alice");
    assert_eq!(authors[0]["code"], 1);
    assert_eq!(authors[1]["cells"], 2);
}

#[test]
fn ndjson_emits_one_line_per_group() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_as(dir.path(), "Alice", "2024-07-01", "a.txt", "a\n");
    commit_as(dir.path(), "Alice", "2024-07-01", "b.txt", "b\n");

    let mut cmd = Command::cargo_bin("daymap").unwrap();
    cmd.current_dir(dir.path())
        .arg("--repo")
        .arg(dir.path())
        .args(["matrix", "--ndjson"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let lines: Vec<serde_json::Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["group"], "a.txt");
    assert_eq!(lines[0]["cells"], serde_json::json!([1]));
}

#[test]
fn empty_repository_fails() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());

    let mut cmd = Command::cargo_bin("daymap").unwrap();
    cmd.current_dir(dir.path())
        .arg("--repo")
        .arg(dir.path())
        .arg("matrix");
    cmd.assert().failure();
}

#[test]
fn day_comes_from_the_authored_date() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    write_file(dir.path(), "notes.md", "n\n");
    git(dir.path(), &["add", "."]);
    commit_staged(dir.path(), "Alice", "2024-01-01", "2024-03-05", "rebased later");

    let v = run_json(dir.path(), &["matrix", "--json"]);
    assert_eq!(strings(&v["dates"]), vec!["2024-01-01"]);
    assert_eq!(v["matrix"], serde_json::json!([[1]]));
}

#[test]
fn renames_touch_both_paths() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_as(dir.path(), "Alice", "2024-08-01", "old.txt", "same content\n");
    git(dir.path(), &["mv", "old.txt", "new.txt"]);
    commit_staged(dir.path(), "Bob", "2024-08-02", "2024-08-02", "rename");

    let v = run_json(dir.path(), &["matrix", "--json"]);
    assert_eq!(strings(&v["groups"]), vec!["new.txt", "old.txt"]);
    assert_eq!(strings(&v["dates"]), vec!["2024-08-01", "2024-08-02"]);
    assert_eq!(v["matrix"], serde_json::json!([[0, 2], [1, 2]]));
}

fn merged_history(dir: &Path) {
    init_git_repo(dir);
    commit_as(dir, "Alice", "2024-09-01", "base.txt", "b\n");
    git(dir, &["checkout", "-b", "topic"]);
    commit_as(dir, "Carol", "2024-09-02", "topic.txt", "t\n");
    git(dir, &["checkout", "master"]);
    commit_as(dir, "Alice", "2024-09-03", "main.txt", "m\n");
    git(dir, &["merge", "--no-ff", "--no-commit", "topic"]);
    commit_staged(dir, "Dave", "2024-09-04", "2024-09-04", "merge topic");
}

#[test]
fn merges_contribute_their_first_parent_diff() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    merged_history(dir.path());

    let v = run_json(dir.path(), &["matrix", "--json"]);
    assert_eq!(strings(&v["authors"]), vec!["No Contributor", "Alice", "Carol", "Dave"]);
    assert_eq!(strings(&v["groups"]), vec!["base.txt", "main.txt", "topic.txt"]);
    // The merge brings topic.txt onto master, so Dave holds it on the merge day.
    assert_eq!(
        v["matrix"],
        serde_json::json!([[1, 0, 0, 0], [0, 0, 1, 0], [0, 2, 0, 3]])
    );
}

#[test]
fn merges_can_be_left_out() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    merged_history(dir.path());

    let v = run_json(dir.path(), &["--include-merges", "false", "matrix", "--json"]);
    assert_eq!(strings(&v["authors"]), vec!["No Contributor", "Alice", "Carol"]);
    assert_eq!(strings(&v["dates"]), vec!["2024-09-01", "2024-09-02", "2024-09-03"]);
    assert_eq!(
        v["matrix"],
        serde_json::json!([[1, 0, 0], [0, 0, 1], [0, 2, 0]])
    );
}
