use std::collections::HashMap;

/// Suffix appended to a collapsed folder key, meaning "this folder and everything below".
pub const GROUP_MARKER: &str = "/*";

const SEPARATOR: char = '/';

/// Collapse `path` to its first `depth` segments.
///
/// Depth 0, or a path with no more than `depth` segments, maps to itself.
/// An empty path counts as a single segment.
pub fn group_key(path: &str, depth: u32) -> String {
    let depth = depth as usize;
    if depth == 0 {
        return path.to_string();
    }
    let parts: Vec<&str> = path.split(SEPARATOR).collect();
    if parts.len() <= depth {
        path.to_string()
    } else {
        format!("{}{}", parts[..depth].join("/"), GROUP_MARKER)
    }
}

/// Accepts the textual depth a user typed: a non-negative base-10 integer.
pub fn is_valid_depth(value: &str) -> bool {
    parse_depth(value).is_some()
}

pub fn parse_depth(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u32>().ok()
}

/// Memoizing wrapper around [`group_key`].
///
/// The cache belongs to one depth epoch: asking for a different depth drops
/// every entry before resolving.
#[derive(Debug, Default)]
pub struct GroupKeyResolver {
    epoch: Option<u32>,
    cache: HashMap<String, String>,
}

impl GroupKeyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, path: &str, depth: u32) -> &str {
        if self.epoch != Some(depth) {
            self.invalidate();
            self.epoch = Some(depth);
        }
        self.cache
            .entry(path.to_string())
            .or_insert_with(|| group_key(path, depth))
    }

    pub fn invalidate(&mut self) {
        self.cache.clear();
        self.epoch = None;
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
