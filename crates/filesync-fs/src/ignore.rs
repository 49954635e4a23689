//! Ignore rules loaded from a directory's `.syncignore` file.
//!
//! One glob pattern per line, blank lines skipped. `*` matches any run
//! of characters; every other character is literal. Patterns are
//! anchored at the start of the relative path.

use std::fs;
use std::path::Path;

use regex::Regex;

/// Reserved file name holding a root's ignore rules. The file itself
/// is never synced and never served.
pub const IGNORE_FILE_NAME: &str = ".syncignore";

/// Compiled ignore rules for one sync root.
#[derive(Debug, Default)]
pub struct IgnoreRuleSet {
    rules: Vec<Regex>,
}

impl IgnoreRuleSet {
    /// A rule set with no patterns. The reserved name still matches.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse rules from ignore-file content. Lines that fail to
    /// compile are logged and skipped rather than failing the scan.
    pub fn parse(content: &str) -> Self {
        let mut rules = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match Regex::new(&compile_pattern(line)) {
                Ok(rule) => rules.push(rule),
                Err(error) => {
                    tracing::warn!(pattern = line, %error, "skipping unparseable ignore rule");
                }
            }
        }
        Self { rules }
    }

    /// Load the ignore-file from `root`, if present.
    pub fn load(root: &Path) -> Self {
        match fs::read_to_string(root.join(IGNORE_FILE_NAME)) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::empty(),
        }
    }

    /// Whether a relative path is excluded. The ignore-file's own name
    /// is always excluded, even with no rules loaded.
    pub fn matches(&self, relative: &str) -> bool {
        if relative == IGNORE_FILE_NAME {
            return true;
        }
        self.rules.iter().any(|rule| rule.is_match(relative))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Translate one glob line into an anchored regex pattern.
fn compile_pattern(line: &str) -> String {
    let mut pattern = String::with_capacity(line.len() + 8);
    pattern.push('^');
    for (i, segment) in line.split('*').enumerate() {
        if i > 0 {
            pattern.push_str(".*");
        }
        pattern.push_str(&regex::escape(segment));
    }
    pattern
}
