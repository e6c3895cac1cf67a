//! Commit record
//!
//! Commits never change once written. The record lives at
//! `images/<id>.txt` next to the snapshot directory `images/<id>/`.
//!
//! ## Format
//!
//! ```text
//! parent=<id>[,<id>]        (or `None` for the root commit)
//! date=<%a %b %d %H:%M:%S %Y %z>
//! message=<text, may span the rest of the file>
//! ```

use crate::artifacts::errors::{Result, WitError};
use crate::artifacts::objects::NONE_SENTINEL;
use crate::artifacts::objects::commit_id::CommitId;
use chrono::{DateTime, FixedOffset};
use derive_new::new;
use std::path::Path;

/// Fixed format of the `date=` line
pub const DATE_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

const PARENT_KEY: &str = "parent";
const DATE_KEY: &str = "date";
const MESSAGE_KEY: &str = "message";

/// Parse a timestamp in the record format, falling back to RFC 2822
pub fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    DateTime::parse_from_str(value, DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .ok()
}

/// Slim representation of a commit
///
/// Only what graph traversal needs: identity, parents and timestamp.
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct SlimCommit {
    pub id: CommitId,
    pub parents: Vec<CommitId>,
    pub timestamp: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct CommitRecord {
    /// Empty for the root commit, two entries for a merge
    parents: Vec<CommitId>,
    date: DateTime<FixedOffset>,
    message: String,
}

impl CommitRecord {
    pub fn parents(&self) -> &[CommitId] {
        &self.parents
    }

    pub fn date(&self) -> DateTime<FixedOffset> {
        self.date
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn to_slim(&self, id: CommitId) -> SlimCommit {
        SlimCommit::new(id, self.parents.clone(), self.date)
    }

    pub fn serialize(&self) -> String {
        let parents = if self.parents.is_empty() {
            NONE_SENTINEL.to_string()
        } else {
            self.parents
                .iter()
                .map(|parent| parent.as_ref())
                .collect::<Vec<_>>()
                .join(",")
        };

        format!(
            "{}={}\n{}={}\n{}={}",
            PARENT_KEY,
            parents,
            DATE_KEY,
            self.date.format(DATE_FORMAT),
            MESSAGE_KEY,
            self.message
        )
    }

    /// Parse a record read from `path`; `path` is only used for error context
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let mut lines = content.splitn(3, '\n');

        let parent_line = lines
            .next()
            .ok_or_else(|| WitError::corrupted(path, "missing parent line"))?;
        let parents = Self::value_of(parent_line, PARENT_KEY, path)?
            .split(',')
            .map(str::trim)
            .filter(|parent| !parent.is_empty() && *parent != NONE_SENTINEL)
            .map(|parent| {
                CommitId::try_parse(parent)
                    .ok_or_else(|| WitError::corrupted(path, format!("bad parent id {parent}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let date_line = lines
            .next()
            .ok_or_else(|| WitError::corrupted(path, "missing date line"))?;
        let date = Self::value_of(date_line, DATE_KEY, path)?;
        let date = parse_date(date)
            .ok_or_else(|| WitError::corrupted(path, format!("bad date {date}")))?;

        let message_line = lines
            .next()
            .ok_or_else(|| WitError::corrupted(path, "missing message line"))?;
        let message = Self::value_of(message_line, MESSAGE_KEY, path)?;

        Ok(CommitRecord::new(parents, date, message.to_string()))
    }

    fn value_of<'a>(line: &'a str, key: &str, path: &Path) -> Result<&'a str> {
        match line.split_once('=') {
            Some((found, value)) if found.trim() == key => Ok(value.trim_end_matches('\r')),
            _ => Err(WitError::corrupted(
                path,
                format!("expected `{key}=` but found `{line}`"),
            )),
        }
    }
}
