//! Opaque commit identifier
//!
//! Identifiers are random tokens of [`COMMIT_ID_LENGTH`] characters drawn from
//! `[a-z0-9]`. They carry no content hash; two commits with identical
//! snapshots still get different identifiers.

use crate::artifacts::objects::{COMMIT_ID_LENGTH, NONE_SENTINEL};
use fake::rand;

const COMMIT_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(String);

impl CommitId {
    /// Draw a fresh random identifier
    pub fn generate() -> Self {
        let id = (0..COMMIT_ID_LENGTH)
            .map(|_| {
                let index = rand::random::<u32>() as usize % COMMIT_ID_ALPHABET.len();
                COMMIT_ID_ALPHABET[index] as char
            })
            .collect::<String>();

        CommitId(id)
    }

    /// Accepts only well-formed identifiers; returns `None` otherwise
    pub fn try_parse(id: &str) -> Option<Self> {
        let id = id.trim();
        let well_formed = id.len() == COMMIT_ID_LENGTH
            && id
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit());

        well_formed.then(|| CommitId(id.to_string()))
    }

    /// Parses a stored pointer value where the sentinel means "no commit"
    pub fn try_parse_pointer(value: &str) -> Option<Option<Self>> {
        let value = value.trim();
        if value == NONE_SENTINEL || value.is_empty() {
            return Some(None);
        }

        Self::try_parse(value).map(Some)
    }

    pub fn to_short_id(&self) -> &str {
        &self.0[..7]
    }

    /// Renders an optional pointer the way it is persisted
    pub fn pointer_to_string(id: Option<&CommitId>) -> String {
        id.map(|id| id.to_string())
            .unwrap_or_else(|| NONE_SENTINEL.to_string())
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
