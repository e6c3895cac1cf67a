use crate::artifacts::branch::{DEFAULT_BRANCH, INVALID_BRANCH_NAME_REGEX, RESERVED_BRANCH_NAMES};
use crate::artifacts::errors::{Result, WitError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> Result<Self> {
        if name.is_empty() {
            return Err(WitError::MissingArgument("branch name"));
        }

        if RESERVED_BRANCH_NAMES.contains(&name.as_str()) {
            return Err(WitError::InvalidBranchName(name));
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .map_err(|_| WitError::InvalidBranchName(name.clone()))?;

        if re.is_match(&name) {
            Err(WitError::InvalidBranchName(name))
        } else {
            Ok(Self(name))
        }
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }

    pub fn is_default_branch(&self) -> bool {
        self.0 == DEFAULT_BRANCH
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
