// ABOUTME: Repository identity type and parsing helpers
// ABOUTME: Handles OWNER/REPO strings and github.com issue URLs

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::GhError;

/// A repository on the remote service, identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    pub owner: String,
    pub name: String,
}

impl Repo {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Web URL for this repository, with an optional path appended.
    pub fn web_url(&self, web_base: &str, path: &str) -> String {
        let base = web_base.trim_end_matches('/');
        if path.is_empty() {
            format!("{}/{}/{}", base, self.owner, self.name)
        } else {
            format!("{}/{}/{}/{}", base, self.owner, self.name, path)
        }
    }
}

impl FromStr for Repo {
    type Err = GhError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Repo::new(owner, name))
            }
            _ => Err(GhError::InvalidRepo(s.to_string())),
        }
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Parse an issue URL like https://github.com/OWNER/REPO/issues/123 into
/// the repository and issue number.
pub fn parse_issue_url(input: &str) -> Option<(Repo, u64)> {
    let url = Url::parse(input).ok()?;
    let mut segments = url.path_segments()?;
    let owner = segments.next()?;
    let name = segments.next()?;
    if segments.next()? != "issues" {
        return None;
    }
    let number = segments.next()?.parse().ok()?;
    Some((Repo::new(owner, name), number))
}
