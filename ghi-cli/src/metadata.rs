// ABOUTME: Resolves human-entered metadata names (assignees, labels, projects,
// ABOUTME: milestone) to service node ids using a single repository metadata fetch

use anyhow::{anyhow, Result};
use ghi_sdk::{CreateIssueParams, GhClient, Repo};

/// Metadata collected from flags or the survey, as the user typed it.
#[derive(Debug, Clone, Default)]
pub struct IssueMetadataState {
    pub assignees: Vec<String>,
    pub labels: Vec<String>,
    pub projects: Vec<String>,
    pub milestone: Option<String>,
}

impl IssueMetadataState {
    pub fn has_metadata(&self) -> bool {
        !self.assignees.is_empty()
            || !self.labels.is_empty()
            || !self.projects.is_empty()
            || self.milestone.is_some()
    }
}

/// Resolve every name in `state` to an id, or fail with the first name that
/// has no match. Skips the metadata fetch entirely when nothing is set.
pub async fn resolve(
    client: &GhClient,
    repo: &Repo,
    title: String,
    body: String,
    state: &IssueMetadataState,
) -> Result<CreateIssueParams> {
    let mut params = CreateIssueParams {
        title,
        body,
        ..Default::default()
    };

    if !state.has_metadata() {
        return Ok(params);
    }

    let metadata = client.repo_metadata(repo).await?;

    for login in &state.assignees {
        params.assignee_ids.push(lookup(
            metadata.assignable_users.iter().map(|u| (&u.login, &u.id)),
            login,
            "could not assign user",
        )?);
    }
    for name in &state.labels {
        params.label_ids.push(lookup(
            metadata.labels.iter().map(|l| (&l.name, &l.id)),
            name,
            "could not add label",
        )?);
    }
    for name in &state.projects {
        params.project_ids.push(lookup(
            metadata.projects.iter().map(|p| (&p.name, &p.id)),
            name,
            "could not add to project",
        )?);
    }
    if let Some(title) = &state.milestone {
        params.milestone_id = Some(lookup(
            metadata.milestones.iter().map(|m| (&m.title, &m.id)),
            title,
            "could not set milestone",
        )?);
    }

    Ok(params)
}

// Matches are case-sensitive: the service treats "Bug" and "bug" as
// distinct names.
fn lookup<'a>(
    candidates: impl Iterator<Item = (&'a String, &'a String)>,
    name: &str,
    context: &str,
) -> Result<String> {
    for (candidate, id) in candidates {
        if candidate == name {
            return Ok(id.clone());
        }
    }
    Err(anyhow!("{context}: '{name}' not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghi_sdk::{MetaLabel, MetaMilestone, MetaProject, MetaUser, RepoMetadata};

    fn sample_metadata() -> RepoMetadata {
        RepoMetadata {
            assignable_users: vec![MetaUser {
                id: "U1".to_string(),
                login: "monalisa".to_string(),
            }],
            labels: vec![MetaLabel {
                id: "L1".to_string(),
                name: "bug".to_string(),
            }],
            projects: vec![MetaProject {
                id: "P1".to_string(),
                name: "Roadmap".to_string(),
            }],
            milestones: vec![MetaMilestone {
                id: "M1".to_string(),
                title: "v1.0".to_string(),
            }],
        }
    }

    #[test]
    fn test_lookup_matches_exact_name() {
        let metadata = sample_metadata();
        let id = lookup(
            metadata.labels.iter().map(|l| (&l.name, &l.id)),
            "bug",
            "could not add label",
        )
        .unwrap();
        assert_eq!(id, "L1");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let metadata = sample_metadata();
        assert!(lookup(
            metadata.labels.iter().map(|l| (&l.name, &l.id)),
            "BUG",
            "could not add label",
        )
        .is_err());
    }

    #[test]
    fn test_lookup_unknown_name_fails() {
        let metadata = sample_metadata();
        let err = lookup(
            metadata.labels.iter().map(|l| (&l.name, &l.id)),
            "enhancement",
            "could not add label",
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not add label: 'enhancement' not found"
        );
    }

    #[test]
    fn test_has_metadata() {
        assert!(!IssueMetadataState::default().has_metadata());
        let state = IssueMetadataState {
            milestone: Some("v1.0".to_string()),
            ..Default::default()
        };
        assert!(state.has_metadata());
    }
}
