// ABOUTME: Wire types for the GitHub GraphQL API surface used by ghi
// ABOUTME: Issue records, connections, and repository metadata for resolution

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    /// The upper-cased form the API itself uses, for machine-readable output.
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            IssueState::Open => "OPEN",
            IssueState::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueState::Open => write!(f, "Open"),
            IssueState::Closed => write!(f, "Closed"),
        }
    }
}

/// Paged connection slice: the first few nodes plus the remote total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
    #[serde(default)]
    pub total_count: usize,
}

// Manual impl so an empty connection never requires `T: Default`.
impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            total_count: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCount {
    #[serde(default)]
    pub total_count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Actor {
    pub login: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCard {
    pub project: NamedNode,
    pub column: Option<NamedNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedNode {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub state: IssueState,
    pub closed: bool,
    #[serde(default)]
    pub author: Actor,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub assignees: Connection<Actor>,
    #[serde(default)]
    pub labels: Connection<Label>,
    #[serde(default)]
    pub project_cards: Connection<ProjectCard>,
    #[serde(default)]
    pub milestone: Option<Milestone>,
    #[serde(default)]
    pub comments: CommentCount,
    pub url: String,
}

impl Issue {
    /// Assignee logins joined for display, with an ellipsis when the page
    /// is smaller than the remote total.
    pub fn assignee_list(&self) -> String {
        join_with_overflow(
            self.assignees.nodes.iter().map(|a| a.login.clone()),
            self.assignees.nodes.len(),
            self.assignees.total_count,
        )
    }

    pub fn label_list(&self) -> String {
        join_with_overflow(
            self.labels.nodes.iter().map(|l| l.name.clone()),
            self.labels.nodes.len(),
            self.labels.total_count,
        )
    }

    pub fn project_list(&self) -> String {
        join_with_overflow(
            self.project_cards.nodes.iter().map(|card| {
                let column = card
                    .column
                    .as_ref()
                    .map(|c| c.name.as_str())
                    .filter(|name| !name.is_empty())
                    .unwrap_or("Awaiting triage");
                format!("{} ({})", card.project.name, column)
            }),
            self.project_cards.nodes.len(),
            self.project_cards.total_count,
        )
    }

    pub fn milestone_title(&self) -> &str {
        self.milestone.as_ref().map(|m| m.title.as_str()).unwrap_or("")
    }
}

fn join_with_overflow(
    items: impl Iterator<Item = String>,
    shown: usize,
    total: usize,
) -> String {
    let mut list = items.collect::<Vec<_>>().join(", ");
    if !list.is_empty() && total > shown {
        list.push_str(", …");
    }
    list
}

/// One page of issues plus the remote total count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueList {
    pub issues: Vec<Issue>,
    pub total_count: usize,
}

/// Buckets for the `status` command.
#[derive(Debug, Clone)]
pub struct StatusPayload {
    pub assigned: IssueList,
    pub mentioned: IssueList,
    pub authored: IssueList,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoInfo {
    pub id: String,
    pub has_issues_enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetaUser {
    pub id: String,
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetaLabel {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetaProject {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetaMilestone {
    pub id: String,
    pub title: String,
}

/// Everything needed to resolve human-readable metadata names to the node
/// identifiers the create mutation requires. Fetched with one query.
#[derive(Debug, Clone, Default)]
pub struct RepoMetadata {
    pub assignable_users: Vec<MetaUser>,
    pub labels: Vec<MetaLabel>,
    pub projects: Vec<MetaProject>,
    pub milestones: Vec<MetaMilestone>,
}

/// Identifier payload for the create mutation. Never carries raw names.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueParams {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignee_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub label_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<String>,
}

/// The slice of the created issue the CLI reports back.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    pub number: u64,
    pub url: String,
}
