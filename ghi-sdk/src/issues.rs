// ABOUTME: Typed issue operations over the GraphQL transport
// ABOUTME: Listing, lookup, status buckets, metadata, creation, close/reopen

use serde::Deserialize;
use serde_json::json;

use crate::error::{GhError, Result};
use crate::repo::Repo;
use crate::types::{
    CreateIssueParams, CreatedIssue, Issue, IssueList, MetaLabel, MetaMilestone, MetaProject,
    MetaUser, RepoInfo, RepoMetadata, StatusPayload,
};
use crate::GhClient;

/// State filter for issue listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateFilter {
    #[default]
    Open,
    Closed,
    All,
}

impl StateFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateFilter::Open => "open",
            StateFilter::Closed => "closed",
            StateFilter::All => "all",
        }
    }

    fn graphql_states(&self) -> Vec<&'static str> {
        match self {
            StateFilter::Open => vec!["OPEN"],
            StateFilter::Closed => vec!["CLOSED"],
            StateFilter::All => vec!["OPEN", "CLOSED"],
        }
    }
}

/// Filters applied server-side when listing issues.
#[derive(Debug, Clone, Default)]
pub struct IssueFilters {
    pub state: StateFilter,
    pub labels: Vec<String>,
    pub assignee: Option<String>,
    pub author: Option<String>,
    pub mention: Option<String>,
    pub milestone: Option<String>,
}

impl IssueFilters {
    fn filter_by(&self) -> serde_json::Value {
        let mut filter = serde_json::Map::new();
        if !self.labels.is_empty() {
            filter.insert("labels".to_string(), json!(self.labels));
        }
        if let Some(assignee) = &self.assignee {
            filter.insert("assignee".to_string(), json!(assignee));
        }
        if let Some(author) = &self.author {
            filter.insert("createdBy".to_string(), json!(author));
        }
        if let Some(mention) = &self.mention {
            filter.insert("mentioned".to_string(), json!(mention));
        }
        if let Some(milestone) = &self.milestone {
            filter.insert("milestone".to_string(), json!(milestone));
        }
        serde_json::Value::Object(filter)
    }
}

const ISSUE_FIELDS: &str = "
    id
    number
    title
    body
    state
    closed
    author { login }
    createdAt
    updatedAt
    assignees(first: 3) { nodes { login } totalCount }
    labels(first: 3) { nodes { name } totalCount }
    projectCards(first: 3) {
        nodes { project { name } column { name } }
        totalCount
    }
    milestone { title }
    comments { totalCount }
    url
";

#[derive(Deserialize)]
struct RepositoryData<T> {
    repository: Option<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueConnection {
    nodes: Vec<Issue>,
    total_count: usize,
}

impl From<IssueConnection> for IssueList {
    fn from(conn: IssueConnection) -> Self {
        IssueList {
            issues: conn.nodes,
            total_count: conn.total_count,
        }
    }
}

impl GhClient {
    /// Fetch one page of issues matching the filters, newest first.
    pub async fn issue_list(
        &self,
        repo: &Repo,
        filters: &IssueFilters,
        limit: usize,
    ) -> Result<IssueList> {
        #[derive(Deserialize)]
        struct Holder {
            issues: IssueConnection,
        }

        let query = format!(
            "query IssueList($owner: String!, $name: String!, $limit: Int!, \
             $states: [IssueState!], $filterBy: IssueFilters) {{
                repository(owner: $owner, name: $name) {{
                    issues(first: $limit, states: $states, filterBy: $filterBy,
                           orderBy: {{field: CREATED_AT, direction: DESC}}) {{
                        nodes {{ {ISSUE_FIELDS} }}
                        totalCount
                    }}
                }}
            }}"
        );

        let variables = json!({
            "owner": repo.owner,
            "name": repo.name,
            "limit": limit,
            "states": filters.state.graphql_states(),
            "filterBy": filters.filter_by(),
        });

        let data: RepositoryData<Holder> = self.graphql(&query, variables).await?;
        let holder = data
            .repository
            .ok_or_else(|| GhError::RepoNotFound(repo.full_name()))?;
        Ok(holder.issues.into())
    }

    /// Assigned / mentioned / authored buckets for the given login.
    pub async fn issue_status(&self, repo: &Repo, login: &str) -> Result<StatusPayload> {
        #[derive(Deserialize)]
        struct Holder {
            assigned: IssueConnection,
            mentioned: IssueConnection,
            authored: IssueConnection,
        }

        let query = format!(
            "query IssueStatus($owner: String!, $name: String!, $viewer: String!) {{
                repository(owner: $owner, name: $name) {{
                    assigned: issues(filterBy: {{assignee: $viewer, states: OPEN}},
                                     first: 10, orderBy: {{field: CREATED_AT, direction: DESC}}) {{
                        nodes {{ {ISSUE_FIELDS} }}
                        totalCount
                    }}
                    mentioned: issues(filterBy: {{mentioned: $viewer, states: OPEN}},
                                      first: 10, orderBy: {{field: CREATED_AT, direction: DESC}}) {{
                        nodes {{ {ISSUE_FIELDS} }}
                        totalCount
                    }}
                    authored: issues(filterBy: {{createdBy: $viewer, states: OPEN}},
                                     first: 10, orderBy: {{field: CREATED_AT, direction: DESC}}) {{
                        nodes {{ {ISSUE_FIELDS} }}
                        totalCount
                    }}
                }}
            }}"
        );

        let variables = json!({
            "owner": repo.owner,
            "name": repo.name,
            "viewer": login,
        });

        let data: RepositoryData<Holder> = self.graphql(&query, variables).await?;
        let holder = data
            .repository
            .ok_or_else(|| GhError::RepoNotFound(repo.full_name()))?;
        Ok(StatusPayload {
            assigned: holder.assigned.into(),
            mentioned: holder.mentioned.into(),
            authored: holder.authored.into(),
        })
    }

    /// Fetch a single issue by number.
    pub async fn fetch_issue(&self, repo: &Repo, number: u64) -> Result<Issue> {
        #[derive(Deserialize)]
        struct Holder {
            issue: Option<Issue>,
        }

        let query = format!(
            "query IssueByNumber($owner: String!, $name: String!, $number: Int!) {{
                repository(owner: $owner, name: $name) {{
                    issue(number: $number) {{ {ISSUE_FIELDS} }}
                }}
            }}"
        );

        let variables = json!({
            "owner": repo.owner,
            "name": repo.name,
            "number": number,
        });

        let data: RepositoryData<Holder> = self.graphql(&query, variables).await?;
        data.repository
            .ok_or_else(|| GhError::RepoNotFound(repo.full_name()))?
            .issue
            .ok_or(GhError::IssueNotFound(number))
    }

    /// Repository node id plus the issues-enabled precondition flag.
    pub async fn repo_info(&self, repo: &Repo) -> Result<RepoInfo> {
        let query = "query RepoInfo($owner: String!, $name: String!) {
            repository(owner: $owner, name: $name) { id hasIssuesEnabled }
        }";

        let variables = json!({ "owner": repo.owner, "name": repo.name });
        let data: RepositoryData<RepoInfo> = self.graphql(query, variables).await?;
        data.repository
            .ok_or_else(|| GhError::RepoNotFound(repo.full_name()))
    }

    /// Login of the authenticated user.
    pub async fn current_login(&self) -> Result<String> {
        #[derive(Deserialize)]
        struct Data {
            viewer: Viewer,
        }
        #[derive(Deserialize)]
        struct Viewer {
            login: String,
        }

        let data: Data = self
            .graphql("query Viewer { viewer { login } }", json!({}))
            .await?;
        Ok(data.viewer.login)
    }

    /// All metadata candidates for the repository in one round trip.
    pub async fn repo_metadata(&self, repo: &Repo) -> Result<RepoMetadata> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Holder {
            assignable_users: Nodes<MetaUser>,
            labels: Nodes<MetaLabel>,
            projects: Nodes<MetaProject>,
            milestones: Nodes<MetaMilestone>,
        }
        #[derive(Deserialize)]
        struct Nodes<T> {
            nodes: Vec<T>,
        }

        let query = "query RepoMetadata($owner: String!, $name: String!) {
            repository(owner: $owner, name: $name) {
                assignableUsers(first: 100) { nodes { id login } }
                labels(first: 100) { nodes { id name } }
                projects(first: 100, states: [OPEN]) { nodes { id name } }
                milestones(first: 100, states: [OPEN]) { nodes { id title } }
            }
        }";

        let variables = json!({ "owner": repo.owner, "name": repo.name });
        let data: RepositoryData<Holder> = self.graphql(query, variables).await?;
        let holder = data
            .repository
            .ok_or_else(|| GhError::RepoNotFound(repo.full_name()))?;
        Ok(RepoMetadata {
            assignable_users: holder.assignable_users.nodes,
            labels: holder.labels.nodes,
            projects: holder.projects.nodes,
            milestones: holder.milestones.nodes,
        })
    }

    /// Create an issue. `params` carries resolved identifiers only.
    pub async fn issue_create(
        &self,
        repo_id: &str,
        params: &CreateIssueParams,
    ) -> Result<CreatedIssue> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            create_issue: Payload,
        }
        #[derive(Deserialize)]
        struct Payload {
            issue: Option<CreatedIssue>,
        }

        let mutation = "mutation CreateIssue($input: CreateIssueInput!) {
            createIssue(input: $input) { issue { number url } }
        }";

        let mut input = serde_json::to_value(params)?;
        input["repositoryId"] = json!(repo_id);

        let data: Data = self.graphql(mutation, json!({ "input": input })).await?;
        data.create_issue.issue.ok_or(GhError::InvalidResponse)
    }

    pub async fn issue_close(&self, issue_id: &str) -> Result<()> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            close_issue: Payload,
        }
        #[derive(Deserialize)]
        struct Payload {
            issue: Option<NumberOnly>,
        }

        let mutation = "mutation CloseIssue($input: CloseIssueInput!) {
            closeIssue(input: $input) { issue { number } }
        }";

        let data: Data = self
            .graphql(mutation, json!({ "input": { "issueId": issue_id } }))
            .await?;
        data.close_issue.issue.map(|_| ()).ok_or(GhError::InvalidResponse)
    }

    pub async fn issue_reopen(&self, issue_id: &str) -> Result<()> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            reopen_issue: Payload,
        }
        #[derive(Deserialize)]
        struct Payload {
            issue: Option<NumberOnly>,
        }

        let mutation = "mutation ReopenIssue($input: ReopenIssueInput!) {
            reopenIssue(input: $input) { issue { number } }
        }";

        let data: Data = self
            .graphql(mutation, json!({ "input": { "issueId": issue_id } }))
            .await?;
        data.reopen_issue.issue.map(|_| ()).ok_or(GhError::InvalidResponse)
    }
}

#[derive(Deserialize)]
struct NumberOnly {
    #[allow(dead_code)]
    number: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn client_for(server: &mockito::ServerGuard) -> GhClient {
        GhClient::builder()
            .auth_token(SecretString::new("token".to_string().into_boxed_str()))
            .base_url(server.url())
            .build()
            .unwrap()
    }

    fn issue_json(number: u64, closed: bool) -> serde_json::Value {
        json!({
            "id": format!("I_{number}"),
            "number": number,
            "title": format!("Issue {number}"),
            "body": "",
            "state": if closed { "CLOSED" } else { "OPEN" },
            "closed": closed,
            "author": {"login": "monalisa"},
            "createdAt": "2024-01-02T03:04:05Z",
            "updatedAt": "2024-01-03T03:04:05Z",
            "assignees": {"nodes": [], "totalCount": 0},
            "labels": {"nodes": [], "totalCount": 0},
            "projectCards": {"nodes": [], "totalCount": 0},
            "milestone": null,
            "comments": {"totalCount": 0},
            "url": format!("https://github.com/octocat/spoon-knife/issues/{number}")
        })
    }

    #[tokio::test]
    async fn test_issue_list_parses_page_and_total() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({
            "data": {
                "repository": {
                    "issues": {
                        "nodes": [issue_json(1, false), issue_json(2, false)],
                        "totalCount": 5
                    }
                }
            }
        });
        let mock = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let repo = Repo::new("octocat", "spoon-knife");
        let list = client
            .issue_list(&repo, &IssueFilters::default(), 30)
            .await
            .unwrap();

        assert_eq!(list.issues.len(), 2);
        assert_eq!(list.total_count, 5);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_issue_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"data": {"repository": {"issue": null}}}).to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let repo = Repo::new("octocat", "spoon-knife");
        let err = client.fetch_issue(&repo, 404).await.unwrap_err();
        assert!(matches!(err, GhError::IssueNotFound(404)));
    }

    #[tokio::test]
    async fn test_graphql_errors_surface_service_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"errors": [{"message": "Something went wrong on our end"}]}).to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.current_login().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "GraphQL error: Something went wrong on our end"
        );
    }

    #[tokio::test]
    async fn test_repo_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"data": {"repository": null}}).to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let repo = Repo::new("nobody", "nothing");
        let err = client.repo_info(&repo).await.unwrap_err();
        assert!(matches!(err, GhError::RepoNotFound(name) if name == "nobody/nothing"));
    }

    #[tokio::test]
    async fn test_auth_failure_maps_to_auth_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/graphql")
            .with_status(401)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.current_login().await.unwrap_err();
        assert!(matches!(err, GhError::Auth));
    }

    #[tokio::test]
    async fn test_issue_create_sends_repository_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .match_body(mockito::Matcher::PartialJsonString(
                json!({
                    "variables": {
                        "input": {
                            "repositoryId": "R_1",
                            "title": "Bug",
                            "body": "Nothing works"
                        }
                    }
                })
                .to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "data": {"createIssue": {"issue": {
                        "number": 9,
                        "url": "https://github.com/o/r/issues/9"
                    }}}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let params = CreateIssueParams {
            title: "Bug".to_string(),
            body: "Nothing works".to_string(),
            ..Default::default()
        };
        let created = client.issue_create("R_1", &params).await.unwrap();
        assert_eq!(created.number, 9);
        mock.assert_async().await;
    }

    #[test]
    fn test_state_filter_strings() {
        assert_eq!(StateFilter::Open.as_str(), "open");
        assert_eq!(StateFilter::Closed.as_str(), "closed");
        assert_eq!(StateFilter::All.as_str(), "all");
        assert_eq!(StateFilter::All.graphql_states(), vec!["OPEN", "CLOSED"]);
    }

    #[test]
    fn test_filter_by_only_includes_set_fields() {
        let filters = IssueFilters {
            assignee: Some("hubot".to_string()),
            ..Default::default()
        };
        let value = filters.filter_by();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["assignee"], "hubot");
    }
}
