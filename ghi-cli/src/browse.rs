// ABOUTME: Deterministic browser URL construction for list filters and new issues
// ABOUTME: Only explicitly set fields become query parameters

use anyhow::Result;
use url::Url;

/// Filters captured from list flags. Used to build either an API query or a
/// browser URL; never persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub state: Option<String>,
    pub assignee: Option<String>,
    pub labels: Vec<String>,
    pub author: Option<String>,
    pub mention: Option<String>,
    pub milestone: Option<String>,
}

/// Append exactly the query parameters for the filters that are set.
pub fn list_url(base: &str, options: &FilterOptions) -> Result<String> {
    let mut url = Url::parse(base)?;
    {
        let mut pairs = url.query_pairs_mut();
        if let Some(state) = &options.state {
            pairs.append_pair("state", state);
        }
        if let Some(assignee) = &options.assignee {
            pairs.append_pair("assignee", assignee);
        }
        if !options.labels.is_empty() {
            pairs.append_pair("labels", &options.labels.join(","));
        }
        if let Some(author) = &options.author {
            pairs.append_pair("author", author);
        }
        if let Some(mention) = &options.mention {
            pairs.append_pair("mention", mention);
        }
        if let Some(milestone) = &options.milestone {
            pairs.append_pair("milestone", milestone);
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }
    Ok(url.into())
}

/// Metadata fields pre-filled into the service's new-issue page.
#[derive(Debug, Clone, Default)]
pub struct CreateParams<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub assignees: &'a [String],
    pub labels: &'a [String],
    pub projects: &'a [String],
    pub milestone: Option<&'a str>,
}

pub fn create_url(base: &str, params: &CreateParams) -> Result<String> {
    let mut url = Url::parse(base)?;
    {
        let mut pairs = url.query_pairs_mut();
        if !params.title.is_empty() {
            pairs.append_pair("title", params.title);
        }
        if !params.body.is_empty() {
            pairs.append_pair("body", params.body);
        }
        if !params.assignees.is_empty() {
            pairs.append_pair("assignees", &params.assignees.join(","));
        }
        if !params.labels.is_empty() {
            pairs.append_pair("labels", &params.labels.join(","));
        }
        if !params.projects.is_empty() {
            pairs.append_pair("projects", &params.projects.join(","));
        }
        if let Some(milestone) = params.milestone {
            pairs.append_pair("milestone", milestone);
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }
    Ok(url.into())
}

/// Shorten a URL for display in "Opening ... in your browser." messages.
pub fn display_url(url: &str) -> String {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
        .to_string()
}
