// ABOUTME: Interactive survey for composing a new issue at the terminal
// ABOUTME: Prompts for title, body, metadata selections, and a final action

use std::io::IsTerminal;

use anyhow::{anyhow, Context, Result};
use dialoguer::{Confirm, Editor, Input, MultiSelect, Select};
use ghi_sdk::RepoMetadata;

use crate::metadata::IssueMetadataState;
use crate::templates::IssueTemplate;

/// What the user chose to do with the drafted issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Submit,
    Preview,
    Cancel,
}

pub struct SurveyPrompter {
    is_tty: bool,
}

impl SurveyPrompter {
    pub fn new() -> Self {
        Self {
            is_tty: std::io::stdin().is_terminal(),
        }
    }

    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    /// Override terminal detection, e.g. when the caller already knows the
    /// streams are not interactive.
    pub fn with_tty(mut self, is_tty: bool) -> Self {
        self.is_tty = is_tty;
        self
    }

    /// Collect title and body, prompting only for the fields not already
    /// provided. Template selection happens only when the body is still
    /// unset and at least one template exists.
    pub fn collect_draft(
        &self,
        title: Option<String>,
        body: Option<String>,
        templates: &[IssueTemplate],
    ) -> Result<(String, String)> {
        if !self.is_tty {
            return Err(anyhow!(
                "must provide --title and --body when not attached to a terminal"
            ));
        }

        let title = match title {
            Some(title) => title,
            None => self.prompt_title()?,
        };

        let body = match body {
            Some(body) => body,
            None => {
                let template_body = self.prompt_template(templates)?;
                self.prompt_body(template_body)?
            }
        };

        Ok((title, body))
    }

    /// Ask whether the user wants to pick assignees, labels, projects, or a
    /// milestone before submitting.
    pub fn wants_metadata(&self) -> Result<bool> {
        Confirm::new()
            .with_prompt("Add metadata (assignees, labels, projects, milestone)?")
            .default(false)
            .interact()
            .context("failed to read choice")
    }

    /// Metadata selections from the repository's current candidate sets.
    pub fn select_metadata(&self, available: &RepoMetadata) -> Result<IssueMetadataState> {
        let assignees = self.multi_select(
            "Assignees",
            &available
                .assignable_users
                .iter()
                .map(|u| u.login.clone())
                .collect::<Vec<_>>(),
        )?;
        let labels = self.multi_select(
            "Labels",
            &available
                .labels
                .iter()
                .map(|l| l.name.clone())
                .collect::<Vec<_>>(),
        )?;
        let projects = self.multi_select(
            "Projects",
            &available
                .projects
                .iter()
                .map(|p| p.name.clone())
                .collect::<Vec<_>>(),
        )?;
        let milestone = self.select_milestone(
            &available
                .milestones
                .iter()
                .map(|m| m.title.clone())
                .collect::<Vec<_>>(),
        )?;

        Ok(IssueMetadataState {
            assignees,
            labels,
            projects,
            milestone,
        })
    }

    /// The final submit / preview-in-browser / cancel choice.
    pub fn confirm_action(&self) -> Result<Action> {
        let items = ["Submit", "Continue in browser", "Cancel"];
        let selection = Select::new()
            .with_prompt("What's next?")
            .items(&items)
            .default(0)
            .interact()
            .context("failed to read choice")?;

        Ok(match selection {
            0 => Action::Submit,
            1 => Action::Preview,
            _ => Action::Cancel,
        })
    }

    fn prompt_title(&self) -> Result<String> {
        let title: String = Input::new()
            .with_prompt("Title")
            .allow_empty(true)
            .interact_text()
            .context("failed to read title")?;
        Ok(title.trim().to_string())
    }

    /// Offer the template picker. Returns the chosen template's body to seed
    /// the editor, or None for a blank body.
    fn prompt_template(&self, templates: &[IssueTemplate]) -> Result<Option<String>> {
        if templates.is_empty() {
            return Ok(None);
        }
        if templates.len() == 1 {
            return Ok(Some(templates[0].body.clone()));
        }

        let mut items: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
        items.push("Open a blank issue");

        let selection = Select::new()
            .with_prompt("Choose a template")
            .items(&items)
            .default(0)
            .interact()
            .context("failed to select template")?;

        Ok(templates.get(selection).map(|t| t.body.clone()))
    }

    fn prompt_body(&self, template_body: Option<String>) -> Result<String> {
        let seed = template_body.unwrap_or_default();
        let body = Editor::new()
            .edit(&seed)
            .context("failed to open editor")?;
        Ok(body.unwrap_or(seed))
    }

    fn multi_select(&self, prompt: &str, items: &[String]) -> Result<Vec<String>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let picked = MultiSelect::new()
            .with_prompt(prompt)
            .items(items)
            .interact()
            .with_context(|| format!("failed to select {}", prompt.to_lowercase()))?;
        Ok(picked.into_iter().map(|i| items[i].clone()).collect())
    }

    fn select_milestone(&self, titles: &[String]) -> Result<Option<String>> {
        if titles.is_empty() {
            return Ok(None);
        }
        let mut items = vec!["(none)".to_string()];
        items.extend_from_slice(titles);

        let selection = Select::new()
            .with_prompt("Milestone")
            .items(&items)
            .default(0)
            .interact()
            .context("failed to select milestone")?;

        Ok((selection > 0).then(|| titles[selection - 1].clone()))
    }
}

impl Default for SurveyPrompter {
    fn default() -> Self {
        Self::new()
    }
}
