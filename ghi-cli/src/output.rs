// ABOUTME: Renders issue lists, previews, and status summaries
// ABOUTME: Terminal output is aligned and colored, piped output is plain TSV

use chrono::{DateTime, Utc};
use ghi_sdk::{Issue, IssueList, IssueState, Repo, StatusPayload};
use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::text::{collapse_whitespace, fuzzy_ago, pluralize, truncate};

const TITLE_WIDTH: usize = 70;

/// How list output is written: human-readable for a terminal, tab-separated
/// for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Terminal { use_color: bool },
    Tsv,
}

impl Format {
    fn use_color(&self) -> bool {
        matches!(self, Format::Terminal { use_color: true })
    }
}

/// Header line above a list, phrased for whether filters were applied.
pub fn list_header(repo: &Repo, shown: usize, total: usize, has_filters: bool) -> String {
    if shown == 0 {
        return if has_filters {
            format!("No issues match your search in {repo}")
        } else {
            format!("There are no open issues in {repo}")
        };
    }
    let of = format!("Showing {shown} of {}", pluralize(total, "issue"));
    if has_filters {
        format!("{of} in {repo} that match your search")
    } else {
        format!("{of} in {repo}")
    }
}

/// Render a page of issues. Column layout is fixed per format so output stays
/// stable for scripts.
pub fn format_issues(list: &IssueList, format: Format, now: DateTime<Utc>) -> String {
    let mut rendered = match format {
        Format::Terminal { use_color } => terminal_table(&list.issues, use_color, now),
        Format::Tsv => tsv_rows(&list.issues),
    };

    let remaining = list.total_count.saturating_sub(list.issues.len());
    if remaining > 0 {
        let line = format!("And {remaining} more\n");
        if format.use_color() {
            rendered.push_str(&line.dimmed().to_string());
        } else {
            rendered.push_str(&line);
        }
    }
    rendered
}

fn terminal_table(issues: &[Issue], use_color: bool, now: DateTime<Utc>) -> String {
    if issues.is_empty() {
        return String::new();
    }

    let mut builder = Builder::default();
    for issue in issues {
        let number = format!("#{}", issue.number);
        let mut labels = issue.label_list();
        if !labels.is_empty() {
            labels = format!("({labels})");
        }
        let ago = fuzzy_ago(issue.updated_at, now);
        let title = truncate(&collapse_whitespace(&issue.title), TITLE_WIDTH);
        if use_color {
            builder.push_record([
                colored_number(&number, issue.state),
                title,
                labels.dimmed().to_string(),
                ago.dimmed().to_string(),
            ]);
        } else {
            builder.push_record([number, title, labels, ago]);
        }
    }

    let mut table = builder.build();
    table.with(Style::blank());
    let mut out = table.to_string();
    out.push('\n');
    out
}

fn tsv_rows(issues: &[Issue]) -> String {
    let mut out = String::new();
    for issue in issues {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            issue.number,
            issue.state.as_wire_str(),
            collapse_whitespace(&issue.title),
            issue.label_list(),
            issue.updated_at.to_rfc3339(),
        ));
    }
    out
}

fn colored_number(number: &str, state: IssueState) -> String {
    match state {
        IssueState::Open => number.green().to_string(),
        IssueState::Closed => number.red().to_string(),
    }
}

/// Machine-readable issue preview. Every metadata line is printed even when
/// empty so line counts stay consistent under head and grep.
pub fn format_raw_preview(issue: &Issue) -> String {
    let mut out = String::new();
    out.push_str(&format!("title:\t{}\n", issue.title));
    out.push_str(&format!("state:\t{}\n", issue.state.as_wire_str()));
    out.push_str(&format!("author:\t{}\n", issue.author.login));
    out.push_str(&format!("labels:\t{}\n", issue.label_list()));
    out.push_str(&format!("comments:\t{}\n", issue.comments.total_count));
    out.push_str(&format!("assignees:\t{}\n", issue.assignee_list()));
    out.push_str(&format!("projects:\t{}\n", issue.project_list()));
    out.push_str(&format!("milestone:\t{}\n", issue.milestone_title()));
    out.push_str("--\n");
    out.push_str(&issue.body);
    out.push('\n');
    out
}

/// Human issue preview for a terminal.
pub fn format_human_preview(issue: &Issue, use_color: bool, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    let state_title = match issue.state {
        IssueState::Open => "Open",
        IssueState::Closed => "Closed",
    };
    let byline = format!(
        " • {} opened {} • {}",
        issue.author.login,
        fuzzy_ago(issue.created_at, now),
        pluralize(issue.comments.total_count, "comment"),
    );

    if use_color {
        out.push_str(&format!("{}\n", issue.title.bold()));
        out.push_str(&colored_state(state_title, issue.state));
        out.push_str(&format!("{}\n", byline.dimmed()));
    } else {
        out.push_str(&format!("{}\n", issue.title));
        out.push_str(state_title);
        out.push_str(&format!("{byline}\n"));
    }

    out.push('\n');
    for (name, value) in [
        ("Assignees", issue.assignee_list()),
        ("Labels", issue.label_list()),
        ("Projects", issue.project_list()),
        ("Milestone", issue.milestone_title().to_string()),
    ] {
        if !value.is_empty() {
            if use_color {
                out.push_str(&format!("{}{}\n", format!("{name}: ").bold(), value));
            } else {
                out.push_str(&format!("{name}: {value}\n"));
            }
        }
    }

    if !issue.body.is_empty() {
        out.push_str(&format!("\n{}\n", issue.body));
    }

    let footer = format!("View this issue on GitHub: {}\n", issue.url);
    out.push('\n');
    if use_color {
        out.push_str(&footer.dimmed().to_string());
    } else {
        out.push_str(&footer);
    }
    out
}

fn colored_state(title: &str, state: IssueState) -> String {
    match state {
        IssueState::Open => title.green().to_string(),
        IssueState::Closed => title.red().to_string(),
    }
}

/// The three-section status summary for the current user.
pub fn format_status(
    payload: &StatusPayload,
    repo: &Repo,
    format: Format,
    now: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("\nRelevant issues in {repo}\n\n"));

    let sections = [
        ("Issues assigned to you", &payload.assigned, "assigned to"),
        ("Issues mentioning you", &payload.mentioned, "mentioning"),
        ("Issues opened by you", &payload.authored, "opened by"),
    ];
    for (header, list, phrase) in sections {
        if format.use_color() {
            out.push_str(&format!("{}\n", header.bold()));
        } else {
            out.push_str(&format!("{header}\n"));
        }
        if list.total_count > 0 {
            out.push_str(&indent(&format_issues(list, format, now), "  "));
        } else {
            let message = format!("  There are no issues {phrase} you\n");
            if format.use_color() {
                out.push_str(&message.dimmed().to_string());
            } else {
                out.push_str(&message);
            }
        }
        out.push('\n');
    }
    out
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{prefix}{line}\n"))
        .collect()
}
