// ABOUTME: Command handlers that wire parsed arguments to the SDK client
// ABOUTME: Resolves the base repository and routes each subcommand

use std::io::IsTerminal;

use anyhow::{anyhow, bail, Context as _, Result};
use chrono::Utc;
use ghi_sdk::{parse_issue_url, GhClient, Issue, IssueFilters, Repo, StateFilter};

use crate::browse;
use crate::cli::{Commands, StateArg};
use crate::cli_output::CliOutput;
use crate::config::Config;
use crate::git;
use crate::metadata::{self, IssueMetadataState};
use crate::output::{self, Format};
use crate::survey::{Action, SurveyPrompter};
use crate::templates::{self, IssueTemplate};

/// Shared state for one command invocation.
pub struct Context {
    pub client: GhClient,
    pub config: Config,
    pub out: CliOutput,
    pub repo_override: Option<Repo>,
    pub stdout_tty: bool,
    pub stdin_tty: bool,
    pub use_color: bool,
}

impl Context {
    pub fn new(
        client: GhClient,
        config: Config,
        repo_override: Option<Repo>,
        use_color: bool,
    ) -> Self {
        Self {
            client,
            config,
            out: CliOutput::with_color(use_color),
            repo_override,
            stdout_tty: std::io::stdout().is_terminal(),
            stdin_tty: std::io::stdin().is_terminal(),
            use_color,
        }
    }

    /// The repository commands operate on: the --repo flag, then the origin
    /// remote of the surrounding working copy, then the configured fallback.
    pub fn base_repo(&self) -> Result<Repo> {
        if let Some(repo) = &self.repo_override {
            return Ok(repo.clone());
        }
        if let Ok(repo) = git::inferred_repo() {
            return Ok(repo);
        }
        if let Some(repo) = &self.config.default_repo {
            return repo.parse::<Repo>().map_err(Into::into);
        }
        Err(anyhow!(
            "could not determine the base repository: use --repo OWNER/REPO"
        ))
    }

    pub fn web_base(&self) -> &str {
        self.config
            .web_url
            .as_deref()
            .unwrap_or(ghi_sdk::constants::urls::GITHUB_WEB_BASE)
    }

    fn list_format(&self) -> Format {
        if self.stdout_tty {
            Format::Terminal {
                use_color: self.use_color,
            }
        } else {
            Format::Tsv
        }
    }

    fn open_in_browser(&self, url: &str) -> Result<()> {
        self.out.info(&format!(
            "Opening {} in your browser.",
            browse::display_url(url)
        ));
        open::that(url).context("failed to open browser")?;
        Ok(())
    }
}

pub async fn dispatch(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::List {
            web,
            state,
            label,
            assignee,
            author,
            mention,
            milestone,
            limit,
        } => {
            list(
                ctx,
                ListArgs {
                    web,
                    state,
                    labels: label,
                    assignee,
                    author,
                    mention,
                    milestone,
                    limit,
                },
            )
            .await
        }
        Commands::Status => status(ctx).await,
        Commands::View { issue, web } => view(ctx, &issue, web).await,
        Commands::Create {
            title,
            body,
            web,
            assignee,
            label,
            project,
            milestone,
        } => {
            create(
                ctx,
                CreateArgs {
                    title,
                    body,
                    web,
                    metadata: IssueMetadataState {
                        assignees: assignee,
                        labels: label,
                        projects: project,
                        milestone,
                    },
                },
            )
            .await
        }
        Commands::Close { issue } => close(ctx, &issue).await,
        Commands::Reopen { issue } => reopen(ctx, &issue).await,
    }
}

pub struct ListArgs {
    pub web: bool,
    /// None when the flag was never passed; `--state open` still counts as
    /// an explicit search.
    pub state: Option<StateArg>,
    pub labels: Vec<String>,
    pub assignee: Option<String>,
    pub author: Option<String>,
    pub mention: Option<String>,
    pub milestone: Option<String>,
    pub limit: u32,
}

impl ListArgs {
    fn has_filters(&self) -> bool {
        self.state.is_some()
            || !self.labels.is_empty()
            || self.assignee.is_some()
            || self.author.is_some()
            || self.mention.is_some()
            || self.milestone.is_some()
    }
}

async fn list(ctx: &Context, args: ListArgs) -> Result<()> {
    let repo = ctx.base_repo()?;

    if args.web {
        let options = browse::FilterOptions {
            state: args
                .state
                .map(|state| StateFilter::from(state).as_str().to_string()),
            assignee: args.assignee,
            labels: args.labels,
            author: args.author,
            mention: args.mention,
            milestone: args.milestone,
        };
        let url = browse::list_url(&repo.web_url(ctx.web_base(), "issues"), &options)?;
        return ctx.open_in_browser(&url);
    }

    let has_filters = args.has_filters();
    let filters = IssueFilters {
        state: args.state.unwrap_or(StateArg::Open).into(),
        labels: args.labels,
        assignee: args.assignee,
        author: args.author,
        mention: args.mention,
        milestone: args.milestone,
    };

    let list = ctx
        .client
        .issue_list(&repo, &filters, args.limit as usize)
        .await?;

    if ctx.stdout_tty {
        let header = output::list_header(&repo, list.issues.len(), list.total_count, has_filters);
        ctx.out.info(&format!("\n{header}\n"));
    }
    print!("{}", output::format_issues(&list, ctx.list_format(), Utc::now()));

    Ok(())
}

async fn status(ctx: &Context) -> Result<()> {
    let repo = ctx.base_repo()?;
    let login = ctx.client.current_login().await?;
    let payload = ctx.client.issue_status(&repo, &login).await?;

    print!(
        "{}",
        output::format_status(&payload, &repo, ctx.list_format(), Utc::now())
    );
    Ok(())
}

async fn view(ctx: &Context, issue_arg: &str, web: bool) -> Result<()> {
    let issue = fetch_issue_arg(ctx, issue_arg).await?;

    if web {
        return ctx.open_in_browser(&issue.url);
    }

    if ctx.stdout_tty {
        print!(
            "{}",
            output::format_human_preview(&issue, ctx.use_color, Utc::now())
        );
    } else {
        print!("{}", output::format_raw_preview(&issue));
    }
    Ok(())
}

pub struct CreateArgs {
    pub title: Option<String>,
    pub body: Option<String>,
    pub web: bool,
    pub metadata: IssueMetadataState,
}

async fn create(ctx: &Context, args: CreateArgs) -> Result<()> {
    let repo = ctx.base_repo()?;

    // Templates live in the surrounding working copy. With --repo pointing
    // elsewhere there is no local copy to read them from.
    let templates = if ctx.repo_override.is_none() {
        local_templates()
    } else {
        Vec::new()
    };

    if args.web {
        let mut url = repo.web_url(ctx.web_base(), "issues/new");
        if args.title.is_none() && args.body.is_none() && templates.len() > 1 {
            url.push_str("/choose");
        } else {
            url = browse::create_url(
                &url,
                &browse::CreateParams {
                    title: args.title.as_deref().unwrap_or(""),
                    body: args.body.as_deref().unwrap_or(""),
                    assignees: &args.metadata.assignees,
                    labels: &args.metadata.labels,
                    projects: &args.metadata.projects,
                    milestone: args.metadata.milestone.as_deref(),
                },
            )?;
        }
        return ctx.open_in_browser(&url);
    }

    ctx.out.info(&format!("\nCreating issue in {repo}\n"));

    let info = ctx.client.repo_info(&repo).await?;
    if !info.has_issues_enabled {
        bail!("the '{repo}' repository has disabled issues");
    }

    let interactive = !(args.title.is_some() && args.body.is_some());

    let (title, body, meta, action) = if interactive {
        // Prompts need a full terminal on both ends. A piped stdout means the
        // caller wants machine output, so fail fast instead of blocking in an
        // editor.
        let prompter = SurveyPrompter::new().with_tty(ctx.stdin_tty && ctx.stdout_tty);
        let (title, body) = prompter.collect_draft(args.title, args.body, &templates)?;

        let mut meta = args.metadata;
        if !meta.has_metadata() && prompter.wants_metadata()? {
            let available = ctx.client.repo_metadata(&repo).await?;
            meta = prompter.select_metadata(&available)?;
        }

        let action = prompter.confirm_action()?;
        (title, body, meta, action)
    } else {
        (
            args.title.unwrap_or_default(),
            args.body.unwrap_or_default(),
            args.metadata,
            Action::Submit,
        )
    };

    match action {
        Action::Cancel => {
            ctx.out.info("Discarding.");
            return Ok(());
        }
        Action::Preview => {
            let url = browse::create_url(
                &repo.web_url(ctx.web_base(), "issues/new"),
                &browse::CreateParams {
                    title: &title,
                    body: &body,
                    assignees: &meta.assignees,
                    labels: &meta.labels,
                    projects: &meta.projects,
                    milestone: meta.milestone.as_deref(),
                },
            )?;
            return ctx.open_in_browser(&url);
        }
        Action::Submit => {}
    }

    if title.is_empty() {
        bail!("title can't be blank");
    }

    let params = metadata::resolve(&ctx.client, &repo, title, body, &meta).await?;
    let created = ctx.client.issue_create(&info.id, &params).await?;
    println!("{}", created.url);

    Ok(())
}

async fn close(ctx: &Context, issue_arg: &str) -> Result<()> {
    let issue = fetch_issue_arg(ctx, issue_arg).await?;

    if issue.closed {
        ctx.out.warning(&format!(
            "Issue #{} ({}) is already closed",
            issue.number, issue.title
        ));
        return Ok(());
    }

    ctx.client.issue_close(&issue.id).await?;
    ctx.out.success(&format!(
        "Closed issue #{} ({})",
        issue.number, issue.title
    ));
    Ok(())
}

async fn reopen(ctx: &Context, issue_arg: &str) -> Result<()> {
    let issue = fetch_issue_arg(ctx, issue_arg).await?;

    if !issue.closed {
        ctx.out.warning(&format!(
            "Issue #{} ({}) is already open",
            issue.number, issue.title
        ));
        return Ok(());
    }

    ctx.client.issue_reopen(&issue.id).await?;
    ctx.out.success(&format!(
        "Reopened issue #{} ({})",
        issue.number, issue.title
    ));
    Ok(())
}

/// Fetch the issue named by a command argument: a plain number, a number
/// prefixed with '#', or a full issue URL. A URL also names the repository.
async fn fetch_issue_arg(ctx: &Context, arg: &str) -> Result<Issue> {
    let (repo, number) = parse_issue_arg(ctx, arg)?;
    ctx.client
        .fetch_issue(&repo, number)
        .await
        .map_err(Into::into)
}

fn parse_issue_arg(ctx: &Context, arg: &str) -> Result<(Repo, u64)> {
    if let Some((repo, number)) = parse_issue_url(arg) {
        return Ok((repo, number));
    }
    let digits = arg.strip_prefix('#').unwrap_or(arg);
    let number: u64 = digits
        .parse()
        .map_err(|_| anyhow!("invalid issue format: \"{arg}\""))?;
    Ok((ctx.base_repo()?, number))
}

fn local_templates() -> Vec<IssueTemplate> {
    let Ok(root) = git::toplevel_dir() else {
        return Vec::new();
    };
    let found = templates::find_nonlegacy(&root);
    if !found.is_empty() {
        return found;
    }
    templates::find_legacy(&root).into_iter().collect()
}
