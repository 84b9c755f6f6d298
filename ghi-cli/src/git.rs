// ABOUTME: Local git context helpers for repository inference
// ABOUTME: Finds the working tree toplevel and parses the origin remote

use anyhow::Result;
use std::path::PathBuf;
use std::process::Command;

use ghi_sdk::Repo;

fn run_git_command(args: &[&str]) -> Result<String> {
    log::debug!("running git {}", args.join(" "));
    let output = Command::new("git").args(args).output()?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("git command failed: {}", stderr.trim());
    }
}

/// Toplevel directory of the current working tree, if inside one.
pub fn toplevel_dir() -> Result<PathBuf> {
    let dir = run_git_command(&["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(dir))
}

/// Infer the target repository from the `origin` remote URL.
pub fn inferred_repo() -> Result<Repo> {
    let url = run_git_command(&["remote", "get-url", "origin"])?;
    parse_remote_url(&url)
        .ok_or_else(|| anyhow::anyhow!("could not determine repository from remote '{}'", url))
}

/// Parse github.com remote URLs in both https and ssh forms.
pub fn parse_remote_url(url: &str) -> Option<Repo> {
    let path = if let Some(rest) = url.strip_prefix("git@github.com:") {
        rest
    } else if let Some(rest) = url
        .strip_prefix("https://github.com/")
        .or_else(|| url.strip_prefix("http://github.com/"))
        .or_else(|| url.strip_prefix("ssh://git@github.com/"))
    {
        rest
    } else {
        return None;
    };

    let path = path.trim_end_matches('/').trim_end_matches(".git");
    path.parse().ok()
}
