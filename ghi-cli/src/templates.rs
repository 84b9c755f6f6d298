// ABOUTME: Discovers issue templates in a local working copy
// ABOUTME: Supports the template directory layout plus the single legacy file

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// An issue template as offered in the survey's template picker.
#[derive(Debug, Clone)]
pub struct IssueTemplate {
    pub name: String,
    pub body: String,
}

#[derive(Debug, Deserialize, Default)]
struct Frontmatter {
    #[serde(default)]
    name: Option<String>,
}

const TEMPLATE_DIR: &str = "ISSUE_TEMPLATE";
const LEGACY_NAMES: [&str; 6] = [
    "ISSUE_TEMPLATE.md",
    "ISSUE_TEMPLATE.txt",
    "ISSUE_TEMPLATE",
    "issue_template.md",
    "issue_template.txt",
    "issue_template",
];
const CANDIDATE_DIRS: [&str; 3] = ["", ".github", "docs"];

/// Templates from the `ISSUE_TEMPLATE` directory at the repository root,
/// under `.github/`, or under `docs/`. The first populated directory wins.
pub fn find_nonlegacy(root: &Path) -> Vec<IssueTemplate> {
    for dir in CANDIDATE_DIRS {
        let candidate = root.join(dir).join(TEMPLATE_DIR);
        let mut templates = read_template_dir(&candidate);
        if !templates.is_empty() {
            templates.sort_by(|a, b| a.name.cmp(&b.name));
            return templates;
        }
    }
    Vec::new()
}

/// The single legacy template file, checked in the same directories.
pub fn find_legacy(root: &Path) -> Option<IssueTemplate> {
    for dir in CANDIDATE_DIRS {
        for name in LEGACY_NAMES {
            let candidate = root.join(dir).join(name);
            if candidate.is_file() {
                return read_template(&candidate);
            }
        }
    }
    None
}

fn read_template_dir(dir: &Path) -> Vec<IssueTemplate> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    paths.sort();
    paths.iter().filter_map(|p| read_template(p)).collect()
}

fn read_template(path: &Path) -> Option<IssueTemplate> {
    let contents = fs::read_to_string(path).ok()?;
    let (frontmatter, body) = split_frontmatter(&contents);
    let name = frontmatter
        .and_then(|f| serde_yaml::from_str::<Frontmatter>(f).ok())
        .and_then(|f| f.name)
        .unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
    Some(IssueTemplate {
        name,
        body: body.to_string(),
    })
}

/// Split "---\nyaml\n---\nbody" into its YAML block and the remaining body.
fn split_frontmatter(contents: &str) -> (Option<&str>, &str) {
    let Some(rest) = contents.strip_prefix("---\n") else {
        return (None, contents);
    };
    match rest.split_once("\n---\n") {
        Some((yaml, body)) => (Some(yaml), body.trim_start_matches('\n')),
        None => (None, contents),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_finds_templates_in_github_dir() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            ".github/ISSUE_TEMPLATE/bug_report.md",
            "---\nname: Bug report\nabout: Something broke\n---\n\n**Describe the bug**\n",
        );
        write(
            dir.path(),
            ".github/ISSUE_TEMPLATE/feature.md",
            "**What would you like**\n",
        );

        let templates = find_nonlegacy(dir.path());
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0].name, "Bug report");
        assert_eq!(templates[0].body, "**Describe the bug**\n");
        assert_eq!(templates[1].name, "feature");
    }

    #[test]
    fn test_root_template_dir_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "ISSUE_TEMPLATE/root.md", "root body\n");
        write(dir.path(), ".github/ISSUE_TEMPLATE/nested.md", "nested\n");

        let templates = find_nonlegacy(dir.path());
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "root");
    }

    #[test]
    fn test_legacy_template() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ".github/issue_template.md", "legacy body\n");

        let template = find_legacy(dir.path()).unwrap();
        assert_eq!(template.name, "issue_template");
        assert_eq!(template.body, "legacy body\n");
    }

    #[test]
    fn test_no_templates() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_nonlegacy(dir.path()).is_empty());
        assert!(find_legacy(dir.path()).is_none());
    }

    #[test]
    fn test_frontmatter_without_terminator_is_kept_verbatim() {
        let (yaml, body) = split_frontmatter("---\nname: oops");
        assert!(yaml.is_none());
        assert_eq!(body, "---\nname: oops");
    }
}
