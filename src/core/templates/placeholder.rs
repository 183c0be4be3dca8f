//! Placeholder tokens and their substitution.
//!
//! Templates mark substitution points with `{{token_name}}`. The set of tokens
//! is closed: each [`Placeholder`] maps to exactly one [`Configuration`] field,
//! and a token outside that set is a broken template, never something to skip.
//!
//! Only the exact form `{{name}}` (no inner whitespace) is a token, so text like
//! the GitHub Actions expression `${{ matrix.python-version }}` passes through
//! untouched.

use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::core::config::Configuration;
use crate::core::error::{Error, Result};

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{([A-Za-z_][A-Za-z0-9_]*)\}\}").expect("valid placeholder pattern")
});

/// A substitution point understood by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    ProjectName,
    AuthorName,
    AuthorEmail,
    GithubUsername,
    PythonVersion,
}

impl Placeholder {
    /// Every known placeholder
    pub const ALL: [Placeholder; 5] = [
        Self::ProjectName,
        Self::AuthorName,
        Self::AuthorEmail,
        Self::GithubUsername,
        Self::PythonVersion,
    ];

    /// Name used between the braces
    pub fn token_name(&self) -> &'static str {
        match self {
            Self::ProjectName => "project_name",
            Self::AuthorName => "author_name",
            Self::AuthorEmail => "author_email",
            Self::GithubUsername => "github_username",
            Self::PythonVersion => "python_version",
        }
    }

    pub fn from_token_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.token_name() == name)
    }

    /// The configuration value this placeholder stands for
    pub fn value<'a>(&self, config: &'a Configuration) -> &'a str {
        match self {
            Self::ProjectName => config.project_name(),
            Self::AuthorName => config.author_name(),
            Self::AuthorEmail => config.author_email(),
            Self::GithubUsername => config.github_username(),
            Self::PythonVersion => config.python_version(),
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{{}}}}}", self.token_name())
    }
}

/// Names of all `{{token}}` occurrences in `text`, in order of appearance.
pub fn tokens_in(text: &str) -> Vec<&str> {
    TOKEN_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Substitute every placeholder in `text` with its configuration value.
///
/// `origin` names the template the text came from and only appears in errors.
///
/// # Errors
///
/// Returns [`Error::TemplateIntegrity`] if `text` contains a token that is not
/// a known [`Placeholder`].
pub fn substitute(text: &str, config: &Configuration, origin: &str) -> Result<String> {
    if let Some(unknown) = tokens_in(text)
        .into_iter()
        .find(|name| Placeholder::from_token_name(name).is_none())
    {
        return Err(Error::integrity(format!(
            "unknown placeholder {{{{{unknown}}}}} in {origin}"
        )));
    }

    let rendered = TOKEN_RE.replace_all(text, |caps: &Captures| {
        Placeholder::from_token_name(&caps[1])
            .map(|p| p.value(config).to_string())
            .unwrap_or_else(|| caps[0].to_string())
    });

    Ok(rendered.into_owned())
}
