//! Project configuration for Maya.
//!
//! A [`Configuration`] is built once from CLI input through
//! [`ConfigurationBuilder`], which applies the defaults and validation rules.
//! Once built it is read-only: every template placeholder is resolved against it.
//!
//! # Examples
//!
//! ```
//! use maya::core::config::{Configuration, PackageManager};
//!
//! let config = Configuration::builder("my_project")
//!     .package_manager(PackageManager::Uv)
//!     .python_version("3.11")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.project_name(), "my_project");
//! assert_eq!(config.author_name(), "Your Name");
//! ```

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Python version used when none is given
pub const DEFAULT_PYTHON_VERSION: &str = "3.8";
/// Author name used when none is given
pub const DEFAULT_AUTHOR_NAME: &str = "Your Name";
/// Author email used when none is given
pub const DEFAULT_AUTHOR_EMAIL: &str = "your.email@example.com";
/// GitHub username used when none is given
pub const DEFAULT_GITHUB_USERNAME: &str = "username";

static PROJECT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid project name pattern"));

static PYTHON_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+){0,2}$").expect("valid version pattern"));

/// Package manager the generated project is set up for
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    /// Plain pip with a virtualenv
    #[default]
    Pip,
    /// Astral's uv
    Uv,
}

impl PackageManager {
    /// Returns the package manager as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pip => "pip",
            Self::Uv => "uv",
        }
    }

    /// Get all supported package managers
    pub fn all() -> [PackageManager; 2] {
        [Self::Pip, Self::Uv]
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pip" => Ok(Self::Pip),
            "uv" => Ok(Self::Uv),
            _ => Err(Error::config(
                "package_manager",
                format!("must be either 'pip' or 'uv', got '{s}'"),
            )),
        }
    }
}

/// Validated, immutable settings for one generated project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    project_name: String,
    package_manager: PackageManager,
    python_version: String,
    author_name: String,
    author_email: String,
    github_username: String,
}

impl Configuration {
    /// Start building a configuration for `project_name`
    pub fn builder(project_name: impl Into<String>) -> ConfigurationBuilder {
        ConfigurationBuilder::new(project_name)
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    pub fn python_version(&self) -> &str {
        &self.python_version
    }

    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    pub fn author_email(&self) -> &str {
        &self.author_email
    }

    pub fn github_username(&self) -> &str {
        &self.github_username
    }
}

/// Builder collecting raw option values before validation.
///
/// Empty author fields are treated as "not given" and replaced by the
/// placeholder defaults, matching what an interactive user would expect when
/// pressing enter on a prompt.
#[derive(Debug, Clone)]
pub struct ConfigurationBuilder {
    project_name: String,
    package_manager: PackageManager,
    python_version: Option<String>,
    author_name: Option<String>,
    author_email: Option<String>,
    github_username: Option<String>,
}

impl ConfigurationBuilder {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            package_manager: PackageManager::default(),
            python_version: None,
            author_name: None,
            author_email: None,
            github_username: None,
        }
    }

    pub fn package_manager(mut self, package_manager: PackageManager) -> Self {
        self.package_manager = package_manager;
        self
    }

    pub fn python_version(mut self, version: impl Into<String>) -> Self {
        self.python_version = Some(version.into());
        self
    }

    pub fn author_name(mut self, name: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self
    }

    pub fn author_email(mut self, email: impl Into<String>) -> Self {
        self.author_email = Some(email.into());
        self
    }

    pub fn github_username(mut self, username: impl Into<String>) -> Self {
        self.github_username = Some(username.into());
        self
    }

    /// Apply defaults and validate every field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending field.
    pub fn build(self) -> Result<Configuration> {
        validate_project_name(&self.project_name)?;

        let python_version = self
            .python_version
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_PYTHON_VERSION.to_string());
        if !PYTHON_VERSION_RE.is_match(&python_version) {
            return Err(Error::config(
                "python_version",
                format!("'{python_version}' is not a version like 3.9 or 3.12.1"),
            ));
        }

        let author_name = or_default("author_name", self.author_name, DEFAULT_AUTHOR_NAME)?;
        let author_email = or_default("author_email", self.author_email, DEFAULT_AUTHOR_EMAIL)?;
        let github_username = or_default(
            "github_username",
            self.github_username,
            DEFAULT_GITHUB_USERNAME,
        )?;

        Ok(Configuration {
            project_name: self.project_name,
            package_manager: self.package_manager,
            python_version,
            author_name,
            author_email,
            github_username,
        })
    }
}

/// Validates that `name` is usable both as a directory name and as a Python package
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::config("project_name", "must not be empty"));
    }

    if !PROJECT_NAME_RE.is_match(name) {
        return Err(Error::config(
            "project_name",
            format!(
                "'{name}' is not a valid Python package name \
                 (start with a letter, then letters, digits or underscores)"
            ),
        ));
    }

    Ok(())
}

fn or_default(field: &'static str, value: Option<String>, default: &str) -> Result<String> {
    let value = match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => return Ok(default.to_string()),
    };

    // Values end up inside TOML strings and YAML scalars
    if value.contains(['"', '\n', '\r']) {
        return Err(Error::config(
            field,
            format!("'{value}' must not contain quotes or line breaks"),
        ));
    }

    Ok(value)
}
