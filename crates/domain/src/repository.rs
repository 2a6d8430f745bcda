//! Source repositories that can host a deployment template.

use launchpad_core::{AppError, AppResult};
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// File name looked up at the root of a repository.
pub const TEMPLATE_FILE_NAME: &str = "azuredeploy.json";

/// Branch assumed when the repository URL does not name one.
pub const DEFAULT_BRANCH: &str = "master";

/// Raw-content host used by the public GitHub service.
pub const GITHUB_RAW_BASE_URL: &str = "https://raw.githubusercontent.com";

/// Capability shared by every supported hosting provider.
pub trait TemplateLocator {
    /// URL shown to users for the repository.
    fn repository_display_url(&self) -> String;

    /// Canonical repository URL.
    fn repository_url(&self) -> String;

    /// Repository name, used as a base for generated site names.
    fn repository_name(&self) -> &str;

    /// Owner (user or organization) of the repository.
    fn owner(&self) -> &str;

    /// Branch the template is read from.
    fn branch(&self) -> &str;

    /// Raw-content URL of the template file, rooted at `raw_base_url`.
    fn template_url(&self, raw_base_url: &str) -> String;
}

/// Repository on github.com.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRepository {
    owner: String,
    name: String,
    branch: String,
}

impl GitHubRepository {
    fn from_url(url: &Url) -> AppResult<Self> {
        let segments = url
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|segment| !segment.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let (Some(owner), Some(name)) = (segments.first(), segments.get(1)) else {
            return Err(AppError::Validation(format!(
                "repository url '{url}' must include an owner and a repository name"
            )));
        };

        let name = name.strip_suffix(".git").unwrap_or(*name);
        let branch = match (segments.get(2), segments.get(3)) {
            (Some(&"tree"), Some(branch)) => (*branch).to_owned(),
            _ => DEFAULT_BRANCH.to_owned(),
        };

        Ok(Self {
            owner: (*owner).to_owned(),
            name: name.to_owned(),
            branch,
        })
    }
}

impl TemplateLocator for GitHubRepository {
    fn repository_display_url(&self) -> String {
        self.repository_url()
    }

    fn repository_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }

    fn repository_name(&self) -> &str {
        self.name.as_str()
    }

    fn owner(&self) -> &str {
        self.owner.as_str()
    }

    fn branch(&self) -> &str {
        self.branch.as_str()
    }

    fn template_url(&self, raw_base_url: &str) -> String {
        format!(
            "{}/{}/{}/{}/{TEMPLATE_FILE_NAME}",
            raw_base_url.trim_end_matches('/'),
            self.owner,
            self.name,
            self.branch
        )
    }
}

/// Supported source hosting providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryHost {
    /// Public GitHub.
    GitHub(GitHubRepository),
}

impl RepositoryHost {
    /// Picks the hosting strategy from the URL host.
    pub fn from_url(repository_url: &str) -> AppResult<Self> {
        let trimmed = repository_url.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "repository url must not be empty".to_owned(),
            ));
        }

        let url = Url::parse(trimmed).map_err(|error| {
            AppError::Validation(format!("invalid repository url '{trimmed}': {error}"))
        })?;

        match url.host_str() {
            Some(host) if host.eq_ignore_ascii_case("github.com") => {
                GitHubRepository::from_url(&url).map(Self::GitHub)
            }
            _ => Err(AppError::UnsupportedRepositoryHost(
                "deployments can only be made from github.com repositories".to_owned(),
            )),
        }
    }

    /// Returns the strategy for the host.
    #[must_use]
    pub fn locator(&self) -> &dyn TemplateLocator {
        match self {
            Self::GitHub(repository) => repository,
        }
    }
}

/// Resolved repository plus the template document found in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    /// URL shown to users for the repository.
    pub repository_display_url: String,
    /// Canonical repository URL.
    pub repository_url: String,
    /// Repository name.
    pub repository_name: String,
    /// Branch the template was read from.
    pub branch: String,
    /// Raw URL of the template file.
    pub template_url: String,
    /// Parsed template, `None` when the file could not be fetched.
    pub template_document: Option<Value>,
}

impl TemplateDescriptor {
    /// Describes `host` with the template fetched from `template_url`.
    #[must_use]
    pub fn new(host: &RepositoryHost, template_url: String, template: Option<Value>) -> Self {
        let locator = host.locator();
        Self {
            repository_display_url: locator.repository_display_url(),
            repository_url: locator.repository_url(),
            repository_name: locator.repository_name().to_owned(),
            branch: locator.branch().to_owned(),
            template_url,
            template_document: template,
        }
    }
}
