//! Git remote URL parsing and pull-request endpoint derivation.
//!
//! Parses git remote URLs into structured components (host, owner, repo).
//! Supports HTTPS, SSH, and git@ URL formats.

/// Parsed git remote URL with host, owner, and repository components.
///
/// # Supported URL formats
///
/// - `https://<host>/<owner>/<repo>.git`
/// - `http://<host>/<owner>/<repo>.git`
/// - `git@<host>:<owner>/<repo>.git`
/// - `ssh://git@<host>/<owner>/<repo>.git`
/// - `ssh://<host>/<owner>/<repo>.git`
///
/// # Example
///
/// ```
/// use vc::git::GitRemoteUrl;
///
/// let url = GitRemoteUrl::parse("git@github.com:owner/repo.git").unwrap();
/// assert_eq!(url.host(), "github.com");
/// assert_eq!(url.owner(), "owner");
/// assert_eq!(url.repo(), "repo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRemoteUrl {
    host: String,
    owner: String,
    repo: String,
}

impl GitRemoteUrl {
    /// Parse a git remote URL into structured components.
    ///
    /// Returns `None` for malformed URLs or unsupported formats.
    pub fn parse(url: &str) -> Option<Self> {
        let url = url.trim();

        let (host, owner, repo_with_suffix) = if let Some(rest) = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
        {
            // https://user@bitbucket.org/owner/repo.git
            let rest = rest.split_once('@').map_or(rest, |(_, host_path)| host_path);
            let mut parts = rest.split('/');
            let host = parts.next()?;
            let owner = parts.next()?;
            let repo = parts.next()?;
            (host, owner, repo)
        } else if let Some(rest) = url.strip_prefix("ssh://") {
            // ssh://git@github.com/owner/repo.git or ssh://github.com/owner/repo.git
            let without_user = rest.split('@').next_back()?;
            let mut parts = without_user.split('/');
            let host = parts.next()?;
            // host:port doesn't fit the host/owner/repo model
            if host.contains(':') {
                return None;
            }
            let owner = parts.next()?;
            let repo = parts.next()?;
            (host, owner, repo)
        } else if let Some(rest) = url.strip_prefix("git@") {
            // git@github.com:owner/repo.git
            let (host, path) = rest.split_once(':')?;
            let mut parts = path.split('/');
            let owner = parts.next()?;
            let repo = parts.next()?;
            (host, owner, repo)
        } else {
            return None;
        };

        let repo = repo_with_suffix
            .strip_suffix(".git")
            .unwrap_or(repo_with_suffix);

        if host.is_empty() || owner.is_empty() || repo.is_empty() {
            return None;
        }

        Some(Self {
            host: host.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// The hostname (e.g., "github.com", "bitbucket.org").
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The repository owner, organization or workspace.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name without .git suffix.
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

/// Hosting services we know how to open a pull request on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullRequestHost {
    GitHub,
    Bitbucket,
}

impl PullRequestHost {
    /// Recognize the host by substring of the push URL.
    pub fn detect(push_url: &str) -> Option<Self> {
        if push_url.contains("github.com") {
            Some(Self::GitHub)
        } else if push_url.contains("bitbucket.org") {
            Some(Self::Bitbucket)
        } else {
            None
        }
    }

    /// Page that starts a pull request from `branch`.
    pub fn new_pull_request_url(self, remote: &GitRemoteUrl, branch: &str) -> String {
        match self {
            // Keep slashes so `feature/x` stays a readable path
            Self::GitHub => {
                let branch = branch
                    .split('/')
                    .map(|segment| urlencoding::encode(segment).into_owned())
                    .collect::<Vec<_>>()
                    .join("/");
                format!(
                    "https://github.com/{}/{}/compare/{}?expand=1",
                    remote.owner(),
                    remote.repo(),
                    branch
                )
            }
            Self::Bitbucket => format!(
                "https://bitbucket.org/{}/{}/pull-requests/new?source={}",
                remote.owner(),
                remote.repo(),
                urlencoding::encode(branch)
            ),
        }
    }
}

/// Build the "new pull request" page for `branch` from a remote push URL.
///
/// Returns `None` when the host is neither GitHub nor Bitbucket, or the URL
/// has no owner/repo path.
pub fn pull_request_url(push_url: &str, branch: &str) -> Option<String> {
    let host = PullRequestHost::detect(push_url)?;
    let remote = GitRemoteUrl::parse(push_url)?;
    Some(host.new_pull_request_url(&remote, branch))
}
