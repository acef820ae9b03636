//! Directory client for the GitHub (Enterprise) REST API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{
    DirectoryClient, DirectoryError, DirectoryReply, DomainError, Identity, MembershipInfo,
    MembershipState, OrgInfo, OrgName, RemoteStatus, TeamInfo, TeamSlug,
};

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// GitHub client configuration
#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    pub url: String,
    pub token: String,
    pub timeout: Duration,
    pub insecure_skip_verify: bool,
    pub proxy: Option<String>,
}

impl GitHubClientConfig {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            timeout: Duration::from_secs(10),
            insecure_skip_verify: false,
            proxy: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_insecure_skip_verify(mut self, insecure: bool) -> Self {
        self.insecure_skip_verify = insecure;
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

/// Resolve the REST API root of an instance.
///
/// Enterprise instances serve the API under `api/v3/`; hosts that already
/// are API hosts (`api.github.com`) are used as given.
pub fn api_base_url(url: &str) -> Result<Url, DomainError> {
    let mut base = Url::parse(url)
        .map_err(|e| DomainError::configuration(format!("Invalid directory URL '{}': {}", url, e)))?;

    if !matches!(base.scheme(), "http" | "https") {
        return Err(DomainError::configuration(format!(
            "Directory URL must be http or https, got '{}'",
            base.scheme()
        )));
    }

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let host = base.host_str().unwrap_or_default();
    let is_api_host = host.starts_with("api.") || host.contains(".api.");

    if !is_api_host && !base.path().ends_with("/api/v3/") {
        base = base
            .join("api/v3/")
            .map_err(|e| DomainError::configuration(format!("Invalid directory URL: {}", e)))?;
    }

    Ok(base)
}

fn classify(code: StatusCode) -> RemoteStatus {
    match code {
        code if code.is_success() => RemoteStatus::Success,
        StatusCode::NOT_MODIFIED => RemoteStatus::NotModified,
        StatusCode::NOT_FOUND => RemoteStatus::NotFound,
        StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => RemoteStatus::Conflict,
        other => RemoteStatus::Other(other.as_u16()),
    }
}

#[derive(Deserialize)]
struct MembershipResponse {
    state: Option<String>,
    role: Option<String>,
}

impl From<MembershipResponse> for MembershipInfo {
    fn from(response: MembershipResponse) -> Self {
        let state = match response.state.as_deref() {
            Some(raw) => MembershipState::from(raw),
            None => MembershipState::Unknown("missing".to_string()),
        };

        Self {
            state,
            role: response.role,
        }
    }
}

#[derive(Deserialize)]
struct OrgResponse {
    login: String,
}

#[derive(Deserialize)]
struct TeamResponse {
    slug: String,
    name: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

/// Authenticated GitHub REST client
#[derive(Debug, Clone)]
pub struct GitHubDirectoryClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl GitHubDirectoryClient {
    /// Build the authenticated client. This is the only step whose failure aborts a run.
    pub fn new(config: GitHubClientConfig) -> Result<Self, DomainError> {
        if config.token.trim().is_empty() {
            return Err(DomainError::configuration("Directory token cannot be empty"));
        }

        let base_url = api_base_url(&config.url)?;

        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.insecure_skip_verify);

        if let Some(proxy) = config.proxy.as_deref().filter(|p| !p.is_empty()) {
            let proxy = reqwest::Proxy::all(proxy).map_err(|e| {
                DomainError::directory_setup(format!("Invalid proxy '{}': {}", proxy, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let http = builder
            .build()
            .map_err(|e| DomainError::directory_setup(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            token: config.token,
        })
    }

    /// Append each segment percent-encoded, so names can never reshape the path
    fn endpoint(&self, segments: &[&str]) -> Option<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(segments);
        Some(url)
    }

    async fn call<W: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<serde_json::Value>,
    ) -> DirectoryReply<W> {
        let Some(url) = self.endpoint(segments) else {
            return DirectoryReply::transport(format!(
                "Invalid request URL: {} cannot take path segments",
                self.base_url
            ));
        };

        debug!(method = %method, url = %url, "Calling directory");

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_MEDIA_TYPE);

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let message = if e.is_timeout() {
                    "Request timed out".to_string()
                } else if e.is_connect() {
                    format!("Connection failed: {}", e)
                } else {
                    format!("Request failed: {}", e)
                };
                return DirectoryReply::transport(message);
            }
        };

        let code = response.status();
        let status = classify(code);
        debug!(code = code.as_u16(), status = %status, "Directory replied");

        if code.is_success() {
            return match response.json::<W>().await {
                Ok(value) => DirectoryReply {
                    value: Some(value),
                    status: Some(status),
                    error: None,
                },
                Err(e) => DirectoryReply::failed(status, DirectoryError::Decode(e.to_string())),
            };
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| code.canonical_reason().unwrap_or("Unknown error").to_string());

        DirectoryReply::failed(status, DirectoryError::Remote(message))
    }
}

fn member_role() -> Option<serde_json::Value> {
    Some(serde_json::json!({ "role": "member" }))
}

#[async_trait]
impl DirectoryClient for GitHubDirectoryClient {
    async fn get_organization(&self, org: &OrgName) -> DirectoryReply<OrgInfo> {
        self.call::<OrgResponse>(Method::GET, &["orgs", org.as_str()], None)
            .await
            .map(|response| OrgInfo {
                login: response.login,
            })
    }

    async fn get_org_membership(
        &self,
        identity: &Identity,
        org: &OrgName,
    ) -> DirectoryReply<MembershipInfo> {
        self.call::<MembershipResponse>(
            Method::GET,
            &["orgs", org.as_str(), "memberships", identity.as_str()],
            None,
        )
        .await
        .map(MembershipInfo::from)
    }

    async fn set_org_membership(
        &self,
        identity: &Identity,
        org: &OrgName,
    ) -> DirectoryReply<MembershipInfo> {
        self.call::<MembershipResponse>(
            Method::PUT,
            &["orgs", org.as_str(), "memberships", identity.as_str()],
            member_role(),
        )
        .await
        .map(MembershipInfo::from)
    }

    async fn get_team(&self, org: &OrgName, team: &TeamSlug) -> DirectoryReply<TeamInfo> {
        self.call::<TeamResponse>(
            Method::GET,
            &["orgs", org.as_str(), "teams", team.as_str()],
            None,
        )
        .await
            .map(|response| TeamInfo {
                slug: response.slug,
                name: response.name,
            })
    }

    async fn get_team_membership(
        &self,
        org: &OrgName,
        team: &TeamSlug,
        identity: &Identity,
    ) -> DirectoryReply<MembershipInfo> {
        self.call::<MembershipResponse>(
            Method::GET,
            &[
                "orgs",
                org.as_str(),
                "teams",
                team.as_str(),
                "memberships",
                identity.as_str(),
            ],
            None,
        )
        .await
        .map(MembershipInfo::from)
    }

    async fn set_team_membership(
        &self,
        org: &OrgName,
        team: &TeamSlug,
        identity: &Identity,
    ) -> DirectoryReply<MembershipInfo> {
        self.call::<MembershipResponse>(
            Method::PUT,
            &[
                "orgs",
                org.as_str(),
                "teams",
                team.as_str(),
                "memberships",
                identity.as_str(),
            ],
            member_role(),
        )
        .await
        .map(MembershipInfo::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enterprise_url_gets_api_prefix() {
        let url = api_base_url("https://github.example.com").unwrap();
        assert_eq!(url.as_str(), "https://github.example.com/api/v3/");

        let url = api_base_url("https://github.example.com/").unwrap();
        assert_eq!(url.as_str(), "https://github.example.com/api/v3/");
    }

    #[test]
    fn test_existing_api_prefix_is_kept() {
        let url = api_base_url("https://github.example.com/api/v3").unwrap();
        assert_eq!(url.as_str(), "https://github.example.com/api/v3/");
    }

    #[test]
    fn test_api_host_is_used_as_given() {
        let url = api_base_url("https://api.github.com").unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/");
    }

    #[test]
    fn test_invalid_urls_are_rejected() {
        assert!(api_base_url("not a url").is_err());
        assert!(api_base_url("ftp://github.example.com").is_err());
    }

    #[test]
    fn test_names_are_encoded_as_single_segments() {
        let client = GitHubDirectoryClient::new(GitHubClientConfig::new(
            "https://github.example.com",
            "token",
        ))
        .unwrap();

        let url = client
            .endpoint(&["orgs", "acme", "memberships", "jane%ops?x#y"])
            .unwrap();
        assert_eq!(
            url.path(),
            "/api/v3/orgs/acme/memberships/jane%25ops%3Fx%23y"
        );
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(classify(StatusCode::OK), RemoteStatus::Success);
        assert_eq!(classify(StatusCode::NO_CONTENT), RemoteStatus::Success);
        assert_eq!(classify(StatusCode::NOT_MODIFIED), RemoteStatus::NotModified);
        assert_eq!(classify(StatusCode::NOT_FOUND), RemoteStatus::NotFound);
        assert_eq!(
            classify(StatusCode::UNPROCESSABLE_ENTITY),
            RemoteStatus::Conflict
        );
        assert_eq!(classify(StatusCode::FORBIDDEN), RemoteStatus::Other(403));
    }

    #[test]
    fn test_membership_response_mapping() {
        let info = MembershipInfo::from(MembershipResponse {
            state: Some("active".to_string()),
            role: Some("admin".to_string()),
        });
        assert_eq!(info.state, MembershipState::Active);
        assert_eq!(info.role.as_deref(), Some("admin"));

        let info = MembershipInfo::from(MembershipResponse {
            state: None,
            role: None,
        });
        assert_eq!(info.state, MembershipState::Unknown("missing".to_string()));
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let result = GitHubDirectoryClient::new(GitHubClientConfig::new(
            "https://github.example.com",
            "  ",
        ));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_invalid_proxy_is_rejected() {
        let config = GitHubClientConfig::new("https://github.example.com", "token")
            .with_proxy("::not a proxy::");
        let result = GitHubDirectoryClient::new(config);
        assert!(matches!(result, Err(DomainError::DirectorySetup { .. })));
    }
}
