use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::core::error::GatewayError;

/// Bearer token for the remote API. Read-only for the life of the process.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaKind {
    #[default]
    None,
    Article,
    Image,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Visibility {
    #[default]
    Public,
    Connections,
}

impl Visibility {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PUBLIC" => Some(Visibility::Public),
            "CONNECTIONS" => Some(Visibility::Connections),
            _ => None,
        }
    }
}

/// Everything needed to publish one post.
///
/// `media_locator` is a URL for articles and a local file path for images and
/// videos. Media is attached only when the kind is not `None` and a locator is
/// present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostRequest {
    pub text: String,
    pub media_kind: MediaKind,
    pub media_locator: Option<String>,
    pub media_title: Option<String>,
    pub media_description: Option<String>,
    pub visibility: Visibility,
}

impl PostRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Default::default() }
    }

    pub fn article(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            media_kind: MediaKind::Article,
            media_locator: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn image(text: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            media_kind: MediaKind::Image,
            media_locator: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.media_title = title;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.media_description = description;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// Legacy shape: a bare string becomes a public text-only post.
impl From<&str> for PostRequest {
    fn from(text: &str) -> Self {
        PostRequest::text(text)
    }
}

impl From<String> for PostRequest {
    fn from(text: String) -> Self {
        PostRequest::text(text)
    }
}

/// Absent and `null` claims both read as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// OpenID Connect userinfo subset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileInfo {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sub: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub given_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub family_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
}

impl ProfileInfo {
    pub fn person_urn(&self) -> String {
        format!("urn:li:person:{}", self.sub)
    }

    /// Scopes implied by which userinfo claims the token can see.
    pub fn detected_scopes(&self) -> Vec<&'static str> {
        let mut scopes = vec!["openid"];
        if !self.name.is_empty() || !self.given_name.is_empty() {
            scopes.push("profile");
        }
        if self.email.as_deref().is_some_and(|e| !e.is_empty()) {
            scopes.push("email");
        }
        scopes
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectedUser {
    pub sub: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateLimitAdvisory {
    pub daily_limit: &'static str,
    pub note: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Troubleshooting {
    pub common_issues: Vec<&'static str>,
    pub solutions: Vec<&'static str>,
}

/// Outcome of a connectivity probe. Never an error: failures are described in the payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConnectionStatus {
    Connected {
        success: bool,
        message: String,
        timestamp: String,
        api_version: String,
        user: ConnectedUser,
        available_scopes: Vec<&'static str>,
        rate_limits: RateLimitAdvisory,
    },
    Failed {
        success: bool,
        message: String,
        timestamp: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error_details: Option<JsonValue>,
        troubleshooting: Troubleshooting,
    },
}

impl ConnectionStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ConnectionStatus::Connected { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenInfo {
    Valid {
        valid: bool,
        user_id: String,
        scopes_detected: Vec<&'static str>,
        last_verified: String,
    },
    Invalid {
        valid: bool,
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
    },
}

impl TokenInfo {
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenInfo::Valid { .. })
    }
}

/// Result of a successful post submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCreated {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    pub data: JsonValue,
}

/// Platform capabilities that need partnership approval the gateway does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Connections,
    PeopleSearch,
    CompanyInfo,
    Messaging,
    Likes,
    Comments,
    ProfileViews,
}

impl Capability {
    pub fn failure_context(self) -> &'static str {
        match self {
            Capability::Connections => "Failed to get connections",
            Capability::PeopleSearch => "Failed to search people",
            Capability::CompanyInfo => "Failed to get company info",
            Capability::Messaging => "Failed to send message",
            Capability::Likes => "Failed to like post",
            Capability::Comments => "Failed to comment on post",
            Capability::ProfileViews => "Failed to get profile views",
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Capability::Connections => "Connections API requires elevated LinkedIn API permissions and special approval from LinkedIn. This feature is not available for standard applications.",
            Capability::PeopleSearch => "People search requires elevated LinkedIn API permissions and special approval from LinkedIn. This feature is not available for standard applications.",
            Capability::CompanyInfo => "Company API requires elevated LinkedIn API permissions. This feature may not be available for standard applications.",
            Capability::Messaging => "Messaging API requires elevated LinkedIn API permissions and special approval from LinkedIn. This feature is not available for standard applications.",
            Capability::Likes => "Social actions API requires elevated LinkedIn API permissions and special approval from LinkedIn. This feature is not available for standard applications.",
            Capability::Comments => "Comments API requires elevated LinkedIn API permissions and special approval from LinkedIn. This feature is not available for standard applications.",
            Capability::ProfileViews => "Analytics API requires elevated LinkedIn API permissions and special approval from LinkedIn. This feature is not available for standard applications.",
        }
    }

    /// Suffix appended to the failure text returned to the agent.
    pub fn note(self) -> &'static str {
        match self {
            Capability::CompanyInfo => "This feature has limited access for standard applications.",
            _ => "This feature requires special LinkedIn partnership approval and is not available for standard applications.",
        }
    }
}

/// Substring present in every permission-required explanation.
pub const PERMISSION_REQUIRED_MARKER: &str = "requires elevated LinkedIn API permissions";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
}

/// The operations the dispatcher can route to. `LinkedInRemote` is the
/// production implementation.
#[async_trait::async_trait]
pub trait NetworkApi: Send + Sync {
    async fn get_profile(&self) -> Result<ProfileInfo, GatewayError>;
    async fn test_connection(&self) -> ConnectionStatus;
    async fn validate_token(&self) -> bool;
    async fn get_token_info(&self) -> TokenInfo;
    async fn create_post(&self, request: PostRequest) -> Result<PostCreated, GatewayError>;
    async fn upload_image(&self, path: &str) -> Result<String, GatewayError>;

    async fn get_connections(&self, start: u32, count: u32) -> Result<Vec<Connection>, GatewayError>;
    async fn search_people(&self, keywords: &str, start: u32, count: u32) -> Result<Vec<JsonValue>, GatewayError>;
    async fn get_company_info(&self, company_id: &str) -> Result<JsonValue, GatewayError>;
    async fn send_message(&self, recipient_id: &str, message: &str) -> Result<JsonValue, GatewayError>;
    async fn like_post(&self, post_id: &str) -> Result<JsonValue, GatewayError>;
    async fn comment_on_post(&self, post_id: &str, comment: &str) -> Result<JsonValue, GatewayError>;
    async fn get_profile_views(&self) -> Result<JsonValue, GatewayError>;
}
