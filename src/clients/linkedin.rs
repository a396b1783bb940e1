use std::time::Instant;

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::core::content::now_iso;
use crate::core::error::GatewayError;
use crate::domain::{
    Capability, ConnectedUser, Connection, ConnectionStatus, Credential, MediaKind, NetworkApi,
    PostCreated, PostRequest, ProfileInfo, RateLimitAdvisory, TokenInfo, Troubleshooting,
    Visibility,
};
use crate::infra::config::{Config, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use crate::infra::http::headers::{add_api_headers, add_upload_headers};
use crate::infra::logging::log_metric;
use crate::infra::runtime::limits::make_http_client;

const UPLOAD_MECHANISM_TYPE: &str = "com.linkedin.digitalmedia.uploading.MediaUploadHttpRequest";
const FEEDSHARE_IMAGE_RECIPE: &str = "urn:li:digitalmediaRecipe:feedshare-image";
const POST_ID_HEADER: &str = "x-restli-id";

/// REST adapter for the LinkedIn v2 API.
#[derive(Clone)]
pub struct LinkedInRemote {
    base: String,
    api_version: String,
    credential: Credential,
    http: Client,
    span: tracing::Span,
}

impl LinkedInRemote {
    pub fn new(credential: Credential, span: tracing::Span) -> Result<Self, GatewayError> {
        Self::with_base(credential, DEFAULT_BASE_URL, DEFAULT_API_VERSION, span)
    }

    pub fn with_base(
        credential: Credential,
        base: impl Into<String>,
        api_version: impl Into<String>,
        span: tracing::Span,
    ) -> Result<Self, GatewayError> {
        let http = make_http_client()
            .map_err(|e| GatewayError::Config(format!("http client: {e}")))?;
        Ok(Self {
            base: base.into(),
            api_version: api_version.into(),
            credential,
            http,
            span,
        })
    }

    pub fn from_config(cfg: &Config, span: tracing::Span) -> Result<Self, GatewayError> {
        Self::with_base(
            cfg.credential.clone(),
            cfg.base_url.clone(),
            cfg.api_version.clone(),
            span,
        )
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base.trim_end_matches('/'), path)
    }

    /// GET the OpenID Connect userinfo document as raw JSON.
    async fn userinfo(&self) -> Result<JsonValue, GatewayError> {
        let url = self.url("/userinfo");
        let (builder, rid) = add_api_headers(self.http.get(&url), &self.credential, &self.api_version);
        tracing::debug!(parent: &self.span, endpoint = %url, request_id = %rid, "userinfo request");
        let start = Instant::now();
        let res = async {
            let resp = builder.send().await?;
            let resp = ensure_success(resp).await?;
            Ok::<_, GatewayError>(resp.json::<JsonValue>().await?)
        }
        .await;
        self.record("userinfo", start, res.is_ok());
        res
    }

    fn record(&self, op: &str, start: Instant, ok: bool) {
        if ok {
            log_metric(&self.span, op, "remote_latency_ms", start.elapsed().as_millis() as f64);
        } else {
            log_metric(&self.span, op, "remote_error_total", 1.0);
        }
    }

    /// Register an upload for `owner`, then PUT the file's bytes to the returned URL.
    /// The asset handle comes from the registration response.
    async fn register_and_upload(&self, owner: &str, path: &str) -> Result<String, GatewayError> {
        let url = self.url("/assets?action=registerUpload");
        let body = RegisterUploadReq {
            register_upload_request: RegisterUploadBody {
                recipes: vec![FEEDSHARE_IMAGE_RECIPE],
                owner,
                service_relationships: vec![ServiceRelationship {
                    relationship_type: "OWNER",
                    identifier: "urn:li:userGeneratedContent",
                }],
            },
        };
        let (builder, rid) = add_api_headers(self.http.post(&url), &self.credential, &self.api_version);
        tracing::debug!(parent: &self.span, endpoint = %url, request_id = %rid, "registerUpload request");
        let start = Instant::now();
        let registered = async {
            let resp = ensure_success(builder.json(&body).send().await?).await?;
            Ok::<_, GatewayError>(resp.json::<RegisterUploadResp>().await?)
        }
        .await;
        self.record("assets.register_upload", start, registered.is_ok());
        let registered = registered?;

        let mechanism = registered
            .value
            .upload_mechanism
            .http_request
            .ok_or_else(|| {
                GatewayError::upstream(format!("registerUpload response missing {UPLOAD_MECHANISM_TYPE}"))
            })?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| GatewayError::upstream(format!("cannot read {path}: {e}")))?;
        tracing::debug!(parent: &self.span, size = bytes.len(), asset = %registered.value.asset, "uploading media bytes");

        let start = Instant::now();
        let put = async {
            let resp = add_upload_headers(self.http.put(&mechanism.upload_url), &self.credential)
                .body(bytes)
                .send()
                .await?;
            ensure_success(resp).await.map(|_| ())
        }
        .await;
        self.record("assets.upload", start, put.is_ok());
        put?;

        Ok(registered.value.asset)
    }

    async fn submit_post(&self, request: PostRequest) -> Result<PostCreated, GatewayError> {
        let profile = self.get_profile().await?;
        let owner = profile.person_urn();

        let locator = request.media_locator.as_deref().filter(|l| !l.trim().is_empty());
        let media = match (request.media_kind, locator) {
            (MediaKind::Article, Some(url)) => vec![ShareMedia {
                status: "READY",
                original_url: Some(url.to_string()),
                media: None,
                title: request.media_title.clone().map(TextWire::from),
                description: request.media_description.clone().map(TextWire::from),
            }],
            (MediaKind::Image, Some(path)) => {
                let asset = self.register_and_upload(&owner, path).await.map_err(|e| e.context("Failed to upload image"))?;
                vec![ShareMedia {
                    status: "READY",
                    original_url: None,
                    media: Some(asset),
                    title: request.media_title.clone().map(TextWire::from),
                    description: request.media_description.clone().map(TextWire::from),
                }]
            }
            _ => Vec::new(),
        };

        let payload = UgcPost {
            author: owner,
            lifecycle_state: "PUBLISHED",
            specific_content: SpecificContent {
                share_content: ShareContent {
                    share_commentary: TextWire { text: request.text },
                    share_media_category: request.media_kind,
                    media,
                },
            },
            visibility: VisibilityWire {
                member_network: request.visibility,
            },
        };

        let url = self.url("/ugcPosts");
        let (builder, rid) = add_api_headers(self.http.post(&url), &self.credential, &self.api_version);
        tracing::info!(parent: &self.span, endpoint = %url, request_id = %rid, category = ?request.media_kind, "creating post");
        let start = Instant::now();
        let res = async {
            let resp = ensure_success(builder.json(&payload).send().await?).await?;
            let post_id = resp
                .headers()
                .get(POST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let body = resp.text().await?;
            Ok::<_, GatewayError>(PostCreated {
                success: true,
                post_id,
                data: parse_body(&body),
            })
        }
        .await;
        self.record("ugc_posts.create", start, res.is_ok());
        res
    }

    fn restricted<T>(&self, capability: Capability) -> Result<T, GatewayError> {
        tracing::warn!(parent: &self.span, capability = ?capability, "permission required: {}", capability.reason());
        Err(GatewayError::PermissionRequired(capability))
    }
}

fn parse_profile(raw: JsonValue) -> Result<ProfileInfo, GatewayError> {
    serde_json::from_value::<ProfileInfo>(raw)
        .map_err(|e| GatewayError::upstream(format!("unexpected userinfo shape: {e}")))
}

fn parse_body(body: &str) -> JsonValue {
    if body.trim().is_empty() {
        return JsonValue::String(String::new());
    }
    serde_json::from_str(body).unwrap_or_else(|_| JsonValue::String(body.to_string()))
}

/// Pass 2xx responses through; turn anything else into `Upstream`, preferring the
/// remote `message` field over the bare status line.
async fn ensure_success(resp: Response) -> Result<Response, GatewayError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let details = serde_json::from_str::<JsonValue>(&body).ok();
    let message = details
        .as_ref()
        .and_then(|d| d.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_owned)
        .unwrap_or_else(|| format!("upstream status {status}"));
    Err(GatewayError::Upstream {
        message,
        status: Some(status.as_u16()),
        details: details.or_else(|| (!body.is_empty()).then(|| JsonValue::String(body))),
    })
}

fn troubleshooting() -> Troubleshooting {
    Troubleshooting {
        common_issues: vec![
            "Token expired (LinkedIn tokens expire in 60 days)",
            "Invalid or revoked access token",
            "Missing required scopes (openid, profile, email)",
            "Application not approved for requested permissions",
        ],
        solutions: vec![
            "Generate a new access token",
            "Verify scopes in LinkedIn Developer Portal",
            "Check if application has required permissions",
            "Review LinkedIn API Terms of Use compliance",
        ],
    }
}

#[async_trait::async_trait]
impl NetworkApi for LinkedInRemote {
    async fn get_profile(&self) -> Result<ProfileInfo, GatewayError> {
        self.userinfo()
            .await
            .and_then(parse_profile)
            .map_err(|e| e.context("Failed to get profile"))
    }

    async fn test_connection(&self) -> ConnectionStatus {
        match self.userinfo().await.and_then(parse_profile) {
            Ok(profile) => ConnectionStatus::Connected {
                success: true,
                message: "LinkedIn API connection successful ✅".into(),
                timestamp: now_iso(),
                api_version: self.api_version.clone(),
                available_scopes: profile.detected_scopes(),
                user: ConnectedUser {
                    email: profile.email.clone().unwrap_or_else(|| "Not provided".into()),
                    sub: profile.sub,
                    name: profile.name,
                },
                rate_limits: RateLimitAdvisory {
                    daily_limit: "Varies by endpoint",
                    note: "Rate limits are enforced per member and per application",
                },
            },
            Err(e) => {
                tracing::warn!(parent: &self.span, error = %e, "connection test failed");
                let (status, error_details) = match &e {
                    GatewayError::Upstream { status, details, .. } => (*status, details.clone()),
                    _ => (None, None),
                };
                ConnectionStatus::Failed {
                    success: false,
                    message: format!("Connection failed ❌: {e}"),
                    timestamp: now_iso(),
                    status,
                    error_details,
                    troubleshooting: troubleshooting(),
                }
            }
        }
    }

    async fn validate_token(&self) -> bool {
        self.userinfo().await.is_ok()
    }

    async fn get_token_info(&self) -> TokenInfo {
        match self.userinfo().await.and_then(parse_profile) {
            Ok(profile) => TokenInfo::Valid {
                valid: true,
                scopes_detected: profile.detected_scopes(),
                user_id: profile.sub,
                last_verified: now_iso(),
            },
            Err(e) => TokenInfo::Invalid {
                valid: false,
                status_code: e.status(),
                error: e.to_string(),
            },
        }
    }

    async fn create_post(&self, request: PostRequest) -> Result<PostCreated, GatewayError> {
        self.submit_post(request)
            .await
            .map_err(|e| e.context("Failed to create post"))
    }

    async fn upload_image(&self, path: &str) -> Result<String, GatewayError> {
        let owner = self
            .get_profile()
            .await
            .map_err(|e| e.context("Failed to upload image"))?
            .person_urn();
        self.register_and_upload(&owner, path)
            .await
            .map_err(|e| e.context("Failed to upload image"))
    }

    async fn get_connections(&self, _start: u32, _count: u32) -> Result<Vec<Connection>, GatewayError> {
        self.restricted(Capability::Connections)
    }

    async fn search_people(&self, _keywords: &str, _start: u32, _count: u32) -> Result<Vec<JsonValue>, GatewayError> {
        self.restricted(Capability::PeopleSearch)
    }

    async fn get_company_info(&self, _company_id: &str) -> Result<JsonValue, GatewayError> {
        self.restricted(Capability::CompanyInfo)
    }

    async fn send_message(&self, _recipient_id: &str, _message: &str) -> Result<JsonValue, GatewayError> {
        self.restricted(Capability::Messaging)
    }

    async fn like_post(&self, _post_id: &str) -> Result<JsonValue, GatewayError> {
        self.restricted(Capability::Likes)
    }

    async fn comment_on_post(&self, _post_id: &str, _comment: &str) -> Result<JsonValue, GatewayError> {
        self.restricted(Capability::Comments)
    }

    async fn get_profile_views(&self) -> Result<JsonValue, GatewayError> {
        self.restricted(Capability::ProfileViews)
    }
}

// --- wire shapes ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct TextWire {
    text: String,
}

impl From<String> for TextWire {
    fn from(text: String) -> Self {
        Self { text }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShareMedia {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<TextWire>,
    #[serde(skip_serializing_if = "Option::is_none")]
    media: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<TextWire>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShareContent {
    share_commentary: TextWire,
    share_media_category: MediaKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    media: Vec<ShareMedia>,
}

#[derive(Serialize)]
struct SpecificContent {
    #[serde(rename = "com.linkedin.ugc.ShareContent")]
    share_content: ShareContent,
}

#[derive(Serialize)]
struct VisibilityWire {
    #[serde(rename = "com.linkedin.ugc.MemberNetworkVisibility")]
    member_network: Visibility,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UgcPost {
    author: String,
    lifecycle_state: &'static str,
    specific_content: SpecificContent,
    visibility: VisibilityWire,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterUploadReq<'a> {
    register_upload_request: RegisterUploadBody<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterUploadBody<'a> {
    recipes: Vec<&'static str>,
    owner: &'a str,
    service_relationships: Vec<ServiceRelationship>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceRelationship {
    relationship_type: &'static str,
    identifier: &'static str,
}

#[derive(Deserialize)]
struct RegisterUploadResp {
    value: RegisterUploadValue,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterUploadValue {
    asset: String,
    upload_mechanism: UploadMechanism,
}

#[derive(Deserialize)]
struct UploadMechanism {
    #[serde(rename = "com.linkedin.digitalmedia.uploading.MediaUploadHttpRequest")]
    http_request: Option<UploadHttpRequest>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadHttpRequest {
    upload_url: String,
}
