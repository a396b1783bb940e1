//! Routes tool calls and resource reads to the network adapter and renders
//! their results as text.

use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value as JsonValue};

use crate::core::content::{now_iso, pretty, ResourceOutput, ToolOutput};
use crate::core::error::GatewayError;
use crate::core::tool::{ResourceDescriptor, ToolDescriptor};
use crate::domain::{Capability, NetworkApi, PostRequest};
use crate::infra::logging::log_metric;
use crate::tools::args::{self, Args};
use crate::tools::catalogue::{
    find_resource, find_tool, ResourceOp, ToolEntry, ToolOp, DEFAULT_CONNECTIONS_COUNT,
    DEFAULT_SEARCH_COUNT, RESOURCES, TOOLS,
};

pub struct Dispatcher {
    api: Arc<dyn NetworkApi>,
    span: tracing::Span,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn NetworkApi>, span: tracing::Span) -> Self {
        Self { api, span }
    }

    /// Advertised tools in catalogue order.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        TOOLS.iter().filter(|t| t.listed).map(|t| t.descriptor).collect()
    }

    pub fn list_resources(&self) -> Vec<ResourceDescriptor> {
        RESOURCES.iter().map(|r| r.descriptor).collect()
    }

    /// Execute a tool by name.
    ///
    /// Unknown names and malformed arguments come back as `Err` and are
    /// reported as protocol faults. Upstream failures and capability refusals
    /// are rendered into an `is_error` output instead.
    pub async fn call_tool(&self, name: &str, args: &Args) -> Result<ToolOutput, GatewayError> {
        let entry = find_tool(name).ok_or_else(|| {
            tracing::warn!(parent: &self.span, tool = name, "unknown tool requested");
            GatewayError::UnknownTool(name.to_string())
        })?;

        if !entry.op.is_restricted() {
            args::check_required(&entry.descriptor, args)?;
        }

        tracing::info!(parent: &self.span, tool = name, "tool call");
        let started = Instant::now();
        let outcome = self.run(entry, args).await;
        log_metric(
            &self.span,
            name,
            "tool_latency_ms",
            started.elapsed().as_secs_f64() * 1000.0,
        );

        match outcome {
            Ok(body) => Ok(ToolOutput::ok(match entry.success_prefix {
                Some(prefix) => format!("{prefix}\n{body}"),
                None => body,
            })),
            Err(e) if e.is_caller_error() => Err(e),
            Err(e) => {
                tracing::warn!(parent: &self.span, tool = name, error = %e, "tool failed");
                Ok(render_failure(e))
            }
        }
    }

    async fn run(&self, entry: &ToolEntry, args: &Args) -> Result<String, GatewayError> {
        let s = |field: &str| args::str_arg(args, field).unwrap_or_default();
        match entry.op {
            ToolOp::TestConnection => Ok(pretty(&self.api.test_connection().await)),
            ToolOp::GetProfile => Ok(pretty(&self.api.get_profile().await?)),
            ToolOp::ValidateToken => {
                let valid = self.api.validate_token().await;
                Ok(pretty(&json!({
                    "valid": valid,
                    "message": if valid { "Token is valid ✅" } else { "Token is invalid or expired ❌" },
                    "timestamp": now_iso(),
                })))
            }
            ToolOp::GetTokenInfo => Ok(pretty(&self.api.get_token_info().await)),
            ToolOp::CreateTextPost => {
                let request = PostRequest::text(s("text")).with_visibility(args::visibility(args)?);
                Ok(pretty(&self.api.create_post(request).await?))
            }
            ToolOp::CreatePost => Ok(pretty(&self.api.create_post(PostRequest::from(s("text"))).await?)),
            ToolOp::CreateArticlePost => {
                let request = PostRequest::article(s("text"), s("articleUrl"))
                    .with_title(args::opt_string(args, "articleTitle"))
                    .with_description(args::opt_string(args, "articleDescription"))
                    .with_visibility(args::visibility(args)?);
                Ok(pretty(&self.api.create_post(request).await?))
            }
            ToolOp::CreateImagePost => {
                let request = PostRequest::image(s("text"), s("imagePath"))
                    .with_title(args::opt_string(args, "imageTitle"))
                    .with_description(args::opt_string(args, "imageDescription"))
                    .with_visibility(args::visibility(args)?);
                Ok(pretty(&self.api.create_post(request).await?))
            }
            ToolOp::GetConnections => {
                let start = args::number_or(args, "start", 0);
                let count = args::number_or(args, "count", DEFAULT_CONNECTIONS_COUNT);
                Ok(pretty(&self.api.get_connections(start, count).await?))
            }
            ToolOp::SearchPeople => {
                let start = args::number_or(args, "start", 0);
                let count = args::number_or(args, "count", DEFAULT_SEARCH_COUNT);
                Ok(pretty(&self.api.search_people(s("keywords"), start, count).await?))
            }
            ToolOp::GetCompanyInfo => Ok(pretty(&self.api.get_company_info(s("companyId")).await?)),
            ToolOp::SendMessage => Ok(pretty(
                &self.api.send_message(s("recipientId"), s("message")).await?,
            )),
            ToolOp::LikePost => Ok(pretty(&self.api.like_post(s("postId")).await?)),
            ToolOp::CommentOnPost => Ok(pretty(
                &self.api.comment_on_post(s("postId"), s("comment")).await?,
            )),
            ToolOp::GetProfileViews => Ok(pretty(&self.api.get_profile_views().await?)),
        }
    }

    /// Read a resource by URI. Upstream failures surface as `Err` except for
    /// the connections listing, which explains its restriction inline.
    pub async fn read_resource(&self, uri: &str) -> Result<ResourceOutput, GatewayError> {
        let entry = find_resource(uri).ok_or_else(|| GatewayError::UnknownResource(uri.to_string()))?;
        tracing::info!(parent: &self.span, uri = uri, "resource read");

        let text = match entry.op {
            ResourceOp::Profile => pretty(&self.api.get_profile().await?),
            ResourceOp::TokenInfo => pretty(&self.api.get_token_info().await),
            ResourceOp::ApiStatus => pretty(&self.api.test_connection().await),
            ResourceOp::Connections => {
                match self.api.get_connections(0, DEFAULT_CONNECTIONS_COUNT).await {
                    Ok(list) => pretty(&list),
                    Err(e) => pretty(&json!({
                        "error": e.to_string(),
                        "note": Capability::Connections.note(),
                    })),
                }
            }
        };

        Ok(ResourceOutput {
            uri: entry.descriptor.uri.to_string(),
            mime_type: entry.descriptor.mime_type,
            text,
        })
    }
}

fn render_failure(err: GatewayError) -> ToolOutput {
    match &err {
        GatewayError::PermissionRequired(capability) => {
            ToolOutput::failure(format!("❌ {err}\n\nNote: {}", capability.note()))
        }
        _ => ToolOutput::failure(format!("❌ Tool execution failed: {err}")),
    }
}

/// Parse a raw `arguments` value; absent or null means no arguments.
pub fn arguments_from(value: Option<JsonValue>) -> Result<Args, GatewayError> {
    match value {
        None | Some(JsonValue::Null) => Ok(Args::new()),
        Some(JsonValue::Object(map)) => Ok(map),
        Some(other) => Err(GatewayError::InvalidArgument(format!(
            "arguments must be an object, got {other}"
        ))),
    }
}
