//! MCP server integration over stdio.
//!
//! The handler is a thin shell around [`Dispatcher`]: it converts rmcp
//! request params into dispatcher calls and dispatcher results back into
//! rmcp model types. Nothing here knows about individual tools.

use std::sync::Arc;

use rmcp::{
    model::{
        AnnotateAble, CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject,
        ListResourcesResult, ListToolsResult, PaginatedRequestParam, RawResource,
        ReadResourceRequestParam, ReadResourceResult, Resource, ResourceContents,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    transport::stdio,
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use serde_json::Value as JsonValue;

use crate::core::content::{ResourceOutput, ToolOutput};
use crate::core::error::GatewayError;
use crate::core::tool::{ResourceDescriptor, ToolDescriptor};
use crate::tools::dispatcher::{arguments_from, Dispatcher};

pub const SERVER_NAME: &str = "linkedin-mcp-gateway";

const INSTRUCTIONS: &str = "LinkedIn gateway: read your profile and token status, and publish text, article or image posts. Tools marked ❌ need LinkedIn partnership approval and explain why instead of calling the API.";

/// The MCP server handler.
#[derive(Clone)]
pub struct LinkedInSvc {
    dispatcher: Arc<Dispatcher>,
}

impl LinkedInSvc {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

impl ServerHandler for LinkedInSvc {
    fn get_info(&self) -> ServerInfo {
        server_info()
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.dispatcher.list_tools().iter().map(to_tool).collect(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = arguments_from(request.arguments.map(JsonValue::Object)).map_err(to_mcp_error)?;
        self.dispatcher
            .call_tool(&request.name, &args)
            .await
            .map(to_call_result)
            .map_err(to_mcp_error)
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: self.dispatcher.list_resources().iter().map(to_resource).collect(),
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let output = self
            .dispatcher
            .read_resource(&request.uri)
            .await
            .map_err(|e| match e {
                e if e.is_caller_error() => to_mcp_error(e),
                e => McpError::internal_error(format!("Resource read failed: {e}"), None),
            })?;
        Ok(ReadResourceResult { contents: vec![to_contents(output)] })
    }
}

pub fn server_info() -> ServerInfo {
    ServerInfo {
        instructions: Some(INSTRUCTIONS.into()),
        capabilities: ServerCapabilities::builder()
            .enable_tools()
            .enable_resources()
            .build(),
        server_info: Implementation {
            name: SERVER_NAME.into(),
            version: env!("CARGO_PKG_VERSION").into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn to_tool(descriptor: &ToolDescriptor) -> Tool {
    let schema = match descriptor.input_schema() {
        JsonValue::Object(map) => map,
        _ => JsonObject::new(),
    };
    Tool::new(descriptor.name, descriptor.description, Arc::new(schema))
}

pub fn to_resource(descriptor: &ResourceDescriptor) -> Resource {
    let mut raw = RawResource::new(descriptor.uri, descriptor.name);
    raw.description = Some(descriptor.description.into());
    raw.mime_type = Some(descriptor.mime_type.into());
    raw.no_annotation()
}

pub fn to_call_result(output: ToolOutput) -> CallToolResult {
    let content = vec![Content::text(output.text)];
    if output.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

pub fn to_contents(output: ResourceOutput) -> ResourceContents {
    let mut contents = ResourceContents::text(output.text, output.uri);
    if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
        *mime_type = Some(output.mime_type.into());
    }
    contents
}

/// Map gateway errors that escape the dispatcher onto JSON-RPC error codes.
pub fn to_mcp_error(err: GatewayError) -> McpError {
    match err {
        GatewayError::InvalidArgument(_) | GatewayError::UnknownTool(_) => {
            McpError::invalid_params(err.to_string(), None)
        }
        GatewayError::UnknownResource(_) => McpError::resource_not_found(err.to_string(), None),
        other => McpError::internal_error(other.to_string(), None),
    }
}

/// Serve MCP over stdin/stdout until the client disconnects.
pub async fn serve_stdio(svc: LinkedInSvc) -> anyhow::Result<()> {
    tracing::info!("serving MCP over stdio");
    let service = svc.serve(stdio()).await?;
    service.waiting().await?;
    tracing::info!("client disconnected");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Capability;
    use crate::tools::catalogue::{find_resource, find_tool};

    #[test]
    fn info_advertises_tools_and_resources() {
        let info = server_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert_eq!(info.server_info.name, SERVER_NAME);
    }

    #[test]
    fn tool_schema_keeps_required_fields() {
        let tool = to_tool(&find_tool("create_article_post").unwrap().descriptor);
        assert_eq!(tool.name, "create_article_post");
        assert_eq!(tool.input_schema["type"], "object");
        assert_eq!(
            tool.input_schema["required"],
            serde_json::json!(["text", "articleUrl"])
        );
    }

    #[test]
    fn resource_carries_mime_type() {
        let resource = to_resource(&find_resource("linkedin://token-info").unwrap().descriptor);
        assert_eq!(resource.uri, "linkedin://token-info");
        assert_eq!(resource.mime_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn error_output_sets_is_error() {
        let result = to_call_result(ToolOutput::failure("❌ nope"));
        assert_eq!(result.is_error, Some(true));
        let result = to_call_result(ToolOutput::ok("fine"));
        assert_eq!(result.is_error, Some(false));
    }

    #[test]
    fn contents_use_resource_mime_type() {
        let contents = to_contents(ResourceOutput {
            uri: "linkedin://profile".into(),
            mime_type: "application/json",
            text: "{}".into(),
        });
        match contents {
            ResourceContents::TextResourceContents { uri, mime_type, text, .. } => {
                assert_eq!(uri, "linkedin://profile");
                assert_eq!(mime_type.as_deref(), Some("application/json"));
                assert_eq!(text, "{}");
            }
            other => panic!("unexpected contents: {other:?}"),
        }
    }

    #[test]
    fn caller_errors_map_to_invalid_params() {
        let err = to_mcp_error(GatewayError::UnknownTool("x".into()));
        assert_eq!(err.code.0, -32602);
        assert_eq!(err.message, "Unknown tool: x");
        let err = to_mcp_error(GatewayError::InvalidArgument("text must be a string".into()));
        assert_eq!(err.code.0, -32602);
    }

    #[test]
    fn unknown_resource_maps_to_not_found() {
        let err = to_mcp_error(GatewayError::UnknownResource("linkedin://x".into()));
        assert_eq!(err.code.0, -32002);
    }

    #[test]
    fn other_errors_are_internal() {
        let err = to_mcp_error(GatewayError::PermissionRequired(Capability::Likes));
        assert_eq!(err.code.0, -32603);
    }
}
