use crate::mcp::{service::McpService, tools::SetMaterialRequest};
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{Parameters, ToolRouter},
    model::{CallToolResult, Content},
    tool, tool_router,
};

/// Returned by `set_material` for every call.
pub const MATERIAL_REMOVED_MESSAGE: &str = "Material functionality has been removed to eliminate URP dependencies. \
Please use the standard Unity editor to manage materials or implement a custom \
material handler compatible with your rendering pipeline.";

#[tool_router(router = material_tool_router)]
impl McpService {
    #[tool(
        description = "[REMOVED FUNCTIONALITY] Apply or create a material for a game object. \
Material support was removed to eliminate URP rendering pipeline dependencies; \
the call always returns a message explaining the removal."
    )]
    pub async fn set_material(
        &self,
        Parameters(req): Parameters<SetMaterialRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(object_name = %req.object_name, "set_material called on removed tool");
        Ok(CallToolResult::success(vec![Content::text(
            MATERIAL_REMOVED_MESSAGE,
        )]))
    }
}

/// Adds the material tools to `router`.
///
/// Lives next to the `#[tool_router]` block because the generated
/// `material_tool_router()` is private to this module.
pub fn register_material_tools(router: ToolRouter<McpService>) -> ToolRouter<McpService> {
    router + McpService::material_tool_router()
}
