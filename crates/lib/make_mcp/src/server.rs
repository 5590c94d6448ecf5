// @zen-component: MCP-Server
//
//! MCP server handler: discovery on `tools/list`, hook-wrapped dispatch on
//! `tools/call`.

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    model::*,
    service::{RequestContext, RoleServer},
};
use tracing::warn;

use make_core::MakeApi;

use crate::hooks::{HookContext, HookError, HookPipeline, ToolCallOutcome};
use crate::registry;
use crate::router::{DispatchError, Dispatcher};

const INSTRUCTIONS: &str = "Make MCP server: run on-demand Make scenarios as tools, \
browse scenario templates and create new scenarios";

/// Make MCP server handler.
///
/// Tools are not registered up front. Every listing asks Make for the team's
/// on-demand scenarios, and every call is classified by name.
#[derive(Clone)]
pub struct MakeMcpServer {
    api: Arc<dyn MakeApi>,
    team_id: u64,
    dispatcher: Dispatcher,
    hook_pipeline: Arc<HookPipeline>,
}

impl MakeMcpServer {
    pub fn new(api: Arc<dyn MakeApi>, team_id: u64, hook_pipeline: Arc<HookPipeline>) -> Self {
        Self {
            dispatcher: Dispatcher::new(api.clone(), team_id),
            api,
            team_id,
            hook_pipeline,
        }
    }

    /// Run one call through the hook pipeline and the dispatcher.
    pub async fn handle_call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ErrorData> {
        let ctx = HookContext::for_call(name);
        let mut arguments = arguments.unwrap_or_default();

        match self.hook_pipeline.run_before(&ctx, &mut arguments).await {
            Ok(()) => {}
            Err(HookError::Rejected(reason)) => {
                let mut outcome = ToolCallOutcome::Rejected(reason.clone());
                self.finish(&ctx, &mut outcome).await;
                return Ok(CallToolResult::error(vec![Content::text(reason)]));
            }
            Err(e) => {
                return Err(ErrorData::new(ErrorCode::INTERNAL_ERROR, e.to_string(), None));
            }
        }

        match self.dispatcher.dispatch(name, Some(arguments)).await {
            Ok(result) => {
                let text = first_text(&result);
                let mut outcome = if result.is_error == Some(true) {
                    ToolCallOutcome::Error(text)
                } else {
                    ToolCallOutcome::Success(text)
                };
                self.finish(&ctx, &mut outcome).await;
                Ok(result)
            }
            Err(e @ DispatchError::UnknownTool(_)) => {
                let mut outcome = ToolCallOutcome::Rejected(e.to_string());
                self.finish(&ctx, &mut outcome).await;
                Err(ErrorData::new(ErrorCode::INVALID_PARAMS, e.to_string(), None))
            }
        }
    }

    async fn finish(&self, ctx: &HookContext, outcome: &mut ToolCallOutcome) {
        if let Err(e) = self.hook_pipeline.run_after(ctx, outcome).await {
            warn!(tool = %ctx.tool_name, "after_call hook failed: {e}");
        }
    }
}

fn first_text(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .find_map(|c| c.as_text().map(|t| t.text.clone()))
        .unwrap_or_default()
}

impl ServerHandler for MakeMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools = registry::list_tools(self.api.as_ref(), self.team_id)
            .await
            .map_err(|e| ErrorData::new(ErrorCode::INTERNAL_ERROR, e.to_string(), None))?;
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.handle_call(&request.name, request.arguments).await
    }
}
