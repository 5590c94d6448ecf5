// @zen-component: MCP-AuditHook
//
//! Audit hook: logs every tool call and its outcome.
//!
//! Logs go through `tracing` on the `make_mcp::audit` target so operators can
//! filter them separately (`RUST_LOG=make_mcp::audit=info`).

use async_trait::async_trait;
use rmcp::model::JsonObject;
use tracing::{debug, info, warn};

use super::{HookContext, HookError, ToolCallOutcome, ToolHook};
use crate::tools::ToolRoute;

/// Audit hook: records every tool call in the log.
pub struct AuditHook;

fn route_label(route: &ToolRoute) -> String {
    match route {
        ToolRoute::RunScenario(id) => format!("scenario:{id}"),
        ToolRoute::Management(tool) => format!("management:{tool}"),
        ToolRoute::Unknown => "unknown".to_string(),
    }
}

#[async_trait]
impl ToolHook for AuditHook {
    async fn before_call(
        &self,
        ctx: &HookContext,
        arguments: &mut JsonObject,
    ) -> Result<(), HookError> {
        debug!(
            target: "make_mcp::audit",
            tool = %ctx.tool_name,
            route = %route_label(&ctx.route),
            argument_count = arguments.len(),
            "tool call started"
        );
        Ok(())
    }

    async fn after_call(
        &self,
        ctx: &HookContext,
        outcome: &mut ToolCallOutcome,
    ) -> Result<(), HookError> {
        let elapsed_ms = (chrono::Utc::now() - ctx.timestamp).num_milliseconds();
        let route = route_label(&ctx.route);

        match outcome {
            ToolCallOutcome::Success(_) => info!(
                target: "make_mcp::audit",
                tool = %ctx.tool_name,
                %route,
                elapsed_ms,
                "tool call succeeded"
            ),
            ToolCallOutcome::Error(message) => warn!(
                target: "make_mcp::audit",
                tool = %ctx.tool_name,
                %route,
                elapsed_ms,
                error = %message,
                "tool call failed"
            ),
            ToolCallOutcome::Rejected(reason) => warn!(
                target: "make_mcp::audit",
                tool = %ctx.tool_name,
                %route,
                reason = %reason,
                "tool call rejected"
            ),
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "AuditHook"
    }
}
