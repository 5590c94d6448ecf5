// @awa-component: MCP-HookPipeline
//
//! Hook/middleware pipeline for tool calls.
//!
//! Hooks run before and after every tool call. They can inspect or rewrite
//! the call arguments, observe the outcome, or reject the call outright.
//! The built-in [`audit::AuditHook`] logs every call. Embedders that build
//! their own [`crate::server::MakeMcpServer`] can add hooks scoped to one
//! scenario or to the management tools.

pub mod audit;

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::JsonObject;

use crate::tools::{ToolRoute, classify};

/// Context passed to hooks for each tool call.
#[derive(Debug, Clone)]
pub struct HookContext {
    pub tool_name: String,
    pub route: ToolRoute,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HookContext {
    /// Context for a call to `tool_name`, classified now.
    pub fn for_call(tool_name: &str) -> Self {
        Self {
            tool_name: tool_name.to_string(),
            route: classify(tool_name),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Which calls a hook applies to.
///
/// [`default_pipeline`] installs only a `Global` hook; the narrower scopes
/// are for pipelines passed to [`crate::server::MakeMcpServer::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookScope {
    Global,
    /// Calls running one specific scenario.
    Scenario(u64),
    /// Calls to any management tool.
    Management,
}

/// Outcome of a tool call, passed to after_call hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCallOutcome {
    Success(String),
    /// Recovered failure returned to the caller as an error envelope.
    Error(String),
    /// The call never ran (unknown tool or rejected by a hook).
    Rejected(String),
}

/// Errors that can occur in hooks.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("Call rejected: {0}")]
    Rejected(String),

    #[error("Hook error: {0}")]
    Internal(String),
}

/// Hook trait. Implement for custom hook logic.
///
/// Hooks form an ordered pipeline. `before_call` runs in order; `after_call`
/// runs in reverse order (onion model).
#[async_trait]
pub trait ToolHook: Send + Sync {
    /// Called before tool execution. Return Err to reject the call.
    async fn before_call(
        &self,
        ctx: &HookContext,
        arguments: &mut JsonObject,
    ) -> Result<(), HookError>;

    /// Called after tool execution. Can inspect or transform the outcome.
    async fn after_call(
        &self,
        ctx: &HookContext,
        outcome: &mut ToolCallOutcome,
    ) -> Result<(), HookError>;

    /// Hook identifier for debugging/logging.
    fn name(&self) -> &str;
}

/// Ordered pipeline of hooks.
pub struct HookPipeline {
    hooks: Vec<(HookScope, Arc<dyn ToolHook>)>,
}

impl HookPipeline {
    /// Create a new pipeline from an ordered list of scoped hooks.
    pub fn new(hooks: Vec<(HookScope, Arc<dyn ToolHook>)>) -> Self {
        Self { hooks }
    }

    /// Create an empty pipeline (no-op), e.g. to serve without auditing.
    pub fn empty() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Run all before_call hooks in order. Short-circuits on error.
    pub async fn run_before(
        &self,
        ctx: &HookContext,
        arguments: &mut JsonObject,
    ) -> Result<(), HookError> {
        for (scope, hook) in &self.hooks {
            if scope_matches(scope, ctx) {
                hook.before_call(ctx, arguments).await?;
            }
        }
        Ok(())
    }

    /// Run all after_call hooks in reverse order.
    pub async fn run_after(
        &self,
        ctx: &HookContext,
        outcome: &mut ToolCallOutcome,
    ) -> Result<(), HookError> {
        for (scope, hook) in self.hooks.iter().rev() {
            if scope_matches(scope, ctx) {
                hook.after_call(ctx, outcome).await?;
            }
        }
        Ok(())
    }
}

fn scope_matches(scope: &HookScope, ctx: &HookContext) -> bool {
    match scope {
        HookScope::Global => true,
        HookScope::Scenario(id) => ctx.route == ToolRoute::RunScenario(*id),
        HookScope::Management => matches!(ctx.route, ToolRoute::Management(_)),
    }
}

/// Build the default hook pipeline: audit logging only.
pub fn default_pipeline() -> HookPipeline {
    HookPipeline::new(vec![(HookScope::Global, Arc::new(audit::AuditHook))])
}
