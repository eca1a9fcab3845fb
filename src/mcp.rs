use std::sync::Arc;

use rmcp::{
    ServerHandler,
    ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult,
        Content,
        Implementation,
        ServerCapabilities,
        ServerInfo,
    },
    tool,
    tool_handler,
    tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    catalog::Catalog,
    error,
    search::{Hit, SearchResponse},
};

/// MCP server answering searches over a shared, read-only catalog.
#[derive(Clone)]
pub struct LangsearchMcpServer {
    catalog: Arc<Catalog>,
    tool_router: ToolRouter<Self>,
}

impl LangsearchMcpServer {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router(router = tool_router)]
impl LangsearchMcpServer {
    /// Search the language catalog.
    #[tool(
        name = "langsearch_search",
        description = "Search the programming language catalog. Every word must match some field; prefix a word with '-' to exclude records containing it and quote phrases to match them verbatim. An empty query lists every record."
    )]
    pub async fn langsearch_search(
        &self,
        params: Parameters<SearchParams>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        let query = params.0.query.unwrap_or_default();
        let hits = self.catalog.execute_search(Some(query.as_str()));

        let summary = format_search_summary(&hits, &query);
        let structured =
            serde_json::to_value(SearchResponse::new(&query, &hits))
                .map_err(|e| mcp_error("failed to serialize search results", e))?;

        let mut result = CallToolResult::default();
        result.content = vec![Content::text(summary)];
        result.structured_content = Some(structured);
        result.is_error = Some(false);
        result.meta = None;
        Ok(result)
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for LangsearchMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_server_info(
                Implementation::new("langsearch", env!("CARGO_PKG_VERSION"))
                    .with_title("langsearch MCP"),
            )
            .with_instructions(
                "Use langsearch_search to look up programming languages by name, type or designer.",
            )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Free-text query. Omit to list every record.
    pub query: Option<String>,
}

fn format_search_summary(hits: &[Hit<'_>], query: &str) -> String {
    if hits.is_empty() {
        return format!("No results found for \"{query}\"");
    }

    let mut lines = Vec::with_capacity(hits.len() + 1);
    let suffix = if hits.len() == 1 { "" } else { "s" };
    lines.push(format!(
        "Found {} result{} for \"{query}\":",
        hits.len(),
        suffix
    ));

    for hit in hits {
        let title = hit.record.values().next().unwrap_or_default();
        match hit.score {
            Some(score) => lines.push(format!("{}. {title} ({score})", hit.rank)),
            None => lines.push(format!("{}. {title}", hit.rank)),
        }
    }

    lines.join("\n")
}

fn mcp_error(message: &str, error: impl std::fmt::Display) -> rmcp::ErrorData {
    rmcp::ErrorData::internal_error(
        message.to_string(),
        Some(json!({ "error": error.to_string() })),
    )
}

pub fn run_mcp(catalog: Catalog) -> error::Result<()> {
    let server = LangsearchMcpServer::new(catalog);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| {
            error::Error::Config(format!("failed to start tokio runtime: {e}"))
        })?;

    runtime.block_on(async move {
        tracing::info!("serving MCP over stdio");
        let transport = rmcp::transport::stdio();
        let running = server.serve(transport).await.map_err(|e| {
            error::Error::Config(format!(
                "MCP server initialization failed: {e}"
            ))
        })?;
        running.waiting().await.map_err(|e| {
            error::Error::Config(format!("MCP server error: {e}"))
        })?;
        Ok(())
    })
}
