//! MCP (Model Context Protocol) server for songrec.
//!
//! Serves one prebuilt catalog over stdio JSON-RPC so AI assistants can ask
//! for recommendations. The catalog is built before the server starts and
//! is shared read-only by every tool call.
//!
//! Start with: `songrec --mcp --dataset songs.csv`

use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRouter},
    handler::server::wrapper::Parameters,
    model::*,
    service::RequestContext,
    tool, tool_router, ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::ops;
use crate::service::Recommender;

// ── Parameter structs ───────────────────────────────────────────────────────
// `JsonSchema` is required by rmcp so that the tool's input schema is
// auto-generated for the AI client.

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SongParams {
    /// Song name, matched case-insensitively against the catalog.
    pub name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ArtistParams {
    /// Artist name, matched case-insensitively.
    pub artist: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct MoodParams {
    /// Mood label: sad, energetic_gym, romantic, nostalgic, energetic_hype,
    /// dark_moody or unknown.
    pub mood: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ClassifyParams {
    /// JSON array of objects to tag.
    pub records: Vec<serde_json::Value>,
    /// Field containing lyrics (default: "text").
    #[serde(default = "default_field")]
    pub field: String,
}

fn default_field() -> String {
    "text".into()
}

fn json_text(v: &serde_json::Value) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

fn task_error(e: tokio::task::JoinError) -> McpError {
    McpError::internal_error(format!("task join error: {e}"), None)
}

// ── MCP Server ──────────────────────────────────────────────────────────────

/// The MCP server: the shared recommender plus the generated tool router.
#[derive(Clone)]
pub struct SongrecMcp {
    rec: Recommender,
    #[allow(dead_code)] // accessed at runtime by the #[tool_router] macro
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SongrecMcp {
    pub fn new(rec: Recommender) -> Self {
        Self {
            rec,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "recommend_song",
        description = "Recommend up to 100 songs whose lyrics are most similar to the named song (TF-IDF cosine similarity), best first. The song itself is never included. Returns `{recommendations: [names]}` or `{error: \"Song not found.\"}`."
    )]
    async fn recommend_song(
        &self,
        params: Parameters<SongParams>,
    ) -> Result<CallToolResult, McpError> {
        let rec = self.rec.clone();
        let name = params.0.name;
        let result = tokio::task::spawn_blocking(move || ops::op_recommend_song(&rec, &name))
            .await
            .map_err(task_error)?;
        Ok(CallToolResult::success(vec![Content::text(json_text(
            &result,
        ))]))
    }

    #[tool(
        name = "similar_songs",
        description = "Like recommend_song, but each hit carries its artist, mood and cosine similarity score."
    )]
    async fn similar_songs(
        &self,
        params: Parameters<SongParams>,
    ) -> Result<CallToolResult, McpError> {
        let rec = self.rec.clone();
        let name = params.0.name;
        let result = tokio::task::spawn_blocking(move || ops::op_similar(&rec, &name))
            .await
            .map_err(task_error)?;
        Ok(CallToolResult::success(vec![Content::text(json_text(
            &result,
        ))]))
    }

    #[tool(
        name = "recommend_artist",
        description = "List up to 100 songs by an artist in catalog order. Returns `{recommendations: [names]}` or `{error: \"No songs found.\"}`."
    )]
    async fn recommend_artist(
        &self,
        params: Parameters<ArtistParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = ops::op_recommend_artist(&self.rec, &params.0.artist);
        Ok(CallToolResult::success(vec![Content::text(json_text(
            &result,
        ))]))
    }

    #[tool(
        name = "recommend_mood",
        description = "List up to 100 songs tagged with a mood in catalog order. Returns `{recommendations: [names]}` or `{error: \"No songs found.\"}`."
    )]
    async fn recommend_mood(
        &self,
        params: Parameters<MoodParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = ops::op_recommend_mood(&self.rec, &params.0.mood);
        Ok(CallToolResult::success(vec![Content::text(json_text(
            &result,
        ))]))
    }

    #[tool(
        name = "classify_mood",
        description = "Tag JSON records with a `_mood` column using the catalog's mood lexicon (first matching mood in lexicon order, whole-word keyword matches, `unknown` otherwise)."
    )]
    async fn classify_mood(
        &self,
        params: Parameters<ClassifyParams>,
    ) -> Result<CallToolResult, McpError> {
        let rec = self.rec.clone();
        let p = params.0;
        let result = tokio::task::spawn_blocking(move || {
            ops::op_classify(&p.records, &p.field, rec.catalog().classifier())
        })
        .await
        .map_err(task_error)?;
        Ok(CallToolResult::success(vec![Content::text(json_text(
            &result,
        ))]))
    }

    #[tool(
        name = "list_moods",
        description = "List the mood labels and their trigger keywords in precedence order."
    )]
    async fn list_moods(&self) -> Result<CallToolResult, McpError> {
        let result = ops::op_moods(self.rec.catalog().classifier());
        Ok(CallToolResult::success(vec![Content::text(json_text(
            &result,
        ))]))
    }

    #[tool(
        name = "catalog_stats",
        description = "Summarize the loaded catalog: song, artist and vocabulary counts plus songs per mood."
    )]
    async fn catalog_stats(&self) -> Result<CallToolResult, McpError> {
        let result = ops::op_stats(&self.rec);
        Ok(CallToolResult::success(vec![Content::text(json_text(
            &result,
        ))]))
    }
}

// ── ServerHandler glue ──────────────────────────────────────────────────────

impl ServerHandler for SongrecMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Song recommendation engine over a preloaded lyrics catalog. Tools: \
                 recommend_song, similar_songs, recommend_artist, recommend_mood, \
                 classify_mood, list_moods, catalog_stats. Name, artist and mood \
                 queries are case-insensitive exact matches."
                    .into(),
            ),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: None }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "songrec".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: Some("Song Recommender".into()),
                description: Some(
                    "Lyric-similarity, artist and mood song recommendations".into(),
                ),
                icons: None,
                website_url: None,
            },
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: Default::default(),
        }))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        let tool_context = ToolCallContext::new(self, request, context);
        async move { self.tool_router.call(tool_context).await }
    }

    fn get_tool(&self, name: &str) -> Option<Tool> {
        self.tool_router.get(name).cloned()
    }
}

// ── Entry point ─────────────────────────────────────────────────────────────

/// Serve `rec` over stdio. Called from `cli.rs` when `--mcp` is passed.
pub async fn serve_stdio(rec: Recommender) -> Result<(), Box<dyn std::error::Error>> {
    info!(songs = rec.catalog().len(), "starting MCP server on stdio");
    let server = SongrecMcp::new(rec);
    let transport = rmcp::transport::io::stdio();
    let service = server.serve(transport).await.inspect_err(|e| {
        tracing::error!("MCP serve error: {e}");
    })?;
    service.waiting().await?;
    Ok(())
}
