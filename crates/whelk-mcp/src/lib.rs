//! Whelk MCP Server
//!
//! Exposes one whelk shell session over MCP stdio: an `execute` tool that
//! runs a single command line and returns its captured output, and a
//! `history` tool that returns the session's submitted commands in order.
//! This is the one-shot text-in/text-out surface; the interactive loop
//! lives in `whelk-cli`.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    model::*,
    schemars::{self, JsonSchema},
    service::{RequestContext, RoleServer},
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use whelk::Shell;

/// Parameters for the `execute` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExecuteParams {
    /// The command line to run: a recognized command such as `ls` or
    /// `mkdir docs`, or a natural-language phrase like
    /// "create folder docs".
    pub command: String,
}

/// MCP server wrapping one shell session.
///
/// All tool calls share the same session, so the working directory and
/// the command history persist across calls for the lifetime of the
/// server process.
#[derive(Clone)]
pub struct WhelkServer {
    shell: Arc<Mutex<Shell>>,
}

impl std::fmt::Debug for WhelkServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhelkServer").finish_non_exhaustive()
    }
}

impl WhelkServer {
    /// Wrap an already-built shell session.
    pub fn new(shell: Shell) -> Self {
        Self {
            shell: Arc::new(Mutex::new(shell)),
        }
    }

    /// Run one command line through the shell.
    async fn execute_command(&self, params: ExecuteParams) -> Result<CallToolResult, McpError> {
        let mut shell = self.shell.lock().await;
        let turn = shell.execute(&params.command).await;

        let output = if turn.output.is_empty() {
            "(no output)".to_string()
        } else {
            turn.output
        };

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    /// Render the session history, oldest entry first.
    async fn render_history(&self) -> Result<CallToolResult, McpError> {
        let shell = self.shell.lock().await;
        let history = shell.history();

        let text = if history.is_empty() {
            "(no commands submitted yet)".to_string()
        } else {
            history
                .entries()
                .iter()
                .enumerate()
                .map(|(i, command)| format!("{}. {}", i + 1, command))
                .collect::<Vec<_>>()
                .join("\n")
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    fn execute_tool(&self) -> Tool {
        let schema = schemars::schema_for!(ExecuteParams);
        let schema_json = serde_json::to_value(schema).unwrap_or_default();
        let input_schema = match schema_json {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        };

        Tool {
            name: "execute".into(),
            title: Some("Execute Shell Command".into()),
            description: Some(
                "Run one command line in the whelk shell. Recognized commands: ls, cd <dir>, \
                pwd, mkdir <dir>, rm <path>, cpu, mem, exit. Anything else is interpreted as \
                a natural-language phrase such as 'create folder docs', 'remove docs' or \
                'move notes.txt into docs'. Returns the captured output; errors are reported \
                as output text, never as tool failures."
                    .into(),
            ),
            input_schema,
            output_schema: None,
            annotations: None,
            icons: None,
            meta: None,
        }
    }

    fn history_tool(&self) -> Tool {
        let schema_json = serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        });
        let input_schema = match schema_json {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        };

        Tool {
            name: "history".into(),
            title: Some("Session History".into()),
            description: Some(
                "Return the commands submitted this session, one per line, oldest first."
                    .into(),
            ),
            input_schema,
            output_schema: None,
            annotations: None,
            icons: None,
            meta: None,
        }
    }
}

impl ServerHandler for WhelkServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Whelk is a small command shell. Use the 'execute' tool to run one command \
                line (ls, cd, pwd, mkdir, rm, cpu, mem, exit, or a natural-language phrase) \
                and the 'history' tool to list the commands submitted this session."
                    .into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: vec![self.execute_tool(), self.history_tool()],
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        match request.name.as_ref() {
            "execute" => {
                let params: ExecuteParams = match &request.arguments {
                    Some(args) => serde_json::from_value(serde_json::Value::Object(args.clone()))
                        .map_err(|e| {
                        McpError::invalid_params(format!("Invalid parameters: {}", e), None)
                    })?,
                    None => {
                        return Err(McpError::invalid_params(
                            "Missing 'command' parameter",
                            None,
                        ));
                    }
                };
                self.execute_command(params).await
            }
            "history" => self.render_history().await,
            _ => Err(McpError::invalid_params(
                format!("Unknown tool: {}", request.name),
                None,
            )),
        }
    }
}
