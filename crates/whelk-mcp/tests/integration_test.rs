//! Integration tests for the whelk MCP server.
//!
//! These tests spawn the actual server binary and talk to it over stdio
//! using JSON-RPC, catching issues like nested tokio runtimes that unit
//! tests would miss.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};
use std::time::Duration;

use serde_json::{Value, json};
use tempfile::TempDir;

/// Helper to spawn the MCP server process.
struct McpServerProcess {
    child: Child,
}

impl McpServerProcess {
    fn spawn_in(dir: &TempDir) -> Self {
        let child = Command::new(env!("CARGO_BIN_EXE_whelk-mcp"))
            .arg("--dir")
            .arg(dir.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("spawn whelk-mcp");

        Self { child }
    }

    /// Send a JSON-RPC request and read the response line.
    fn request(&mut self, request: Value) -> Value {
        let stdin = self.child.stdin.as_mut().expect("stdin not captured");
        let stdout = self.child.stdout.as_mut().expect("stdout not captured");

        let request_str = serde_json::to_string(&request).expect("serialize request");
        writeln!(stdin, "{}", request_str).expect("write request");
        stdin.flush().expect("flush stdin");

        let mut reader = BufReader::new(stdout);
        let mut response_line = String::new();
        reader.read_line(&mut response_line).expect("read response");

        serde_json::from_str(&response_line)
            .unwrap_or_else(|e| panic!("parse response '{}': {}", response_line.trim(), e))
    }

    /// Send a notification (no response expected).
    fn notify(&mut self, notification: Value) {
        let stdin = self.child.stdin.as_mut().expect("stdin not captured");
        let notification_str =
            serde_json::to_string(&notification).expect("serialize notification");
        writeln!(stdin, "{}", notification_str).expect("write notification");
        stdin.flush().expect("flush stdin");
    }
}

impl Drop for McpServerProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Perform the MCP initialization handshake.
fn initialize(server: &mut McpServerProcess) {
    let init_request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {
                "name": "whelk-mcp-test",
                "version": "0.1.0"
            }
        }
    });

    let init_response = server.request(init_request);
    assert_eq!(init_response["jsonrpc"], "2.0");
    assert!(
        init_response.get("result").is_some(),
        "Expected result in initialize response, got: {}",
        init_response
    );

    server.notify(json!({
        "jsonrpc": "2.0",
        "method": "notifications/initialized"
    }));

    // Give the server a moment to process.
    std::thread::sleep(Duration::from_millis(50));
}

/// Call a tool and return the first text content block.
fn call_tool(server: &mut McpServerProcess, id: u64, name: &str, arguments: Value) -> String {
    let response = server.request(json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {
            "name": name,
            "arguments": arguments
        }
    }));

    assert!(
        response.get("result").is_some(),
        "Expected result, got: {}",
        response
    );

    response["result"]["content"][0]["text"]
        .as_str()
        .expect("text content")
        .to_string()
}

#[test]
fn test_mcp_list_tools() {
    let dir = TempDir::new().expect("create temp dir");
    let mut server = McpServerProcess::spawn_in(&dir);
    initialize(&mut server);

    let response = server.request(json!({
        "jsonrpc": "2.0",
        "id": 2,
        "method": "tools/list",
        "params": {}
    }));

    let tools = response["result"]["tools"]
        .as_array()
        .expect("tools should be an array");
    let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();

    assert!(names.contains(&"execute"), "tools: {:?}", names);
    assert!(names.contains(&"history"), "tools: {:?}", names);
}

#[test]
fn test_mcp_execute_mkdir_and_ls() {
    let dir = TempDir::new().expect("create temp dir");
    let mut server = McpServerProcess::spawn_in(&dir);
    initialize(&mut server);

    let text = call_tool(&mut server, 3, "execute", json!({"command": "mkdir demo"}));
    assert_eq!(text, "(no output)", "mkdir should be silent, got: {}", text);

    let text = call_tool(&mut server, 4, "execute", json!({"command": "ls"}));
    assert!(text.lines().any(|l| l == "demo"), "ls output: {}", text);

    // The directory really exists on the host filesystem.
    assert!(dir.path().join("demo").is_dir());
}

#[test]
fn test_mcp_errors_are_output_text() {
    let dir = TempDir::new().expect("create temp dir");
    let mut server = McpServerProcess::spawn_in(&dir);
    initialize(&mut server);

    let text = call_tool(&mut server, 5, "execute", json!({"command": "cd missing"}));
    assert_eq!(text.trim_end(), "Directory not found.");
}

#[test]
fn test_mcp_history_preserves_order() {
    let dir = TempDir::new().expect("create temp dir");
    let mut server = McpServerProcess::spawn_in(&dir);
    initialize(&mut server);

    call_tool(&mut server, 6, "execute", json!({"command": "mkdir demo"}));
    call_tool(&mut server, 7, "execute", json!({"command": "ls"}));

    let text = call_tool(&mut server, 8, "history", json!({}));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, ["1. mkdir demo", "2. ls"]);
}

#[test]
fn test_mcp_unknown_tool() {
    let dir = TempDir::new().expect("create temp dir");
    let mut server = McpServerProcess::spawn_in(&dir);
    initialize(&mut server);

    let response = server.request(json!({
        "jsonrpc": "2.0",
        "id": 9,
        "method": "tools/call",
        "params": {
            "name": "nonexistent_tool",
            "arguments": {}
        }
    }));

    assert!(
        response.get("error").is_some(),
        "Expected error for unknown tool, got: {}",
        response
    );
}
