//! Newline-delimited JSON-RPC over stdio

use crate::mcp::types::{
    INVALID_PARAMS, JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR,
    ToolCallParams,
};
use crate::mcp::{contracts, tool_definitions};
use crate::remote::ApiClient;
use crate::tools;
use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Serves requests until `reader` reaches EOF.
pub fn serve<R: BufRead, W: Write>(client: &ApiClient, reader: R, mut writer: W) -> Result<()> {
    for line in reader.lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
            Ok(request) => handle_request(client, request),
            Err(err) => {
                warn!(error = %err, "unparseable request");
                Some(JsonRpcResponse::error(Value::Null, PARSE_ERROR, err.to_string()))
            }
        };

        if let Some(response) = response {
            let serialized =
                serde_json::to_string(&response).context("failed to serialize response")?;
            writeln!(writer, "{serialized}").context("failed to write response")?;
            writer.flush().context("failed to flush response")?;
        }
    }

    debug!("stdin closed");
    Ok(())
}

fn handle_request(client: &ApiClient, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    // Notifications never get a response.
    let Some(id) = request.id else {
        debug!(method = %request.method, "notification");
        return None;
    };

    let response = match request.method.as_str() {
        "initialize" => JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": contracts::PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        ),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => JsonRpcResponse::success(id, json!({ "tools": tool_definitions() })),
        "tools/call" => handle_tool_call(client, id, request.params),
        method => JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Unknown method: {method}")),
    };
    Some(response)
}

fn handle_tool_call(client: &ApiClient, id: Value, params: Value) -> JsonRpcResponse {
    let params: ToolCallParams = match serde_json::from_value(params) {
        Ok(params) => params,
        Err(err) => return JsonRpcResponse::error(id, INVALID_PARAMS, err.to_string()),
    };

    let result = tools::call_tool(client, &params.name, &params.arguments);
    match serde_json::to_value(result) {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(err) => JsonRpcResponse::error(id, INVALID_PARAMS, err.to_string()),
    }
}
