//! ChatPPT HTTP client
//!
//! Every remote endpoint follows the same contract: send one JSON request
//! carrying the bearer credential, read `{code, msg, data}` back, and treat
//! `code == 200` in the body as the only success signal.

use crate::config::{Credential, USER_AGENT};
use crate::error::{Result, ToolError};
use crate::mcp::types::ToolResult;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

const SUCCESS_CODE: i64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Build,
    Query,
    Download,
    Editor,
}

enum Payload<'a> {
    Body(Value),
    Query(&'a str),
}

impl Operation {
    pub fn method(self) -> Method {
        match self {
            Operation::Build | Operation::Editor => Method::POST,
            Operation::Query | Operation::Download => Method::GET,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Operation::Build => "/apps/ppt-create",
            Operation::Query => "/apps/ppt-result",
            Operation::Download => "/apps/ppt-download",
            Operation::Editor => "/apps/ppt-editor",
        }
    }

    /// Prefix of the error text when the service answers with a non-200 code.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Build => "BuildPpt",
            Operation::Query | Operation::Download | Operation::Editor => "Ppt",
        }
    }

    /// Fields copied out of `data`, in output order.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Operation::Build => &["id"],
            Operation::Query => &[
                "id",
                "images_url",
                "introduce",
                "ppt_title",
                "status",
                "process_url",
                "preview_url",
                "state_description",
            ],
            Operation::Download => &["download_url"],
            Operation::Editor => &["url"],
        }
    }

    fn payload(self, value: &str) -> Payload<'_> {
        match self {
            Operation::Build => Payload::Body(json!({ "text": value })),
            Operation::Editor => Payload::Body(json!({ "id": value })),
            Operation::Query | Operation::Download => Payload::Query(value),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RemoteResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Value,
}

pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    credential: Credential,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, credential: Credential) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            credential,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn call(&self, operation: Operation, value: &str) -> Result<ToolResult> {
        let url = format!("{}{}", self.base_url, operation.path());
        debug!(method = %operation.method(), %url, "sending request");

        let mut request = self
            .http
            .request(operation.method(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.credential.header_value());
        request = match operation.payload(value) {
            Payload::Body(body) => request.body(serde_json::to_vec(&body)?),
            Payload::Query(id) => request.query(&[("id", id)]),
        };

        let response = request.send().inspect_err(|err| {
            warn!(%url, error = %err, "request failed");
        })?;
        let status = response.status();
        let body = response.text()?;
        debug!(%status, bytes = body.len(), "received response");

        let parsed: RemoteResponse = serde_json::from_str(&body)?;
        normalize(operation, parsed)
    }
}

pub fn normalize(operation: Operation, response: RemoteResponse) -> Result<ToolResult> {
    if response.code != SUCCESS_CODE {
        let msg = response.msg.unwrap_or_default();
        warn!(code = response.code, %msg, "remote service rejected request");
        return Ok(ToolResult::error(format!(
            "{} failed: {} : {}",
            operation.label(),
            response.code,
            msg
        )));
    }

    let data = response.data.as_object().ok_or(ToolError::MalformedData)?;
    let projected = project(data, operation.fields());
    let text = serde_json::to_string_pretty(&Value::Object(projected))?;
    Ok(ToolResult::text(text))
}

fn project(data: &Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    fields
        .iter()
        .filter_map(|field| {
            data.get(*field)
                .map(|value| ((*field).to_string(), value.clone()))
        })
        .collect()
}
