mod forms;

use serde::{Deserialize, Serialize};

use super::{JsonRpcError, Tool, INTERNAL_ERROR, INVALID_PARAMS};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

fn to_json(value: impl Serialize) -> Result<serde_json::Value, JsonRpcError> {
    serde_json::to_value(value)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Internal error: {e}")))
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    to_json(InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "formscribe".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    })
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "pdf_extract_questions".to_string(),
            description: "Extract form questions from a PDF questionnaire. Detects multiple choice questions ((a)-(d) option markers), checkbox questions ([ ] or \u{25A1} markers) and free text questions ending in '?'. A '*' on the line marks the question as required. Pages whose text cannot be read are skipped and listed in skipped_pages. Also accepts a .txt dump with form-feed page breaks.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "Path to the .pdf (or .txt) file"
                    },
                    "title": {
                        "type": "string",
                        "description": "Form title to use instead of 'Form from <file name>'"
                    }
                },
                "required": ["path"]
            }),
        },
        Tool {
            name: "mindmap_parse".to_string(),
            description: "Build a form from mindmap notation. Indentation is exact: 0 spaces for the form title, 2 for a section ('Section 1: Name' keeps the part after ':'), 4 for a field written 'Label|type' with type one of text, email, dropdown, checkbox, radio (anything else is text), and 6 for an option of the dropdown/checkbox/radio field above it.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "The mindmap text"
                    }
                },
                "required": ["text"]
            }),
        },
    ];

    to_json(ToolsList { tools })
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {e}")))?;

    match params.name.as_str() {
        "pdf_extract_questions" => forms::handle_pdf_extract(params.arguments, global).await,
        "mindmap_parse" => forms::handle_mindmap_parse(params.arguments, global),
        _ => Err(JsonRpcError::new(
            INVALID_PARAMS,
            format!("Unknown tool: {}", params.name),
        )),
    }
}
