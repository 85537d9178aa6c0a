use super::{CallToolResult, Content, JsonRpcError, INTERNAL_ERROR, INVALID_PARAMS};
use serde::Deserialize;
use std::path::Path;

use crate::input::check_size;

fn parse_args<T: serde::de::DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid arguments: {e}")))
}

fn to_text_result(value: &impl serde::Serialize) -> Result<serde_json::Value, JsonRpcError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Serialization error: {e}")))?;

    serde_json::to_value(CallToolResult {
        content: vec![Content::Text { text: json }],
        is_error: None,
    })
    .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Internal error: {e}")))
}

async fn run_blocking<T, F>(f: F) -> Result<T, JsonRpcError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, String> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Task join error: {e}")))?
        .map_err(|message| JsonRpcError::new(INTERNAL_ERROR, message))
}

pub async fn handle_pdf_extract(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        path: String,
        title: Option<String>,
    }

    let args: Args = parse_args(arguments)?;
    let max_bytes = global.max_bytes;

    let output = run_blocking(move || {
        let mut output = crate::pdf::extract_data(Path::new(&args.path), max_bytes)
            .map_err(|e| e.to_string())?;
        if let Some(title) = args.title {
            output.draft.title = title;
        }
        Ok(output)
    })
    .await?;

    to_text_result(&output)
}

pub fn handle_mindmap_parse(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        text: String,
    }

    let args: Args = parse_args(arguments)?;
    check_size(args.text.len() as u64, global.max_bytes)
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, e.to_string()))?;

    to_text_result(&crate::mindmap::parse_data(&args.text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn global(max_bytes: u64) -> crate::Global {
        crate::Global {
            verbose: false,
            max_bytes,
        }
    }

    fn result_text(value: &serde_json::Value) -> serde_json::Value {
        let text = value["content"][0]["text"].as_str().unwrap();
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_mindmap_parse() {
        let arguments = serde_json::json!({
            "text": "Survey Title\n  Section: Basics\n    Age|number\n"
        });
        let value = handle_mindmap_parse(Some(arguments), &global(1024)).unwrap();
        let draft = result_text(&value);

        assert_eq!(draft["title"], "Survey Title");
        assert_eq!(draft["questions"][0]["text"], "Age");
        assert_eq!(draft["questions"][0]["kind"], "text");
    }

    #[test]
    fn test_mindmap_parse_missing_text() {
        let err = handle_mindmap_parse(None, &global(1024)).unwrap_err();
        assert_eq!(err.code, INVALID_PARAMS);
    }

    #[test]
    fn test_mindmap_parse_too_large() {
        let arguments = serde_json::json!({ "text": "A very long title" });
        let err = handle_mindmap_parse(Some(arguments), &global(4)).unwrap_err();

        assert_eq!(err.code, INVALID_PARAMS);
        assert!(err.message.contains("Input too large"));
    }

    #[tokio::test]
    async fn test_pdf_extract_from_text_dump() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"[ ] Apple\n[ ] Banana\n").unwrap();

        let arguments = serde_json::json!({
            "path": file.path().to_str().unwrap(),
            "title": "Fruit survey"
        });
        let value = handle_pdf_extract(Some(arguments), &global(1024))
            .await
            .unwrap();
        let draft = result_text(&value);

        assert_eq!(draft["title"], "Fruit survey");
        assert_eq!(draft["questions"][0]["kind"], "checkbox");
        assert_eq!(draft["questions"][0]["options"][0], "Banana");
    }

    #[tokio::test]
    async fn test_pdf_extract_missing_file() {
        let arguments = serde_json::json!({ "path": "/definitely/not/here.pdf" });
        let err = handle_pdf_extract(Some(arguments), &global(1024))
            .await
            .unwrap_err();

        assert_eq!(err.code, INTERNAL_ERROR);
    }
}
