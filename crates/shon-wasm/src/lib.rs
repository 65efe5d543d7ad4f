use serde::Serialize;
use shon::Options;
use wasm_bindgen::prelude::*;

/// Use wee_alloc as the global allocator for smaller WASM binary size
#[cfg(feature = "size_opt")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Maximum prompt size in bytes (1 MB)
const MAX_INPUT_SIZE: usize = 1024 * 1024;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Object handed back to the page: exactly one of the two fields is set.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct Outcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<String, String>> for Outcome {
    fn from(result: Result<String, String>) -> Self {
        match result {
            Ok(json) => Outcome {
                json: Some(json),
                error: None,
            },
            Err(error) => Outcome {
                json: None,
                error: Some(error),
            },
        }
    }
}

/// Splits `prompt` the way a shell would and renders the SHON it holds as
/// indented JSON.
pub fn convert(prompt: &str, implicit_object: bool) -> Result<String, String> {
    if prompt.len() > MAX_INPUT_SIZE {
        return Err(format!(
            "Input exceeds maximum size limit of {} bytes",
            MAX_INPUT_SIZE
        ));
    }

    let args = shlex::split(prompt).ok_or_else(|| "split shell: unbalanced quotes".to_string())?;

    let options = Options::default();
    let value = if implicit_object {
        shon::object_to_value(&args, &options)
    } else {
        shon::to_value(&args, &options)
    }
    .map_err(|e| format!("parse SHON: {}", e))?;

    serde_json::to_string_pretty(&value).map_err(|e| format!("marshal JSON: {}", e))
}

/// Convert a shell-quoted SHON prompt to `{json}` or `{error}`
#[wasm_bindgen]
pub fn shon_to_json(prompt: &str, implicit_object: bool) -> Result<JsValue, JsValue> {
    let outcome = Outcome::from(convert(prompt, implicit_object));
    serde_wasm_bindgen::to_value(&outcome).map_err(JsValue::from)
}

/// Get the version of the SHON library
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_object() {
        let json = convert("[ --name 'Alice Smith' --age 30 --tags [ a b ] ]", false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "Alice Smith", "age": 30, "tags": ["a", "b"]})
        );
        assert!(json.contains("\n  \"name\""));
    }

    #[test]
    fn test_convert_implicit_object() {
        let json = convert("--debug -t --level 3", true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!({"debug": true, "level": 3}));
    }

    #[test]
    fn test_convert_errors() {
        let err = convert("[ a", false).unwrap_err();
        assert!(err.starts_with("parse SHON: "), "{err}");

        let err = convert("'unterminated", false).unwrap_err();
        assert!(err.starts_with("split shell"), "{err}");

        let err = convert("", false).unwrap_err();
        assert!(err.contains("expected a value"), "{err}");
    }

    #[test]
    fn test_outcome_sets_one_field() {
        let ok = Outcome::from(Ok("1".to_string()));
        assert_eq!(ok.json.as_deref(), Some("1"));
        assert!(ok.error.is_none());

        let err = Outcome::from(Err("boom".to_string()));
        assert_eq!(serde_json::to_string(&err).unwrap(), r#"{"error":"boom"}"#);
    }

    #[test]
    fn test_convert_size_limit() {
        let large = "x".repeat(MAX_INPUT_SIZE + 1);
        let result = convert(&large, false);
        assert!(
            result
                .unwrap_err()
                .contains("Input exceeds maximum size limit")
        );
    }
}
