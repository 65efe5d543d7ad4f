#![no_main]
use libfuzzer_sys::fuzz_target;
use shon::{Options, Value};

// Tokens are the input split on NUL bytes.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let tokens: Vec<&str> = s.split('\0').collect();
        let opts = Options::default();
        let _ = shon::to_value(&tokens, &opts);
        let _ = shon::object_to_value(&tokens, &opts);

        let preserve = Options::default().with_preserve_numeric_literal(true);
        if let Ok(value) = shon::from_args::<Value, _>(&tokens, &preserve) {
            // Literals that are not valid JSON numbers fail here rather than
            // producing broken output.
            if let Ok(json) = serde_json::to_string(&value) {
                let _: serde_json::Value = serde_json::from_str(&json).unwrap();
            }
        }
    }
});
