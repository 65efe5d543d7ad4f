#![no_main]
use libfuzzer_sys::{arbitrary, fuzz_target};
use shon::{Map, Number, Options, Value};
use arbitrary::Arbitrary;

const MAX_DEPTH: usize = 8;
const MAX_ARRAY_SIZE: usize = 20;
const MAX_OBJECT_SIZE: usize = 20;

#[derive(Arbitrary, Debug)]
struct FuzzValue {
    choice: u8,
}

impl FuzzValue {
    fn to_value(&self, u: &mut arbitrary::Unstructured, depth: usize) -> arbitrary::Result<Value> {
        if depth >= MAX_DEPTH {
            return Ok(Value::Null);
        }

        Ok(match self.choice % 10 {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2..=3 => Value::Number(Number::I64(u.arbitrary()?)),
            4 => Value::String(u.arbitrary()?),
            5..=7 => {
                let size = u.int_in_range(0..=MAX_ARRAY_SIZE)?;
                let mut arr = Vec::with_capacity(size);
                for _ in 0..size {
                    let fv: FuzzValue = u.arbitrary()?;
                    arr.push(fv.to_value(u, depth + 1)?);
                }
                Value::Array(arr)
            }
            _ => {
                let size = u.int_in_range(0..=MAX_OBJECT_SIZE)?;
                let mut obj = Map::new();
                for _ in 0..size {
                    let key: String = u.arbitrary()?;
                    if key.is_empty() || key.contains('=') {
                        continue;
                    }
                    let fv: FuzzValue = u.arbitrary()?;
                    obj.insert(key, fv.to_value(u, depth + 1)?);
                }
                Value::Object(obj)
            }
        })
    }
}

fn write_tokens(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => out.push("-n".into()),
        Value::Bool(b) => out.push(if *b { "-t" } else { "-f" }.into()),
        Value::Number(n) => out.push(n.to_string()),
        Value::String(s) => {
            if s.is_empty() {
                out.push(String::new());
            } else {
                out.push("--".into());
                out.push(s.clone());
            }
        }
        Value::Array(items) => {
            out.push("[".into());
            for item in items {
                write_tokens(item, out);
            }
            out.push("]".into());
        }
        Value::Object(map) if map.is_empty() => out.push("[--]".into()),
        Value::Object(map) => {
            out.push("[".into());
            for (k, v) in map {
                out.push(format!("--{}", k));
                write_tokens(v, out);
            }
            out.push("]".into());
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = arbitrary::Unstructured::new(data);

    if let Ok(fv) = u.arbitrary::<FuzzValue>() {
        if let Ok(value) = fv.to_value(&mut u, 0) {
            let mut tokens = Vec::new();
            write_tokens(&value, &mut tokens);
            match shon::to_value(&tokens, &Options::default()) {
                Ok(decoded) => {
                    if value != decoded {
                        panic!(
                            "Structured roundtrip mismatch!\nOriginal: {:?}\nTokens: {:?}\nDecoded: {:?}",
                            value, tokens, decoded
                        );
                    }
                }
                Err(e) => {
                    panic!(
                        "Failed to parse structured input!\nOriginal: {:?}\nTokens: {:?}\nError: {}",
                        value, tokens, e
                    );
                }
            }
        }
    }
});
