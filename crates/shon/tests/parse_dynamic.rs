#![cfg(feature = "json")]
use serde_json::json;
use shon::{Number, Options, Value};

fn parse(args: &[&str]) -> serde_json::Value {
    let v = shon::to_value(args, &Options::default())
        .unwrap_or_else(|e| panic!("to_value({args:?}): {e}"));
    serde_json::to_value(&v).unwrap()
}

#[test]
fn dynamic_table() {
    let cases: &[(&[&str], serde_json::Value)] = &[
        (&["[", "--hello", "World", "]"], json!({"hello": "World"})),
        (&["[", "beep", "boop", "]"], json!(["beep", "boop"])),
        (&["[", "1", "2", "3", "]"], json!([1, 2, 3])),
        (&[""], json!("")),
        (&["+10"], json!(10)),
        (&["-10"], json!(-10)),
        (&["4.2"], json!(4.2)),
        (&["10"], json!(10)),
        (&["--", "10"], json!("10")),
        (&["a"], json!("a")),
        (&["-t"], json!(true)),
        (&["-f"], json!(false)),
        (&["-n"], json!(null)),
        (&["-u"], json!(null)),
        (&["[", "]"], json!([])),
        (&["[]"], json!([])),
        (&["[", "[]", "]"], json!([[]])),
        (&["[", "[", "hello", "world", "]", "]"], json!([["hello", "world"]])),
        (&["[", "[", "[--]", "[--]", "]", "]"], json!([[{}, {}]])),
        (&["[", "[", "--key", "10", "]", "]"], json!([{"key": 10}])),
        (&["[", "[", "--key=10", "]", "]"], json!([{"key": 10}])),
        (&["[", "[", "--key=-10", "]", "]"], json!([{"key": -10}])),
        (&["[", "[", "--key=--", "--", "]", "]"], json!([{"key": "--"}])),
        (&["[--]"], json!({})),
        (&["[", "--", "--", "]"], json!(["--"])),
        (&["[", "+10", "]"], json!([10])),
        (&["[", "--a", "+10", "]"], json!({"a": 10})),
        (&["[", "--foo", "+10", "--bar", "20", "]"], json!({"foo": 10, "bar": 20})),
        (&["[", "--foo=+10", "--bar=20", "]"], json!({"foo": 10, "bar": 20})),
        (&["[", "--foo=+10", "--bar=--", "20", "]"], json!({"foo": 10, "bar": "20"})),
        (&["[", "--foo=+10", "--bar", "--", "20", "]"], json!({"foo": 10, "bar": "20"})),
        (&["[", "[", "hi", "]", "]"], json!([["hi"]])),
        (&["[", "--xs", "[", "--ys", "y", "]", "]"], json!({"xs": {"ys": "y"}})),
        (&["--", "["], json!("[")),
        (&["--", "]"], json!("]")),
        (&["--", "[a"], json!("[a")),
        (&["--", "]b"], json!("]b")),
    ];
    for (args, want) in cases {
        assert_eq!(&parse(args), want, "args {args:?}");
    }
}

#[test]
fn object_keys_keep_input_order() {
    let v = shon::to_value(&["[", "--z", "1", "--a", "2", "--m", "3", "]"], &Options::default()).unwrap();
    let Value::Object(map) = v else {
        panic!("expected object");
    };
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn repeated_key_keeps_last_value() {
    assert_eq!(parse(&["[", "--a", "1", "--a", "2", "]"]), json!({"a": 2}));
}

#[test]
fn integers_and_floats_are_distinguished() {
    let opts = Options::default();
    assert_eq!(shon::to_value(&["42"], &opts).unwrap(), Value::Number(Number::I64(42)));
    assert_eq!(shon::to_value(&["4e2"], &opts).unwrap(), Value::Number(Number::F64(400.0)));
    // Too large for i64, so it falls back to a float.
    assert_eq!(
        shon::to_value(&["99999999999999999999"], &opts).unwrap(),
        Value::Number(Number::F64(1e20))
    );
}

#[test]
fn preserved_literals_serialize_verbatim() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Options::default().with_preserve_numeric_literal(true);
    let v = shon::to_value(&["[", "1.50", "123456789012345678901234567890", "-0", "]"], &opts)?;
    assert_eq!(
        serde_json::to_string(&v)?,
        "[1.50,123456789012345678901234567890,-0]"
    );
    Ok(())
}

#[test]
fn preserve_applies_through_from_args() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Options::default().with_preserve_numeric_literal(true);
    let v: Value = shon::from_args(&["[", "--n", "1e3", "]"], &opts)?;
    assert_eq!(v.get("n"), Some(&Value::Number(Number::Literal("1e3".into()))));

    let v: Value = shon::from_args(&["[", "--n", "1e3", "]"], &Options::default())?;
    assert_eq!(v.get("n"), Some(&Value::Number(Number::F64(1000.0))));
    Ok(())
}

#[test]
fn malformed_number_is_rejected() {
    let err = shon::to_value(&["1-2"], &Options::default()).unwrap_err();
    assert_eq!(err.to_string(), "decode error: bad number \"1-2\"");
}
