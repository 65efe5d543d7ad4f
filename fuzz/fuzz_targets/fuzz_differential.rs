#![no_main]
use libfuzzer_sys::fuzz_target;
use shon::Options;

// The dynamic decoder and the serde path must accept the same inputs.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let tokens: Vec<&str> = s.split('\0').collect();
        let opts = Options::default();

        let dynamic = shon::to_value(&tokens, &opts);
        let via_serde = shon::from_args::<serde_json::Value, _>(&tokens, &opts);

        if dynamic.is_ok() != via_serde.is_ok() {
            panic!(
                "Differential fuzzing: decoders disagree!\nTokens: {:?}\nDynamic: {:?}\nSerde: {:?}",
                tokens, dynamic, via_serde
            );
        }
    }
});
