#![no_main]

use libfuzzer_sys::fuzz_target;

// Every accepted input is the one canonical encoding of its value.
fuzz_target!(|data: &[u8]| {
    if let Ok(value) = plasma_codec::decode(data) {
        let encoded = plasma_codec::encode(&value).expect("decoded values re-encode");
        assert_eq!(encoded, data);
        let _ = value.to_json();
    }
});
