#![no_main]

use libfuzzer_sys::fuzz_target;

use plasma_crypto::{adapt, from_compact, from_on_chain, from_on_chain_hex, to_compact};

// Signature layout conversion: compact bytes that parse must survive the
// trip through the on-chain layout unchanged.
fuzz_target!(|data: &[u8]| {
    if let Ok(sig) = from_compact(data) {
        let hex = adapt(data).expect("valid compact adapts");
        let back = from_on_chain_hex(&hex).expect("adapted hex parses");
        assert_eq!(to_compact(&back), to_compact(&sig));
    }
    let _ = from_on_chain(data);
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = from_on_chain_hex(s);
    }
});
