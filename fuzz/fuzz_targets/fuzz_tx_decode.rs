#![no_main]

use libfuzzer_sys::fuzz_target;

use plasma_transactions::{ChildChainTx, HashedTx};

// Transaction decoders never panic, and whatever they accept re-encodes to
// the same bytes.
fuzz_target!(|data: &[u8]| {
    if let Ok(hashed) = HashedTx::decode(data) {
        assert_eq!(hashed.encode().expect("re-encode"), data);
        assert_eq!(hashed.tx().hash().expect("hash"), hashed.hash());
    }
    if let Ok(tx) = ChildChainTx::decode(data) {
        assert_eq!(tx.encode().expect("re-encode"), data);
    }
});
