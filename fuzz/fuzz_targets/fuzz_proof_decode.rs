#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use plasma_smt::MerkleProof;
use plasma_types::{BlockRoot, CoinSlot, TxHash};

#[derive(Debug, Arbitrary)]
struct ProofInput {
    depth: u8,
    bytes: Vec<u8>,
    slot: [u8; 32],
    leaf: [u8; 32],
    root: [u8; 32],
}

// Compressed proofs from untrusted callers: decoding and verification must
// never panic, and a decoded proof has exactly `depth` siblings.
fuzz_target!(|input: ProofInput| {
    let depth = input.depth as usize + 1;
    if let Ok(proof) = MerkleProof::from_compressed(&input.bytes, depth) {
        assert_eq!(proof.depth(), depth);
        let _ = proof.verify(
            &BlockRoot::new(input.root),
            &CoinSlot::new(input.slot),
            &TxHash::new(input.leaf),
        );
        let _ = proof.to_compressed();
    }
});
