use proptest::prelude::*;

use plasma_crypto::keypair_from_seed;
use plasma_transactions::{
    deposit_hash, new_deposit, new_transfer, with_hash, ChildChainTx, HashedTx,
};
use plasma_types::{AccountId, CoinSlot};

fn arb_tx() -> impl Strategy<Value = ChildChainTx> {
    (
        "[a-z][a-z0-9]{0,15}",
        any::<u8>(),
        prop::array::uniform32(any::<u8>()),
        prop::option::of(prop::array::uniform32(any::<u8>())),
        any::<u64>(),
        any::<u64>(),
    )
        .prop_map(|(name, seed, slot, to_slot, balance, prev)| {
            let owner = AccountId::new(name).unwrap();
            let key = keypair_from_seed(&[seed; 32]).public;
            match to_slot {
                Some(to) => new_transfer(
                    owner,
                    key,
                    CoinSlot::new(slot),
                    CoinSlot::new(to),
                    balance,
                    prev,
                ),
                None => new_deposit(owner, key, CoinSlot::new(slot), balance, prev),
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// encode(decode(encode(tx))) == encode(tx) for both encodings.
    #[test]
    fn encoding_determinism(tx in arb_tx()) {
        let plain = tx.encode().unwrap();
        prop_assert_eq!(ChildChainTx::decode(&plain).unwrap().encode().unwrap(), plain);

        let hashed = with_hash(tx).unwrap();
        let bytes = hashed.encode().unwrap();
        let decoded = HashedTx::decode(&bytes).unwrap();
        prop_assert_eq!(decoded.encode().unwrap(), bytes);
    }

    /// Deposit hashes depend on the slot alone.
    #[test]
    fn deposit_hash_ignores_payload(
        slot in prop::array::uniform32(any::<u8>()),
        a in any::<u64>(),
        b in any::<u64>(),
    ) {
        let slot = CoinSlot::new(slot);
        let key = keypair_from_seed(&[1; 32]).public;
        let d1 = new_deposit(AccountId::new("alice").unwrap(), key, slot, a, 0);
        let d2 = new_deposit(AccountId::new("bob").unwrap(), key, slot, b, 9);
        prop_assert_eq!(d1.hash().unwrap(), d2.hash().unwrap());
        prop_assert_eq!(d1.hash().unwrap(), deposit_hash(&slot));
    }

    /// Decoders never panic on arbitrary input.
    #[test]
    fn decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..300)) {
        let _ = HashedTx::decode(&data);
        let _ = ChildChainTx::decode(&data);
    }
}
