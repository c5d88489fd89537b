use proptest::prelude::*;

use ela_primitives::ec::{PrivateKey, PublicKey};
use ela_script::{MultisigRedeemScript, Script};

fn arb_public_key() -> impl Strategy<Value = PublicKey> {
    (1u64..u64::MAX).prop_map(|n| {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&n.to_be_bytes());
        PrivateKey::from_bytes(&bytes).unwrap().pub_key()
    })
}

fn arb_multisig() -> impl Strategy<Value = (usize, Vec<PublicKey>)> {
    prop::collection::vec(arb_public_key(), 1..=16)
        .prop_flat_map(|keys| {
            let n = keys.len();
            (1..=n, Just(keys))
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn multisig_parse_recovers_threshold_and_keys((m, keys) in arb_multisig()) {
        let script = Script::multisig(m, &keys).unwrap();
        let parsed = MultisigRedeemScript::parse(script.to_bytes()).unwrap();
        prop_assert_eq!(parsed.required, m);
        prop_assert_eq!(parsed.total(), keys.len());
        let expected: Vec<String> = keys.iter().map(|k| k.to_hex()).collect();
        prop_assert_eq!(parsed.public_keys_hex(), expected);
    }

    #[test]
    fn truncated_multisig_never_parses((m, keys) in arb_multisig(), cut in 1usize..34) {
        let bytes = Script::multisig(m, &keys).unwrap().into_bytes();
        // Drop bytes from the key region while keeping the trailer intact.
        let n = bytes.len();
        let cut = cut.min(n - 3);
        let mut damaged = bytes[..n - 2 - cut].to_vec();
        damaged.extend_from_slice(&bytes[n - 2..]);
        prop_assert!(MultisigRedeemScript::parse(&damaged).is_err());
    }

    #[test]
    fn script_hex_roundtrip(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let script = Script::from_bytes(&data);
        let script2 = Script::from_hex(&script.to_hex()).unwrap();
        prop_assert_eq!(script, script2);
    }

    #[test]
    fn program_hash_is_prefix_plus_hash160(key in arb_public_key()) {
        let script = Script::from_public_key(&key);
        let hash = script.program_hash();
        prop_assert_eq!(hash[0], 0x21);
        prop_assert_eq!(&hash[1..], &ela_primitives::hash::hash160(script.to_bytes())[..]);
    }
}
