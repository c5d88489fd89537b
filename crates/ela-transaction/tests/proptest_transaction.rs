use proptest::prelude::*;

use ela_primitives::chainhash::Hash;
use ela_transaction::{
    Attribute, AttributeUsage, CrossChainAsset, CryptoProvider, ImportPolicy, P256Crypto,
    Program, Transaction, TransactionType, TxOutput, UtxoInput, TX_VERSION_09,
};
use ela_script::Script;

fn arb_attribute() -> impl Strategy<Value = Attribute> {
    (
        prop::sample::select(vec![
            AttributeUsage::Nonce,
            AttributeUsage::Memo,
            AttributeUsage::Description,
            AttributeUsage::Confirmations,
        ]),
        prop::collection::vec(any::<u8>(), 0..48),
    )
        .prop_map(|(usage, data)| Attribute::new(usage, data))
}

fn arb_input() -> impl Strategy<Value = UtxoInput> {
    (
        prop::array::uniform32(any::<u8>()),
        any::<u16>(),
        any::<u32>(),
    )
        .prop_map(|(id, index, sequence)| {
            let mut input = UtxoInput::new(Hash::new(id), index);
            input.sequence = sequence;
            input
        })
}

fn arb_output(version: u8) -> impl Strategy<Value = TxOutput> {
    (
        any::<i64>(),
        any::<u32>(),
        prop::collection::vec(any::<u8>(), 21..=21),
        any::<u8>(),
        prop::collection::vec(any::<u8>(), 0..16),
    )
        .prop_map(move |(amount, lock, hash, output_type, payload)| {
            let mut program_hash = [0u8; 21];
            program_hash.copy_from_slice(&hash);
            let mut output = TxOutput::new(amount, program_hash);
            output.output_lock = lock;
            if version >= TX_VERSION_09 {
                output.version = version;
                output.output_type = output_type;
                output.payload = payload;
            }
            output
        })
}

fn arb_program() -> impl Strategy<Value = Program> {
    (
        prop::collection::vec(any::<u8>(), 0..80),
        prop::collection::vec(any::<u8>(), 0..140),
    )
        .prop_map(|(code, parameter)| Program::new(Script::from_bytes(&code), parameter))
}

/// Strategy to generate a random decodable transaction.
fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (prop::sample::select(vec![0u8, TX_VERSION_09]), any::<bool>()).prop_flat_map(
        |(version, cross_chain)| {
            (
                any::<u8>(),
                any::<u32>(),
                prop::collection::vec(arb_attribute(), 0..3),
                prop::collection::vec(arb_input(), 0..4),
                prop::collection::vec(arb_output(version), 0..4),
                prop::collection::vec(("[a-zA-Z0-9]{0,34}", any::<u64>(), any::<i64>()), 1..3),
                prop::collection::vec(arb_program(), 0..3),
            )
                .prop_map(
                    move |(payload_version, lock_time, attributes, inputs, outputs, entries, programs)| {
                        let mut tx = Transaction::new();
                        tx.version = version;
                        tx.payload_version = payload_version;
                        tx.lock_time = lock_time;
                        tx.attributes = attributes;
                        tx.inputs = inputs;
                        tx.outputs = outputs;
                        tx.programs = programs;
                        if cross_chain {
                            tx.tx_type = TransactionType::TransferCrossChainAsset;
                            tx.cross_chain_assets = entries
                                .into_iter()
                                .enumerate()
                                .map(|(i, (address, output_index, amount))| {
                                    CrossChainAsset::new(i as u32, &address, output_index, amount)
                                })
                                .collect();
                        }
                        tx
                    },
                )
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn transaction_decode_roundtrip(tx in arb_transaction()) {
        let bytes = tx.to_bytes();
        let tx2 = Transaction::from_bytes(&bytes).unwrap();
        prop_assert_eq!(tx2.to_bytes(), bytes);
        prop_assert_eq!(tx2.version, tx.version);
        prop_assert_eq!(tx2.tx_type, tx.tx_type);
        prop_assert_eq!(&tx2.programs, &tx.programs);
    }

    #[test]
    fn hash_ignores_programs(tx in arb_transaction(), program in arb_program()) {
        let mut signed = tx.clone();
        signed.programs.push(program);
        let mut unsigned = tx;
        prop_assert_eq!(signed.hash(), unsigned.hash());
    }

    #[test]
    fn version_byte_present_iff_nonzero(tx in arb_transaction()) {
        let bytes = tx.to_unsigned_bytes();
        if tx.version == 0 {
            prop_assert_eq!(bytes[0], tx.tx_type.as_u8());
        } else {
            prop_assert_eq!(bytes[0], tx.version);
            prop_assert_eq!(bytes[1], tx.tx_type.as_u8());
        }
    }

    #[test]
    fn record_roundtrip_keeps_wire_form(tx in arb_transaction()) {
        let json = tx.to_json().unwrap();
        let back = Transaction::from_json(&json, &ImportPolicy::default()).unwrap();
        prop_assert_eq!(&back.inputs, &tx.inputs);
        prop_assert_eq!(&back.outputs, &tx.outputs);
        prop_assert_eq!(&back.programs, &tx.programs);
        prop_assert_eq!(&back.cross_chain_assets, &tx.cross_chain_assets);
        if !tx.outputs.is_empty() {
            prop_assert_eq!(back.version, tx.version);
        }
        if !tx.attributes.is_empty() {
            prop_assert_eq!(&back.attributes, &tx.attributes);
        }
    }

    #[test]
    fn signer_recovery_matches_signing_keys(
        picks in prop::sample::subsequence(vec![1u8, 2, 3, 4], 1..=4),
    ) {
        let crypto = P256Crypto;
        let keys: Vec<[u8; 32]> = (1u8..=4)
            .map(|n| { let mut k = [0u8; 32]; k[31] = n; k })
            .collect();
        let pubs: Vec<[u8; 33]> = keys
            .iter()
            .map(|k| crypto.derive_public_key(k).unwrap())
            .collect();
        let redeem = Script::multisig_from_keys(2, &pubs).unwrap();

        let mut tx = Transaction::new();
        tx.attributes.push(Attribute::nonce());
        for &n in &picks {
            tx.multi_sign(&crypto, &keys[n as usize - 1], &redeem).unwrap();
        }
        let expected: Vec<String> = picks
            .iter()
            .map(|&n| hex::encode(pubs[n as usize - 1]))
            .collect();
        prop_assert_eq!(tx.recover_signers(&crypto).unwrap(), expected);
    }
}
