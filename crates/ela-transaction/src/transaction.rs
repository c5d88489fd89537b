//! Core transaction type for the ELA blockchain.
//!
//! Represents a complete transaction: header bytes, attributes, inputs,
//! outputs, optional cross-chain entries, and the signature programs that
//! authorize it. Provides the canonical unsigned payload (the basis of both
//! the content hash and the signed digest), full binary serialization and
//! decoding, single- and multi-signature signing, and recovery of which
//! multisig participants have already signed.

use tracing::{debug, warn};

use ela_primitives::chainhash::Hash;
use ela_primitives::util::{ElaReader, ElaWriter, VarInt};
use ela_script::{MultisigRedeemScript, Script};

use crate::attribute::Attribute;
use crate::crypto::{CryptoProvider, P256Crypto, SIGNATURE_BLOCK_LEN};
use crate::cross_chain::CrossChainAsset;
use crate::error::read_err;
use crate::input::UtxoInput;
use crate::output::TxOutput;
use crate::program::Program;
use crate::TransactionError;

/// First transaction version that is written on the wire.
///
/// Version 0 is the legacy format, which has no version byte at all.
pub const TX_VERSION_09: u8 = 9;

/// The transaction type byte, selecting the payload semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TransactionType {
    CoinBase = 0x00,
    RegisterAsset = 0x01,
    TransferAsset = 0x02,
    Record = 0x03,
    Deploy = 0x04,
    SideChainPow = 0x05,
    RechargeToSideChain = 0x06,
    WithdrawFromSideChain = 0x07,
    TransferCrossChainAsset = 0x08,
}

impl TransactionType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for TransactionType {
    type Error = TransactionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0x00 => TransactionType::CoinBase,
            0x01 => TransactionType::RegisterAsset,
            0x02 => TransactionType::TransferAsset,
            0x03 => TransactionType::Record,
            0x04 => TransactionType::Deploy,
            0x05 => TransactionType::SideChainPow,
            0x06 => TransactionType::RechargeToSideChain,
            0x07 => TransactionType::WithdrawFromSideChain,
            0x08 => TransactionType::TransferCrossChainAsset,
            other => {
                return Err(TransactionError::InvalidTransaction(format!(
                    "unknown transaction type {:#04x}",
                    other
                )))
            }
        })
    }
}

/// An ELA transaction.
///
/// # Wire format
///
/// | Field               | Size                                    |
/// |---------------------|-----------------------------------------|
/// | version             | 1 byte, absent when `version == 0`      |
/// | type                | 1 byte                                  |
/// | payload_version     | 1 byte                                  |
/// | cross-chain entries | VarInt count + entries, absent if none  |
/// | attributes          | VarInt count + entries                  |
/// | inputs              | VarInt count + entries                  |
/// | outputs             | VarInt count + entries (version-aware)  |
/// | lock_time           | 4 bytes (LE)                            |
/// | programs            | VarInt count + entries                  |
///
/// Everything up to and including `lock_time` is the unsigned payload.
///
/// # Hash cache
///
/// `hash()` caches the content hash on first use and never recomputes it.
/// Mutating the transaction afterwards leaves the cached value stale until
/// `clear_cached_hash()` is called.
#[derive(Clone, Debug)]
pub struct Transaction {
    /// 0 for the legacy format, otherwise `TX_VERSION_09` or later.
    pub version: u8,

    pub tx_type: TransactionType,

    pub payload_version: u8,

    pub lock_time: u32,

    /// Informational only; not serialized or hashed.
    pub fee: u64,

    pub attributes: Vec<Attribute>,
    pub inputs: Vec<UtxoInput>,
    pub outputs: Vec<TxOutput>,
    pub cross_chain_assets: Vec<CrossChainAsset>,
    pub programs: Vec<Program>,

    hash: Option<Hash>,
}

impl Transaction {
    /// Create an empty legacy `TransferAsset` transaction.
    pub fn new() -> Self {
        Transaction {
            version: 0,
            tx_type: TransactionType::TransferAsset,
            payload_version: 0,
            lock_time: 0,
            fee: 0,
            attributes: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            cross_chain_assets: Vec::new(),
            programs: Vec::new(),
            hash: None,
        }
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Write the unsigned payload: every field covered by the content hash
    /// and by signatures, in canonical order.
    ///
    /// The payload is not self-delimiting; only the full transaction
    /// envelope can be decoded.
    ///
    /// # Arguments
    /// * `writer` - The writer to append serialized bytes to.
    pub fn write_unsigned_to(&self, writer: &mut ElaWriter) {
        if self.version != 0 {
            writer.write_u8(self.version);
        }
        writer.write_u8(self.tx_type.as_u8());
        writer.write_u8(self.payload_version);

        if !self.cross_chain_assets.is_empty() {
            writer.write_varint(VarInt::from(self.cross_chain_assets.len()));
            for entry in &self.cross_chain_assets {
                entry.write_to(writer);
            }
        }

        writer.write_varint(VarInt::from(self.attributes.len()));
        for attribute in &self.attributes {
            attribute.write_to(writer);
        }

        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(writer);
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(writer, self.version);
        }

        writer.write_u32_le(self.lock_time);
    }

    /// Serialize the unsigned payload to a byte vector.
    pub fn to_unsigned_bytes(&self) -> Vec<u8> {
        let mut writer = ElaWriter::with_capacity(256);
        self.write_unsigned_to(&mut writer);
        writer.into_bytes()
    }

    /// Write the full transaction: unsigned payload followed by the
    /// signature programs.
    pub fn write_to(&self, writer: &mut ElaWriter) {
        self.write_unsigned_to(writer);
        writer.write_varint(VarInt::from(self.programs.len()));
        for program in &self.programs {
            program.write_to(writer);
        }
    }

    /// Serialize the full transaction to raw bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ElaWriter::with_capacity(512);
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Serialize the full transaction to a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a transaction from a hex-encoded string.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str).map_err(|e| {
            TransactionError::SerializationError(format!("invalid hex: {}", e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes.
    ///
    /// The slice must hold exactly one complete transaction.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or a `TransactionError` if the data
    /// is truncated, malformed, or has trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = ElaReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    /// Deserialize a full transaction from an `ElaReader`.
    ///
    /// A leading byte of `TX_VERSION_09` or more is a version byte; anything
    /// lower is the type byte of a legacy transaction. Cross-chain entries
    /// are expected exactly when the type is `TransferCrossChainAsset`.
    pub fn read_from(reader: &mut ElaReader) -> Result<Self, TransactionError> {
        let first = reader.read_u8().map_err(read_err("version"))?;
        let (version, type_byte) = if first >= TX_VERSION_09 {
            (first, reader.read_u8().map_err(read_err("type"))?)
        } else {
            (0, first)
        };
        let tx_type = TransactionType::try_from(type_byte)?;
        let payload_version = reader.read_u8().map_err(read_err("payload version"))?;

        let mut tx = Transaction::new();
        tx.version = version;
        tx.tx_type = tx_type;
        tx.payload_version = payload_version;

        if tx_type == TransactionType::TransferCrossChainAsset {
            let count = read_count(reader, "cross chain count")?;
            for index in 0..count {
                let index = u32::try_from(index).map_err(|_| {
                    TransactionError::SerializationError("too many cross chain entries".into())
                })?;
                tx.cross_chain_assets
                    .push(CrossChainAsset::read_from(reader, index)?);
            }
        }

        let count = read_count(reader, "attribute count")?;
        for _ in 0..count {
            tx.attributes.push(Attribute::read_from(reader)?);
        }

        let count = read_count(reader, "input count")?;
        for _ in 0..count {
            tx.inputs.push(UtxoInput::read_from(reader)?);
        }

        let count = read_count(reader, "output count")?;
        for _ in 0..count {
            tx.outputs.push(TxOutput::read_from(reader, version)?);
        }

        tx.lock_time = reader.read_u32_le().map_err(read_err("lock time"))?;

        let count = read_count(reader, "program count")?;
        for _ in 0..count {
            tx.programs.push(Program::read_from(reader)?);
        }

        Ok(tx)
    }

    // -----------------------------------------------------------------
    // Content hash
    // -----------------------------------------------------------------

    /// Return the content hash, computing and caching it on first use.
    ///
    /// Equivalent to `hash_with(&P256Crypto)`: SHA-256d of the unsigned
    /// payload, so programs, `fee`, and the cache itself never affect it.
    /// A cached value is returned unchanged even if fields were mutated
    /// since; call `clear_cached_hash()` after mutating.
    ///
    /// # Returns
    /// The 32-byte content hash in internal byte order.
    pub fn hash(&mut self) -> Hash {
        self.hash_with(&P256Crypto)
    }

    /// Return the content hash, computing it with the provider's
    /// `hash_double` over the unsigned payload and caching it on first use.
    ///
    /// The cache does not record which provider filled it.
    pub fn hash_with<C: CryptoProvider + ?Sized>(&mut self, crypto: &C) -> Hash {
        if let Some(hash) = self.hash {
            return hash;
        }
        let hash = Hash::new(crypto.hash_double(&self.to_unsigned_bytes()));
        self.hash = Some(hash);
        hash
    }

    /// The content hash in display (byte-reversed) hex.
    pub fn hash_hex(&mut self) -> String {
        self.hash().to_string()
    }

    /// The cached content hash, if one has been computed.
    pub fn cached_hash(&self) -> Option<Hash> {
        self.hash
    }

    /// Drop the cached content hash so the next `hash()` recomputes it.
    pub fn clear_cached_hash(&mut self) {
        self.hash = None;
    }

    // -----------------------------------------------------------------
    // Signing
    // -----------------------------------------------------------------

    /// The digest that signatures commit to: one round of the provider's
    /// hash over the unsigned payload.
    pub fn signing_digest<C: CryptoProvider + ?Sized>(&self, crypto: &C) -> [u8; 32] {
        crypto.hash_single(&self.to_unsigned_bytes())
    }

    /// Produce a 65-byte signature block over the signing digest.
    ///
    /// Does not modify the transaction.
    ///
    /// # Arguments
    /// * `crypto` - The crypto provider.
    /// * `private_key` - Raw private key bytes.
    ///
    /// # Returns
    /// The signature block, or an error if the key is unusable.
    pub fn sign_data<C: CryptoProvider + ?Sized>(
        &self,
        crypto: &C,
        private_key: &[u8],
    ) -> Result<Vec<u8>, TransactionError> {
        let public_key = crypto.derive_public_key(private_key)?;
        let payload = self.to_unsigned_bytes();
        let digest = crypto.hash_single(&payload);
        debug!(
            public_key = %hex::encode(public_key),
            payload_len = payload.len(),
            "signing transaction"
        );
        Ok(crypto.sign(private_key, &digest)?.to_vec())
    }

    /// Sign as a single key and append a new standard program.
    ///
    /// Each call appends another program; it never touches existing ones.
    pub fn sign<C: CryptoProvider + ?Sized>(
        &mut self,
        crypto: &C,
        private_key: &[u8],
    ) -> Result<(), TransactionError> {
        let public_key = crypto.derive_public_key(private_key)?;
        let code = Script::standard(&public_key)?;
        let parameter = self.sign_data(crypto, private_key)?;
        self.programs.push(Program::new(code, parameter));
        Ok(())
    }

    /// Add one signature to the transaction's single multisig program.
    ///
    /// With no programs, a program is created with `redeem_script` as its
    /// code. With more than one program the call is a no-op: a warning is
    /// logged and `Ok(())` returned. Signatures are appended in call order
    /// with no sorting or duplicate detection.
    ///
    /// # Arguments
    /// * `crypto` - The crypto provider.
    /// * `private_key` - Raw private key bytes of one participant.
    /// * `redeem_script` - The M-of-N redeem script.
    pub fn multi_sign<C: CryptoProvider + ?Sized>(
        &mut self,
        crypto: &C,
        private_key: &[u8],
        redeem_script: &Script,
    ) -> Result<(), TransactionError> {
        if self.programs.len() > 1 {
            warn!(
                programs = self.programs.len(),
                "multisig requires a single program, transaction left unchanged"
            );
            return Ok(());
        }

        let signature = self.sign_data(crypto, private_key)?;
        if self.programs.is_empty() {
            self.programs
                .push(Program::new(redeem_script.clone(), Vec::new()));
        }
        self.programs[0].parameter.extend_from_slice(&signature);
        Ok(())
    }

    // -----------------------------------------------------------------
    // Verification
    // -----------------------------------------------------------------

    /// Hex public keys of the multisig participants that have signed.
    ///
    /// Applies only to a transaction with exactly one program whose code
    /// ends in `OP_CHECKMULTISIG`; otherwise the result is empty. Each
    /// 65-byte signature block is credited to the first listed key it
    /// verifies against that has not already been credited, so a key is
    /// reported at most once, in the order of its matching block.
    ///
    /// # Returns
    /// The signer keys, or an error if the redeem script is malformed.
    pub fn recover_signers<C: CryptoProvider + ?Sized>(
        &self,
        crypto: &C,
    ) -> Result<Vec<String>, TransactionError> {
        if self.programs.len() != 1 {
            debug!(
                programs = self.programs.len(),
                "signer recovery needs exactly one program"
            );
            return Ok(Vec::new());
        }
        let program = &self.programs[0];
        if !program.code.is_multisig() {
            warn!("not a multisig transaction");
            return Ok(Vec::new());
        }

        let redeem = MultisigRedeemScript::parse(program.code.to_bytes())?;
        let digest = self.signing_digest(crypto);
        let signers = match_signers(crypto, &digest, &redeem, program);
        Ok(signers
            .into_iter()
            .map(|i| hex::encode(&redeem.public_keys[i]))
            .collect())
    }

    /// Check the signatures of the program at `index`.
    ///
    /// A standard program verifies when its parameter is one signature
    /// block valid for the embedded key. A multisig program verifies when
    /// at least M distinct participants have signed and every block is
    /// credited to one of them. Anything else is `false`.
    pub fn verify_program<C: CryptoProvider + ?Sized>(&self, crypto: &C, index: usize) -> bool {
        let Some(program) = self.programs.get(index) else {
            return false;
        };
        let digest = self.signing_digest(crypto);

        if let Some(public_key) = program.code.standard_public_key() {
            return program.parameter.len() == SIGNATURE_BLOCK_LEN
                && crypto.verify(public_key, &digest, &program.parameter);
        }

        let Ok(redeem) = MultisigRedeemScript::parse(program.code.to_bytes()) else {
            return false;
        };
        if program.parameter.len() % SIGNATURE_BLOCK_LEN != 0 {
            return false;
        }
        let signers = match_signers(crypto, &digest, &redeem, program);
        signers.len() >= redeem.required && signers.len() == program.signature_count()
    }

    // -----------------------------------------------------------------
    // Keys
    // -----------------------------------------------------------------

    /// Distinct private keys attached to the inputs, in first-seen order.
    pub fn signing_keys(&self) -> Vec<&[u8]> {
        let mut keys: Vec<&[u8]> = Vec::new();
        for key in self.inputs.iter().filter_map(UtxoInput::private_key) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Transaction {
    /// Display the transaction as its hex-encoded serialization.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Read a collection count, refusing counts that cannot fit in the bytes
/// left in the reader.
fn read_count(reader: &mut ElaReader, field: &'static str) -> Result<u64, TransactionError> {
    let count = reader.read_varint().map_err(read_err(field))?.value();
    if count > reader.remaining() as u64 {
        return Err(TransactionError::SerializationError(format!(
            "{} {} exceeds remaining {} bytes",
            field,
            count,
            reader.remaining()
        )));
    }
    Ok(count)
}

/// Indexes into `redeem.public_keys` of the keys credited with a signature
/// block, first match per block, each key at most once.
fn match_signers<C: CryptoProvider + ?Sized>(
    crypto: &C,
    digest: &[u8; 32],
    redeem: &MultisigRedeemScript,
    program: &Program,
) -> Vec<usize> {
    let mut credited = vec![false; redeem.total()];
    let mut signers = Vec::new();
    for block in program.signature_blocks() {
        let matched = redeem
            .public_keys
            .iter()
            .enumerate()
            .find(|(i, key)| !credited[*i] && crypto.verify(key, digest, block));
        if let Some((i, _)) = matched {
            credited[i] = true;
            signers.push(i);
        }
    }
    signers
}
