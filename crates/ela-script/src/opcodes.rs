//! Opcodes used by ELA authorization scripts.
//!
//! Only the subset that appears in standard and multisig programs is
//! defined. A byte in `0x01..=0x4b` pushes that many following bytes.

pub const OP_0: u8 = 0x00;

/// Pushes a 33-byte compressed public key.
pub const OP_PUSH_PUBKEY: u8 = 0x21;

/// Pushes a 64-byte `r || s` signature.
pub const OP_PUSH_SIGNATURE: u8 = 0x40;

pub const OP_1: u8 = 0x51;
pub const OP_2: u8 = 0x52;
pub const OP_3: u8 = 0x53;
pub const OP_16: u8 = 0x60;

/// Trailing byte of a single-key program.
pub const OP_CHECKSIG: u8 = 0xac;

/// Trailing byte of a multisig redeem script.
pub const OP_CHECKMULTISIG: u8 = 0xae;

/// Trailing byte of a cross-chain program.
pub const OP_CROSSCHAIN: u8 = 0xaf;

/// Program hash prefix for single-key programs.
pub const PREFIX_STANDARD: u8 = 0x21;

/// Program hash prefix for multisig programs.
pub const PREFIX_MULTISIG: u8 = 0x12;

/// Program hash prefix for cross-chain programs.
pub const PREFIX_CROSSCHAIN: u8 = 0x4b;

/// Encode `n` in `1..=16` as `OP_1..=OP_16`.
pub fn small_int_op(n: usize) -> Option<u8> {
    if (1..=16).contains(&n) {
        Some(OP_1 + (n as u8) - 1)
    } else {
        None
    }
}

/// Decode `OP_1..=OP_16` to its integer value.
pub fn small_int_value(op: u8) -> Option<usize> {
    if (OP_1..=OP_16).contains(&op) {
        Some((op - OP_1 + 1) as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_int_roundtrip() {
        for n in 1..=16 {
            let op = small_int_op(n).unwrap();
            assert_eq!(small_int_value(op), Some(n));
        }
        assert_eq!(small_int_op(0), None);
        assert_eq!(small_int_op(17), None);
        assert_eq!(small_int_value(OP_0), None);
        assert_eq!(small_int_value(OP_CHECKMULTISIG), None);
        assert_eq!(small_int_op(2), Some(OP_2));
        assert_eq!(small_int_op(3), Some(OP_3));
    }
}
