//! EIP-1167 minimal-proxy bytecode parsing
//!
//! A minimal proxy's runtime code is a fixed template around the target
//! address; matching it is pure byte inspection, no chain access.

use alloy::primitives::hex;

use crate::types::Address;

/// Shared opening sequence up to the PUSH of the target address
const PREFIX: [u8; 9] = hex!("363d3d373d3d3d363d");

/// Final four bytes of the template (`JUMPI REVERT JUMPDEST RETURN`)
const SUFFIX: [u8; 4] = hex!("57fd5bf3");

/// Fixed bytes between the pushed address and the suffix
const MID_LEN: usize = 11;

/// Extract the hard-coded target from EIP-1167 runtime bytecode.
///
/// The code must start with the shared prefix, followed by one PUSHn
/// opcode with `n` in `1..=20`, the `n` address bytes (left-padded to 20
/// when shorter), and a tail ending in the fixed suffix. Returns `None`
/// on any mismatch.
pub fn parse_minimal_proxy(code: &[u8]) -> Option<Address> {
    if code.len() <= PREFIX.len() || code[..PREFIX.len()] != PREFIX {
        return None;
    }

    // PUSH1 (0x60) through PUSH20 (0x73)
    let push = code[PREFIX.len()];
    if !(0x60..=0x73).contains(&push) {
        return None;
    }
    let addr_len = (push - 0x5f) as usize;

    let addr_start = PREFIX.len() + 1;
    if code.len() < addr_start + addr_len + MID_LEN + SUFFIX.len() {
        return None;
    }
    if code[code.len() - SUFFIX.len()..] != SUFFIX {
        return None;
    }

    let mut target = [0u8; 20];
    target[20 - addr_len..].copy_from_slice(&code[addr_start..addr_start + addr_len]);
    Some(Address::from(target))
}
