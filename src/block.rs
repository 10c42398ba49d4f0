//! CCM block formatting (RFC 3610 section 2.2 and 2.3).
//!
//! Everything here is a pure function of lengths and the nonce, so the
//! layouts can be checked without a cipher.
//!
//! ```text
//! B0 = [FLAGS | nonce | l(m)]
//!   FLAGS bits 0-2: L - 1
//!   FLAGS bits 3-5: (M - 2) / 2
//!   FLAGS bit 6:    Adata (1 if AAD is present)
//!   FLAGS bit 7:    always 0
//!   l(m):           message length, L bytes big-endian
//!
//! Ai = [FLAGS | nonce | i]
//!   FLAGS bits 0-2: L - 1, all other bits 0
//!   i:              block counter, L bytes big-endian
//! ```

use crate::cipher::{Block, BLOCK_SIZE};
use crate::error::Error;

/// Shortest allowed nonce.
pub const MIN_NONCE_LEN: usize = 7;
/// Longest allowed nonce.
pub const MAX_NONCE_LEN: usize = 13;
/// Shortest allowed MAC.
pub const MIN_TAG_LEN: usize = 4;
/// Longest allowed MAC.
pub const MAX_TAG_LEN: usize = 16;

// AAD lengths from here on need the 0xFFFE marker: 2^16 - 2^8
const AAD_SHORT_MAX: u64 = 0xFF00;
const AAD_MEDIUM_MAX: u64 = 1 << 32;

/// Width of the length field L for a nonce of `nonce_len` bytes.
pub fn length_field_width(nonce_len: usize) -> Result<usize, Error> {
    if !(MIN_NONCE_LEN..=MAX_NONCE_LEN).contains(&nonce_len) {
        return Err(Error::InvalidNonceLength(nonce_len));
    }
    Ok(15 - nonce_len)
}

/// Checks `tag_len` is one of 4, 6, 8, 10, 12, 14, 16.
pub fn check_tag_len(tag_len: usize) -> Result<(), Error> {
    if !(MIN_TAG_LEN..=MAX_TAG_LEN).contains(&tag_len) || tag_len & 1 != 0 {
        return Err(Error::InvalidTagLength(tag_len));
    }
    Ok(())
}

/// Checks a message of `len` bytes fits into an `l`-byte length field.
pub fn check_message_len(len: usize, l: usize) -> Result<(), Error> {
    // A shift of 64 or more means the field is at least as wide as u64.
    match (len as u64).checked_shr(8 * l as u32) {
        Some(high) if high != 0 => Err(Error::MessageTooLong {
            len,
            max_len_bytes: l,
        }),
        _ => Ok(()),
    }
}

/// Writes `value` big-endian into the last `width` bytes of `block`.
///
/// `value` must fit into `width` bytes, which [`check_message_len`]
/// guarantees for message lengths and block counters alike.
fn put_be(block: &mut Block, value: u64, width: usize) {
    debug_assert!(value.checked_shr(8 * width as u32).unwrap_or(0) == 0);
    let bytes = value.to_be_bytes();
    block[BLOCK_SIZE - width..].copy_from_slice(&bytes[8 - width..]);
}

/// Builds B0, the first block of the CBC-MAC input.
///
/// The nonce must already be validated with [`length_field_width`].
pub fn format_b0(
    nonce: &[u8],
    tag_len: usize,
    msg_len: usize,
    has_aad: bool,
) -> Block {
    let l = 15 - nonce.len();
    let mut b = [0u8; BLOCK_SIZE];
    b[0] = if has_aad { 0x40 } else { 0 }
        | (((tag_len as u8) - 2) / 2) << 3
        | (l as u8 - 1);
    b[1..1 + nonce.len()].copy_from_slice(nonce);
    put_be(&mut b, msg_len as u64, l);
    b
}

/// Builds the counter block Ai.
pub fn format_counter(nonce: &[u8], i: u64) -> Block {
    let l = 15 - nonce.len();
    let mut a = [0u8; BLOCK_SIZE];
    a[0] = l as u8 - 1;
    a[1..1 + nonce.len()].copy_from_slice(nonce);
    put_be(&mut a, i, l);
    a
}

/// The length prefix in front of the associated data.
///
/// Empty when there is no associated data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AadPrefix {
    buf: [u8; 10],
    len: usize,
}

impl AadPrefix {
    /// Encodes the prefix for `aad_len` bytes of associated data.
    pub fn new(aad_len: usize) -> Self {
        let a = aad_len as u64;
        let mut buf = [0u8; 10];
        let len = if a == 0 {
            0
        } else if a < AAD_SHORT_MAX {
            buf[..2].copy_from_slice(&(a as u16).to_be_bytes());
            2
        } else if a < AAD_MEDIUM_MAX {
            buf[..2].copy_from_slice(&[0xFF, 0xFE]);
            buf[2..6].copy_from_slice(&(a as u32).to_be_bytes());
            6
        } else {
            buf[..2].copy_from_slice(&[0xFF, 0xFF]);
            buf[2..10].copy_from_slice(&a.to_be_bytes());
            10
        };
        AadPrefix { buf, len }
    }

    /// The encoded prefix.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}
