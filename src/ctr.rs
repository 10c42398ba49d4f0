//! Variation of CTR mode used in CCM.
//!
//! The counter starts at 1 for the payload. A0 is kept aside: its
//! encryption S0 masks the authentication tag.

use zeroize::Zeroize;

use crate::block::format_counter;
use crate::cipher::{Block, BlockCipher, BLOCK_SIZE};

/// Keystream generator for one message.
pub struct Keystream<'a, C: BlockCipher + ?Sized> {
    cipher: &'a C,
    nonce: &'a [u8],
}

impl<'a, C: BlockCipher + ?Sized> Keystream<'a, C> {
    /// The nonce must already be validated.
    pub fn new(cipher: &'a C, nonce: &'a [u8]) -> Self {
        Keystream { cipher, nonce }
    }

    /// Si = E(Ai).
    pub fn block(&self, i: u64) -> Block {
        let mut s = format_counter(self.nonce, i);
        self.cipher.encrypt_block(&mut s);
        s
    }

    /// The tag mask S0.
    pub fn s0(&self) -> Block {
        self.block(0)
    }

    /// XORs S1..Sn over `buf`. Encryption and decryption are the same
    /// operation; the last block only uses a prefix of its Si.
    pub fn apply(&self, buf: &mut [u8]) {
        let mut s = [0u8; BLOCK_SIZE];
        for (chunk, i) in buf.chunks_mut(BLOCK_SIZE).zip(1u64..) {
            s = self.block(i);
            for (b, k) in chunk.iter_mut().zip(s.iter()) {
                *b ^= k;
            }
        }
        s.zeroize();
    }
}
