//! CBC-MAC as used by CCM.

use zeroize::Zeroize;

use crate::block::AadPrefix;
use crate::cipher::{Block, BlockCipher, BLOCK_SIZE};

/// Running CBC-MAC state.
///
/// Input is XORed into the chaining value byte by byte and the block is
/// encrypted whenever it fills up. [`CbcMac::pad`] closes a partial block,
/// which is the same as zero-padding the input to the block boundary.
pub struct CbcMac<'a, C: BlockCipher + ?Sized> {
    cipher: &'a C,
    x: Block,
    pos: usize,
}

impl<'a, C: BlockCipher + ?Sized> CbcMac<'a, C> {
    /// Starts the chain with X1 = E(B0).
    pub fn new(cipher: &'a C, b0: &Block) -> Self {
        let mut x = *b0;
        cipher.encrypt_block(&mut x);
        CbcMac { cipher, x, pos: 0 }
    }

    /// Feeds `data` into the chain.
    pub fn update(&mut self, data: &[u8]) {
        for byte in data {
            self.x[self.pos] ^= byte;
            self.pos += 1;
            if self.pos == BLOCK_SIZE {
                self.cipher.encrypt_block(&mut self.x);
                self.pos = 0;
            }
        }
    }

    /// Zero-pads the pending input to a block boundary.
    pub fn pad(&mut self) {
        if self.pos != 0 {
            self.cipher.encrypt_block(&mut self.x);
            self.pos = 0;
        }
    }

    /// Pads and returns the full-width MAC.
    pub fn finalize(mut self) -> Block {
        self.pad();
        self.x
    }
}

impl<C: BlockCipher + ?Sized> Drop for CbcMac<'_, C> {
    fn drop(&mut self) {
        self.x.zeroize();
    }
}

/// Computes the raw CCM authentication value T over
/// `B0 | formatted AAD | padded payload`.
///
/// The caller truncates the result to the tag length.
pub fn authenticate<C: BlockCipher + ?Sized>(
    cipher: &C,
    b0: &Block,
    associated_data: &[u8],
    payload: &[u8],
) -> Block {
    let mut mac = CbcMac::new(cipher, b0);
    if !associated_data.is_empty() {
        mac.update(AadPrefix::new(associated_data.len()).as_bytes());
        mac.update(associated_data);
        mac.pad();
    }
    mac.update(payload);
    mac.finalize()
}
