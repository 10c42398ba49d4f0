//! The single-block cipher primitive CCM is built on.

use aes::cipher::consts::U16;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};

use crate::error::Error;

/// Size of a cipher block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// A single cipher block.
pub type Block = [u8; BLOCK_SIZE];

/// Forward encryption of one 128-bit block.
///
/// CCM never needs the inverse direction. Any RustCrypto cipher with a
/// 16-byte block gets this for free; other primitives can implement it
/// directly.
pub trait BlockCipher {
    /// Encrypts `block` in place.
    fn encrypt_block(&self, block: &mut Block);
}

impl<C> BlockCipher for C
where
    C: BlockEncrypt<BlockSize = U16>,
{
    fn encrypt_block(&self, block: &mut Block) {
        BlockEncrypt::encrypt_block(self, GenericArray::from_mut_slice(block));
    }
}

/// AES keyed with 16, 24 or 32 bytes.
///
/// The key schedule is wiped when the value is dropped.
#[derive(Clone)]
pub enum AesKey {
    /// AES-128.
    Aes128(Aes128),
    /// AES-192.
    Aes192(Aes192),
    /// AES-256.
    Aes256(Aes256),
}

impl AesKey {
    /// Expands `key`, picking the AES variant from its length.
    pub fn new(key: &[u8]) -> Result<Self, Error> {
        let cipher = match key.len() {
            16 => AesKey::Aes128(Aes128::new(GenericArray::from_slice(key))),
            24 => AesKey::Aes192(Aes192::new(GenericArray::from_slice(key))),
            32 => AesKey::Aes256(Aes256::new(GenericArray::from_slice(key))),
            len => {
                tracing::debug!(key_len = len, "rejected AES key");
                return Err(Error::InvalidKeyLength(len));
            }
        };
        Ok(cipher)
    }

    /// Key size in bytes.
    pub fn key_len(&self) -> usize {
        match self {
            AesKey::Aes128(_) => 16,
            AesKey::Aes192(_) => 24,
            AesKey::Aes256(_) => 32,
        }
    }

    /// Borrows the expanded key as a block cipher.
    pub fn as_block_cipher(&self) -> &dyn BlockCipher {
        match self {
            AesKey::Aes128(c) => c,
            AesKey::Aes192(c) => c,
            AesKey::Aes256(c) => c,
        }
    }
}

impl core::fmt::Debug for AesKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "AesKey(AES-{})", self.key_len() * 8)
    }
}
