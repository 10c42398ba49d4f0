//! A pure-Rust, `#![no_std]` implementation of CCM ("Counter with CBC-MAC")
//! authenticated encryption as specified in [RFC 3610], on top of
//! [RustCrypto's AES] or any other 128-bit block cipher.
//!
//! ## Overview
//! CCM combines CTR mode for confidentiality with CBC-MAC for integrity. One
//! call takes a key, a nonce, the payload and the associated data and returns
//! the ciphertext together with a detached authentication tag. Decryption
//! returns the recovered plaintext and a verdict telling whether the tag was
//! authentic.
//!
//! This implementation accepts:
//! 1. AES-128, AES-192 and AES-256 keys (16, 24 or 32 bytes), or any keyed
//!    cipher implementing [`BlockCipher`].
//! 2. Nonces of 7 to 13 bytes. The length field L is `15 - nonce.len()`, so
//!    a 13-byte nonce limits the payload to 2^16 - 1 bytes and a 7-byte nonce
//!    to 2^64 - 1 bytes.
//! 3. Tags of 4, 6, 8, 10, 12, 14 or 16 bytes.
//! 4. Associated data of any length, including none, and empty payloads (CCM
//!    then degenerates to an authentication mode on the associated data).
//!
//! ## Usage
//! ```rust
//! use ccm_engine::{decrypt, encrypt};
//!
//! let key = [
//!     0x40, 0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4a,
//!     0x4b, 0x4c, 0x4d, 0x4e, 0x4f,
//! ];
//! let nonce = [
//!     0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a,
//!     0x1b,
//! ];
//! let associated_data = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
//! let msg = b"Secret message!";
//!
//! let sealed = encrypt(&key, &nonce, msg, &associated_data, 16).unwrap();
//! assert_eq!(msg.len(), sealed.ciphertext.len());
//!
//! let opened = decrypt(
//!     &key,
//!     &nonce,
//!     &sealed.ciphertext,
//!     &associated_data,
//!     &sealed.tag,
//! )
//! .unwrap();
//!
//! // The plaintext is only meaningful if the tag checked out
//! assert!(opened.auth_ok);
//! assert_eq!(&msg[..], opened.plaintext.as_slice());
//! ```
//!
//! A tag mismatch is not an `Err`: [`decrypt`] hands back the recovered
//! plaintext together with `auth_ok == false` and leaves it to the caller to
//! discard it. [`DecryptResult::into_verified`] turns the verdict into a
//! `Result` and wipes the plaintext on failure.
//!
//! ## In-place Usage (eliminates `alloc` requirement)
//! [`encrypt_in_place_detached`] and [`decrypt_in_place_detached`] work on a
//! caller-owned buffer and never allocate. They take the keyed block cipher
//! directly:
//!
//! ```rust
//! use ccm_engine::aead::KeyInit;
//! use ccm_engine::{decrypt_in_place_detached, encrypt_in_place_detached};
//!
//! let aes = aes::Aes128::new(&[0xC0; 16].into());
//! let nonce = [0xA0; 13];
//! let mut buffer = *b"payload";
//! let mut tag = [0u8; 8];
//!
//! encrypt_in_place_detached(&aes, &nonce, b"hdr", &mut buffer, &mut tag)
//!     .unwrap();
//! assert_ne!(b"payload", &buffer);
//!
//! let auth_ok =
//!     decrypt_in_place_detached(&aes, &nonce, b"hdr", &mut buffer, &tag)
//!         .unwrap();
//! assert!(auth_ok);
//! assert_eq!(b"payload", &buffer);
//! ```
//!
//! ## The `aead` traits
//! [`CcmMode`] fixes the cipher, tag size and nonce size at the type level
//! and implements the [`Aead`] family of traits, so it can be used together
//! with other RustCrypto AEAD implementations:
//!
//! ```rust
//! use ccm_engine::{
//!     aead::{consts::{U13, U8}, Aead, KeyInit, Payload},
//!     Aes128Ccm,
//! };
//!
//! let ccm = Aes128Ccm::<U8, U13>::new(&[0xC0; 16].into());
//! let nonce = [0xA0; 13];
//!
//! let ciphertext = ccm
//!     .encrypt(&nonce.into(), Payload { msg: b"payload", aad: b"hdr" })
//!     .unwrap();
//! let plaintext = ccm
//!     .decrypt(&nonce.into(), Payload { msg: &ciphertext, aad: b"hdr" })
//!     .unwrap();
//! assert_eq!(b"payload", plaintext.as_slice());
//! ```
//!
//! Block formatting, the CBC-MAC and the keystream are internal. They are
//! only reached after the nonce, tag and message lengths have been checked:
//!
//! ```compile_fail
//! let b0 = ccm_engine::block::format_b0(&[0; 13], 0, 0, false);
//! ```
//!
#![cfg_attr(
    feature = "heapless",
    doc = r#"
## In-place Usage with `heapless`
With the `heapless` feature, the [`aead::AeadInPlace`] methods that append
the tag work on a fixed-capacity `heapless::Vec`:

```rust
use ccm_engine::{
    aead::{
        consts::{U13, U8},
        heapless::Vec,
        AeadInPlace, KeyInit,
    },
    Aes128Ccm,
};

let key = [
    0xC0, 0xC1, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6, 0xC7, 0xC8, 0xC9, 0xCA,
    0xCB, 0xCC, 0xCD, 0xCE, 0xCF,
];

// `U8` is the tag size and `U13` the nonce size, both in bytes
let ccm = Aes128Ccm::<U8, U13>::new(&key.into());

let nonce = [
    0x00, 0x00, 0x00, 0x03, 0x02, 0x01, 0x00, 0xA0, 0xA1, 0xA2, 0xA3,
    0xA4, 0xA5,
];
let associated_data = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
let plaintext = [
    0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F, 0x10, 0x11, 0x12,
    0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x1B, 0x1C, 0x1D,
    0x1E,
];

let mut buffer: Vec<u8, 128> = Vec::new();
buffer.extend_from_slice(&plaintext).unwrap();

// Ciphertext followed by the 8-byte tag
ccm.encrypt_in_place(&nonce.into(), &associated_data, &mut buffer)
    .unwrap();
assert_eq!(plaintext.len() + 8, buffer.len());
assert_eq!(
    &buffer[plaintext.len()..],
    &[0x17u8, 0xE8, 0xD1, 0x2C, 0xFD, 0xF9, 0x26, 0xE0]
);

// Back to the plaintext, tag stripped
ccm.decrypt_in_place(&nonce.into(), &associated_data, &mut buffer)
    .unwrap();
assert_eq!(&buffer[..], &plaintext[..]);
```
"#
)]
//! ## Features
//! * `alloc` (default): the `Vec`-returning API and [`Aead`].
//! * `std`: `alloc` plus std support in `aead`.
//! * `heapless`: [`aead::Buffer`] for `heapless::Vec`.
//!
//! ## Security
//! The tag length is an important parameter to estimate the security
//! against collision attacks (that aim at finding different messages that
//! produce the same authentication tag). [RFC 3610] recommends:
//! * a tag length greater than 8 bytes for most applications;
//! * never using the same nonce for two different messages under the same
//!   key, which destroys the security of CCM mode. Nonce management is left
//!   to the caller.
//!
//! Tags are compared in constant time and intermediate MAC and keystream
//! blocks are wiped before returning.
//!
//! [RFC 3610]: https://tools.ietf.org/html/rfc3610
//! [RustCrypto's AES]: https://github.com/RustCrypto/block-ciphers
//! [`Aead`]: https://docs.rs/aead/latest/aead/trait.Aead.html

#![no_std]

#[cfg(any(feature = "alloc", test))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
#[macro_use]
extern crate hex_literal;

mod block;
mod ccm;
pub mod cipher;
mod ctr;
mod error;
mod mac;

pub use aead;
pub use block::{MAX_NONCE_LEN, MAX_TAG_LEN, MIN_NONCE_LEN, MIN_TAG_LEN};
pub use ccm::{
    decrypt_in_place_detached, encrypt_in_place_detached, Aes128Ccm,
    Aes192Ccm, Aes256Ccm, CcmMode, CcmNonceSize, CcmTagSize,
};
#[cfg(feature = "alloc")]
pub use ccm::{
    decrypt, decrypt_with, encrypt, encrypt_with, DecryptResult,
    EncryptResult,
};
pub use cipher::{AesKey, Block, BlockCipher, BLOCK_SIZE};
pub use error::Error;
