//! CCM encryption and decryption (RFC 3610).

use core::marker::PhantomData;

use aead::consts::{U0, U10, U11, U12, U13, U14, U16, U4, U6, U7, U8, U9};
use aead::generic_array::ArrayLength;
use aead::{AeadCore, AeadInPlace, Key, KeyInit, KeySizeUser, Nonce, Tag};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

#[cfg(feature = "alloc")]
use alloc::{vec, vec::Vec};

use crate::block::{
    check_message_len, check_tag_len, format_b0, length_field_width,
};
use crate::cipher::{BlockCipher, BLOCK_SIZE};
#[cfg(feature = "alloc")]
use crate::cipher::AesKey;
use crate::ctr::Keystream;
use crate::error::Error;
use crate::mac::authenticate;

/// Checks nonce, tag and message lengths before any block is processed.
fn validate(
    nonce: &[u8],
    tag_len: usize,
    msg_len: usize,
) -> Result<(), Error> {
    let res = length_field_width(nonce.len()).and_then(|l| {
        check_tag_len(tag_len)?;
        check_message_len(msg_len, l)
    });
    if let Err(err) = &res {
        tracing::debug!(
            nonce_len = nonce.len(),
            tag_len,
            msg_len,
            error = %err,
            "rejected CCM parameters"
        );
    }
    res
}

/// CCM tag generation and encryption procedure.
///
/// Encrypts `buffer` in place and writes the masked tag into `tag`. The tag
/// length M is `tag.len()`.
///
/// # Arguments
/// * `cipher` - Keyed block cipher.
/// * `nonce` - 7 to 13 bytes, never reused with the same key.
/// * `associated_data` - Authenticated but not encrypted.
/// * `buffer` - Plaintext in, ciphertext out.
/// * `tag` - Receives the authentication tag.
///
/// # Details
/// ```text
/// T   = CBC-MAC(B0 | formatted AAD | padded plaintext)[..M]
/// C   = plaintext ^ (S1 | S2 | ... | Sn)
/// tag = T ^ S0[..M]
/// ```
pub fn encrypt_in_place_detached<C: BlockCipher + ?Sized>(
    cipher: &C,
    nonce: &[u8],
    associated_data: &[u8],
    buffer: &mut [u8],
    tag: &mut [u8],
) -> Result<(), Error> {
    validate(nonce, tag.len(), buffer.len())?;

    // Generating the authentication tag
    let b0 = format_b0(
        nonce,
        tag.len(),
        buffer.len(),
        !associated_data.is_empty(),
    );
    let mut t = authenticate(cipher, &b0, associated_data, buffer);

    // Encryption
    let keystream = Keystream::new(cipher, nonce);
    keystream.apply(buffer);

    let mut s0 = keystream.s0();
    for ((out, m), s) in tag.iter_mut().zip(t.iter()).zip(s0.iter()) {
        *out = m ^ s;
    }
    t.zeroize();
    s0.zeroize();

    tracing::trace!(
        msg_len = buffer.len(),
        aad_len = associated_data.len(),
        tag_len = tag.len(),
        "CCM encryption complete"
    );
    Ok(())
}

/// CCM decryption and tag verification procedure.
///
/// Decrypts `buffer` in place and returns whether `tag` is authentic. The
/// tag length M is `tag.len()`.
///
/// A tag mismatch is not an error: `buffer` holds the recovered plaintext
/// either way and the caller must discard it when `false` is returned.
#[must_use = "the plaintext is untrusted unless the verdict is checked"]
pub fn decrypt_in_place_detached<C: BlockCipher + ?Sized>(
    cipher: &C,
    nonce: &[u8],
    associated_data: &[u8],
    buffer: &mut [u8],
    tag: &[u8],
) -> Result<bool, Error> {
    validate(nonce, tag.len(), buffer.len())?;

    // Decryption
    let keystream = Keystream::new(cipher, nonce);
    keystream.apply(buffer);

    // Recomputing the authentication tag over the recovered plaintext
    let b0 = format_b0(
        nonce,
        tag.len(),
        buffer.len(),
        !associated_data.is_empty(),
    );
    let mut t = authenticate(cipher, &b0, associated_data, buffer);
    let mut s0 = keystream.s0();
    let mut expected = [0u8; BLOCK_SIZE];
    for ((e, m), s) in expected.iter_mut().zip(t.iter()).zip(s0.iter()) {
        *e = m ^ s;
    }

    let auth_ok = tags_match(&expected[..tag.len()], tag);
    t.zeroize();
    s0.zeroize();
    expected.zeroize();

    if auth_ok {
        tracing::trace!(
            msg_len = buffer.len(),
            aad_len = associated_data.len(),
            tag_len = tag.len(),
            "CCM decryption complete"
        );
    } else {
        tracing::debug!(
            msg_len = buffer.len(),
            aad_len = associated_data.len(),
            tag_len = tag.len(),
            "CCM tag mismatch"
        );
    }
    Ok(auth_ok)
}

/// Fixed-time tag comparison.
fn tags_match(expected: &[u8], received: &[u8]) -> bool {
    expected.ct_eq(received).into()
}

/// Output of [`encrypt`].
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptResult {
    /// Same length as the plaintext.
    pub ciphertext: Vec<u8>,
    /// The requested number of tag bytes.
    pub tag: Vec<u8>,
}

/// Output of [`decrypt`].
///
/// `plaintext` is filled in even when `auth_ok` is `false`. It must not be
/// used as authentic data in that case; [`DecryptResult::into_verified`]
/// enforces this. The `Debug` output leaves the plaintext out.
#[cfg(feature = "alloc")]
#[derive(Clone, PartialEq, Eq)]
pub struct DecryptResult {
    /// The recovered plaintext.
    pub plaintext: Vec<u8>,
    /// Whether the tag matched.
    pub auth_ok: bool,
}

#[cfg(feature = "alloc")]
impl core::fmt::Debug for DecryptResult {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DecryptResult")
            .field("plaintext_len", &self.plaintext.len())
            .field("auth_ok", &self.auth_ok)
            .finish()
    }
}

#[cfg(feature = "alloc")]
impl DecryptResult {
    /// Returns the plaintext if it is authentic, otherwise wipes it and
    /// returns [`Error::AuthenticationFailed`].
    pub fn into_verified(self) -> Result<Vec<u8>, Error> {
        let mut plaintext = self.plaintext;
        if self.auth_ok {
            Ok(plaintext)
        } else {
            plaintext.zeroize();
            Err(Error::AuthenticationFailed)
        }
    }
}

/// Encrypts `plaintext` with AES under a 16, 24 or 32 byte `key`.
///
/// ```
/// use ccm_engine::{decrypt, encrypt};
///
/// let key = [0x40u8; 16];
/// let nonce = [0x10u8; 12];
///
/// let sealed = encrypt(&key, &nonce, b"attack at dawn", b"header", 8)?;
/// assert_eq!(14, sealed.ciphertext.len());
/// assert_eq!(8, sealed.tag.len());
///
/// let opened = decrypt(&key, &nonce, &sealed.ciphertext, b"header", &sealed.tag)?;
/// assert!(opened.auth_ok);
/// assert_eq!(b"attack at dawn", &opened.plaintext[..]);
/// # Ok::<(), ccm_engine::Error>(())
/// ```
#[cfg(feature = "alloc")]
pub fn encrypt(
    key: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
    associated_data: &[u8],
    tag_len: usize,
) -> Result<EncryptResult, Error> {
    let aes = AesKey::new(key)?;
    encrypt_with(
        aes.as_block_cipher(),
        nonce,
        plaintext,
        associated_data,
        tag_len,
    )
}

/// Decrypts `ciphertext` with AES under a 16, 24 or 32 byte `key`.
///
/// The tag length is taken from `tag`. Only malformed parameters produce an
/// `Err`; a wrong tag yields `auth_ok == false`.
#[cfg(feature = "alloc")]
pub fn decrypt(
    key: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
    associated_data: &[u8],
    tag: &[u8],
) -> Result<DecryptResult, Error> {
    let aes = AesKey::new(key)?;
    decrypt_with(
        aes.as_block_cipher(),
        nonce,
        ciphertext,
        associated_data,
        tag,
    )
}

/// [`encrypt`] over a caller-supplied block cipher.
#[cfg(feature = "alloc")]
pub fn encrypt_with<C: BlockCipher + ?Sized>(
    cipher: &C,
    nonce: &[u8],
    plaintext: &[u8],
    associated_data: &[u8],
    tag_len: usize,
) -> Result<EncryptResult, Error> {
    // Checked before allocating the tag buffer
    check_tag_len(tag_len)?;

    let mut ciphertext = plaintext.to_vec();
    let mut tag = vec![0u8; tag_len];
    encrypt_in_place_detached(
        cipher,
        nonce,
        associated_data,
        &mut ciphertext,
        &mut tag,
    )?;
    Ok(EncryptResult { ciphertext, tag })
}

/// [`decrypt`] over a caller-supplied block cipher.
#[cfg(feature = "alloc")]
pub fn decrypt_with<C: BlockCipher + ?Sized>(
    cipher: &C,
    nonce: &[u8],
    ciphertext: &[u8],
    associated_data: &[u8],
    tag: &[u8],
) -> Result<DecryptResult, Error> {
    let mut plaintext = ciphertext.to_vec();
    let auth_ok = decrypt_in_place_detached(
        cipher,
        nonce,
        associated_data,
        &mut plaintext,
        tag,
    )?;
    Ok(DecryptResult { plaintext, auth_ok })
}

mod private {
    pub trait SealedTag {}
    pub trait SealedNonce {}
}

/// Marker trait for valid AES-CCM MAC tag sizes.
pub trait CcmTagSize: ArrayLength<u8> + private::SealedTag {}

/// Marker trait for valid AES-CCM nonce sizes.
pub trait CcmNonceSize: ArrayLength<u8> + private::SealedNonce {}

macro_rules! impl_sizes {
    ($marker:ident, $sealed:ident: $($size:ty),+) => {
        $(
            impl private::$sealed for $size {}
            impl $marker for $size {}
        )+
    };
}

impl_sizes!(CcmTagSize, SealedTag: U4, U6, U8, U10, U12, U14, U16);
impl_sizes!(CcmNonceSize, SealedNonce: U7, U8, U9, U10, U11, U12, U13);

/// CCM with the cipher, tag size and nonce size fixed at the type level.
///
/// Implements the RustCrypto [`aead`] traits. Unlike [`decrypt`], a failed
/// verification through [`AeadInPlace::decrypt_in_place_detached`] wipes
/// the buffer and returns [`aead::Error`].
#[derive(Clone)]
pub struct CcmMode<C, M, N> {
    cipher: C,
    sizes: PhantomData<(M, N)>,
}

/// AES-128-CCM.
pub type Aes128Ccm<M, N> = CcmMode<aes::Aes128, M, N>;
/// AES-192-CCM.
pub type Aes192Ccm<M, N> = CcmMode<aes::Aes192, M, N>;
/// AES-256-CCM.
pub type Aes256Ccm<M, N> = CcmMode<aes::Aes256, M, N>;

impl<C, M, N> CcmMode<C, M, N>
where
    C: BlockCipher,
    M: CcmTagSize,
    N: CcmNonceSize,
{
    /// Wraps an already keyed cipher.
    pub fn from_cipher(cipher: C) -> Self {
        CcmMode {
            cipher,
            sizes: PhantomData,
        }
    }
}

impl<C, M, N> From<C> for CcmMode<C, M, N>
where
    C: BlockCipher,
    M: CcmTagSize,
    N: CcmNonceSize,
{
    fn from(cipher: C) -> Self {
        Self::from_cipher(cipher)
    }
}

impl<C, M, N> KeySizeUser for CcmMode<C, M, N>
where
    C: BlockCipher + KeyInit,
    M: CcmTagSize,
    N: CcmNonceSize,
{
    type KeySize = C::KeySize;
}

impl<C, M, N> KeyInit for CcmMode<C, M, N>
where
    C: BlockCipher + KeyInit,
    M: CcmTagSize,
    N: CcmNonceSize,
{
    fn new(key: &Key<Self>) -> Self {
        Self::from_cipher(C::new(key))
    }
}

impl<C, M, N> AeadCore for CcmMode<C, M, N>
where
    C: BlockCipher,
    M: CcmTagSize,
    N: CcmNonceSize,
{
    type NonceSize = N;
    type TagSize = M;
    type CiphertextOverhead = U0;
}

impl<C, M, N> AeadInPlace for CcmMode<C, M, N>
where
    C: BlockCipher,
    M: CcmTagSize,
    N: CcmNonceSize,
{
    fn encrypt_in_place_detached(
        &self,
        nonce: &Nonce<Self>,
        associated_data: &[u8],
        buffer: &mut [u8],
    ) -> aead::Result<Tag<Self>> {
        let mut tag = Tag::<Self>::default();
        encrypt_in_place_detached(
            &self.cipher,
            nonce,
            associated_data,
            buffer,
            &mut tag,
        )
        .map_err(|_| aead::Error)?;
        Ok(tag)
    }

    fn decrypt_in_place_detached(
        &self,
        nonce: &Nonce<Self>,
        associated_data: &[u8],
        buffer: &mut [u8],
        tag: &Tag<Self>,
    ) -> aead::Result<()> {
        let auth_ok = decrypt_in_place_detached(
            &self.cipher,
            nonce,
            associated_data,
            buffer,
            tag,
        )
        .map_err(|_| aead::Error)?;
        if auth_ok {
            Ok(())
        } else {
            buffer.zeroize();
            Err(aead::Error)
        }
    }
}
