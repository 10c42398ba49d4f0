//! CCM errors.

use thiserror::Error;

/// The error type for CCM operations.
///
/// Every variant except [`Error::AuthenticationFailed`] is raised before any
/// block of data has been processed. A tag mismatch coming out of
/// [`decrypt`](crate::decrypt) is reported through
/// [`DecryptResult::auth_ok`](crate::DecryptResult::auth_ok) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Wrong key length.
    #[error("bad key length {0}. Allowed sizes are: 16, 24, 32")]
    InvalidKeyLength(usize),
    /// Wrong nonce length.
    #[error("bad nonce length {0}. Allowed sizes are: 7 to 13")]
    InvalidNonceLength(usize),
    /// Wrong MAC length.
    #[error("bad MAC length {0}. Allowed sizes are: 4, 6, 8, 10, 12, 14, 16")]
    InvalidTagLength(usize),
    /// The message does not fit into the length field of B0.
    #[error("message of {len} bytes does not fit a {max_len_bytes}-byte length field")]
    MessageTooLong {
        /// Length of the offending message.
        len: usize,
        /// Width of the length field, `15 - nonce.len()`.
        max_len_bytes: usize,
    },
    /// The received tag does not match the computed one.
    #[error("authentication tag mismatch")]
    AuthenticationFailed,
}

impl Error {
    /// Whether this is a malformed key, nonce or tag length.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Error::InvalidKeyLength(_)
                | Error::InvalidNonceLength(_)
                | Error::InvalidTagLength(_)
        )
    }
}
