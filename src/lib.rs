//! Password hashing and verification built around Argon2id.
//!
//! [`Hasher::hash`] produces a self-describing encoded string; [`Hasher::verify`]
//! checks a candidate password against one. An optional secret ("pepper") can
//! be mixed into every derivation without ever appearing in the encoded output.

mod codec;
mod error;
mod kdf;
mod rand;

pub use crate::error::Error;
pub use crate::kdf::KdfParams;
pub use crate::rand::{OsRandom, SaltSource};

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Length of the salt (16 bytes).
pub const SALT_LEN: usize = 16;
/// Length of the derived hash for newly created hashes (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;

/// Hashes and verifies passwords.
///
/// Holds only immutable configuration, so a single instance can be shared
/// across threads and used concurrently without locking. Any `Hasher`
/// configured with a matching secret can verify a hash, regardless of which
/// instance created it.
pub struct Hasher<R: SaltSource = OsRandom> {
    secret: Zeroizing<Vec<u8>>,
    rng: R,
}

impl Hasher {
    /// A hasher without a secret.
    pub fn new() -> Self {
        Self::with_secret(Vec::new())
    }

    /// A hasher that peppers every derivation with `secret`.
    ///
    /// The secret is never embedded in the encoded hash. Verification with a
    /// different (or absent) secret fails as a plain password mismatch.
    pub fn with_secret(secret: impl Into<Vec<u8>>) -> Self {
        Self::with_salt_source(secret, OsRandom)
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: SaltSource> Hasher<R> {
    /// A hasher drawing salts from `rng` instead of the OS random source.
    pub fn with_salt_source(secret: impl Into<Vec<u8>>, rng: R) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
            rng,
        }
    }

    /// Hash `password` with a fresh random salt and the default cost
    /// parameters, returning the encoded string.
    ///
    /// # Panics
    ///
    /// Panics if the random source cannot supply entropy. There is no safe
    /// fallback for a failed CSPRNG.
    pub fn hash(&self, password: &str) -> String {
        let params = KdfParams::default();

        let mut salt = [0u8; SALT_LEN];
        self.rng.fill(&mut salt);

        let hash = kdf::derive(password, &salt, &self.secret, params, KEY_LEN)
            .expect("derivation with default parameters cannot fail");

        codec::encode(params, &salt, &hash)
    }

    /// Verify `password` against a previously encoded hash.
    ///
    /// Re-derives with the parameters and salt carried inside `encoded` and
    /// compares in constant time. Returns [`Error::InvalidHash`] when the
    /// stored value is malformed and [`Error::PasswordMismatch`] when it is
    /// well-formed but the password (or the configured secret) differs.
    pub fn verify(&self, encoded: &str, password: &str) -> Result<(), Error> {
        let decoded = codec::decode(encoded)?;

        // The derivation primitive's output length is a u32.
        if u32::try_from(decoded.hash.len()).is_err() {
            return Err(Error::InvalidHash("hash length"));
        }

        let candidate = kdf::derive(
            password,
            &decoded.salt,
            &self.secret,
            decoded.params,
            decoded.hash.len(),
        )
        .map_err(|_| Error::InvalidHash("derivation parameters"))?;

        if bool::from(decoded.hash.as_slice().ct_eq(candidate.as_slice())) {
            Ok(())
        } else {
            Err(Error::PasswordMismatch)
        }
    }
}
