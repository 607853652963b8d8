//! Encoding and decoding of the canonical hash string.
//!
//! The format is self-describing: everything needed to re-derive and verify
//! a password later travels inside the string itself.
//!
//! ```text
//! $argon2id$v=19$m=<u32>,t=<u32>,p=<u8>$<salt-b64>$<hash-b64>
//! ```
//!
//! Decoding is strict and anchored at both ends. A parser bug here is an
//! authentication bypass, so anything that is not an exact match of the
//! grammar is rejected.

use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD_NO_PAD;

use crate::KdfParams;
use crate::error::Error;

/// Algorithm tag, the only supported identifier.
pub const ALGORITHM: &str = "argon2id";
/// Version tag, fixes the Argon2 internal revision (0x13).
pub const VERSION_TAG: &str = "v=19";

/// Structured fields recovered from an encoded hash string.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Decoded {
    pub params: KdfParams,
    pub salt: Vec<u8>,
    pub hash: Vec<u8>,
}

/// Produce the canonical string form. Infallible; inputs are byte sequences
/// the caller already knows to be valid.
pub(crate) fn encode(params: KdfParams, salt: &[u8], hash: &[u8]) -> String {
    format!(
        "${ALGORITHM}${VERSION_TAG}$m={},t={},p={}${}${}",
        params.mem_cost_kib(),
        params.time_cost(),
        params.parallelism(),
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(hash),
    )
}

/// Parse and validate an encoded hash string.
///
/// Every failure maps to [`Error::InvalidHash`] with the field where
/// parsing stopped.
pub(crate) fn decode(encoded: &str) -> Result<Decoded, Error> {
    let rest = encoded
        .strip_prefix('$')
        .ok_or(Error::InvalidHash("leading '$'"))?;

    let mut fields = rest.split('$');

    if fields.next() != Some(ALGORITHM) {
        return Err(Error::InvalidHash("algorithm tag"));
    }
    if fields.next() != Some(VERSION_TAG) {
        return Err(Error::InvalidHash("version"));
    }

    let costs = fields.next().ok_or(Error::InvalidHash("cost parameters"))?;
    let salt64 = fields.next().ok_or(Error::InvalidHash("salt"))?;
    let hash64 = fields.next().ok_or(Error::InvalidHash("hash"))?;

    // Anchor the tail: nothing may follow the hash segment.
    if fields.next().is_some() {
        return Err(Error::InvalidHash("trailing data"));
    }

    let mut costs = costs.split(',');
    let memory = parse_cost::<u32>(costs.next(), "m=", "memory cost")?;
    let time = parse_cost::<u32>(costs.next(), "t=", "time cost")?;
    let parallelism = parse_cost::<u8>(costs.next(), "p=", "parallelism")?;
    if costs.next().is_some() {
        return Err(Error::InvalidHash("cost parameters"));
    }

    let params =
        KdfParams::new(memory, time, parallelism).map_err(|_| Error::InvalidHash("cost parameters"))?;

    let salt = decode_b64(salt64, "salt")?;
    let hash = decode_b64(hash64, "hash")?;

    Ok(Decoded { params, salt, hash })
}

/// Parse one `key=digits` cost field as an unsigned decimal within the bit
/// width of `T`. Leading zeros are accepted; signs, whitespace, and anything
/// non-decimal are not.
fn parse_cost<T: FromStr>(
    field: Option<&str>,
    key: &str,
    what: &'static str,
) -> Result<T, Error> {
    let digits = field
        .and_then(|f| f.strip_prefix(key))
        .ok_or(Error::InvalidHash(what))?;

    // `u32::from_str` would also accept a leading '+'.
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidHash(what));
    }

    digits.parse().map_err(|_| Error::InvalidHash(what))
}

/// Strict unpadded standard base64. Padding characters, non-alphabet bytes,
/// and non-canonical trailing bits are all rejected by the engine.
fn decode_b64(segment: &str, what: &'static str) -> Result<Vec<u8>, Error> {
    if segment.is_empty() {
        return Err(Error::InvalidHash(what));
    }

    STANDARD_NO_PAD
        .decode(segment)
        .map_err(|_| Error::InvalidHash(what))
}
