use getrandom::fill;

/// Source of random salt bytes.
///
/// Injected into [`crate::Hasher`] so tests can substitute a deterministic
/// source; production code uses [`OsRandom`].
pub trait SaltSource {
    /// Fill `buf` with random bytes.
    ///
    /// Implementations backed by a CSPRNG must panic if the random source
    /// fails. An unseeded or failed generator must never silently produce a
    /// weak salt.
    fn fill(&self, buf: &mut [u8]);
}

/// Fill buffer with cryptographically secure random bytes from the OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SaltSource for OsRandom {
    fn fill(&self, buf: &mut [u8]) {
        if let Err(e) = fill(buf) {
            panic!("OS random generator unavailable: {e}");
        }
    }
}
