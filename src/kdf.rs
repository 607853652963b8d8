use anyhow::{Context, Result};
use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroizing;

/// Argon2id cost parameters.
///
/// One default instance is used for every new hash; decoded hashes carry
/// their own parameters, so defaults can change without invalidating
/// existing hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    mem_cost_kib: u32,
    time_cost: u32,
    parallelism: u8,
}

impl Default for KdfParams {
    fn default() -> Self {
        // These defaults are ripped from libsodium's interactive settings.
        // They are above OWASP recommendations.
        Self {
            // default memory cost (64 MiB)
            mem_cost_kib: 64 * 1024,
            // default number of iterations
            time_cost: 2,
            // default number of threads
            parallelism: 1,
        }
    }
}

impl KdfParams {
    pub fn new(mem_cost_kib: u32, time_cost: u32, parallelism: u8) -> Result<Self> {
        let params = Self {
            mem_cost_kib,
            time_cost,
            parallelism,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn mem_cost_kib(&self) -> u32 {
        self.mem_cost_kib
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn parallelism(&self) -> u8 {
        self.parallelism
    }

    pub fn validate(&self) -> Result<()> {
        if self.time_cost < 1 {
            anyhow::bail!("argon2 time cost must be >= 1");
        }
        if self.parallelism < 1 {
            anyhow::bail!("argon2 parallelism must be >= 1");
        }
        if self.mem_cost_kib < 8 * u32::from(self.parallelism) {
            anyhow::bail!("argon2 memory cost must be at least 8 * parallelism");
        }
        Ok(())
    }
}

/// Derive `out_len` bytes from `password` with Argon2id.
///
/// `secret` is the optional pepper; an empty slice means no pepper, which
/// produces the same output as a derivation without one.
pub fn derive(
    password: &str,
    salt: &[u8],
    secret: &[u8],
    kdf: KdfParams,
    out_len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    kdf.validate().context("invalid Argon2 parameters")?;

    let params = Params::new(
        kdf.mem_cost_kib,
        kdf.time_cost,
        u32::from(kdf.parallelism),
        Some(out_len),
    )
    .map_err(|e| anyhow::anyhow!("failed to construct Argon2 params: {e}"))?;

    let argon2 = if secret.is_empty() {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::new_with_secret(secret, Algorithm::Argon2id, Version::V0x13, params)
            .map_err(|e| anyhow::anyhow!("failed to key Argon2 with secret: {e}"))?
    };

    let mut out = Zeroizing::new(vec![0u8; out_len]);
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut out)
        .map_err(|e| anyhow::anyhow!("argon2 key derivation failed {e}"))?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kdf_is_deterministic() {
        let salt = [42u8; 16];
        let kdf = KdfParams::default();

        let k1 = derive("password", &salt, &[], kdf, 32).unwrap();
        let k2 = derive("password", &salt, &[], kdf, 32).unwrap();

        assert_eq!(k1.as_slice(), k2.as_slice());
    }

    #[test]
    fn kdf_params_affect_output() {
        let salt = [7u8; 16];

        let kdf1 = KdfParams::new(32768, 2, 1).unwrap();
        let kdf2 = KdfParams::new(65536, 2, 1).unwrap();

        let k1 = derive("pw", &salt, &[], kdf1, 32).unwrap();
        let k2 = derive("pw", &salt, &[], kdf2, 32).unwrap();

        assert_ne!(k1.as_slice(), k2.as_slice());
    }

    #[test]
    fn kdf_secret_affects_output() {
        let salt = [9u8; 16];
        let kdf = KdfParams::default();

        let plain = derive("pw", &salt, &[], kdf, 32).unwrap();
        let peppered = derive("pw", &salt, b"pepper", kdf, 32).unwrap();

        assert_ne!(plain.as_slice(), peppered.as_slice());
    }

    #[test]
    fn kdf_invalid_params_fail_gracefully() {
        assert!(KdfParams::new(0, 0, 0).is_err());
        assert!(KdfParams::new(8, 1, 2).is_err());
    }

    #[test]
    fn kdf_rejects_short_salt() {
        let kdf = KdfParams::default();
        assert!(derive("pw", &[1u8; 2], &[], kdf, 32).is_err());
    }
}
