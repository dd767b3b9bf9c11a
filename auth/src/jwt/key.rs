use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

/// Process-scoped symmetric key for signing tokens.
///
/// Generated from the OS random source when the process starts and never written anywhere,
/// so every token issued before a restart stops verifying after it.
#[derive(Clone)]
pub struct SigningKey {
    bytes: Vec<u8>,
}

impl SigningKey {
    /// Key length in bytes (matches the HMAC-SHA256 block size).
    pub const LENGTH: usize = 64;

    /// Generate a fresh random key.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; Self::LENGTH];
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}
