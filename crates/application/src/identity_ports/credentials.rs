use punchlist_core::AppResult;

/// Port for password hashing operations. Keeps the application layer free of
/// direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password with a per-call random salt.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored digest.
    ///
    /// Returns `false` for a mismatch and for a malformed digest. Never
    /// fails: a digest that cannot be parsed is treated as non-matching.
    fn verify_password(&self, password: &str, digest: &str) -> bool;
}
