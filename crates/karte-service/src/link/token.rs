//! Link token generation.

use rand::RngCore;

/// Raw entropy per token. 256 bits keeps the birthday bound negligible for
/// any realistic issuance rate, so no uniqueness check precedes insertion.
const TOKEN_BYTES: usize = 32;

/// Generates bearer tokens for report links.
///
/// Tokens are 64 lowercase hex characters drawn from the thread-local
/// CSPRNG: URL-safe as-is and carrying no structure that could leak the
/// resource or the issuance time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkTokenGenerator;

impl LinkTokenGenerator {
    /// Creates a new token generator.
    pub fn new() -> Self {
        Self
    }

    /// Generates a fresh token.
    pub fn generate(&self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}
