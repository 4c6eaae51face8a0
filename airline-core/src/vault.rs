//! Protection of personal data at rest.
//!
//! Two distinct transforms live here:
//!
//! * PII (national id, email) is encrypted reversibly with AES-256 in ECB mode and
//!   PKCS#7 padding under one fixed key, then base64 encoded. There is no IV, so equal
//!   plaintexts produce equal ciphertexts. Existing stored values depend on this, so
//!   it must stay deterministic.
//! * Passwords are hashed with SHA-512 and encoded as URL-safe base64. No salt: equal
//!   passwords produce equal digests. There is no reverse operation.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit};
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use sha2::{Digest, Sha512};

type Aes256EcbEnc = ecb::Encryptor<aes::Aes256>;
type Aes256EcbDec = ecb::Decryptor<aes::Aes256>;

const PII_KEY: &[u8; 32] = b"CLAVE_DE_CIFRADO_DE_32_BITS_A256";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VaultError {
    #[error("Crypto failure: {0}")]
    CryptoFailure(String),
    #[error("Crypto unavailable: {0}")]
    CryptoUnavailable(String),
}

/// One-way password encoding, as consumed by the authentication layer.
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, raw_password: &str) -> String;

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool;
}

#[derive(Debug, Clone)]
pub struct CredentialVault {
    key: [u8; 32],
}

impl CredentialVault {
    pub fn new() -> Self {
        Self { key: *PII_KEY }
    }

    pub fn hash_password(&self, plaintext: &str) -> String {
        let digest = Sha512::digest(plaintext.as_bytes());
        URL_SAFE.encode(digest)
    }

    pub fn verify_password(&self, plaintext: &str, digest: &str) -> bool {
        self.hash_password(plaintext) == digest
    }

    pub fn encrypt_pii(&self, plaintext: &str) -> Result<String, VaultError> {
        let cipher = Aes256EcbEnc::new_from_slice(&self.key)
            .map_err(|e| VaultError::CryptoUnavailable(format!("AES-256 key rejected: {}", e)))?;
        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
        Ok(STANDARD.encode(ciphertext))
    }

    pub fn decrypt_pii(&self, ciphertext: &str) -> Result<String, VaultError> {
        let cipher = Aes256EcbDec::new_from_slice(&self.key)
            .map_err(|e| VaultError::CryptoUnavailable(format!("AES-256 key rejected: {}", e)))?;
        let raw = STANDARD
            .decode(ciphertext.as_bytes())
            .map_err(|e| VaultError::CryptoFailure(format!("ciphertext is not base64: {}", e)))?;
        let plaintext = cipher
            .decrypt_padded_vec_mut::<Pkcs7>(&raw)
            .map_err(|_| VaultError::CryptoFailure("bad block size or padding".to_string()))?;
        String::from_utf8(plaintext)
            .map_err(|_| VaultError::CryptoFailure("decrypted value is not UTF-8".to_string()))
    }
}

impl Default for CredentialVault {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordEncoder for CredentialVault {
    fn encode(&self, raw_password: &str) -> String {
        self.hash_password(raw_password)
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        self.verify_password(raw_password, encoded_password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_verification() {
        let vault = CredentialVault::new();
        let digest = vault.hash_password("s3cret");

        assert!(vault.verify_password("s3cret", &digest));
        assert!(!vault.verify_password("s3cret!", &digest));
        assert_ne!(digest, "s3cret");
    }

    #[test]
    fn test_password_hash_is_unsalted_url_safe_sha512() {
        let vault = CredentialVault::new();
        let first = vault.hash_password("hunter2");
        let second = vault.hash_password("hunter2");

        assert_eq!(first, second);
        // 64 byte digest -> 88 base64 chars including padding
        assert_eq!(first.len(), 88);
        assert!(!first.contains('+') && !first.contains('/'));
    }

    #[test]
    fn test_pii_round_trip_is_deterministic() {
        let vault = CredentialVault::new();
        let first = vault.encrypt_pii("ana@example.com").unwrap();
        let second = vault.encrypt_pii("ana@example.com").unwrap();

        assert_eq!(first, second);
        assert_ne!(first, "ana@example.com");
        assert_eq!(vault.decrypt_pii(&first).unwrap(), "ana@example.com");
    }

    #[test]
    fn test_pii_ciphertext_is_block_aligned() {
        let vault = CredentialVault::new();
        // 9 bytes -> one padded block -> 24 base64 chars
        assert_eq!(vault.encrypt_pii("12345678A").unwrap().len(), 24);
        // exactly one block of input still gets a full padding block
        assert_eq!(vault.encrypt_pii("0123456789abcdef").unwrap().len(), 44);
        assert_eq!(vault.decrypt_pii(&vault.encrypt_pii("").unwrap()).unwrap(), "");
    }

    #[test]
    fn test_malformed_ciphertext_is_crypto_failure() {
        let vault = CredentialVault::new();

        assert!(matches!(vault.decrypt_pii("not base64 at all!"), Err(VaultError::CryptoFailure(_))));
        // valid base64, but 3 bytes is not a whole AES block
        assert!(matches!(vault.decrypt_pii("AAAA"), Err(VaultError::CryptoFailure(_))));
    }

    #[test]
    fn test_password_encoder_trait() {
        let vault = CredentialVault::new();
        let encoder: &dyn PasswordEncoder = &vault;
        let encoded = encoder.encode("pw");
        assert!(encoder.matches("pw", &encoded));
        assert!(!encoder.matches("other", &encoded));
    }
}
