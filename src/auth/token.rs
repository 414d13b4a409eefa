use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Key for signing login tokens. A token is a pure function of the signed
/// email: `base64url(email) . base64url(hmac_sha256(key, email))`. Nothing
/// is stored server-side, and there is no expiry or revocation.
#[derive(Clone)]
pub struct TokenKey(Vec<u8>);

impl TokenKey {
    pub fn new(secret: &[u8]) -> Self {
        Self(secret.to_vec())
    }

    /// Reads the signing key from `SECRET_KEY`. Tests get a fixed key so
    /// tokens are reproducible; otherwise a fresh random key is generated,
    /// which invalidates outstanding tokens on restart.
    pub fn from_env() -> Self {
        if let Ok(secret) = std::env::var("SECRET_KEY") {
            Self::new(secret.as_bytes())
        } else if cfg!(test) {
            Self::new(&[0u8; 64])
        } else {
            use argon2::password_hash::rand_core::{OsRng, RngCore};

            let mut secret = [0u8; 64];
            OsRng.fill_bytes(&mut secret);
            Self::new(&secret)
        }
    }

    pub fn sign(&self, email: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.0)
            .expect("HMAC can take key of any size");
        mac.update(email.as_bytes());
        let tag = mac.finalize().into_bytes();

        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(email.as_bytes()),
            URL_SAFE_NO_PAD.encode(tag)
        )
    }

    /// Returns the signed email if the token verifies.
    pub fn verify(&self, token: &str) -> Option<String> {
        let (payload, tag) = token.split_once('.')?;

        let email_bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let email = String::from_utf8(email_bytes).ok()?;
        let tag = URL_SAFE_NO_PAD.decode(tag).ok()?;

        let mut mac = HmacSha256::new_from_slice(&self.0)
            .expect("HMAC can take key of any size");
        mac.update(email.as_bytes());
        mac.verify_slice(&tag).ok()?;

        Some(email)
    }
}
