//! Session cookie value
//!
//! `<session uuid>.<base64url(HMAC-SHA256(uuid))>`. The signature lets the
//! guard reject forged cookies without a database round trip.

use hmac::{Hmac, Mac};
use platform::crypto::{from_base64url, to_base64url};
use sha2::Sha256;

use crate::domain::value_object::SessionId;
use crate::error::{AccountError, AccountResult};

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct SessionTokenSigner {
    secret: [u8; 32],
}

impl SessionTokenSigner {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    fn mac(&self) -> AccountResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AccountError::Internal(format!("HMAC key rejected: {e}")))
    }

    pub fn sign(&self, session_id: &SessionId) -> AccountResult<String> {
        let session_id = session_id.to_string();
        let mut mac = self.mac()?;
        mac.update(session_id.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!("{}.{}", session_id, to_base64url(&signature)))
    }

    /// Session id from a cookie value, if the signature checks out
    pub fn verify(&self, token: &str) -> Option<SessionId> {
        let (session_id, signature) = token.split_once('.')?;
        let signature = from_base64url(signature).ok()?;

        let mut mac = self.mac().ok()?;
        mac.update(session_id.as_bytes());
        mac.verify_slice(&signature).ok()?;

        SessionId::parse_str(session_id).ok()
    }
}

impl std::fmt::Debug for SessionTokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionTokenSigner([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let signer = SessionTokenSigner::new([7u8; 32]);
        let session_id = SessionId::new();

        let token = signer.sign(&session_id).unwrap();
        assert!(token.starts_with(&session_id.to_string()));
        assert_eq!(signer.verify(&token), Some(session_id));
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let token = SessionTokenSigner::new([1u8; 32])
            .sign(&SessionId::new())
            .unwrap();
        assert_eq!(SessionTokenSigner::new([2u8; 32]).verify(&token), None);
    }

    #[test]
    fn test_tampered_id_is_rejected() {
        let signer = SessionTokenSigner::new([7u8; 32]);
        let token = signer.sign(&SessionId::new()).unwrap();
        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", SessionId::new(), signature);
        assert_eq!(signer.verify(&forged), None);
    }

    #[test]
    fn test_malformed_tokens() {
        let signer = SessionTokenSigner::new([7u8; 32]);
        assert_eq!(signer.verify(""), None);
        assert_eq!(signer.verify("no-dot"), None);
        assert_eq!(signer.verify("abc.!!!"), None);
    }
}
