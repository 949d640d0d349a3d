/*
[INPUT]:  Signing input string and shared API secret
[OUTPUT]: Base64 HMAC-SHA256 signatures and Signature authorization headers
[POS]:    Auth layer - key/secret request signing
[UPDATE]: When changing signing algorithm or header format
*/

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs request date lines for key/secret authentication
#[derive(Debug, Clone)]
pub struct MessageSigner {
    secret: String,
}

impl MessageSigner {
    /// Create a signer over the shared API secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// HMAC-SHA256 over `message`, base64-encoded
    pub fn sign(&self, message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(message.as_bytes());
        BASE64.encode(mac.finalize().into_bytes())
    }

    /// Verify a base64 signature against `message` in constant time
    pub fn verify(&self, message: &str, signature: &str) -> bool {
        let Ok(raw) = BASE64.decode(signature) else {
            return false;
        };
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(message.as_bytes());
        mac.verify_slice(&raw).is_ok()
    }

    /// Build the `Authorization` header value for key/secret mode
    ///
    /// The signing input is `"date: <date>"`; the emitted value is
    /// `Signature keyId="<key>",algorithm="hmac-sha256",headers="date",signature="<b64>"`.
    pub fn authorization_header(&self, api_key: &str, date: &str) -> String {
        let signature = self.sign(&format!("date: {date}"));
        format!(
            "Signature keyId=\"{api_key}\",algorithm=\"hmac-sha256\",headers=\"date\",signature=\"{signature}\""
        )
    }
}
