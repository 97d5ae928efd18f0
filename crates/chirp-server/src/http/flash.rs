//! One-shot messages carried across a redirect in a signed cookie.

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const COOKIE_NAME: &str = "chirp_flash";

pub struct FlashSigner {
    keyed: HmacSha256,
}

impl FlashSigner {
    pub fn new(key: &str) -> Self {
        // HMAC pads or hashes the key, so every length is valid.
        let keyed = HmacSha256::new_from_slice(key.as_bytes())
            .unwrap_or_else(|_| unreachable!("hmac accepts keys of any length"));
        Self { keyed }
    }

    fn mac(&self, message: &str) -> HmacSha256 {
        let mut mac = self.keyed.clone();
        mac.update(message.as_bytes());
        mac
    }

    fn signature(&self, message: &str) -> String {
        hex::encode(self.mac(message).finalize().into_bytes())
    }

    /// `Set-Cookie` value carrying `message`.
    pub fn set_cookie(&self, message: &str) -> String {
        format!(
            "{COOKIE_NAME}={}.{}; Path=/; HttpOnly; SameSite=Lax",
            hex::encode(message),
            self.signature(message)
        )
    }

    /// Reads the flash cookie from request headers. `None` when absent or
    /// when the signature does not match.
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        let value = cookie_value(headers)?;
        let (payload, signature) = value.split_once('.')?;
        let message = String::from_utf8(hex::decode(payload).ok()?).ok()?;
        let signature = hex::decode(signature).ok()?;
        self.mac(&message)
            .verify_slice(&signature)
            .is_ok()
            .then_some(message)
    }
}

pub fn is_present(headers: &HeaderMap) -> bool {
    cookie_value(headers).is_some()
}

pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("chirp_flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

fn cookie_value(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value.to_string())
}
