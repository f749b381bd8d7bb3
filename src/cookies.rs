//! Signed cookies.
//!
//! A signed value is written as `s:<value>.<signature>`, where the signature
//! is the unpadded base64 HMAC-SHA256 of `<value>` keyed by the server secret.
//! Only cookies whose signature verifies are exposed by [`SignedCookies`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use cookie::time::Duration;
use cookie::{Cookie, SameSite};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;

use crate::constants;

type HmacSha256 = Hmac<Sha256>;

const SIGNED_PREFIX: &str = "s:";

/// The verified signed cookies of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedCookies {
    values: HashMap<String, String>,
}

impl SignedCookies {
    /// Parse a `Cookie` header, keeping only values with a valid signature.
    #[must_use]
    pub fn from_header(header: &str, secret: &str) -> Self {
        let mut values: HashMap<String, String> = HashMap::new();

        for cookie in Cookie::split_parse_encoded(header).flatten() {
            if values.contains_key(cookie.name()) {
                continue;
            }

            if let Some(value) = unsign(cookie.value_trimmed(), secret) {
                values.insert(cookie.name().to_string(), value);
            }
        }

        Self { values }
    }

    /// Add an already-verified value.
    pub fn insert(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn login_token(&self) -> Option<&str> {
        self.get(constants::session::LOGIN_COOKIE)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn signature(value: &str, secret: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can accept any key length");
    mac.update(value.as_bytes());
    mac
}

/// Sign `value`, producing `s:<value>.<signature>`.
#[must_use]
pub fn sign(value: &str, secret: &str) -> String {
    let sig = STANDARD_NO_PAD.encode(signature(value, secret).finalize().into_bytes());
    format!("{SIGNED_PREFIX}{value}.{sig}")
}

/// Verify a signed value and return the original, or `None` if it was tampered with.
#[must_use]
pub fn unsign(signed: &str, secret: &str) -> Option<String> {
    let body = signed.strip_prefix(SIGNED_PREFIX)?;
    let (value, sig) = body.rsplit_once('.')?;
    let expected = STANDARD_NO_PAD.decode(sig).ok()?;

    signature(value, secret)
        .verify_slice(&expected)
        .is_ok()
        .then(|| value.to_string())
}

/// Render a `Set-Cookie` header value carrying a signed cookie.
#[must_use]
pub fn set_cookie_header(
    name: &str,
    value: &str,
    secret: &str,
    max_age_seconds: u64,
    secure: bool,
) -> String {
    let max_age = Duration::seconds(i64::try_from(max_age_seconds).unwrap_or(i64::MAX));

    Cookie::build((name.to_string(), sign(value, secret)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .secure(secure)
        .build()
        .encoded()
        .to_string()
}
