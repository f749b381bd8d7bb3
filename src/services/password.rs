//! Salted password hashing.
//!
//! A credential is a random salt plus the hex HMAC-SHA512 of the password keyed
//! by that salt. Verification recomputes the hash with the stored salt.

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha512;

use crate::constants;

type HmacSha512 = Hmac<Sha512>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaltHash {
    pub salt: String,
    pub hex_hash: String,
}

/// Hash `password` with `salt`, or with a fresh random salt when `salt` is `None`.
#[must_use]
pub fn salt_hash(password: &str, salt: Option<&str>) -> SaltHash {
    let salt = salt.map_or_else(generate_salt, str::to_string);

    let mut mac = HmacSha512::new_from_slice(salt.as_bytes())
        .expect("HMAC can accept any key length");
    mac.update(password.as_bytes());
    let hex_hash = hex::encode(mac.finalize().into_bytes());

    SaltHash { salt, hex_hash }
}

/// 64 random bytes, hex encoded.
#[must_use]
pub fn generate_salt() -> String {
    let mut bytes = [0u8; constants::password::SALT_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
