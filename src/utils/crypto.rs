//! Passphrase-based AES in the OpenSSL "Salted__" format, as produced by
//! CryptoJS `AES.encrypt(text, password)`.
//!
//! The payload is `base64("Salted__" || salt[8] || ciphertext)`. Key and IV are
//! derived with a single round of `EVP_BytesToKey` over MD5, and the cipher is
//! AES-256-CBC with PKCS#7 padding.

use super::Result;
use aes::{
    cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit},
    Aes256,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use md5::{Digest, Md5};
use rand::RngCore;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

const SALT_MAGIC: &[u8] = b"Salted__";
const SALT_LEN: usize = 8;
const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;

const DECRYPT_ERROR: &str = "Could not decrypt shared session";

fn evp_bytes_to_key(password: &[u8], salt: &[u8]) -> ([u8; KEY_LEN], [u8; IV_LEN]) {
    let mut derived = Vec::with_capacity(KEY_LEN + IV_LEN + 16);
    let mut block: Vec<u8> = Vec::new();
    while derived.len() < KEY_LEN + IV_LEN {
        let mut hasher = Md5::new();
        hasher.update(&block);
        hasher.update(password);
        hasher.update(salt);
        block = hasher.finalize().to_vec();
        derived.extend_from_slice(&block);
    }

    let mut key = [0u8; KEY_LEN];
    let mut iv = [0u8; IV_LEN];
    key.copy_from_slice(&derived[..KEY_LEN]);
    iv.copy_from_slice(&derived[KEY_LEN..KEY_LEN + IV_LEN]);
    (key, iv)
}

pub fn encrypt(plaintext: &str, password: &str) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    encrypt_with_salt(plaintext, password, &salt)
}

pub fn encrypt_with_salt(plaintext: &str, password: &str, salt: &[u8; SALT_LEN]) -> Result<String> {
    let (key, iv) = evp_bytes_to_key(password.as_bytes(), salt);
    let cipher = Aes256CbcEnc::new_from_slices(&key, &iv).map_err(|e| e.to_string())?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    let mut payload = Vec::with_capacity(SALT_MAGIC.len() + SALT_LEN + ciphertext.len());
    payload.extend_from_slice(SALT_MAGIC);
    payload.extend_from_slice(salt);
    payload.extend_from_slice(&ciphertext);
    Ok(STANDARD.encode(payload))
}

/// A wrong password and a corrupted payload fail with the same message.
pub fn decrypt(encoded: &str, password: &str) -> Result<String> {
    let payload = STANDARD
        .decode(encoded.trim())
        .map_err(|_| DECRYPT_ERROR.to_string())?;

    let header_len = SALT_MAGIC.len() + SALT_LEN;
    if payload.len() <= header_len || !payload.starts_with(SALT_MAGIC) {
        return Err(DECRYPT_ERROR.to_string());
    }
    let salt = &payload[SALT_MAGIC.len()..header_len];
    let ciphertext = &payload[header_len..];

    let (key, iv) = evp_bytes_to_key(password.as_bytes(), salt);
    let cipher = Aes256CbcDec::new_from_slices(&key, &iv).map_err(|e| e.to_string())?;
    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| DECRYPT_ERROR.to_string())?;

    String::from_utf8(plaintext).map_err(|_| DECRYPT_ERROR.to_string())
}
