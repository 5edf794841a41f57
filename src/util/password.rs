use rand::Rng;
use sha2::{Digest, Sha256};

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const TEMP_PASSWORD_LENGTH: usize = 10;

/// Generate the temporary password handed back on register, inplode and
/// limbo flows. The account stays in limbo until it is replaced.
pub fn create_temp_password() -> String {
    let mut rng = rand::thread_rng();
    (0..TEMP_PASSWORD_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Digest a password for storage. Plaintext never reaches the database.
pub fn digest_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
