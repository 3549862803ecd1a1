use argon2::{password_hash::{PasswordHasher, SaltString}, Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;

use super::errors::AuthError;

/// Hash `password` with argon2id default parameters and a random salt,
/// returning the PHC string expected in `admin.password_hash`.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    hash_with(&Argon2::default(), password)
}

/// Like [`hash_password`] with explicit cost parameters.
pub fn hash_password_with(password: &str, params: Params) -> Result<String, AuthError> {
    hash_with(&Argon2::new(Algorithm::Argon2id, Version::V0x13, params), password)
}

fn hash_with(argon: &Argon2<'_>, password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .to_string();
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use argon2::PasswordHash;

    use super::*;

    #[test]
    fn hashes_are_salted_phc_strings() -> anyhow::Result<()> {
        let params = Params::new(1024, 1, 1, None).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        let a = hash_password_with("pw", params.clone())?;
        let b = hash_password_with("pw", params)?;
        assert!(a.starts_with("$argon2id$"));
        assert_ne!(a, b);
        assert!(PasswordHash::new(&a).is_ok());
        Ok(())
    }
}
