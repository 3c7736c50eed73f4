//! Secret inputs of one Argon2 computation.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::params::InputLengths;

/// Password, salt and the optional secret key and associated data.
///
/// Every field is an owned copy that is wiped when the value is dropped,
/// whether the computation it was built for succeeded or failed.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecretMaterial {
    password: Vec<u8>,
    salt: Vec<u8>,
    secret: Vec<u8>,
    associated_data: Vec<u8>,
}

impl SecretMaterial {
    pub fn new(password: &[u8], salt: &[u8]) -> Self {
        Self {
            password: password.to_vec(),
            salt: salt.to_vec(),
            secret: Vec::new(),
            associated_data: Vec::new(),
        }
    }

    /// Adds a secret key (pepper) that is mixed into H0 but never stored.
    pub fn with_secret(mut self, secret: &[u8]) -> Self {
        self.secret.zeroize();
        self.secret = secret.to_vec();
        self
    }

    /// Adds associated data mixed into H0.
    pub fn with_associated_data(mut self, associated_data: &[u8]) -> Self {
        self.associated_data.zeroize();
        self.associated_data = associated_data.to_vec();
        self
    }

    pub fn password(&self) -> &[u8] {
        &self.password
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn associated_data(&self) -> &[u8] {
        &self.associated_data
    }

    pub fn lengths(&self) -> InputLengths {
        InputLengths {
            password: self.password.len(),
            salt: self.salt.len(),
            secret: self.secret.len(),
            associated_data: self.associated_data.len(),
        }
    }
}

impl std::fmt::Debug for SecretMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretMaterial")
            .field("password", &"<redacted>")
            .field("salt_len", &self.salt.len())
            .field("secret", &"<redacted>")
            .field("associated_data_len", &self.associated_data.len())
            .finish()
    }
}
