use crate::error::{AppError, AppResult};

pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    bcrypt::hash(password, cost).map_err(|e| AppError::Internal(format!("Hashing failed: {e}")))
}

/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, passhash: &str) -> bool {
    bcrypt::verify(password, passhash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_only_the_original_password() {
        let hash = hash_password("hunter22", 4).unwrap();
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
        assert!(!verify_password("hunter22", "not-a-hash"));
    }
}
