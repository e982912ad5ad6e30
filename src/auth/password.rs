use crate::core::errors::ClinicError;

pub fn hash_password(password: &str, cost: u32) -> Result<String, ClinicError> {
    bcrypt::hash(password, cost).map_err(|e| ClinicError::InternalServerError(format!("Password hashing error: {}", e)))
}

pub fn verify_password(candidate: &str, hash: &str) -> Result<bool, ClinicError> {
    bcrypt::verify(candidate, hash)
        .map_err(|e| ClinicError::InternalServerError(format!("Password verification error: {}", e)))
}
