use crate::models::{format_balance, sol_to_lamports};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid Solana address format: {0}")]
    InvalidSolanaAddress(String),

    #[error("Invalid amount: {0}. Amount must be a number greater than zero")]
    InvalidAmount(String),

    #[error("Insufficient balance. Available: {available} SOL")]
    InsufficientBalance { available: String },

    #[error("Message to sign cannot be empty")]
    EmptyMessage,
}

pub fn validate_solana_address(address: &str) -> Result<(), ValidationError> {
    // Check if address is empty
    if address.trim().is_empty() {
        return Err(ValidationError::MissingParameter("address".to_string()));
    }

    // Decode base58 string
    let decoded = match bs58::decode(address).into_vec() {
        Ok(bytes) => bytes,
        Err(_) => return Err(ValidationError::InvalidSolanaAddress(address.to_string())),
    };

    // Validate length (Solana addresses are 32 bytes)
    if decoded.len() != 32 {
        return Err(ValidationError::InvalidSolanaAddress(address.to_string()));
    }

    Ok(())
}

/// Parses a user-entered SOL amount. Returns the amount in SOL.
pub fn validate_amount(amount: &str) -> Result<f64, ValidationError> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingParameter("amount".to_string()));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;

    // below half a lamport rounds to an empty transfer
    if !value.is_finite() || value <= 0.0 || sol_to_lamports(value) == 0 {
        return Err(ValidationError::InvalidAmount(trimmed.to_string()));
    }

    Ok(value)
}

/// Client-side short-circuit only; the chain performs the authoritative check.
pub fn validate_against_balance(amount: f64, available: f64) -> Result<(), ValidationError> {
    if amount > available {
        return Err(ValidationError::InsufficientBalance {
            available: format_balance(available),
        });
    }
    Ok(())
}

/// Validates a send form: recipient first, then amount, then balance.
pub fn validate_transfer(
    recipient: &str,
    amount: &str,
    available: f64,
) -> Result<f64, ValidationError> {
    validate_solana_address(recipient.trim())?;
    let amount = validate_amount(amount)?;
    validate_against_balance(amount, available)?;
    Ok(amount)
}

pub fn validate_message(message: &str) -> Result<(), ValidationError> {
    if message.trim().is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    Ok(())
}
