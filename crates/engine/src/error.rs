//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidRecord`] thrown when a sale, expense or transfer breaks a
//!   record invariant (negative amount, payer equal to payee, ...).
//! - [`UnknownPartner`] thrown when a partner tag is not one of the two
//!   configured partners.
//! - [`Unavailable`] thrown when none of the transaction collections could
//!   be loaded.
//! - [`KeyNotFound`] thrown when an item are not found.
//!
//!  [`InvalidRecord`]: EngineError::InvalidRecord
//!  [`UnknownPartner`]: EngineError::UnknownPartner
//!  [`Unavailable`]: EngineError::Unavailable
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Unknown partner: \"{0}\"")]
    UnknownPartner(String),
    #[error("Invalid partners: {0}")]
    InvalidPartners(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("\"{0}\" still in use")]
    InUse(String),
    #[error("Amount overflow")]
    Overflow,
    #[error("Data unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidRecord(a), Self::InvalidRecord(b)) => a == b,
            (Self::UnknownPartner(a), Self::UnknownPartner(b)) => a == b,
            (Self::InvalidPartners(a), Self::InvalidPartners(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::InUse(a), Self::InUse(b)) => a == b,
            (Self::Overflow, Self::Overflow) => true,
            (Self::Unavailable(a), Self::Unavailable(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
