//! Registration data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ticket::Ticket;

/// Error type for registration operations.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Registration not found.
    #[error("Registration not found: {0}")]
    NotFound(String),
}

/// Request to create a new registration.
#[derive(Debug, Clone)]
pub struct CreateRegistrationRequest {
    /// Registrant name as entered in the wizard.
    pub registrant_name: String,
    /// Registrant email as entered in the wizard.
    pub registrant_email: String,
    /// The auction the registration targets.
    pub auction_id: String,
    /// Payment ticket issued by the auction service for this registration.
    pub ticket: Ticket,
}

/// One registration flow instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    /// Unique identifier (UUID).
    pub id: String,

    /// Registrant name.
    pub registrant_name: String,

    /// Registrant email.
    pub registrant_email: String,

    /// The auction the registration targets.
    pub auction_id: String,

    /// Payment ticket for the registration fee.
    pub ticket: Ticket,

    /// When the registration was created.
    pub created_at: DateTime<Utc>,

    /// Set once when payment is confirmed; unlocks receipt export.
    pub receipt_available: bool,

    /// Set once when the confirmation window is exhausted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_notice: Option<String>,
}
