use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::FormRecord;

const ID_PREFIX: &str = "HG-";
const ID_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Submission rejected: {0}")]
    Rejected(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Display-only reference shown after submitting. Random, never persisted and
/// not guaranteed unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(String);

impl SubmissionId {
    pub fn generate() -> Self {
        Self::from_seed(Uuid::new_v4().as_u128())
    }

    fn from_seed(mut seed: u128) -> Self {
        let mut id = String::with_capacity(ID_PREFIX.len() + ID_LEN);
        id.push_str(ID_PREFIX);
        for _ in 0..ID_LEN {
            id.push(BASE36[(seed % 36) as usize] as char);
            seed /= 36;
        }
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: SubmissionId,
    pub submitted_at: DateTime<Utc>,
    pub hotel_name: String,
}

impl SubmissionReceipt {
    pub fn for_record(record: &FormRecord) -> Self {
        Self {
            id: SubmissionId::generate(),
            submitted_at: Utc::now(),
            hotel_name: record.hotel_name.trim().to_string(),
        }
    }
}

/// Receives the completed record once the final step is submitted.
pub trait SubmissionCollaborator {
    fn submit(&mut self, record: &FormRecord) -> Result<SubmissionReceipt, SubmissionError>;
}

/// Serializes the record, logs it and always accepts.
#[derive(Debug, Default)]
pub struct AcceptingSubmitter {
    last_payload: Option<String>,
}

impl AcceptingSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON body of the most recent submission.
    pub fn last_payload(&self) -> Option<&str> {
        self.last_payload.as_deref()
    }
}

impl SubmissionCollaborator for AcceptingSubmitter {
    fn submit(&mut self, record: &FormRecord) -> Result<SubmissionReceipt, SubmissionError> {
        let payload = serde_json::to_string(record)?;
        tracing::info!(hotel = %record.hotel_name, "Submitting intake form data");
        tracing::debug!(%payload, "Intake payload");
        self.last_payload = Some(payload);
        Ok(SubmissionReceipt::for_record(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FormPatch;

    #[test]
    fn generated_ids_have_display_shape() {
        let id = SubmissionId::generate();
        let raw = id.as_str();
        assert!(raw.starts_with("HG-"));
        assert_eq!(raw.len(), 12);
        assert!(raw[3..]
            .chars()
            .all(|ch| ch.is_ascii_digit() || ch.is_ascii_uppercase()));
    }

    #[test]
    fn seed_zero_maps_to_all_zero_digits() {
        assert_eq!(SubmissionId::from_seed(0).as_str(), "HG-000000000");
        assert_eq!(SubmissionId::from_seed(35).as_str(), "HG-Z00000000");
    }

    #[test]
    fn accepting_submitter_keeps_serialized_payload() {
        let mut record = FormRecord::new();
        record.apply(FormPatch::new().hotel_name(" Grand Resort "));
        let mut submitter = AcceptingSubmitter::new();

        let receipt = submitter.submit(&record).unwrap();

        assert_eq!(receipt.hotel_name, "Grand Resort");
        let payload = submitter.last_payload().unwrap();
        let value: serde_json::Value = serde_json::from_str(payload).unwrap();
        assert_eq!(value["hotelName"], " Grand Resort ");
    }
}
