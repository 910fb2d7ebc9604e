pub mod message;
pub mod sanitize;
pub mod screening;
pub mod service;

pub use crate::domain::model::{ConsultationRequest, SanitizedConsultation, SubmissionResponse};
pub use crate::domain::ports::{ConfigProvider, EmailRelay, RelayFailurePolicy};
pub use crate::utils::error::Result;
