pub mod adapters;
pub mod api;
pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{EnvConfig, ServerSettings, TomlConfig};

pub use adapters::Web3FormsRelay;
pub use client::{ConsultationClient, ConsultationForm, FormStatus};
pub use core::service::{Acceptance, ConsultationService};
pub use domain::model::{ConsultationRequest, SubmissionResponse};
pub use domain::ports::{ConfigProvider, EmailRelay, RelayFailurePolicy};
pub use utils::error::{ConsultationError, Result};
