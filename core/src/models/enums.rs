use serde::{Deserialize, Serialize};

/// Execution mode of a job template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    /// Normal execution.
    #[default]
    Run,
    /// Dry-run mode.
    Check,
    /// Analysis only.
    Scan,
}

/// Webhook service a template can integrate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookService {
    Github,
    Gitlab,
}
