pub mod client;
pub mod endpoints;
pub mod models;

use async_trait::async_trait;

use crate::error::AppResult;

pub use client::ClassifierClient;
pub use models::{AnalysisResponse, SubmissionInput, UploadedFile};

/// The external classification service: one call, one category and suggested reply.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, input: &SubmissionInput) -> AppResult<AnalysisResponse>;
}
