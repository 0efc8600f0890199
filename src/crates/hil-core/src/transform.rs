//! The transform step
//!
//! Leaving `TRANSFORMING` derives `transformedOutput` from the collected
//! details. What the derivation produces does not matter to the state
//! machine, so it sits behind the [`Transformer`] trait. The engine calls it at
//! most once per session and bounds the call with
//! [`EngineConfig::transform_timeout`](crate::EngineConfig).
//!
//! [`TemplateTransformer`] is the built-in implementation: one output line per
//! detail, `"the transformed data is {detail}"`.

use async_trait::async_trait;
use thiserror::Error;

/// Error reported by a [`Transformer`]
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("{0}")]
    Failed(String),
}

impl TransformError {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

/// Derives the output shown to the human for approval
#[async_trait]
pub trait Transformer: Send + Sync {
    async fn transform(&self, details: &[String]) -> Result<Vec<String>, TransformError>;
}

/// Maps every detail through a fixed template
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateTransformer;

impl TemplateTransformer {
    pub fn render(detail: &str) -> String {
        format!("the transformed data is {}", detail)
    }
}

#[async_trait]
impl Transformer for TemplateTransformer {
    async fn transform(&self, details: &[String]) -> Result<Vec<String>, TransformError> {
        Ok(details.iter().map(|d| Self::render(d)).collect())
    }
}
