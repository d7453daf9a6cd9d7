//! Asynchronous boundary to whatever writes eulogies and inscriptions.
//!
//! Runtime users plug in [`TextGateway`] implementations so the chapel can run
//! against a hosted model, scripted fixtures, or the offline [`CannedGateway`].
//! The worker never sees a gateway failure: [`eulogy_or_fallback`] and
//! [`inscription_or_fallback`] turn every error, timeout or blank answer into
//! fixed text.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use funeral_core::state::{FALLBACK_INSCRIPTION, fallback_eulogy};

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("text gateway unavailable: {0}")]
    Unavailable(String),

    #[error("text gateway refused the request: {0}")]
    Rejected(String),

    #[error("text gateway did not answer within {0:?}")]
    TimedOut(Duration),
}

/// Source of generated text.
///
/// Latency is unbounded; callers wrap every call in a timeout.
#[async_trait]
pub trait TextGateway: Send + Sync {
    async fn generate_eulogy(&self, name: &str, cause: &str) -> Result<String, GatewayError>;

    async fn generate_inscription(&self) -> Result<String, GatewayError>;
}

const EULOGY_TEMPLATES: [&str; 4] = [
    "{name} fought {cause} bravely and lost with dignity. We will tell the tale at parties.",
    "Taken by {cause}, {name} leaves behind an unfinished to-do list and a browser with 47 tabs.",
    "{name} was never defeated by anything except {cause}. Rest easy, champion.",
    "We gather to mourn {name}. {cause} came for them, and honestly, we all saw it coming.",
];

const INSCRIPTIONS: [&str; 5] = [
    "I told you I was sick.",
    "Finally, some peace and quiet.",
    "Back in five minutes. Or never.",
    "Here rests a person who read the terms and conditions.",
    "Out of office. Permanently.",
];

/// Offline gateway rotating through fixed templates.
#[derive(Debug, Default)]
pub struct CannedGateway {
    next_eulogy: AtomicUsize,
    next_inscription: AtomicUsize,
}

impl CannedGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TextGateway for CannedGateway {
    async fn generate_eulogy(&self, name: &str, cause: &str) -> Result<String, GatewayError> {
        let index = self.next_eulogy.fetch_add(1, Ordering::Relaxed) % EULOGY_TEMPLATES.len();
        Ok(EULOGY_TEMPLATES[index]
            .replace("{name}", name)
            .replace("{cause}", cause))
    }

    async fn generate_inscription(&self) -> Result<String, GatewayError> {
        let index = self.next_inscription.fetch_add(1, Ordering::Relaxed) % INSCRIPTIONS.len();
        Ok(INSCRIPTIONS[index].to_string())
    }
}

async fn bounded<F>(limit: Duration, call: F) -> Result<String, GatewayError>
where
    F: Future<Output = Result<String, GatewayError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(GatewayError::TimedOut(limit)),
    }
}

/// Generated eulogy, or the fixed fallback when generation fails.
pub async fn eulogy_or_fallback(
    gateway: &dyn TextGateway,
    name: &str,
    cause: &str,
    limit: Duration,
) -> String {
    match bounded(limit, gateway.generate_eulogy(name, cause)).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            warn!(target: "runtime::gateway", name, "gateway returned a blank eulogy, using fallback");
            fallback_eulogy(name, cause)
        }
        Err(error) => {
            warn!(target: "runtime::gateway", name, %error, "eulogy generation failed, using fallback");
            fallback_eulogy(name, cause)
        }
    }
}

/// Generated inscription, or the fixed fallback when generation fails.
pub async fn inscription_or_fallback(gateway: &dyn TextGateway, limit: Duration) -> String {
    match bounded(limit, gateway.generate_inscription()).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => FALLBACK_INSCRIPTION.to_string(),
        Err(error) => {
            warn!(target: "runtime::gateway", %error, "inscription generation failed, using fallback");
            FALLBACK_INSCRIPTION.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    #[async_trait]
    impl TextGateway for Broken {
        async fn generate_eulogy(&self, _: &str, _: &str) -> Result<String, GatewayError> {
            Err(GatewayError::Unavailable("offline".to_string()))
        }

        async fn generate_inscription(&self) -> Result<String, GatewayError> {
            Ok("  ".to_string())
        }
    }

    struct Stalled;

    #[async_trait]
    impl TextGateway for Stalled {
        async fn generate_eulogy(&self, _: &str, _: &str) -> Result<String, GatewayError> {
            std::future::pending().await
        }

        async fn generate_inscription(&self) -> Result<String, GatewayError> {
            std::future::pending().await
        }
    }

    const LIMIT: Duration = Duration::from_secs(10);

    #[tokio::test]
    async fn canned_gateway_rotates_and_fills_placeholders() {
        let gateway = CannedGateway::new();
        let first = gateway.generate_eulogy("Test", "Boredom").await.unwrap();
        let second = gateway.generate_eulogy("Test", "Boredom").await.unwrap();

        assert_ne!(first, second);
        assert!(first.contains("Test") && first.contains("Boredom"));
        assert!(!first.contains("{name}"));
    }

    #[tokio::test]
    async fn failures_and_blanks_fall_back() {
        assert_eq!(
            eulogy_or_fallback(&Broken, "Test", "Boredom", LIMIT).await,
            fallback_eulogy("Test", "Boredom")
        );
        assert_eq!(inscription_or_fallback(&Broken, LIMIT).await, FALLBACK_INSCRIPTION);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_gateway_times_out() {
        let started = tokio::time::Instant::now();
        let text = eulogy_or_fallback(&Stalled, "Test", "Boredom", LIMIT).await;

        assert_eq!(text, fallback_eulogy("Test", "Boredom"));
        assert_eq!(started.elapsed(), LIMIT);
        assert_eq!(inscription_or_fallback(&Stalled, LIMIT).await, FALLBACK_INSCRIPTION);
    }
}
