//! Status probe port

use async_trait::async_trait;
use domain::ServerStatus;
#[cfg(test)]
use mockall::automock;

/// Port for probing the inference server
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatusProbePort: Send + Sync {
    /// Query liveness and installed models within a bounded time
    ///
    /// Implementations swallow every failure and report it as
    /// [`ServerStatus::unreachable`].
    async fn probe(&self) -> ServerStatus;
}
