//! Server launcher port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Evidence that a server process was spawned
///
/// The launcher does not keep the child: the process outlives the caller
/// and is never supervised or terminated by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchReceipt {
    /// OS process id, when the platform reports one
    pub pid: Option<u32>,
}

/// Port for starting the inference server in the background
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ServerLauncherPort: Send + Sync {
    /// Spawn the server detached from the caller
    async fn launch(&self) -> Result<LaunchReceipt, ApplicationError>;
}
