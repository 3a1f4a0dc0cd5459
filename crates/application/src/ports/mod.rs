//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod generation_port;
mod model_fetcher_port;
mod server_launcher_port;
mod status_probe_port;

#[cfg(test)]
pub use generation_port::MockGenerationPort;
pub use generation_port::{GenerationOutcome, GenerationPort};
pub use model_fetcher_port::{CollectingSink, ModelFetcherPort, ProgressSink, PullReport};
#[cfg(test)]
pub use server_launcher_port::MockServerLauncherPort;
pub use server_launcher_port::{LaunchReceipt, ServerLauncherPort};
#[cfg(test)]
pub use status_probe_port::MockStatusProbePort;
pub use status_probe_port::StatusProbePort;
