pub mod auth;
pub mod domain;
pub mod garde;
pub mod memory;
pub mod metrics;
pub mod telemetry;

pub use domain::*;
pub use memory::*;
pub use metrics::*;

// Re-export mocks when the testing feature is enabled
#[cfg(any(test, feature = "testing"))]
pub use domain::MockClusterStore;
#[cfg(any(test, feature = "testing"))]
pub use domain::MockImpersonatingWriter;
