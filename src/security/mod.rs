//! Capability checks consulted before privileged operations.

pub mod policy;

use async_trait::async_trait;

use crate::models::Number;

pub use policy::StaticPolicy;

/// Decides whether a multiplication may proceed.
///
/// Implementations are shared across all workers and must tolerate
/// concurrent calls. The calculator invokes the check once per multiply.
#[async_trait]
pub trait PermissionCheck: Send + Sync {
    async fn may_multiply(&self, a: &Number, b: &Number) -> bool;
}
