use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use super::PermissionCheck;
use crate::models::Number;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PermissionPolicy {
    Allow,
    Deny,
}

impl FromStr for PermissionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "allow" | "true" | "yes" => Ok(PermissionPolicy::Allow),
            "deny" | "false" | "no" => Ok(PermissionPolicy::Deny),
            _ => Err(format!("Invalid permission policy: {}", s)),
        }
    }
}

/// Fixed answer taken from configuration.
#[derive(Debug, Clone)]
pub struct StaticPolicy {
    policy: PermissionPolicy,
}

impl StaticPolicy {
    pub fn new(policy: PermissionPolicy) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl PermissionCheck for StaticPolicy {
    async fn may_multiply(&self, a: &Number, b: &Number) -> bool {
        let allowed = self.policy == PermissionPolicy::Allow;
        debug!("Permission check for {} * {}: allowed={}", a, b, allowed);
        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "allow".parse::<PermissionPolicy>().unwrap(),
            PermissionPolicy::Allow
        );
        assert_eq!(
            "DENY".parse::<PermissionPolicy>().unwrap(),
            PermissionPolicy::Deny
        );
        assert_eq!("yes".parse(), Ok(PermissionPolicy::Allow));
        assert!("maybe".parse::<PermissionPolicy>().is_err());
    }

    #[actix_web::test]
    async fn test_static_policy_answers() {
        let allow = StaticPolicy::new(PermissionPolicy::Allow);
        let deny = StaticPolicy::new(PermissionPolicy::Deny);

        let (a, b) = (Number::from(2), Number::from(3));
        assert!(allow.may_multiply(&a, &b).await);
        assert!(!deny.may_multiply(&a, &b).await);
    }
}
