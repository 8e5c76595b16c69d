use std::fmt;

use serde::Serialize;

/// Trial length granted at registration.
pub const TRIAL_DAYS: i64 = 14;

/// Status every new account starts in.
pub const INITIAL_SUBSCRIPTION_STATUS: &str = "trial_pending";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    #[default]
    Starter,
    Enterprise,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Starter => "starter",
            SubscriptionPlan::Enterprise => "enterprise",
        }
    }

    /// Unknown values fall back to the starter plan.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "enterprise" => SubscriptionPlan::Enterprise,
            _ => SubscriptionPlan::Starter,
        }
    }

    /// AI messages allowed per account, `None` when unlimited.
    pub fn ai_messages_limit(&self) -> Option<i32> {
        match self {
            SubscriptionPlan::Starter => Some(100),
            SubscriptionPlan::Enterprise => None,
        }
    }

    /// Voice calls allowed per account, `None` when unlimited.
    pub fn voice_calls_limit(&self) -> Option<i32> {
        match self {
            SubscriptionPlan::Starter => Some(10),
            SubscriptionPlan::Enterprise => None,
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(role: &str) -> bool {
        role == Role::Admin.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_limits_match_dashboard() {
        let plan = SubscriptionPlan::default();
        assert_eq!(plan, SubscriptionPlan::Starter);
        assert_eq!(plan.ai_messages_limit(), Some(100));
        assert_eq!(plan.voice_calls_limit(), Some(10));
    }

    #[test]
    fn enterprise_is_unlimited() {
        let plan = SubscriptionPlan::parse("Enterprise");
        assert_eq!(plan.ai_messages_limit(), None);
        assert_eq!(plan.voice_calls_limit(), None);
    }

    #[test]
    fn unknown_plan_is_starter() {
        assert_eq!(SubscriptionPlan::parse("trial"), SubscriptionPlan::Starter);
        assert_eq!(SubscriptionPlan::parse(""), SubscriptionPlan::Starter);
    }

    #[test]
    fn admin_role_check() {
        assert!(Role::is_admin("admin"));
        assert!(!Role::is_admin("user"));
        assert!(!Role::is_admin("Admin"));
    }
}
