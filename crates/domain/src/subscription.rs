use serde::{Deserialize, Serialize};

/// Lifecycle state reported for a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionState {
    /// Subscription accepts new resources.
    Enabled,
    /// Subscription is read-only until reactivated.
    Warned,
    /// Subscription is past due.
    PastDue,
    /// Subscription is disabled.
    Disabled,
    /// Subscription is being deleted.
    Deleted,
    /// Any state this service does not know about.
    #[serde(untagged)]
    Other(String),
}

/// Subscription visible to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Subscription identifier.
    pub subscription_id: String,
    /// Display name, when the control plane reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Subscription state.
    pub state: SubscriptionState,
}

impl Subscription {
    /// Returns whether the subscription may be used for site queries.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.state == SubscriptionState::Enabled
    }
}

/// Keeps only subscriptions in the `Enabled` state, preserving order.
#[must_use]
pub fn enabled_subscriptions(subscriptions: Vec<Subscription>) -> Vec<Subscription> {
    subscriptions
        .into_iter()
        .filter(Subscription::is_enabled)
        .collect()
}
