use crate::shared::FeatureId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Subscription level. Variant order is the access order: a tier unlocks
/// every feature requiring it or a lower tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Free,
    Premium,
    Executive,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Premium => "premium",
            Self::Executive => "executive",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "premium" => Ok(Self::Premium),
            "executive" => Ok(Self::Executive),
            _ => Err("tier must be one of: free, premium, executive".to_string()),
        }
    }

    pub fn highest() -> Self {
        Self::Executive
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    Canceled,
}

impl SubscriptionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Trialing => "trialing",
            Self::Canceled => "canceled",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "trialing" => Ok(Self::Trialing),
            "canceled" => Ok(Self::Canceled),
            _ => Err("status must be one of: active, trialing, canceled".to_string()),
        }
    }

    /// A trial grants the same access as a paid period.
    pub fn counts_as_active(self) -> bool {
        matches!(self, Self::Active | Self::Trialing)
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read-only billing snapshot. The gate never mutates it; refreshing it is
/// the billing collaborator's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionState {
    pub tier: Tier,
    pub status: SubscriptionStatus,
    pub renews_at: i64,
}

/// Feature-to-tier table. Features absent from the table are locked for every
/// subscription, so a typo in a feature id locks content instead of leaking
/// it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeaturePolicy {
    required: BTreeMap<FeatureId, Tier>,
}

impl FeaturePolicy {
    pub fn new(required: BTreeMap<FeatureId, Tier>) -> Self {
        Self { required }
    }

    /// Tier that unlocks a configured feature; `None` when the feature is
    /// not in the table.
    pub fn required_tier(&self, feature: &FeatureId) -> Option<Tier> {
        self.required.get(feature).copied()
    }

    pub fn is_known(&self, feature: &FeatureId) -> bool {
        self.required.contains_key(feature)
    }

    pub fn features(&self) -> impl Iterator<Item = (&FeatureId, Tier)> {
        self.required.iter().map(|(id, tier)| (id, *tier))
    }

    pub fn len(&self) -> usize {
        self.required.len()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }
}

/// Derived per call and never stored, so a subscription change is always
/// observed on the next evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    pub locked: bool,
    pub required: Tier,
}

/// Decides one feature against one subscription snapshot. A feature missing
/// from the policy is locked no matter the subscription, advertised at the
/// highest tier.
pub fn evaluate(
    policy: &FeaturePolicy,
    feature: &FeatureId,
    subscription: &SubscriptionState,
) -> GateDecision {
    match policy.required_tier(feature) {
        Some(required) => evaluate_required(required, subscription),
        None => GateDecision {
            locked: true,
            required: Tier::highest(),
        },
    }
}

pub fn evaluate_required(required: Tier, subscription: &SubscriptionState) -> GateDecision {
    let locked = !subscription.status.counts_as_active() || subscription.tier < required;
    GateDecision { locked, required }
}

/// Chooses between real content and the locked placeholder for one render
/// pass.
pub fn render<T>(
    policy: &FeaturePolicy,
    feature: &FeatureId,
    subscription: &SubscriptionState,
    content: T,
    locked_placeholder: T,
) -> T {
    if evaluate(policy, feature, subscription).locked {
        locked_placeholder
    } else {
        content
    }
}

/// Pricing destination for an upgrade request, with the feature id carried in
/// the query so the destination can highlight what was locked.
pub fn upgrade_route(feature: &FeatureId) -> String {
    format!(
        "/premium/upgrade?feature={}",
        urlencoding::encode(feature.as_str())
    )
}
