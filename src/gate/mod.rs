pub mod policy;

pub use policy::{
    evaluate, evaluate_required, render, upgrade_route, FeaturePolicy, GateDecision,
    SubscriptionState, SubscriptionStatus, Tier,
};
