//! Custom Test Assertions
//!
//! Provides assertion helpers for routing decisions and resolved
//! identities with more meaningful failure messages.

use domain_identity::ResolvedIdentity;
use domain_routing::{OrganizationalUnit, RoutingDecision};

/// Asserts that a decision journals automatically
///
/// # Panics
///
/// Panics if the decision is manual
pub fn assert_automatic(decision: &RoutingDecision) {
    assert!(
        decision.automatic && decision.unit == OrganizationalUnit::AutomaticJournaling,
        "expected automatic journaling, got {} (automatic={})",
        decision.unit,
        decision.automatic
    );
}

/// Asserts that a decision routes manually to `unit`
///
/// # Panics
///
/// Panics if the decision is automatic or names another unit
pub fn assert_manual(decision: &RoutingDecision, unit: OrganizationalUnit) {
    assert!(
        !decision.automatic,
        "expected manual routing to {unit}, got automatic journaling"
    );
    assert_eq!(
        decision.unit, unit,
        "expected manual routing to {unit}, got {}",
        decision.unit
    );
}

/// Asserts that the routing person has the given actor id
///
/// # Panics
///
/// Panics if the identity is unknown or routes on another actor
pub fn assert_routes_on(identity: &ResolvedIdentity, actor_id: &str) {
    let person = identity
        .routing_person()
        .unwrap_or_else(|| panic!("expected routing person {actor_id}, identity is unknown"));
    assert_eq!(
        person.actor_id.as_str(),
        actor_id,
        "expected routing person {actor_id}, got {}",
        person.actor_id
    );
}
