//! Case routing engine
//!
//! Dispatches each request to the handler registered for its case type.
//! Decisions are computed from the request alone.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use core_kernel::{CaseType, MetricsPort};

use crate::config::RoutingConfig;
use crate::error::RoutingError;
use crate::handlers::{BilateralRule, CaseHandler};
use crate::request::RoutingRequest;
use crate::unit::RoutingDecision;

/// Dispatcher from case type to handler
pub struct RoutingEngine {
    handlers: HashMap<CaseType, CaseHandler>,
    metrics: Arc<dyn MetricsPort>,
}

impl RoutingEngine {
    /// Creates an engine with no handlers registered
    pub fn empty(metrics: Arc<dyn MetricsPort>) -> Self {
        Self {
            handlers: HashMap::new(),
            metrics,
        }
    }

    /// Creates the standard handler table with default configuration
    pub fn with_defaults(metrics: Arc<dyn MetricsPort>) -> Self {
        Self::from_config(&RoutingConfig::default(), metrics)
    }

    /// Creates the standard handler table
    ///
    /// Every known case type gets a handler. The configuration is expected
    /// to be validated already.
    pub fn from_config(config: &RoutingConfig, metrics: Arc<dyn MetricsPort>) -> Self {
        let bilateral = CaseHandler::BilateralClaims(BilateralRule {
            countries: config.bilateral_countries.clone(),
            minor_age: config.bilateral_minor_age,
        });

        let mut engine = Self::empty(metrics);
        for case_type in CaseType::ALL {
            let handler = match case_type {
                CaseType::PBuc01 => CaseHandler::OldAgeBasic,
                CaseType::PBuc02 => CaseHandler::SurvivorFlow,
                CaseType::PBuc05
                | CaseType::PBuc06
                | CaseType::PBuc07
                | CaseType::PBuc08
                | CaseType::PBuc09 => bilateral.clone(),
                CaseType::PBuc10 => CaseHandler::PensionClaims,
                CaseType::RBuc02 => CaseHandler::Recovery,
                CaseType::PBuc03 | CaseType::PBuc04 | CaseType::HBuc07 => CaseHandler::ManualOnly,
            };
            engine = engine.register(*case_type, handler);
        }
        engine
    }

    /// Registers or replaces the handler for a case type
    pub fn register(mut self, case_type: CaseType, handler: CaseHandler) -> Self {
        self.handlers.insert(case_type, handler);
        self
    }

    pub fn handler(&self, case_type: CaseType) -> Option<&CaseHandler> {
        self.handlers.get(&case_type)
    }

    /// Decides where the document in `request` goes
    ///
    /// # Errors
    ///
    /// `UnknownCaseType` when no handler is registered for the case type
    pub fn decide(&self, request: &RoutingRequest) -> Result<RoutingDecision, RoutingError> {
        let case_type = request.case_type();
        let handler = self
            .handlers
            .get(&case_type)
            .ok_or(RoutingError::UnknownCaseType { case_type })?;

        let decision = handler.decide(request);

        info!(
            case_type = %case_type,
            event_type = %request.event_type(),
            document_type = %request.document_type(),
            unit = %decision.unit,
            automatic = decision.automatic,
            "routing decided"
        );
        self.metrics.increment(
            "routing.decision",
            &[
                ("case_type", case_type.code()),
                ("unit", decision.unit.number()),
                ("automatic", if decision.automatic { "true" } else { "false" }),
            ],
        );

        Ok(decision)
    }
}
