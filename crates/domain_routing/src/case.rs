//! Existing pension cases in the system of record

use serde::{Deserialize, Serialize};

use core_kernel::{BenefitType, CaseStatus, PensionCaseId};

/// A pension case found for an actor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseRecord {
    pub case_id: PensionCaseId,
    pub benefit_type: BenefitType,
    pub case_status: CaseStatus,
}

impl CaseRecord {
    pub fn new(case_id: impl Into<PensionCaseId>, benefit_type: BenefitType, case_status: CaseStatus) -> Self {
        Self {
            case_id: case_id.into(),
            benefit_type,
            case_status,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.case_status == CaseStatus::Closed
    }

    /// True when the record carries a usable case id
    pub fn has_case_id(&self) -> bool {
        !self.case_id.is_blank()
    }

    /// Picks the case a document should be journaled against
    ///
    /// A record with the wanted benefit type wins; otherwise a sole record is
    /// used. Several records and no benefit match gives `None`.
    pub fn select(records: &[CaseRecord], benefit_type: Option<BenefitType>) -> Option<CaseRecord> {
        if let Some(wanted) = benefit_type {
            if let Some(record) = records.iter().find(|r| r.benefit_type == wanted) {
                return Some(record.clone());
            }
        }

        match records {
            [only] => Some(only.clone()),
            _ => None,
        }
    }
}
