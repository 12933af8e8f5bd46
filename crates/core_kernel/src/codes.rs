//! Shared code vocabularies
//!
//! Case types, document types, benefit types and relation tags are used by
//! every domain crate. Each carries its wire code so serde and log output
//! agree with the case system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A code string that is not part of a known vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} code: {value}")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownCode {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire code
            pub fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl FromStr for $name {
            type Err = UnknownCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok($name::$variant),)+
                    other => Err(UnknownCode::new($kind, other)),
                }
            }
        }
    };
}

code_enum! {
    /// Cross-border case (BUC) type
    CaseType, "case type" {
        /// Old-age pension basic flow
        PBuc01 => "P_BUC_01",
        /// Survivor and death flow
        PBuc02 => "P_BUC_02",
        /// Disability pension claim
        PBuc03 => "P_BUC_03",
        PBuc04 => "P_BUC_04",
        PBuc05 => "P_BUC_05",
        PBuc06 => "P_BUC_06",
        PBuc07 => "P_BUC_07",
        PBuc08 => "P_BUC_08",
        PBuc09 => "P_BUC_09",
        /// Old-age, disability and survivor claims
        PBuc10 => "P_BUC_10",
        /// Recovery of wrongly paid benefits
        RBuc02 => "R_BUC_02",
        HBuc07 => "H_BUC_07",
    }
}

code_enum! {
    /// Direction of the document event relative to this institution
    EventType, "event type" {
        Sent => "SENDT",
        Received => "MOTTATT",
    }
}

code_enum! {
    /// Benefit type of a pension case
    BenefitType, "benefit type" {
        OldAge => "ALDER",
        Disability => "UFOREP",
        Survivor => "GJENLEV",
        ChildPension => "BARNEP",
        Care => "OMSORG",
        General => "GENRL",
    }
}

code_enum! {
    /// How a person found in a document relates to the case
    RelationTag, "relation" {
        Insured => "FORSIKRET",
        Survivor => "GJENLEVENDE",
        Deceased => "AVDOD",
        Other => "ANNET",
    }
}

code_enum! {
    /// Status of a pension case in the system of record
    CaseStatus, "case status" {
        Created => "OPPRETTET",
        InProgress => "TIL_BEHANDLING",
        Ongoing => "LOPENDE",
        Closed => "AVSLUTTET",
        Cancelled => "AVBRUTT",
    }
}

impl RelationTag {
    /// Rank used when picking the subject of a journal entry; higher wins
    pub fn subject_priority(&self) -> u8 {
        match self {
            RelationTag::Survivor => 2,
            RelationTag::Insured => 1,
            RelationTag::Deceased | RelationTag::Other => 0,
        }
    }
}

/// Structured document (SED) type
///
/// Unlisted types are kept as `Other` so a new document type never fails
/// deserialisation; extraction falls back to the generic rule for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    P2000,
    P2100,
    P2200,
    P4000,
    P5000,
    P6000,
    P7000,
    P8000,
    P10000,
    P12000,
    P15000,
    R004,
    R005,
    H070,
    Other(String),
}

impl DocumentType {
    pub fn code(&self) -> &str {
        match self {
            DocumentType::P2000 => "P2000",
            DocumentType::P2100 => "P2100",
            DocumentType::P2200 => "P2200",
            DocumentType::P4000 => "P4000",
            DocumentType::P5000 => "P5000",
            DocumentType::P6000 => "P6000",
            DocumentType::P7000 => "P7000",
            DocumentType::P8000 => "P8000",
            DocumentType::P10000 => "P10000",
            DocumentType::P12000 => "P12000",
            DocumentType::P15000 => "P15000",
            DocumentType::R004 => "R004",
            DocumentType::R005 => "R005",
            DocumentType::H070 => "H070",
            DocumentType::Other(code) => code,
        }
    }
}

impl From<&str> for DocumentType {
    fn from(value: &str) -> Self {
        match value {
            "P2000" => DocumentType::P2000,
            "P2100" => DocumentType::P2100,
            "P2200" => DocumentType::P2200,
            "P4000" => DocumentType::P4000,
            "P5000" => DocumentType::P5000,
            "P6000" => DocumentType::P6000,
            "P7000" => DocumentType::P7000,
            "P8000" => DocumentType::P8000,
            "P10000" => DocumentType::P10000,
            "P12000" => DocumentType::P12000,
            "P15000" => DocumentType::P15000,
            "R004" => DocumentType::R004,
            "R005" => DocumentType::R005,
            "H070" => DocumentType::H070,
            other => DocumentType::Other(other.to_string()),
        }
    }
}

impl From<String> for DocumentType {
    fn from(value: String) -> Self {
        DocumentType::from(value.as_str())
    }
}

impl From<DocumentType> for String {
    fn from(value: DocumentType) -> String {
        value.code().to_string()
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
