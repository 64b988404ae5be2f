//! The Cyber Capability Index parameter catalog.
//!
//! The catalog is an immutable template. Every assessment starts from a
//! fresh [`Assessment`](super::Assessment) cloned out of it, so concurrent or
//! repeated assessments never share input state.

use super::parameter::{CatalogRecord, Parameter, ScoringRule};
use crate::error::{CciError, ParseErrorKind, Result};
use indexmap::IndexMap;

/// Static definition of one catalog entry.
struct CatalogEntry {
    id: u32,
    measure_id: &'static str,
    title: &'static str,
    formula: &'static str,
    description: &'static str,
    category: &'static str,
    target: ScoringRule,
    weightage: f64,
}

const STANDARD_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: 1,
        measure_id: "GV.PO.S1",
        title: "Cyber Security Policy Measure",
        formula: "Policies reviewed and approved in the last 12 months / Total cyber security policies",
        description: "Count every board-approved cyber security and cyber resilience policy, and how many were reviewed during the assessment period.",
        category: "Governance: Policy",
        target: ScoringRule::HigherIsBetter,
        weightage: 2.0,
    },
    CatalogEntry {
        id: 2,
        measure_id: "GV.RR.S1",
        title: "Cyber Security Training Measure",
        formula: "Staff with privileged or security roles trained / Total staff with privileged or security roles",
        description: "Role-based training completed within the assessment period.",
        category: "Governance: Roles and Responsibilities",
        target: ScoringRule::HigherIsBetter,
        weightage: 3.0,
    },
    CatalogEntry {
        id: 3,
        measure_id: "GV.SC.S1",
        title: "Third-Party Risk Assessment Measure",
        formula: "Critical third-party service providers assessed / Total critical third-party service providers",
        description: "Providers with a completed security assessment or audit report on file.",
        category: "Governance: Supply Chain Risk Management",
        target: ScoringRule::HigherIsBetter,
        weightage: 5.0,
    },
    CatalogEntry {
        id: 4,
        measure_id: "GV.OV.S1",
        title: "Board Oversight Measure",
        formula: "Cyber security reviews held by the oversight committee / Reviews mandated for the period",
        description: "Meetings of the board or IT committee where cyber risk was a minuted agenda item.",
        category: "Governance: Oversight",
        target: ScoringRule::HigherIsBetter,
        weightage: 2.0,
    },
    CatalogEntry {
        id: 5,
        measure_id: "ID.AM.S1",
        title: "Asset Inventory Measure",
        formula: "Assets recorded in the inventory / Total IT and OT assets",
        description: "Hardware, software and data assets with an owner and classification recorded.",
        category: "Identify: Asset Management",
        target: ScoringRule::HigherIsBetter,
        weightage: 4.0,
    },
    CatalogEntry {
        id: 6,
        measure_id: "ID.AM.S2",
        title: "Critical Systems Identification Measure",
        formula: "Critical systems with documented data flows / Total critical systems",
        description: "Critical systems whose network and data flows are documented and current.",
        category: "Identify: Asset Management",
        target: ScoringRule::HigherIsBetter,
        weightage: 3.0,
    },
    CatalogEntry {
        id: 7,
        measure_id: "ID.RA.S1",
        title: "Risk Assessment Measure",
        formula: "Critical systems risk-assessed in the period / Total critical systems",
        description: "Systems covered by a documented risk assessment with treatment plan.",
        category: "Identify: Risk Assessment",
        target: ScoringRule::HigherIsBetter,
        weightage: 4.0,
    },
    CatalogEntry {
        id: 8,
        measure_id: "PR.AA.S1",
        title: "Privileged Access Management Measure",
        formula: "Privileged accounts managed through PAM / Total privileged accounts",
        description: "Privileged accounts vaulted, session-recorded and reviewed.",
        category: "Protect: Identity Management and Access Control",
        target: ScoringRule::HigherIsBetter,
        weightage: 5.0,
    },
    CatalogEntry {
        id: 9,
        measure_id: "PR.AA.S2",
        title: "Multi-Factor Authentication Measure",
        formula: "Internet-facing and privileged access paths with MFA / Total such access paths",
        description: "Remote access, administrative consoles and critical applications protected by MFA.",
        category: "Protect: Identity Management and Access Control",
        target: ScoringRule::HigherIsBetter,
        weightage: 4.0,
    },
    CatalogEntry {
        id: 10,
        measure_id: "PR.AA.S3",
        title: "Unauthorized Physical Entry Measure",
        formula: "Unauthorized entries into restricted areas / Total entries into restricted areas",
        description: "Lower is better: every unauthorized entry to data centres or network rooms reduces the score.",
        category: "Protect: Identity Management and Access Control",
        target: ScoringRule::LowerIsBetter,
        weightage: 1.0,
    },
    CatalogEntry {
        id: 11,
        measure_id: "PR.DS.S1",
        title: "Data Encryption Measure",
        formula: "Critical data stores encrypted at rest and in transit / Total critical data stores",
        description: "Encryption using approved algorithms and managed keys.",
        category: "Protect: Data Security",
        target: ScoringRule::HigherIsBetter,
        weightage: 4.0,
    },
    CatalogEntry {
        id: 12,
        measure_id: "PR.DS.S2",
        title: "Data Backup Measure",
        formula: "Critical systems with tested backups / Total critical systems",
        description: "Backups restored successfully at least once in the period.",
        category: "Protect: Data Security",
        target: ScoringRule::HigherIsBetter,
        weightage: 3.0,
    },
    CatalogEntry {
        id: 13,
        measure_id: "PR.AT.S1",
        title: "Security Awareness Measure",
        formula: "Employees who completed awareness training / Total employees",
        description: "Includes phishing simulations and annual awareness modules.",
        category: "Protect: Awareness and Training",
        target: ScoringRule::HigherIsBetter,
        weightage: 2.0,
    },
    CatalogEntry {
        id: 14,
        measure_id: "PR.PS.S1",
        title: "Patch Management Measure",
        formula: "Critical patches applied within the defined timeline / Total critical patches released",
        description: "Operating system, firmware and application patches rated critical by the vendor.",
        category: "Protect: Platform Security",
        target: ScoringRule::HigherIsBetter,
        weightage: 5.0,
    },
    CatalogEntry {
        id: 15,
        measure_id: "DE.CM.S1",
        title: "Threat Hunting Coverage Measure",
        formula: "Critical systems covered by threat hunting exercises / Total critical systems",
        description: "Coverage of 50% or more of critical systems earns full credit.",
        category: "Detect: Continuous Monitoring",
        target: ScoringRule::HalfCoverageFull,
        weightage: 9.0,
    },
    CatalogEntry {
        id: 16,
        measure_id: "DE.CM.S2",
        title: "Security Log Monitoring Measure",
        formula: "Critical systems integrated with the SOC / Total critical systems",
        description: "Systems forwarding security logs to a monitored SIEM.",
        category: "Detect: Continuous Monitoring",
        target: ScoringRule::HigherIsBetter,
        weightage: 4.0,
    },
    CatalogEntry {
        id: 17,
        measure_id: "DE.CM.S3",
        title: "Penetration Testing Measure",
        formula: "Internet-facing applications penetration tested / Total internet-facing applications",
        description: "Tests performed by an independent party within the period.",
        category: "Detect: Continuous Monitoring",
        target: ScoringRule::HigherIsBetter,
        weightage: 5.0,
    },
    CatalogEntry {
        id: 18,
        measure_id: "DE.CM.S5",
        title: "Vulnerability Measure",
        formula: "Critical and high vulnerabilities closed within timelines / Total critical and high vulnerabilities identified",
        description: "Findings from VAPT, scanners and audits, closed within the remediation timelines.",
        category: "Detect: Continuous Monitoring",
        target: ScoringRule::HigherIsBetter,
        weightage: 10.0,
    },
    CatalogEntry {
        id: 19,
        measure_id: "DE.CM.S5",
        title: "Configuration Changes Measure",
        formula: "Configuration changes approved through change management / Total configuration changes detected",
        description: "Changes detected by configuration monitoring that trace back to an approved change request.",
        category: "Detect: Continuous Monitoring",
        target: ScoringRule::HigherIsBetter,
        weightage: 4.0,
    },
    CatalogEntry {
        id: 20,
        measure_id: "RS.MA.S1",
        title: "Incident Response Measure",
        formula: "Incidents handled as per the response plan / Total incidents",
        description: "Incidents triaged, contained and closed following the documented playbooks.",
        category: "Respond: Incident Management",
        target: ScoringRule::HigherIsBetter,
        weightage: 6.0,
    },
    CatalogEntry {
        id: 21,
        measure_id: "RS.CO.S1",
        title: "Incident Reporting Measure",
        formula: "Incidents reported to the regulator within the timeline / Total reportable incidents",
        description: "Reportable incidents notified within the mandated reporting window.",
        category: "Respond: Communication",
        target: ScoringRule::HigherIsBetter,
        weightage: 4.0,
    },
    CatalogEntry {
        id: 22,
        measure_id: "RC.RP.S1",
        title: "Recovery Plan Testing Measure",
        formula: "Critical systems covered by a tested recovery drill / Total critical systems",
        description: "Disaster recovery and cyber recovery drills completed in the period.",
        category: "Recover: Recovery Planning",
        target: ScoringRule::HigherIsBetter,
        weightage: 6.0,
    },
    CatalogEntry {
        id: 23,
        measure_id: "RC.RP.S2",
        title: "Recovery Time Objective Measure",
        formula: "Drills that met the recovery time objective / Total recovery drills",
        description: "Drills where services were restored within the approved RTO.",
        category: "Recover: Recovery Planning",
        target: ScoringRule::HigherIsBetter,
        weightage: 5.0,
    },
];

impl CatalogEntry {
    fn to_parameter(&self) -> Parameter {
        let mut parameter = Parameter::new(
            self.id,
            self.measure_id,
            self.title,
            self.target,
            self.weightage,
        )
        .with_category(self.category);
        parameter.formula = self.formula.to_string();
        parameter.description = self.description.to_string();
        parameter
    }
}

/// Convert file records to parameters.
///
/// Valid records keep their order; every rejected record is returned with
/// its id instead of stopping at the first one.
pub fn convert_records(
    records: Vec<CatalogRecord>,
) -> (Vec<Parameter>, Vec<(u32, ParseErrorKind)>) {
    let mut parameters = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for record in records {
        let id = record.id;
        match Parameter::try_from(record) {
            Ok(parameter) => parameters.push(parameter),
            Err(err) => rejected.push((id, err)),
        }
    }

    (parameters, rejected)
}

/// An immutable list of parameter definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    parameters: Vec<Parameter>,
}

impl Catalog {
    /// The built-in 23-parameter catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            parameters: STANDARD_CATALOG.iter().map(CatalogEntry::to_parameter).collect(),
        }
    }

    /// Build a catalog from parameters; inputs are zeroed.
    ///
    /// Fails when two parameters share a numeric id.
    pub fn from_parameters(parameters: Vec<Parameter>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for parameter in &parameters {
            if !seen.insert(parameter.id) {
                return Err(CciError::validation(format!(
                    "duplicate parameter id {} in catalog",
                    parameter.id
                )));
            }
        }

        let parameters = parameters
            .into_iter()
            .map(|mut p| {
                p.reset_inputs();
                p
            })
            .collect();
        Ok(Self { parameters })
    }

    /// Build a catalog from raw file records, reporting every bad target.
    pub fn from_records(records: Vec<CatalogRecord>) -> Result<Self> {
        let (parameters, rejected) = convert_records(records);

        if !rejected.is_empty() {
            let problems: Vec<String> = rejected
                .iter()
                .map(|(id, err)| format!("parameter {id}: {err}"))
                .collect();
            return Err(CciError::validation(problems.join("; ")));
        }

        Self::from_parameters(parameters)
    }

    /// Parameter definitions in catalog order
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Look up a parameter by numeric id
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Sum of every parameter's weightage
    #[must_use]
    pub fn total_weightage(&self) -> f64 {
        self.parameters.iter().map(|p| p.weightage).sum()
    }

    /// Measure codes used by more than one parameter, with the ids sharing them.
    #[must_use]
    pub fn duplicate_measure_ids(&self) -> Vec<(String, Vec<u32>)> {
        duplicate_measure_ids(&self.parameters)
    }

    /// Records suitable for writing a custom catalog file.
    #[must_use]
    pub fn to_records(&self) -> Vec<CatalogRecord> {
        self.parameters.iter().map(CatalogRecord::from).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Group parameter ids by measure code, keeping only codes used more than once.
pub(crate) fn duplicate_measure_ids(parameters: &[Parameter]) -> Vec<(String, Vec<u32>)> {
    let mut by_code: IndexMap<&str, Vec<u32>> = IndexMap::new();
    for parameter in parameters {
        by_code
            .entry(parameter.measure_id.as_str())
            .or_default()
            .push(parameter.id);
    }

    by_code
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(code, ids)| (code.to_string(), ids))
        .collect()
}
