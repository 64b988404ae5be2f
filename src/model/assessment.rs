//! Assessment working copies and the input file format.

use super::catalog::Catalog;
use super::parameter::Parameter;
use crate::error::{OptionContext, Result};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Who was assessed, when, and by whom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentMetadata {
    /// Name of the assessed entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Date the assessment refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessed_on: Option<NaiveDate>,
    /// Person or firm performing the assessment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessor: Option<String>,
}

/// User-supplied values for one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Response {
    /// Numeric parameter id from the catalog
    pub id: u32,
    pub numerator: u32,
    pub denominator: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_comment: Option<String>,
}

/// Contents of an assessment input file (YAML or JSON).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentInput {
    #[serde(flatten)]
    pub metadata: AssessmentMetadata,
    #[serde(default)]
    pub responses: Vec<Response>,
    /// Top-level keys this format does not define, such as a misspelt `responses`
    #[serde(flatten)]
    pub unknown_fields: IndexMap<String, serde_json::Value>,
}

/// An independently owned working copy of a catalog for one assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    metadata: AssessmentMetadata,
    parameters: Vec<Parameter>,
}

impl Assessment {
    /// Start a new assessment from a catalog template.
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            metadata: AssessmentMetadata::default(),
            parameters: catalog.parameters().to_vec(),
        }
    }

    /// Attach metadata
    #[must_use]
    pub fn with_metadata(mut self, metadata: AssessmentMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    #[must_use]
    pub const fn metadata(&self) -> &AssessmentMetadata {
        &self.metadata
    }

    /// Live parameter values
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Mutable access to one parameter by id
    pub fn parameter_mut(&mut self, id: u32) -> Option<&mut Parameter> {
        self.parameters.iter_mut().find(|p| p.id == id)
    }

    /// Set numerator and denominator for a parameter.
    pub fn set_inputs(&mut self, id: u32, numerator: u32, denominator: u32) -> Result<()> {
        let parameter = self
            .parameter_mut(id)
            .with_context_none(|| format!("parameter {id} is not in the catalog"))?;
        parameter.numerator = numerator;
        parameter.denominator = denominator;
        parameter.self_assessment_score = None;
        Ok(())
    }

    /// Copy a response's values onto the matching parameter.
    pub fn record_response(&mut self, response: &Response) -> Result<()> {
        let parameter = self
            .parameter_mut(response.id)
            .with_context_none(|| format!("parameter {} is not in the catalog", response.id))?;
        parameter.numerator = response.numerator;
        parameter.denominator = response.denominator;
        parameter.evidence.clone_from(&response.evidence);
        parameter.audit_comment.clone_from(&response.audit_comment);
        parameter.self_assessment_score = None;
        Ok(())
    }

    /// Owned copy of the current values, safe to score while editing continues.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Parameter> {
        self.parameters.clone()
    }

    /// Replace the working values with scored parameters from an index run.
    ///
    /// Only parameters whose ids exist in this assessment are taken over.
    pub fn store_scores(&mut self, scored: &[Parameter]) {
        for scored_param in scored {
            if let Some(parameter) = self.parameter_mut(scored_param.id) {
                parameter.self_assessment_score = scored_param.self_assessment_score;
            }
        }
    }

    /// Export the current values as an input file structure.
    #[must_use]
    pub fn to_input(&self) -> AssessmentInput {
        AssessmentInput {
            metadata: self.metadata.clone(),
            responses: self
                .parameters
                .iter()
                .map(|p| Response {
                    id: p.id,
                    numerator: p.numerator,
                    denominator: p.denominator,
                    evidence: p.evidence.clone(),
                    audit_comment: p.audit_comment.clone(),
                })
                .collect(),
            unknown_fields: IndexMap::new(),
        }
    }
}
