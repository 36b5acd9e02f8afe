//! Off-chain certificate metadata.
//!
//! The document is pinned to IPFS by the issuer before minting and the asset's
//! `url` points at it. Pinning itself happens outside this crate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{MintError, MintRequest};

pub const DEFAULT_ISSUER: &str = "CertifyChain Decentralized System";
pub const CERTIFICATE_UNIT_NAME: &str = "CERT";

pub fn ipfs_url(cid: &str) -> String {
    format!("ipfs://{}", cid)
}

/// What the issuer fills in for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateDetails {
    pub student_name: String,
    pub roll_number: String,
    pub course: String,
    pub grade: String,
    pub issue_date: NaiveDate,
}

impl CertificateDetails {
    /// `CERT-<last four characters of the roll number>`
    pub fn asset_name(&self) -> String {
        let chars: Vec<char> = self.roll_number.chars().collect();
        let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
        format!("{}-{}", CERTIFICATE_UNIT_NAME, tail)
    }

    /// Mint arguments for this certificate once its metadata is pinned at `metadata_cid`.
    pub fn mint_request(&self, metadata_cid: &str) -> MintRequest {
        MintRequest::new(
            self.asset_name(),
            CERTIFICATE_UNIT_NAME,
            ipfs_url(metadata_cid),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateProperties {
    pub student_name: String,
    pub roll_number: String,
    pub course: String,
    pub grade: String,
    pub issue_date: NaiveDate,
    pub issuer: String,
}

/// ARC-3 style JSON document describing a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub properties: CertificateProperties,
}

impl CertificateMetadata {
    pub fn new(details: &CertificateDetails, image_cid: &str) -> Self {
        Self {
            name: format!("CertifyChain: {}", details.student_name),
            description: format!("Academic Certificate for {}", details.course),
            image: ipfs_url(image_cid),
            properties: CertificateProperties {
                student_name: details.student_name.clone(),
                roll_number: details.roll_number.clone(),
                course: details.course.clone(),
                grade: details.grade.clone(),
                issue_date: details.issue_date,
                issuer: DEFAULT_ISSUER.to_string(),
            },
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.properties.issuer = issuer.into();
        self
    }

    pub fn to_json(&self) -> Result<String, MintError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, MintError> {
        Ok(serde_json::from_str(json)?)
    }
}
