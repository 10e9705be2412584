use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeData;

/// Inbound body for `POST /cover-letter`. Both fields may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverLetterRequest {
    pub resume_data: Option<ResumeData>,
    pub job_description: Option<String>,
}
