//! Résumé schema shared by both services.
//!
//! Every field is optional: `None` means "not extracted", never an error.
//! `into_schema` fills the gaps so extraction output carries no `null`s.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub role: Option<String>,
    pub company: Option<String>,
    #[serde(deserialize_with = "string_like")]
    pub start_month: Option<String>,
    #[serde(deserialize_with = "string_like")]
    pub start_year: Option<String>,
    #[serde(deserialize_with = "string_like")]
    pub end_month: Option<String>,
    #[serde(deserialize_with = "string_like")]
    pub end_year: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub details: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub degree: Option<String>,
    pub school: Option<String>,
    #[serde(deserialize_with = "string_like")]
    pub start_month: Option<String>,
    #[serde(deserialize_with = "string_like")]
    pub start_year: Option<String>,
    #[serde(deserialize_with = "string_like")]
    pub end_month: Option<String>,
    #[serde(deserialize_with = "string_like")]
    pub end_year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certificate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub issuer: Option<String>,
    #[serde(deserialize_with = "string_like")]
    pub valid_till: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub tech: Option<Vec<String>>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub personal_info: Option<PersonalInfo>,
    pub summary: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<Vec<Experience>>,
    pub education: Option<Vec<Education>>,
    pub projects: Option<Vec<Project>>,
    pub certificates: Option<Vec<Certificate>>,
}

fn filled(value: Option<String>) -> Option<String> {
    Some(value.unwrap_or_default())
}

impl PersonalInfo {
    fn into_schema(self) -> Self {
        Self {
            name: filled(self.name),
            email: filled(self.email),
            phone: filled(self.phone),
            linkedin: filled(self.linkedin),
            github: filled(self.github),
            website: filled(self.website),
        }
    }
}

impl Experience {
    fn into_schema(self) -> Self {
        Self {
            role: filled(self.role),
            company: filled(self.company),
            start_month: filled(self.start_month),
            start_year: filled(self.start_year),
            end_month: filled(self.end_month),
            end_year: filled(self.end_year),
            details: Some(self.details.unwrap_or_default()),
        }
    }
}

impl Education {
    fn into_schema(self) -> Self {
        Self {
            degree: filled(self.degree),
            school: filled(self.school),
            start_month: filled(self.start_month),
            start_year: filled(self.start_year),
            end_month: filled(self.end_month),
            end_year: filled(self.end_year),
        }
    }
}

impl Certificate {
    fn into_schema(self) -> Self {
        Self {
            name: filled(self.name),
            description: filled(self.description),
            issuer: filled(self.issuer),
            valid_till: filled(self.valid_till),
            link: filled(self.link),
        }
    }
}

impl Project {
    fn into_schema(self) -> Self {
        Self {
            name: filled(self.name),
            description: filled(self.description),
            tech: Some(self.tech.unwrap_or_default()),
            link: filled(self.link),
        }
    }
}

impl ResumeData {
    /// Returns a copy where every absent field is an empty string or empty list.
    pub fn into_schema(self) -> Self {
        Self {
            personal_info: Some(self.personal_info.unwrap_or_default().into_schema()),
            summary: filled(self.summary),
            skills: Some(self.skills.unwrap_or_default()),
            experience: Some(
                self.experience
                    .unwrap_or_default()
                    .into_iter()
                    .map(Experience::into_schema)
                    .collect(),
            ),
            education: Some(
                self.education
                    .unwrap_or_default()
                    .into_iter()
                    .map(Education::into_schema)
                    .collect(),
            ),
            projects: Some(
                self.projects
                    .unwrap_or_default()
                    .into_iter()
                    .map(Project::into_schema)
                    .collect(),
            ),
            certificates: Some(
                self.certificates
                    .unwrap_or_default()
                    .into_iter()
                    .map(Certificate::into_schema)
                    .collect(),
            ),
        }
    }
}

/// Accepts a string or a bare number (models like to emit `"startYear": 2021`).
fn string_like<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringLike {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<StringLike>::deserialize(deserializer)? {
        Some(StringLike::Text(s)) => Some(s),
        Some(StringLike::Number(n)) => Some(n.to_string()),
        None => None,
    })
}

/// Accepts a list of strings or a single string, wrapped into a one-element list.
fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) => Some(vec![s]),
        Some(OneOrMany::Many(v)) => Some(v),
        None => None,
    })
}
