// Résumé extraction prompt. Sent as-is with the PDF attached; no per-request substitution.

pub const RESUME_EXTRACTION_PROMPT: &str = r#"
Extract the resume data from the provided PDF. Return EXACTLY one JSON object (no markdown, no code fences,
no commentary) that conforms to the following schema:

{
  "personalInfo": {
    "name": "",
    "email": "",
    "phone": "",
    "linkedin": "",
    "github": "",
    "website": ""
  },
  "summary": "",
  "skills": [],
  "experience": [
    {
      "role": "",
      "company": "",
      "startMonth": "",
      "startYear": "",
      "endMonth": "",
      "endYear": "",
      "details": [""]
    }
  ],
  "education": [
    {
      "degree": "",
      "school": "",
      "startMonth": "",
      "startYear": "",
      "endMonth": "",
      "endYear": ""
    }
  ],
  "projects": [
    {
      "name": "",
      "description": "",
      "tech": [""],
      "link": ""
    }
  ],
  "certificates": [
    {
      "name": "",
      "description": "",
      "issuer": "",
      "validTill": "",
      "link": ""
    }
  ]
}

Rules:
- Output must be valid JSON parseable by standard JSON parsers.
- Fields not found must be empty strings or empty arrays as appropriate.
- Do not add any extra fields or commentary.
Return ONLY the JSON object.
"#;
