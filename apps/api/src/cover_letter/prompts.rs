// Cover letter prompt templates.

/// System instruction: tone, content and format rules for the letter.
pub const COVER_LETTER_SYSTEM: &str = r#"Act as an expert professional development coach and cover-letter writer.
Write a concise (~200 words), impactful, and human-sounding cover letter tailored to a professional in their mid-20s.

Follow these rules:
Tone:
Professional but approachable
No robotic or overly formal language
Mix short and long sentences for natural flow

Content Requirements:
Clearly align my skills, projects, and experience with the key requirements of the job
Include 3 to 5 crisp bullet points highlighting my most relevant achievements
Pull directly from my resume (metrics, tools, projects, cloud experience, ML/DL skills, etc.)
Express genuine interest in the company and how this role supports my career growth

Format:
~200 words
One short intro paragraph
One short bullet-point section
One short closing paragraph
Sound like a real person in their mid-20s
Do not write filler text like "Here is a cover letter tailored to the job description:"

Here are the inputs:
"#;

/// User message: the rendered résumé followed by the sanitized job description.
pub fn build_user_message(resume: &str, job_description: &str) -> String {
    format!("Resume:\n{resume}\n\nJob Description: {job_description}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_embeds_both_inputs() {
        let msg = build_user_message("Name: Ada", "Rust engineer");
        assert_eq!(msg, "Resume:\nName: Ada\n\nJob Description: Rust engineer");
    }

    #[test]
    fn test_braces_in_inputs_are_kept_verbatim() {
        let msg = build_user_message("uses {job_description} literally", "see {resume}");
        assert!(msg.contains("uses {job_description} literally"));
        assert!(msg.ends_with("Job Description: see {resume}"));
    }

    #[test]
    fn test_empty_inputs_still_produce_message() {
        let msg = build_user_message("", "");
        assert!(msg.starts_with("Resume:"));
        assert!(msg.contains("Job Description:"));
    }
}
