//! Plain-text rendering of a résumé for the cover letter prompt.
//! Missing fields and empty sections are skipped, never rendered as placeholders.

use std::fmt::Write as _;

use crate::models::{Certificate, Education, Experience, Project, ResumeData};

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn non_empty<T>(items: &Option<Vec<T>>) -> Option<&[T]> {
    items.as_deref().filter(|items| !items.is_empty())
}

/// "Jan 2020 - Present", "2019 - 2021", or `None` when no date part is known.
fn date_range(
    start_month: &Option<String>,
    start_year: &Option<String>,
    end_month: &Option<String>,
    end_year: &Option<String>,
) -> Option<String> {
    let join = |month: &Option<String>, year: &Option<String>| {
        let parts: Vec<&str> = [present(month), present(year)].into_iter().flatten().collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    };

    match (join(start_month, start_year), join(end_month, end_year)) {
        (Some(start), Some(end)) => Some(format!("{start} - {end}")),
        (Some(start), None) => Some(start),
        (None, Some(end)) => Some(format!("until {end}")),
        (None, None) => None,
    }
}

fn headline(parts: &[Option<&str>], separator: &str) -> Option<String> {
    let parts: Vec<&str> = parts.iter().flatten().copied().collect();
    (!parts.is_empty()).then(|| parts.join(separator))
}

pub fn render_resume(resume: &ResumeData) -> String {
    let mut out = String::new();

    if let Some(info) = &resume.personal_info {
        for (label, value) in [
            ("Name", &info.name),
            ("Email", &info.email),
            ("Phone", &info.phone),
            ("LinkedIn", &info.linkedin),
            ("GitHub", &info.github),
            ("Website", &info.website),
        ] {
            if let Some(value) = present(value) {
                let _ = writeln!(out, "{label}: {value}");
            }
        }
    }

    if let Some(summary) = present(&resume.summary) {
        let _ = writeln!(out, "\nSummary:\n{summary}");
    }

    if let Some(skills) = non_empty(&resume.skills) {
        let skills: Vec<&str> = skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if !skills.is_empty() {
            let _ = writeln!(out, "\nSkills: {}", skills.join(", "));
        }
    }

    if let Some(experience) = non_empty(&resume.experience) {
        out.push_str("\nExperience:\n");
        experience.iter().for_each(|e| render_experience(&mut out, e));
    }

    if let Some(projects) = non_empty(&resume.projects) {
        out.push_str("\nProjects:\n");
        projects.iter().for_each(|p| render_project(&mut out, p));
    }

    if let Some(education) = non_empty(&resume.education) {
        out.push_str("\nEducation:\n");
        education.iter().for_each(|e| render_education(&mut out, e));
    }

    if let Some(certificates) = non_empty(&resume.certificates) {
        out.push_str("\nCertificates:\n");
        certificates
            .iter()
            .for_each(|c| render_certificate(&mut out, c));
    }

    out.trim().to_string()
}

fn render_experience(out: &mut String, e: &Experience) {
    let title = headline(&[present(&e.role), present(&e.company)], " at ");
    let dates = date_range(&e.start_month, &e.start_year, &e.end_month, &e.end_year);
    match (title, dates) {
        (Some(title), Some(dates)) => {
            let _ = writeln!(out, "- {title} ({dates})");
        }
        (Some(title), None) => {
            let _ = writeln!(out, "- {title}");
        }
        (None, Some(dates)) => {
            let _ = writeln!(out, "- ({dates})");
        }
        (None, None) => {}
    }
    for detail in e.details.iter().flatten() {
        let detail = detail.trim();
        if !detail.is_empty() {
            let _ = writeln!(out, "  * {detail}");
        }
    }
}

fn render_project(out: &mut String, p: &Project) {
    if let Some(line) = headline(&[present(&p.name), present(&p.description)], ": ") {
        let _ = writeln!(out, "- {line}");
    }
    if let Some(tech) = non_empty(&p.tech) {
        let _ = writeln!(out, "  Tech: {}", tech.join(", "));
    }
    if let Some(link) = present(&p.link) {
        let _ = writeln!(out, "  Link: {link}");
    }
}

fn render_education(out: &mut String, e: &Education) {
    let title = headline(&[present(&e.degree), present(&e.school)], ", ");
    let dates = date_range(&e.start_month, &e.start_year, &e.end_month, &e.end_year);
    if let Some(line) = headline(&[title.as_deref(), dates.as_deref()], " | ") {
        let _ = writeln!(out, "- {line}");
    }
}

fn render_certificate(out: &mut String, c: &Certificate) {
    let issuer = present(&c.issuer).map(|i| format!("issued by {i}"));
    let valid = present(&c.valid_till).map(|v| format!("valid till {v}"));
    if let Some(line) = headline(
        &[present(&c.name), issuer.as_deref(), valid.as_deref()],
        ", ",
    ) {
        let _ = writeln!(out, "- {line}");
    }
    if let Some(description) = present(&c.description) {
        let _ = writeln!(out, "  {description}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PersonalInfo;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_empty_resume_renders_empty() {
        assert_eq!(render_resume(&ResumeData::default()), "");
    }

    #[test]
    fn test_name_only() {
        let resume = ResumeData {
            personal_info: Some(PersonalInfo {
                name: s("Ada Lovelace"),
                ..PersonalInfo::default()
            }),
            ..ResumeData::default()
        };
        assert_eq!(render_resume(&resume), "Name: Ada Lovelace");
    }

    #[test]
    fn test_blank_strings_are_skipped() {
        let resume = ResumeData {
            summary: s("   "),
            skills: Some(vec!["".to_string(), " ".to_string()]),
            experience: Some(vec![Experience::default()]),
            ..ResumeData::default()
        }
        .into_schema();
        let text = render_resume(&resume);
        assert!(!text.contains("Summary"));
        assert!(!text.contains("Skills"));
        assert!(!text.contains("- \n"));
    }

    #[test]
    fn test_full_resume_sections_in_order() {
        let resume = ResumeData {
            personal_info: Some(PersonalInfo {
                name: s("Grace Hopper"),
                email: s("grace@navy.mil"),
                ..PersonalInfo::default()
            }),
            summary: s("Compiler pioneer."),
            skills: Some(vec!["COBOL".to_string(), "Leadership".to_string()]),
            experience: Some(vec![Experience {
                role: s("Rear Admiral"),
                company: s("US Navy"),
                start_month: s("Jan"),
                start_year: s("1967"),
                end_year: s("1986"),
                details: Some(vec!["Standardised COBOL across the fleet".to_string()]),
                ..Experience::default()
            }]),
            projects: Some(vec![Project {
                name: s("A-0"),
                description: s("First compiler"),
                tech: Some(vec!["UNIVAC I".to_string()]),
                link: None,
            }]),
            education: Some(vec![Education {
                degree: s("PhD Mathematics"),
                school: s("Yale"),
                end_year: s("1934"),
                ..Education::default()
            }]),
            certificates: Some(vec![Certificate {
                name: s("Distinguished Service Medal"),
                issuer: s("DoD"),
                ..Certificate::default()
            }]),
        };

        let text = render_resume(&resume);
        let expected = [
            "Name: Grace Hopper",
            "Email: grace@navy.mil",
            "Summary:\nCompiler pioneer.",
            "Skills: COBOL, Leadership",
            "- Rear Admiral at US Navy (Jan 1967 - 1986)",
            "  * Standardised COBOL across the fleet",
            "- A-0: First compiler",
            "  Tech: UNIVAC I",
            "- PhD Mathematics, Yale | until 1934",
            "- Distinguished Service Medal, issued by DoD",
        ];
        let mut last = 0;
        for fragment in expected {
            let at = text[last..]
                .find(fragment)
                .unwrap_or_else(|| panic!("{fragment:?} missing or out of order in:\n{text}"));
            last += at + fragment.len();
        }
    }

    #[test]
    fn test_date_range_variants() {
        assert_eq!(
            date_range(&s("Jun"), &s("2021"), &None, &s("Present")).as_deref(),
            Some("Jun 2021 - Present")
        );
        assert_eq!(
            date_range(&None, &s("2019"), &None, &None).as_deref(),
            Some("2019")
        );
        assert_eq!(date_range(&None, &None, &None, &None), None);
    }
}
