/// Flattens a job description into a single line that is safe to embed in a prompt.
///
/// Line breaks become spaces, quote characters are dropped, whitespace runs
/// collapse to one space, and the result is trimmed. Absent or empty input
/// yields an empty string. Idempotent.
pub fn sanitize_job_description(jd: Option<&str>) -> String {
    let jd = match jd {
        Some(jd) if !jd.is_empty() => jd,
        _ => return String::new(),
    };

    let flattened: String = jd
        .chars()
        .filter(|c| !matches!(c, '"' | '\''))
        .map(|c| if matches!(c, '\n' | '\r') { ' ' } else { c })
        .collect();

    // split_whitespace collapses runs and drops leading/trailing whitespace in one pass.
    flattened.split_whitespace().collect::<Vec<_>>().join(" ")
}
