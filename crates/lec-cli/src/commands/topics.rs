use anyhow::bail;
use lec_core::responses::TopicsResponse;
use lec_generator::templates::{canonical_subject, subject_materials, topics_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TopicsArgs;
use crate::output::output;

/// Handle `lectern topics`.
pub fn handle(args: &TopicsArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&topics(&args.subject)?, flags.format)
}

pub fn topics(subject: &str) -> anyhow::Result<TopicsResponse> {
    let Some(canonical) = canonical_subject(subject) else {
        bail!("unknown subject '{subject}'");
    };
    Ok(TopicsResponse {
        subject: canonical.to_string(),
        topics: topics_for(canonical).iter().map(ToString::to_string).collect(),
        materials: subject_materials(canonical)
            .iter()
            .map(ToString::to_string)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn alias_resolves_to_canonical_subject() {
        let response = topics("Maths").unwrap();
        assert_eq!(response.subject, "mathematics");
        assert!(!response.topics.is_empty());
        assert!(!response.materials.is_empty());
    }

    #[test]
    fn unknown_subject_is_an_error() {
        let err = topics("Astrology").unwrap_err();
        assert_eq!(err.to_string(), "unknown subject 'Astrology'");
    }
}
