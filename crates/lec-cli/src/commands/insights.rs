use std::path::Path;

use anyhow::Context;
use lec_ai::AnyTransport;
use lec_core::requests::InsightsRequest;
use lec_service::ContentService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InsightsArgs;
use crate::output::output;

/// Handle `lectern insights`.
pub async fn handle(
    args: &InsightsArgs,
    service: &ContentService<AnyTransport>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let request = load_request(&args.input)?;
    let request = apply_filters(request, args);
    tracing::debug!(
        attendance = request.attendance_records.len(),
        grades = request.grade_records.len(),
        students = request.student_records.len(),
        "loaded insights input"
    );
    let report = service.generate_educational_insights(&request).await;
    output(&report, flags.format)
}

pub fn load_request(path: &Path) -> anyhow::Result<InsightsRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read insights input at {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid insights input at {}", path.display()))
}

/// Command-line filters take precedence over the file's.
pub fn apply_filters(mut request: InsightsRequest, args: &InsightsArgs) -> InsightsRequest {
    if let Some(class_id) = &args.class_id {
        request.class_id = Some(class_id.clone());
    }
    if let Some(subject) = &args.subject {
        request.subject = Some(subject.clone());
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn args(input: PathBuf) -> InsightsArgs {
        InsightsArgs {
            input,
            class_id: None,
            subject: Some("Mathematics".into()),
        }
    }

    #[test]
    fn loads_records_and_overrides_filters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(
            &path,
            r#"{
                "attendance_records": [
                    {"student_id": "s1", "date": "2026-03-02", "status": "present"}
                ],
                "subject": "English",
                "class_id": "7B"
            }"#,
        )
        .unwrap();

        let request = apply_filters(load_request(&path).unwrap(), &args(path.clone()));
        assert_eq!(request.attendance_records.len(), 1);
        assert!(request.grade_records.is_empty());
        assert_eq!(request.subject.as_deref(), Some("Mathematics"));
        assert_eq!(request.class_id.as_deref(), Some("7B"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_request(&path).unwrap_err();
        assert!(format!("{err:#}").contains("absent.json"));
    }

    #[test]
    fn malformed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "attendance: yes").unwrap();
        let err = load_request(&path).unwrap_err();
        assert!(err.to_string().contains("invalid insights input"));
    }
}
