use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lec_core::responses::TopicsResponse;
    use pretty_assertions::assert_eq;

    fn sample() -> TopicsResponse {
        TopicsResponse {
            subject: "music".into(),
            topics: vec!["Rhythm".into()],
            materials: vec!["Drums".into()],
        }
    }

    #[test]
    fn raw_is_single_line() {
        let rendered = render(&sample(), OutputFormat::Raw).unwrap();
        assert_eq!(
            rendered,
            r#"{"subject":"music","topics":["Rhythm"],"materials":["Drums"]}"#
        );
    }

    #[test]
    fn json_is_pretty_and_equivalent() {
        let rendered = render(&sample(), OutputFormat::Json).unwrap();
        assert!(rendered.contains('\n'));
        let parsed: TopicsResponse = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, sample());
    }
}
