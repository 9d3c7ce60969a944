use crate::fields::FieldCatalog;
use crate::score::ValidationReport;
use crate::validate::ValidationRun;

use serde::Serialize;

/// What `validate` prints: the report, its summary and, for clean runs, the
/// field catalog.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationView<'a> {
    pub summary: String,
    pub report: &'a ValidationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_fields: Option<FieldCatalog>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_count: Option<usize>,
}

impl<'a> ValidationView<'a> {
    pub fn new(run: &'a ValidationRun) -> Self {
        let unique_fields = run.unique_fields();
        Self {
            summary: run.report.summary(),
            report: &run.report,
            field_count: unique_fields.as_ref().map(|f| f.len()),
            unique_fields,
        }
    }
}

/// Pretty JSON with a trailing newline, ready for stdout or a file.
pub fn render_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(data)?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{Outcome, score};
    use crate::simulate::SimulateResponse;
    use serde_json::json;

    #[test]
    fn test_view_of_failed_run_has_no_fields() {
        let run = ValidationRun {
            pipeline: json!({}),
            report: score(&["x"], &[Outcome::failure("bad")]),
            results: Some(SimulateResponse::default()),
        };
        let json = serde_json::to_value(ValidationView::new(&run)).unwrap();
        assert_eq!(json["summary"], "1 out of 1 samples failed. Retry needed.");
        assert!(json.get("unique_fields").is_none());
        assert_eq!(json["report"]["failure_details"][0]["error"], "bad");
    }

    #[test]
    fn test_render_json_ends_with_newline() {
        let out = render_json(&json!({ "a": 1 })).unwrap();
        assert_eq!(out, "{\n  \"a\": 1\n}\n");
    }
}
