//! Fail-fast classification of raw samples as JSON, NDJSON or OTHER.
//!
//! This is a heuristic over a bounded prefix, not a parser: every pass stops at
//! the first disconfirming sample and the verdict reports how many samples (or
//! lines, for a single blob) were actually inspected.

use crate::Result;
use crate::sample::SampleSource;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upper bound on samples inspected from a multi-sample corpus.
pub const MAX_SNIFF_SAMPLES: usize = 50;
/// Upper bound on lines inspected inside a single multi-line sample.
pub const MAX_BLOB_LINES: usize = 200;
/// Samples inspected when the caller does not ask for a limit.
pub const DEFAULT_SNIFF_LIMIT: usize = 10;

/// Share of object-shaped samples above which mixed JSON is treated as NDJSON.
const OBJECT_MAJORITY: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SampleFormat {
    Json,
    Ndjson,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatClassification {
    pub format: SampleFormat,
    pub checked: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FormatClassification {
    fn new(format: SampleFormat, checked: usize) -> Self {
        Self {
            format,
            checked,
            reason: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Object,
    Array,
    Scalar,
    Invalid,
}

fn shape_of(text: &str) -> Shape {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(_)) => Shape::Object,
        Ok(Value::Array(_)) => Shape::Array,
        Ok(_) => Shape::Scalar,
        Err(_) => Shape::Invalid,
    }
}

/// Walk `items` until `accept` rejects one. Returns (all accepted, inspected).
fn scan<'a, I>(items: I, accept: impl Fn(Shape) -> bool) -> (bool, usize)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut inspected = 0;
    for item in items {
        inspected += 1;
        if !accept(shape_of(item)) {
            return (false, inspected);
        }
    }
    (true, inspected)
}

/// Classify `samples`, inspecting at most `max_check` of them (clamped to
/// `1..=MAX_SNIFF_SAMPLES`).
pub fn classify<S: AsRef<str>>(samples: &[S], max_check: usize) -> FormatClassification {
    match samples {
        [] => FormatClassification::new(SampleFormat::Other, 0),
        [single] => classify_blob(single.as_ref()),
        _ => classify_many(samples, max_check.clamp(1, MAX_SNIFF_SAMPLES)),
    }
}

fn classify_blob(blob: &str) -> FormatClassification {
    let blob = blob.trim();
    let lines: Vec<&str> = blob.lines().filter(|l| !l.trim().is_empty()).collect();

    let mut inspected = 1;
    if lines.len() > 1 {
        let (all_objects, n) = scan(
            lines.iter().take(MAX_BLOB_LINES).copied(),
            |s| s == Shape::Object,
        );
        if all_objects {
            return FormatClassification::new(SampleFormat::Ndjson, n);
        }
        inspected = n;
    }

    let format = match shape_of(blob) {
        Shape::Object | Shape::Array => SampleFormat::Json,
        Shape::Scalar | Shape::Invalid => SampleFormat::Other,
    };
    FormatClassification::new(format, inspected)
}

fn classify_many<S: AsRef<str>>(samples: &[S], max_check: usize) -> FormatClassification {
    let prefix: Vec<&str> = samples
        .iter()
        .take(max_check)
        .map(AsRef::as_ref)
        .collect();

    let (all_objects, objects_seen) = scan(prefix.iter().copied(), |s| s == Shape::Object);
    if all_objects {
        return FormatClassification::new(SampleFormat::Ndjson, objects_seen);
    }

    let (all_values, values_seen) = scan(prefix.iter().copied(), |s| {
        matches!(s, Shape::Object | Shape::Array)
    });
    let inspected = objects_seen.max(values_seen);
    if !all_values {
        return FormatClassification::new(SampleFormat::Other, inspected);
    }

    let objects = prefix
        .iter()
        .filter(|s| shape_of(s) == Shape::Object)
        .count();
    let share = objects as f64 / prefix.len() as f64;
    let format = if share > OBJECT_MAJORITY {
        SampleFormat::Ndjson
    } else {
        SampleFormat::Other
    };
    FormatClassification::new(format, inspected)
}

/// Classify the first `limit` samples of a corpus (default
/// `DEFAULT_SNIFF_LIMIT`, never more than `MAX_SNIFF_SAMPLES`).
pub fn sniff_corpus(
    source: &dyn SampleSource,
    corpus_id: &str,
    limit: Option<usize>,
) -> Result<FormatClassification> {
    let limit = limit
        .unwrap_or(DEFAULT_SNIFF_LIMIT)
        .clamp(1, MAX_SNIFF_SAMPLES);

    let all = source.read_samples(corpus_id)?;
    tracing::debug!(corpus = corpus_id, samples = all.len(), "read samples for sniffing");

    let samples = &all[..all.len().min(limit)];
    let mut verdict = classify(samples, limit);
    if samples.is_empty() {
        verdict.reason = Some("no-samples".to_string());
    }

    tracing::info!(
        corpus = corpus_id,
        format = ?verdict.format,
        checked = verdict.checked,
        "sniffed sample format"
    );
    Ok(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::MemorySource;
    use pretty_assertions::assert_eq;

    fn verdict(format: SampleFormat, checked: usize) -> FormatClassification {
        FormatClassification::new(format, checked)
    }

    #[test]
    fn test_empty_input_is_other() {
        let samples: [&str; 0] = [];
        assert_eq!(classify(&samples, 10), verdict(SampleFormat::Other, 0));
    }

    #[test]
    fn test_multi_sample_objects_are_ndjson() {
        let samples = [r#"{"a":1}"#, r#"{"a":2,"b":3}"#];
        assert_eq!(classify(&samples, 10), verdict(SampleFormat::Ndjson, 2));
    }

    #[test]
    fn test_syslog_line_is_other() {
        let samples = ["Oct 19 19:21:33 host proc: msg"];
        assert_eq!(classify(&samples, 10), verdict(SampleFormat::Other, 1));
    }

    #[test]
    fn test_single_blob_of_object_lines_is_ndjson() {
        let blob = "{\"a\":1}\r\n\n{\"b\":2}\n  \n{\"c\":3}\n";
        assert_eq!(classify(&[blob], 10), verdict(SampleFormat::Ndjson, 3));
    }

    #[test]
    fn test_single_blob_fails_fast_on_bad_line() {
        let blob = "{\"a\":1}\n{\"a\":2}\n{\"a\":3}\nnot json\n{\"a\":5}\n{\"a\":6}";
        assert_eq!(classify(&[blob], 10), verdict(SampleFormat::Other, 4));
    }

    #[test]
    fn test_single_blob_pretty_printed_object_is_json() {
        let blob = "{\n  \"a\": 1,\n  \"b\": [1, 2]\n}";
        assert_eq!(classify(&[blob], 10), verdict(SampleFormat::Json, 1));
    }

    #[test]
    fn test_single_line_array_is_json() {
        assert_eq!(classify(&["[1, 2, 3]"], 10), verdict(SampleFormat::Json, 1));
        assert_eq!(classify(&[r#"{"a":1}"#], 10), verdict(SampleFormat::Json, 1));
    }

    #[test]
    fn test_single_scalar_is_other() {
        assert_eq!(classify(&["42"], 10), verdict(SampleFormat::Other, 1));
        assert_eq!(classify(&["\"text\""], 10), verdict(SampleFormat::Other, 1));
    }

    #[test]
    fn test_blob_line_inspection_is_capped() {
        let blob = vec![r#"{"a":1}"#; 250].join("\n");
        assert_eq!(
            classify(&[blob.as_str()], 10),
            verdict(SampleFormat::Ndjson, MAX_BLOB_LINES)
        );
    }

    #[test]
    fn test_multi_sample_inspection_is_bounded() {
        let mut samples = vec![r#"{"a":1}"#; 5];
        samples.push("garbage");
        assert_eq!(classify(&samples, 5), verdict(SampleFormat::Ndjson, 5));

        let samples = vec![r#"{"a":1}"#; 120];
        assert_eq!(
            classify(&samples, 500),
            verdict(SampleFormat::Ndjson, MAX_SNIFF_SAMPLES)
        );
    }

    #[test]
    fn test_mixed_objects_and_arrays_majority_objects() {
        let mut samples = vec![r#"{"a":1}"#; 9];
        samples.push("[1]");
        assert_eq!(classify(&samples, 10), verdict(SampleFormat::Ndjson, 10));
    }

    #[test]
    fn test_mixed_objects_and_arrays_without_majority() {
        let samples = [r#"{"a":1}"#, "[1]", r#"{"b":2}"#, "[2]"];
        assert_eq!(classify(&samples, 10), verdict(SampleFormat::Other, 4));
    }

    #[test]
    fn test_scalars_and_garbage_in_prefix_are_other() {
        let samples = [r#"{"a":1}"#, "[1]", "7", r#"{"b":2}"#];
        assert_eq!(classify(&samples, 10), verdict(SampleFormat::Other, 3));

        let samples = ["nope", r#"{"a":1}"#];
        assert_eq!(classify(&samples, 10), verdict(SampleFormat::Other, 1));
    }

    #[test]
    fn test_sniff_corpus_reports_no_samples() {
        let source = MemorySource::default();
        let got = sniff_corpus(&source, "missing", None).unwrap();
        assert_eq!(got.format, SampleFormat::Other);
        assert_eq!(got.checked, 0);
        assert_eq!(got.reason.as_deref(), Some("no-samples"));
    }

    #[test]
    fn test_sniff_corpus_applies_limit() {
        let mut samples = vec![r#"{"a":1}"#.to_string(); 3];
        samples.push("plain text".to_string());
        let source = MemorySource::default().with_corpus("gw", samples);

        let got = sniff_corpus(&source, "gw", Some(3)).unwrap();
        assert_eq!(got, verdict(SampleFormat::Ndjson, 3));

        let got = sniff_corpus(&source, "gw", None).unwrap();
        assert_eq!(got, verdict(SampleFormat::Other, 4));
    }

    #[test]
    fn test_limit_of_one_treats_first_sample_as_blob() {
        let samples = vec![r#"{"a":1}"#.to_string(), "text".to_string()];
        let source = MemorySource::default().with_corpus("gw", samples);
        let got = sniff_corpus(&source, "gw", Some(1)).unwrap();
        assert_eq!(got, verdict(SampleFormat::Json, 1));
    }

    #[test]
    fn test_format_serializes_uppercase() {
        let json = serde_json::to_value(verdict(SampleFormat::Ndjson, 2)).unwrap();
        assert_eq!(json, serde_json::json!({ "format": "NDJSON", "checked": 2 }));
    }
}
