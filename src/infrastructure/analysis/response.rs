//! Model response parsing, validation, and repair
//!
//! The model's completion is untrusted free-form text. This module turns it
//! into a validated [`AnalysisResult`] in four steps: defencing, JSON parse,
//! schema validation, and percentage normalization. JSON-parse failures and
//! schema failures are distinct error kinds; the only repair ever applied is
//! the percentage normalization.

use serde::Deserialize;

use crate::application::ports::AnalysisError;
use crate::domain::analysis::{AnalysisResult, CoreElement, StyleBreakdown};

// Raw (pre-validation) response shape. Text fields the renderer can live
// without default to empty; structural fields are required.

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    styles: Vec<RawStyle>,
    bpm: f64,
    elements: Vec<RawElement>,
    tags: Vec<String>,
    #[serde(rename = "searchKeywords", default)]
    search_keywords: String,
    #[serde(default)]
    summary: String,
}

#[derive(Debug, Deserialize)]
struct RawStyle {
    name: String,
    percentage: f64,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct RawElement {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

/// Strip one optional leading markdown fence (with optional `json` language
/// tag) and one optional trailing fence. Models frequently wrap JSON in
/// fences despite instructions not to. A no-op on unfenced text.
pub fn strip_code_fences(text: &str) -> &str {
    let mut t = text.trim();
    if let Some(rest) = t.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        t = rest.trim_start();
    }
    if let Some(rest) = t.strip_suffix("```") {
        t = rest.trim_end();
    }
    t
}

/// Parse a raw model completion into a validated analysis result.
pub fn parse_analysis(raw_text: &str) -> Result<AnalysisResult, AnalysisError> {
    let defenced = strip_code_fences(raw_text);

    let value: serde_json::Value = serde_json::from_str(defenced)
        .map_err(|e| AnalysisError::MalformedJson(e.to_string()))?;

    let raw: RawAnalysis = serde_json::from_value(value)
        .map_err(|e| AnalysisError::SchemaViolation(e.to_string()))?;

    if raw.styles.is_empty() {
        return Err(AnalysisError::SchemaViolation(
            "styles must be a non-empty array".to_string(),
        ));
    }
    if raw.elements.is_empty() {
        return Err(AnalysisError::SchemaViolation(
            "elements must be a non-empty array".to_string(),
        ));
    }
    if raw.tags.is_empty() {
        return Err(AnalysisError::SchemaViolation(
            "tags must be a non-empty array".to_string(),
        ));
    }
    if !raw.bpm.is_finite() || raw.bpm <= 0.0 {
        return Err(AnalysisError::SchemaViolation(
            "bpm must be a positive number".to_string(),
        ));
    }

    let styles = normalize_percentages(&raw.styles)?;

    Ok(AnalysisResult {
        styles,
        bpm: raw.bpm.round() as u32,
        elements: raw
            .elements
            .into_iter()
            .map(|e| CoreElement {
                name: e.name,
                description: e.description,
                icon: e.icon,
            })
            .collect(),
        tags: raw.tags,
        search_keywords: raw.search_keywords,
        summary: raw.summary,
    })
}

/// Rescale style percentages so they sum to exactly 100.
///
/// When the sum is already exactly 100 the entries pass through unchanged.
/// Otherwise every entry is rescaled by 100/sum and rounded, and the LAST
/// entry is forced to 100 minus the rest so rounding error cannot leak into
/// the total. The last-entry tie-break is deterministic and preserved for
/// output compatibility; wildly inconsistent model values can push it
/// negative or disproportionately large, which is accepted rather than
/// corrected further.
fn normalize_percentages(raw: &[RawStyle]) -> Result<Vec<StyleBreakdown>, AnalysisError> {
    let total: f64 = raw.iter().map(|s| s.percentage).sum();

    if !total.is_finite() || total <= 0.0 {
        return Err(AnalysisError::SchemaViolation(
            "style percentages must sum to a positive number".to_string(),
        ));
    }

    let mut styles: Vec<StyleBreakdown> = if total == 100.0 {
        raw.iter()
            .map(|s| StyleBreakdown {
                name: s.name.clone(),
                percentage: s.percentage.round() as i32,
                description: s.description.clone(),
            })
            .collect()
    } else {
        let factor = 100.0 / total;
        raw.iter()
            .map(|s| StyleBreakdown {
                name: s.name.clone(),
                percentage: (s.percentage * factor).round() as i32,
                description: s.description.clone(),
            })
            .collect()
    };

    if total != 100.0 {
        let partial: i32 = styles[..styles.len() - 1]
            .iter()
            .map(|s| s.percentage)
            .sum();
        if let Some(last) = styles.last_mut() {
            last.percentage = 100 - partial;
        }
    }

    Ok(styles)
}
