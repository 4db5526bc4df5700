//! XML rule-document parsing.
//!
//! A rule document holds named rules, each carrying one or more numeric
//! cluster ranges. The parser walks the document in order, keeping one
//! running "current variant name": a `RULE_NAME` element that is a direct
//! child of a `RULE` updates the name, and every `VALUES` element beneath
//! a `RULE` expands its range under whatever name was last seen. This is a
//! single flat scan, so a `RULE` without its own `RULE_NAME` inherits the
//! previous rule's name.

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use report_core::models::RangeMapping;
use report_core::{ReportError, Result};

// ── RuleParser ────────────────────────────────────────────────────────────────

/// Parses rule-document text into a [`RangeMapping`].
pub struct RuleParser;

impl RuleParser {
    /// Parse `xml` into a cluster-key-to-variant-name mapping.
    ///
    /// Empty input yields an empty mapping. Malformed XML yields
    /// [`ReportError::RuleParse`]. Malformed range values inside
    /// well-formed XML contribute nothing and are otherwise ignored.
    pub fn parse(xml: &str) -> Result<RangeMapping> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut mapping = RangeMapping::new();
        let mut stack: Vec<String> = Vec::new();
        let mut current_variant = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    stack.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                }
                Ok(Event::End(_)) => {
                    stack.pop();
                }
                Ok(Event::Text(t)) => {
                    let text = t
                        .unescape()
                        .map_err(|e| ReportError::RuleParse(e.to_string()))?;
                    Self::visit_text(&stack, text.trim(), &mut current_variant, &mut mapping);
                }
                Ok(Event::CData(t)) => {
                    let bytes = t.into_inner();
                    let text = String::from_utf8_lossy(&bytes);
                    Self::visit_text(&stack, text.trim(), &mut current_variant, &mut mapping);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(ReportError::RuleParse(e.to_string())),
            }
        }

        debug!("Parsed rule document into {} cluster keys", mapping.len());
        Ok(mapping)
    }

    /// Apply the text of the innermost open element to the running state.
    ///
    /// Qualifying nodes, matching the upstream structural query:
    /// * `RULE_NAME` directly inside a `RULE` — replaces the current name.
    /// * `VALUES` anywhere beneath a `RULE`, text containing `|` — expands
    ///   a range under the current name.
    fn visit_text(
        stack: &[String],
        text: &str,
        current_variant: &mut String,
        mapping: &mut RangeMapping,
    ) {
        let Some(element) = stack.last() else { return };

        match element.as_str() {
            "RULE_NAME" => {
                let direct_parent_is_rule =
                    stack.len() >= 2 && stack[stack.len() - 2] == "RULE";
                if direct_parent_is_rule {
                    *current_variant = text.to_string();
                }
            }
            "VALUES" => {
                let beneath_rule = stack[..stack.len() - 1].iter().any(|n| n == "RULE");
                if beneath_rule && text.contains('|') {
                    expand_range(text, current_variant, mapping);
                }
            }
            _ => {}
        }
    }
}

// ── Range expansion ───────────────────────────────────────────────────────────

/// Expand a `"<start>|<end>"` range into per-integer mapping entries.
///
/// Anything other than exactly two `|`-separated parts contributes nothing,
/// as does a non-numeric bound or a range with `start > end`. Bounds are
/// parsed as floats but only whole numbers inside the range become keys,
/// so fractional bounds narrow the expansion to the integers between them.
fn expand_range(values: &str, variant: &str, mapping: &mut RangeMapping) {
    let parts: Vec<&str> = values.split('|').collect();
    if parts.len() != 2 {
        return;
    }

    let start: f64 = parts[0].trim().parse().unwrap_or(f64::NAN);
    let end: f64 = parts[1].trim().parse().unwrap_or(f64::NAN);
    if !start.is_finite() || !end.is_finite() {
        return;
    }

    let lo = start.ceil() as i64;
    let hi = end.floor() as i64;
    for key in lo..=hi {
        mapping.insert(key.to_string(), variant);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
