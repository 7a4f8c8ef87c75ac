//! Platform compliance checks for generated ad copy.
//!
//! The model is asked to respect platform limits but is never trusted to do
//! so. [`validate`] turns whatever came back into a response that satisfies
//! the platform's invariants, dropping offending entries and recording why.
//!
//! # Google
//!
//! Headlines are dropped when they exceed the length limit, contain `!`, or
//! are written entirely in capitals. Descriptions are dropped when they
//! exceed the length limit or contain `!`. Survivors are then capped to the
//! platform's counts, keeping the model's order.
//!
//! # Facebook
//!
//! Entries are only capped to the platform's counts. No content filtering is
//! applied and no warnings are added.

use crate::domain::entities::{DEFAULT_CONFIDENCE, GenerationResponse, RawAdCopy};
use crate::domain::platform::{FieldLimits, Platform};

/// Checks model output against a platform's rules.
///
/// Never fails: non-compliant entries are removed and described in
/// `warnings`, after any warnings the model reported itself. Headline
/// violations come before description violations, each in input order.
///
/// A model-supplied confidence is kept but clamped to `[0, 1]`; a missing
/// one becomes the default of 0.8.
pub fn validate(platform: Platform, candidate: RawAdCopy) -> GenerationResponse {
    let limits = platform.limits();
    let mut warnings = candidate.warnings.unwrap_or_default();

    let (headlines, descriptions) = match platform {
        Platform::Google => {
            let headlines = filter_entries(candidate.headlines, &mut warnings, |h| {
                headline_violation(h, &limits.headline)
            });
            let descriptions = filter_entries(candidate.descriptions, &mut warnings, |d| {
                description_violation(d, &limits.description)
            });
            (headlines, descriptions)
        }
        Platform::Facebook => (candidate.headlines, candidate.descriptions),
    };

    GenerationResponse {
        headlines: cap(headlines, limits.headline.max_count),
        descriptions: cap(descriptions, limits.description.max_count),
        confidence: candidate
            .confidence
            .unwrap_or(DEFAULT_CONFIDENCE)
            .clamp(0.0, 1.0),
        warnings,
    }
}

/// Returns the warning for a non-compliant Google headline.
fn headline_violation(headline: &str, limits: &FieldLimits) -> Option<String> {
    let length = char_len(headline);
    if length > limits.max_length {
        return Some(format!("Headline too long: \"{headline}\" ({length} chars)"));
    }
    if headline.contains('!') {
        return Some(format!(
            "Headline contains exclamation mark: \"{headline}\""
        ));
    }
    if is_all_caps(headline) {
        return Some(format!("Headline contains all caps: \"{headline}\""));
    }
    None
}

/// Returns the warning for a non-compliant Google description.
fn description_violation(description: &str, limits: &FieldLimits) -> Option<String> {
    let length = char_len(description);
    if length > limits.max_length {
        return Some(format!(
            "Description too long: \"{description}\" ({length} chars)"
        ));
    }
    if description.contains('!') {
        return Some(format!(
            "Description contains exclamation mark: \"{description}\""
        ));
    }
    None
}

fn filter_entries<F>(entries: Vec<String>, warnings: &mut Vec<String>, violation: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    entries
        .into_iter()
        .filter(|entry| match violation(entry) {
            Some(warning) => {
                warnings.push(warning);
                false
            }
            None => true,
        })
        .collect()
}

fn cap(mut entries: Vec<String>, max_count: usize) -> Vec<String> {
    entries.truncate(max_count);
    entries
}

/// Length in UTF-16 code units, the unit ad platforms count in.
///
/// Characters outside the Basic Multilingual Plane (most emoji) count twice.
fn char_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// True when the text has cased letters and all of them are capitals.
///
/// Strings without cased letters ("2024", "???") are not shouting.
fn is_all_caps(text: &str) -> bool {
    text.to_lowercase() != text && text.to_uppercase() == text
}
