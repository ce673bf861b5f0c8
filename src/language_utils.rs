use anyhow::{Result, anyhow};
use isolang::Language;

// @module: Language id handling
//
// Documents label their channels with ISO 639-1 (`en`), ISO 639-2
// (`eng`, `ger`) or region-qualified (`en-US`, `pl_PL`) ids. These helpers
// reduce all of them to a comparable ISO 639-2/T form.

/// ISO 639-2/B codes that differ from their ISO 639-2/T counterpart
const BIBLIOGRAPHIC_CODES: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Strip region/script subtags and lowercase: `pl_PL` -> `pl`, `en-US` -> `en`
pub fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Normalize a language id to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let primary = primary_subtag(code);

    match primary.len() {
        2 => {
            if let Some(lang) = Language::from_639_1(&primary) {
                return Ok(lang.to_639_3().to_string());
            }
        }
        3 => {
            if Language::from_639_3(&primary).is_some() {
                return Ok(primary);
            }
            if let Some((_, terminological)) = BIBLIOGRAPHIC_CODES
                .iter()
                .find(|(bibliographic, _)| *bibliographic == primary)
            {
                return Ok((*terminological).to_string());
            }
        }
        _ => {}
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Check if two language ids refer to the same language
///
/// Ids that are equal ignoring case always match, even when they are not
/// valid ISO codes, so documents with private channel labels still work.
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    if code1.trim().eq_ignore_ascii_case(code2.trim()) {
        return true;
    }

    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(normalized1), Ok(normalized2)) => normalized1 == normalized2,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Short upper-case label used by the console printer (`en` -> `EN`)
pub fn channel_label(code: &str) -> String {
    primary_subtag(code).to_uppercase()
}
