/*!
 * Tests for language code utilities
 */

use slpcheck::language_utils::{
    channel_label, get_language_name, language_codes_match, normalize_to_part2t, primary_subtag,
};

#[test]
fn test_primarySubtag_shouldStripRegionAndLowercase() {
    assert_eq!(primary_subtag("pl_PL"), "pl");
    assert_eq!(primary_subtag("EN-us"), "en");
    assert_eq!(primary_subtag(" de "), "de");
}

#[test]
fn test_normalize_withTwoAndThreeLetterCodes_shouldAgree() {
    assert_eq!(normalize_to_part2t("pl").unwrap(), "pol");
    assert_eq!(normalize_to_part2t("pol").unwrap(), "pol");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert!(normalize_to_part2t("xyz1").is_err());
}

#[test]
fn test_languageCodesMatch_withEquivalentCodes_shouldMatch() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("de", "ger"));
    assert!(language_codes_match("pl", "pl-PL"));
    assert!(!language_codes_match("en", "pl"));
}

#[test]
fn test_languageCodesMatch_withPrivateLabels_shouldMatchExactly() {
    assert!(language_codes_match("source", "SOURCE"));
    assert!(!language_codes_match("source", "target"));
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("pl").unwrap(), "Polish");
    assert_eq!(get_language_name("eng").unwrap(), "English");
    assert!(get_language_name("zz").is_err());
}

#[test]
fn test_channelLabel_shouldUppercasePrimarySubtag() {
    assert_eq!(channel_label("en"), "EN");
    assert_eq!(channel_label("pl_PL"), "PL");
}
