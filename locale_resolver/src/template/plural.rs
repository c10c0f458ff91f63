//! CLDR plural category selection.

use intl_pluralrules::{PluralCategory, PluralRuleType, PluralRules};
use tracing::trace;
use unic_langid::LanguageIdentifier;

use super::ast::PluralKind;

/// Returns the CLDR category keyword for `number` in `locale`.
///
/// Locales without plural data select `other`.
pub(crate) fn category(
    locale: &LanguageIdentifier,
    kind: PluralKind,
    number: f64,
) -> &'static str {
    let rule_type = match kind {
        PluralKind::Cardinal => PluralRuleType::CARDINAL,
        PluralKind::Ordinal => PluralRuleType::ORDINAL,
    };
    let rules = match PluralRules::create(locale.clone(), rule_type) {
        Ok(rules) => rules,
        Err(reason) => {
            trace!(%locale, reason, "no plural rules; selecting 'other'");
            return "other";
        }
    };
    match rules.select(number) {
        Ok(PluralCategory::ZERO) => "zero",
        Ok(PluralCategory::ONE) => "one",
        Ok(PluralCategory::TWO) => "two",
        Ok(PluralCategory::FEW) => "few",
        Ok(PluralCategory::MANY) => "many",
        Ok(PluralCategory::OTHER) | Err(_) => "other",
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use unic_langid::langid;

    use super::*;

    #[rstest]
    #[case(1.0, "one")]
    #[case(0.0, "other")]
    #[case(5.0, "other")]
    #[case(1.5, "other")]
    fn english_cardinals(#[case] number: f64, #[case] expected: &str) {
        assert_eq!(category(&langid!("en"), PluralKind::Cardinal, number), expected);
    }

    #[rstest]
    #[case(1.0, "one")]
    #[case(2.0, "two")]
    #[case(3.0, "few")]
    #[case(4.0, "other")]
    #[case(22.0, "two")]
    fn english_ordinals(#[case] number: f64, #[case] expected: &str) {
        assert_eq!(category(&langid!("en"), PluralKind::Ordinal, number), expected);
    }

    #[test]
    fn polish_uses_few_and_many() {
        let pl = langid!("pl");
        assert_eq!(category(&pl, PluralKind::Cardinal, 3.0), "few");
        assert_eq!(category(&pl, PluralKind::Cardinal, 5.0), "many");
    }

    #[test]
    fn unknown_language_selects_other() {
        assert_eq!(category(&langid!("xx"), PluralKind::Cardinal, 1.0), "other");
    }
}
