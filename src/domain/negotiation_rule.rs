//! Negotiation-code decoding rules per asset class.
//!
//! Each asset class maps to an ordered list of [`RuleDescriptor`]s. A
//! descriptor names a character range of the negotiation code and how that
//! range is checked. [`evaluate`] interprets the list and ANDs the results.
//!
//! Layouts (character ranges, end exclusive):
//!
//! | class    | rules                                                                |
//! |----------|----------------------------------------------------------------------|
//! | CDB, CRA | `[0,3)` = class key, `[4,6)` numeric, `[4,6)` = issue year, `[7,12)` alphanumeric |
//! | CRI, COE | `[0,2)` = issue year, `[2,4)` = issue month, `[4,12)` alphanumeric   |
//!
//! The issue year is the last two characters of `IssueDate`; the issue month
//! is characters `[3,5)`.

use crate::domain::asset_class::AssetClass;
use crate::domain::predicate::{is_alphanumeric, is_numeric, slice, tail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    /// Last two characters of the issue date.
    Year,
    /// Characters `[3,5)` of the issue date.
    Month,
}

impl DatePart {
    pub fn extract(self, date: &str) -> &str {
        match self {
            DatePart::Year => tail(date, 2),
            DatePart::Month => slice(date, 3, 5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Range equals the asset-class key literal.
    ClassPrefix,
    Numeric,
    Alphanumeric,
    /// Range equals a part of the issue date.
    MatchesIssueDate(DatePart),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDescriptor {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
    pub kind: RuleKind,
}

const PREFIXED_LAYOUT: [RuleDescriptor; 4] = [
    RuleDescriptor {
        name: "StartsWithAssetClass",
        start: 0,
        end: 3,
        kind: RuleKind::ClassPrefix,
    },
    RuleDescriptor {
        name: "YearDigits",
        start: 4,
        end: 6,
        kind: RuleKind::Numeric,
    },
    RuleDescriptor {
        name: "IssueDateNegotiationCode",
        start: 4,
        end: 6,
        kind: RuleKind::MatchesIssueDate(DatePart::Year),
    },
    RuleDescriptor {
        name: "AlphaNumeric",
        start: 7,
        end: 12,
        kind: RuleKind::Alphanumeric,
    },
];

const DATED_LAYOUT: [RuleDescriptor; 3] = [
    RuleDescriptor {
        name: "StartsWithEmissionYear",
        start: 0,
        end: 2,
        kind: RuleKind::MatchesIssueDate(DatePart::Year),
    },
    RuleDescriptor {
        name: "MonthOfEmission",
        start: 2,
        end: 4,
        kind: RuleKind::MatchesIssueDate(DatePart::Month),
    },
    RuleDescriptor {
        name: "AlphaNumeric",
        start: 4,
        end: 12,
        kind: RuleKind::Alphanumeric,
    },
];

pub fn rules_for(class: AssetClass) -> &'static [RuleDescriptor] {
    match class {
        AssetClass::Cdb | AssetClass::Cra => &PREFIXED_LAYOUT,
        AssetClass::Cri | AssetClass::Coe => &DATED_LAYOUT,
    }
}

/// Outcome of a single rule, as reported by [`explain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub name: &'static str,
    pub segment: String,
    pub passed: bool,
}

pub fn check_rule(
    rule: &RuleDescriptor,
    class: AssetClass,
    code: &str,
    issue_date: Option<&str>,
) -> bool {
    let segment = slice(code, rule.start, rule.end);
    match rule.kind {
        RuleKind::ClassPrefix => segment == class.key(),
        RuleKind::Numeric => is_numeric(segment),
        RuleKind::Alphanumeric => is_alphanumeric(segment),
        RuleKind::MatchesIssueDate(part) => match issue_date {
            Some(date) => segment == part.extract(date),
            None => false,
        },
    }
}

/// `CheckNegotiationCode`: every rule of the class layout must pass.
pub fn evaluate(class: AssetClass, code: &str, issue_date: Option<&str>) -> bool {
    rules_for(class)
        .iter()
        .all(|rule| check_rule(rule, class, code, issue_date))
}

/// Per-rule breakdown in layout order.
pub fn explain(class: AssetClass, code: &str, issue_date: Option<&str>) -> Vec<RuleOutcome> {
    rules_for(class)
        .iter()
        .map(|rule| RuleOutcome {
            name: rule.name,
            segment: slice(code, rule.start, rule.end).to_string(),
            passed: check_rule(rule, class, code, issue_date),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUE: Option<&str> = Some("15/01/24");

    #[test]
    fn layouts_are_shared_between_classes() {
        assert_eq!(rules_for(AssetClass::Cdb), rules_for(AssetClass::Cra));
        assert_eq!(rules_for(AssetClass::Cri), rules_for(AssetClass::Coe));
        assert_eq!(rules_for(AssetClass::Cdb).len(), 4);
        assert_eq!(rules_for(AssetClass::Cri).len(), 3);
    }

    #[test]
    fn date_parts() {
        assert_eq!(DatePart::Year.extract("15/01/24"), "24");
        assert_eq!(DatePart::Month.extract("15/01/24"), "01");
        assert_eq!(DatePart::Month.extract("15/0"), "0");
    }

    #[test]
    fn cdb_valid_code() {
        assert!(evaluate(AssetClass::Cdb, "CDB0240AB12", ISSUE));
    }

    #[test]
    fn cdb_wrong_prefix() {
        assert!(!evaluate(AssetClass::Cdb, "CRA0240AB12", ISSUE));
        assert!(!evaluate(AssetClass::Cdb, "cdb0240AB12", ISSUE));
    }

    #[test]
    fn cdb_non_numeric_year() {
        assert!(!evaluate(AssetClass::Cdb, "CDB02A0AB12", Some("15/01/2A")));
    }

    #[test]
    fn cdb_year_mismatch() {
        assert!(!evaluate(AssetClass::Cdb, "CDB0230AB12", ISSUE));
    }

    #[test]
    fn cdb_suffix_not_alphanumeric() {
        assert!(!evaluate(AssetClass::Cdb, "CDB0240A-12", ISSUE));
    }

    #[test]
    fn cdb_ignores_separator_positions() {
        assert!(evaluate(AssetClass::Cdb, "CDB-24-AB12", ISSUE));
    }

    #[test]
    fn cra_uses_own_key() {
        assert!(evaluate(AssetClass::Cra, "CRA0240AB12", ISSUE));
        assert!(!evaluate(AssetClass::Cra, "CDB0240AB12", ISSUE));
    }

    #[test]
    fn cra_year_mismatch() {
        assert!(!evaluate(AssetClass::Cra, "CRA0230AB12", ISSUE));
        assert!(!evaluate(AssetClass::Cra, "CRA02X0AB12", ISSUE));
    }

    #[test]
    fn cra_suffix_not_alphanumeric() {
        assert!(!evaluate(AssetClass::Cra, "CRA0240A_12", ISSUE));
    }

    #[test]
    fn cri_valid_code() {
        assert!(evaluate(AssetClass::Cri, "2401ABCD123", ISSUE));
    }

    #[test]
    fn cri_each_clause_can_fail() {
        assert!(!evaluate(AssetClass::Cri, "2301ABCD123", ISSUE));
        assert!(!evaluate(AssetClass::Cri, "2402ABCD123", ISSUE));
        assert!(!evaluate(AssetClass::Cri, "2401ABC_123", ISSUE));
    }

    #[test]
    fn coe_matches_cri_shape() {
        assert!(evaluate(AssetClass::Coe, "2401ZZZZ999", ISSUE));
        assert!(!evaluate(AssetClass::Coe, "2401", ISSUE));
    }

    #[test]
    fn coe_year_mismatch() {
        assert!(!evaluate(AssetClass::Coe, "2301ZZZZ999", ISSUE));
    }

    #[test]
    fn coe_month_mismatch() {
        assert!(!evaluate(AssetClass::Coe, "2412ZZZZ999", ISSUE));
    }

    #[test]
    fn coe_suffix_not_alphanumeric() {
        assert!(!evaluate(AssetClass::Coe, "2401ZZ ZZ99", ISSUE));
    }

    #[test]
    fn missing_issue_date_fails_date_rules() {
        assert!(!evaluate(AssetClass::Cdb, "CDB0240AB12", None));
        assert!(!evaluate(AssetClass::Cri, "2401ABCD123", None));
    }

    #[test]
    fn empty_code_fails() {
        for class in AssetClass::ALL {
            assert!(!evaluate(class, "", ISSUE));
        }
    }

    #[test]
    fn explain_reports_each_rule() {
        let outcomes = explain(AssetClass::Cdb, "CDB0230AB12", ISSUE);
        let names: Vec<_> = outcomes.iter().map(|o| o.name).collect();
        assert_eq!(
            names,
            vec![
                "StartsWithAssetClass",
                "YearDigits",
                "IssueDateNegotiationCode",
                "AlphaNumeric"
            ]
        );
        let passed: Vec<_> = outcomes.iter().map(|o| o.passed).collect();
        assert_eq!(passed, vec![true, true, false, true]);
        assert_eq!(outcomes[2].segment, "23");
        assert_eq!(outcomes[3].segment, "AB12");
    }
}
