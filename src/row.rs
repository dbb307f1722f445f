//! Row-level pipeline: CSV field splitting, normalization, and validation.
//!
//! Everything here is pure. [`evaluate()`] takes one raw line through
//! parse → presence check → normalization → email check and returns a
//! [`ValidationOutcome`] naming the rejection reason when any step fails.
//! Presence is checked on the raw trimmed fields; the email format check
//! runs on the normalized (lowercased) address.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// One trimmed, non-empty line of the input file, numbered by its 1-based
/// position in the filtered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub number: usize,
    pub text: String,
}

/// Raw field triple extracted from a data line. Only exists when the line
/// split into exactly three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub line: usize,
    pub name: String,
    pub surname: String,
    pub email: String,
}

/// A row that passed every check: names capitalized, email lowercased,
/// no field empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUser {
    pub name: String,
    pub surname: String,
    pub email: String,
}

/// Why a row was rejected. Each variant renders the diagnostic shown on the
/// console next to the line number.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error("expected 3 columns, got {actual}")]
    ColumnCount { actual: usize },
    #[error("missing required data (name: '{name}', surname: '{surname}', email: '{email}')")]
    MissingData {
        name: String,
        surname: String,
        email: String,
    },
    #[error("invalid email format: '{email}'")]
    InvalidEmail { email: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid(NormalizedUser),
    Rejected { line: usize, reason: RejectReason },
}

// local@domain with a dotted domain and no whitespace anywhere.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Splits one data line into exactly three trimmed fields, honouring
/// double-quote quoting (commas inside quotes do not split).
pub fn parse_line(raw: &RawLine) -> Result<ParsedRow, RejectReason> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .double_quote(true)
        .from_reader(raw.text.as_bytes());
    let record = match reader.records().next() {
        Some(Ok(record)) => record,
        _ => return Err(RejectReason::ColumnCount { actual: 0 }),
    };
    if record.len() != 3 {
        return Err(RejectReason::ColumnCount {
            actual: record.len(),
        });
    }
    Ok(ParsedRow {
        line: raw.number,
        name: record[0].trim().to_string(),
        surname: record[1].trim().to_string(),
        email: record[2].trim().to_string(),
    })
}

/// Lowercases the whole value, then uppercases the first character.
/// ASCII-only capitalization; non-ASCII leading characters pass through.
fn capitalize(value: &str) -> String {
    let lower = value.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

impl NormalizedUser {
    pub fn from_parsed(row: &ParsedRow) -> Self {
        Self {
            name: capitalize(row.name.trim()),
            surname: capitalize(row.surname.trim()),
            email: row.email.trim().to_lowercase(),
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Runs one line through the whole row pipeline.
pub fn evaluate(raw: &RawLine) -> ValidationOutcome {
    let row = match parse_line(raw) {
        Ok(row) => row,
        Err(reason) => {
            return ValidationOutcome::Rejected {
                line: raw.number,
                reason,
            };
        }
    };

    if row.name.is_empty() || row.surname.is_empty() || row.email.is_empty() {
        return ValidationOutcome::Rejected {
            line: row.line,
            reason: RejectReason::MissingData {
                name: row.name,
                surname: row.surname,
                email: row.email,
            },
        };
    }

    let user = NormalizedUser::from_parsed(&row);
    if !is_valid_email(&user.email) {
        return ValidationOutcome::Rejected {
            line: row.line,
            reason: RejectReason::InvalidEmail { email: user.email },
        };
    }

    ValidationOutcome::Valid(user)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn raw(number: usize, text: &str) -> RawLine {
        RawLine {
            number,
            text: text.to_string(),
        }
    }

    #[test]
    fn parse_splits_plain_fields() {
        let row = parse_line(&raw(2, "john,doe,john.doe@example.com")).expect("three fields");
        assert_eq!(row.name, "john");
        assert_eq!(row.surname, "doe");
        assert_eq!(row.email, "john.doe@example.com");
        assert_eq!(row.line, 2);
    }

    #[test]
    fn parse_keeps_commas_inside_quotes() {
        let row = parse_line(&raw(2, r#""smith, jr.",jane,jane@example.com"#)).expect("quoted");
        assert_eq!(row.name, "smith, jr.");
        assert_eq!(row.surname, "jane");
    }

    #[test]
    fn parse_trims_each_field() {
        let row = parse_line(&raw(2, r#" "john" ,  doe , j@x.com "#)).expect("three fields");
        assert_eq!(row.surname, "doe");
        assert_eq!(row.email, "j@x.com");
    }

    #[test]
    fn wrong_column_counts_are_rejected() {
        assert_eq!(
            parse_line(&raw(2, r#""jane","smith""#)),
            Err(RejectReason::ColumnCount { actual: 2 })
        );
        assert_eq!(
            parse_line(&raw(3, "a,b,c,d")),
            Err(RejectReason::ColumnCount { actual: 4 })
        );
    }

    #[test]
    fn capitalization_lowercases_then_uppercases_first() {
        assert_eq!(capitalize("john"), "John");
        assert_eq!(capitalize("McDONALD"), "Mcdonald");
        assert_eq!(capitalize("o'connor"), "O'connor");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn normalization_matches_reference_behaviour() {
        let row = ParsedRow {
            line: 2,
            name: "john".to_string(),
            surname: "doe".to_string(),
            email: "JOHN.DOE@Example.com".to_string(),
        };
        let user = NormalizedUser::from_parsed(&row);
        assert_eq!(user.name, "John");
        assert_eq!(user.surname, "Doe");
        assert_eq!(user.email, "john.doe@example.com");
    }

    #[test]
    fn email_filter_accepts_dotted_domains_only() {
        assert!(is_valid_email("john.doe@example.com"));
        assert!(is_valid_email("a+b@sub.domain.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@dot"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaced name@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("john@"));
    }

    #[test]
    fn evaluate_rejects_missing_fields_before_email_format() {
        // Name is empty and the email is bogus; the presence check wins.
        let outcome = evaluate(&raw(2, ",smith,not-an-email"));
        assert_eq!(
            outcome,
            ValidationOutcome::Rejected {
                line: 2,
                reason: RejectReason::MissingData {
                    name: String::new(),
                    surname: "smith".to_string(),
                    email: "not-an-email".to_string(),
                },
            }
        );
    }

    #[test]
    fn evaluate_rejects_invalid_email_after_presence_passes() {
        let outcome = evaluate(&raw(4, r#""a","b","not-an-email""#));
        assert_eq!(
            outcome,
            ValidationOutcome::Rejected {
                line: 4,
                reason: RejectReason::InvalidEmail {
                    email: "not-an-email".to_string(),
                },
            }
        );
    }

    #[test]
    fn evaluate_accepts_and_normalizes_a_valid_row() {
        let outcome = evaluate(&raw(2, r#""john","doe","JOHN.DOE@Example.com""#));
        assert_eq!(
            outcome,
            ValidationOutcome::Valid(NormalizedUser {
                name: "John".to_string(),
                surname: "Doe".to_string(),
                email: "john.doe@example.com".to_string(),
            })
        );
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(name in ".*", surname in ".*", email in ".*") {
            let row = ParsedRow { line: 1, name, surname, email };
            let once = NormalizedUser::from_parsed(&row);
            let again = NormalizedUser::from_parsed(&ParsedRow {
                line: 1,
                name: once.name.clone(),
                surname: once.surname.clone(),
                email: once.email.clone(),
            });
            prop_assert_eq!(again, once);
        }
    }
}
