//! Classification of varbind constraint values
//!
//! A constraint value is either a plain literal, an integer wrapped in
//! needless `^...$` anchors, or a pattern that goes through translation.
//! Translated patterns are marked with a leading `~` for the event matcher.
//! A pattern that cannot be translated is kept, tagged as broken, so the
//! rule is visibly non-functional instead of silently wrong.

use log::{debug, warn};

use crate::translate::Translator;

/// Prefix telling the event matcher that a value is a regex
pub const REGEX_MARKER: char = '~';

/// Prefix tagging a value whose pattern could not be translated
pub const BROKEN_MARKER: &str = "!!BROKEN!!";

const PATTERN_CHARS: [char; 6] = ['^', '$', '<', '>', '[', ']'];

/// A classified varbind constraint value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintValue {
    /// Plain text, used as is
    Literal(String),
    /// The bare digits of a `^digits$` value
    AnchoredInteger(String),
    /// A pattern needing translation
    Pattern(String),
}

/// Check for a value of the form `^digits$`
pub fn is_gratuitously_regexed_integer(value: &str) -> bool {
    anchored_digits(value).is_some()
}

fn anchored_digits(value: &str) -> Option<&str> {
    let digits = value.strip_prefix('^')?.strip_suffix('$')?;
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}

/// Classify a raw constraint value
pub fn classify(value: &str) -> ConstraintValue {
    if let Some(digits) = anchored_digits(value) {
        debug!(
            "Varbind constraint value '{}' is a gratuitously-anchored integer",
            value
        );
        ConstraintValue::AnchoredInteger(digits.to_string())
    } else if value.contains(PATTERN_CHARS) {
        ConstraintValue::Pattern(value.to_string())
    } else {
        ConstraintValue::Literal(value.to_string())
    }
}

impl ConstraintValue {
    /// The carried text (digits only for an anchored integer)
    pub fn as_str(&self) -> &str {
        match self {
            ConstraintValue::Literal(s)
            | ConstraintValue::AnchoredInteger(s)
            | ConstraintValue::Pattern(s) => s,
        }
    }

    /// Whether this value needs translation
    pub fn is_pattern(&self) -> bool {
        matches!(self, ConstraintValue::Pattern(_))
    }

    /// Render as an event-configuration varbind value, default options
    pub fn to_varbind_value(&self) -> String {
        self.to_varbind_value_with(&Translator::default())
    }

    /// Render as an event-configuration varbind value
    ///
    /// Never fails: an untranslatable pattern comes back as
    /// `!!BROKEN!!<original value>`.
    pub fn to_varbind_value_with(&self, translator: &Translator) -> String {
        match self {
            ConstraintValue::Literal(s) | ConstraintValue::AnchoredInteger(s) => s.clone(),
            ConstraintValue::Pattern(pattern) => match translator.translate(pattern) {
                Ok(regex) => {
                    debug!(
                        "Varbind constraint value '{}' translated; marking as a regex",
                        pattern
                    );
                    format!("{}{}", REGEX_MARKER, regex)
                }
                Err(err) => {
                    warn!(
                        "Varbind constraint value '{}' could not be translated: {}",
                        pattern, err
                    );
                    format!("{}{}", BROKEN_MARKER, pattern)
                }
            },
        }
    }
}

/// Classify and render one raw value with default options
pub fn varbind_value(value: &str) -> String {
    classify(value).to_varbind_value()
}

/// Classify and render a batch of raw values with default options
///
/// Each value is handled on its own; a broken one does not affect the rest.
pub fn varbind_values<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    varbind_values_with(&Translator::default(), values)
}

/// Classify and render a batch of raw values
pub fn varbind_values_with<I, S>(translator: &Translator, values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|value| classify(value.as_ref()).to_varbind_value_with(translator))
        .collect()
}
