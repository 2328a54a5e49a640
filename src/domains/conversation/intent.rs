//! Intent extraction from free text.
//!
//! Rules are evaluated in a fixed order and the first one that extracts
//! parameters wins: math, then weather, otherwise no intent.

use crate::domains::tools::definitions::{MathOperation, TemperatureUnit};

/// Operator keywords, checked top to bottom. Anything else is an addition.
const OPERATOR_RULES: &[(MathOperation, &[&str])] = &[
    (MathOperation::Multiply, &["multiply", "times", "product", "*"]),
    (MathOperation::Subtract, &["subtract", "minus", "difference", "-"]),
];

const FAHRENHEIT_KEYWORD: &str = "fahrenheit";

/// Characters that close a location fragment.
const LOCATION_TERMINATORS: &[char] = &['?', '.', '!'];

#[derive(Debug, Clone, PartialEq)]
pub struct MathQuestion {
    pub operation: MathOperation,
    pub a: f64,
    pub b: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuestion {
    pub location: String,
    pub unit: TemperatureUnit,
}

/// What the caller is asking for.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Math(MathQuestion),
    Weather(WeatherQuestion),
    NoIntentMatched,
}

/// Classify a question.
pub fn detect_intent(question: &str) -> Intent {
    if let Some(math) = parse_math_question(question) {
        return Intent::Math(math);
    }
    if let Some(weather) = parse_weather_question(question) {
        return Intent::Weather(weather);
    }
    Intent::NoIntentMatched
}

/// Extract an arithmetic question: two numbers and an operator.
pub fn parse_math_question(question: &str) -> Option<MathQuestion> {
    let numbers = numeric_tokens(question);
    let [first, second, ..] = numbers.as_slice() else {
        return None;
    };

    let lowered = question.to_lowercase();
    let operation = OPERATOR_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(op, _)| *op)
        .unwrap_or(MathOperation::Add);

    Some(MathQuestion {
        operation,
        a: operand(first)?,
        b: operand(second)?,
    })
}

/// Tokens too large for `f64` have no JSON representation.
fn operand(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Extract a weather question: an `in <location>` fragment and a unit.
pub fn parse_weather_question(question: &str) -> Option<WeatherQuestion> {
    let lowered = question.to_lowercase();
    let unit = if lowered.contains(FAHRENHEIT_KEYWORD) {
        TemperatureUnit::Fahrenheit
    } else {
        TemperatureUnit::Celsius
    };

    let captured = location_fragment(&lowered)?;
    let mut location = captured.trim();
    if let Some((head, _)) = location.split_once(" in ") {
        location = head.trim();
    }
    let location = location.trim_end_matches(LOCATION_TERMINATORS);
    if location.is_empty() {
        return None;
    }

    Some(WeatherQuestion {
        location: location.to_string(),
        unit,
    })
}

/// All numeric tokens, leftmost first: optional `-`, digits, optional
/// `.digits`. Tokens never overlap.
pub fn numeric_tokens(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let mut j = i;
        if bytes[j] == b'-' {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            j = skip_digits(bytes, j);
            if j + 1 < bytes.len() && bytes[j] == b'.' && bytes[j + 1].is_ascii_digit() {
                j = skip_digits(bytes, j + 1);
            }
            tokens.push(&text[start..j]);
            i = j;
        } else {
            i += 1;
        }
    }
    tokens
}

fn skip_digits(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i
}

/// First `in ` followed by a run of lowercase ASCII letters or whitespace
/// that ends at a terminator or at the end of the text.
fn location_fragment(lowered: &str) -> Option<&str> {
    lowered.match_indices("in ").find_map(|(start, marker)| {
        let rest = &lowered[start + marker.len()..];
        let end = rest
            .find(|c: char| !(c.is_ascii_lowercase() || c.is_whitespace()))
            .unwrap_or(rest.len());
        if end == 0 {
            return None;
        }
        match rest[end..].chars().next() {
            None => Some(&rest[..end]),
            Some(c) if LOCATION_TERMINATORS.contains(&c) => Some(&rest[..end]),
            Some(_) => None,
        }
    })
}
