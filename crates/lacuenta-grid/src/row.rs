// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_ROW_KEY: &str = "key";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub const fn number(value: f64) -> Self {
        Self::Number(value)
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(_) | Self::Number(_) => false,
            Self::Text(value) => value.trim().is_empty(),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(value) => *value,
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::Text(value) => !value.is_empty(),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => format_number(*value),
            Self::Text(value) => value.clone(),
        }
    }

    // NaN propagates through sums; bad input never counts as zero.
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Null | Self::Bool(_) => f64::NAN,
            Self::Number(value) => *value,
            Self::Text(value) => parse_number(value),
        }
    }

    // Integral numbers drop the fractional part so 1.0 and "1" address
    // the same row.
    pub fn identity(&self) -> Option<String> {
        match self {
            Self::Null | Self::Bool(_) => None,
            Self::Number(value) => Some(format_number(*value)),
            Self::Text(value) => Some(value.clone()),
        }
    }
}

pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

// Longest leading numeric prefix: optional sign, digits, fraction,
// exponent. NaN when no prefix parses.
pub fn parse_number(input: &str) -> f64 {
    let bytes = input.trim_start().as_bytes();
    let mut index = 0usize;

    if index < bytes.len() && (bytes[index] == b'+' || bytes[index] == b'-') {
        index += 1;
    }

    let whole_start = index;
    while index < bytes.len() && bytes[index].is_ascii_digit() {
        index += 1;
    }
    let mut digits = index - whole_start;

    if index < bytes.len() && bytes[index] == b'.' {
        let fraction_start = index + 1;
        let mut cursor = fraction_start;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > fraction_start || digits > 0 {
            digits += cursor - fraction_start;
            index = cursor;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    if index < bytes.len() && (bytes[index] == b'e' || bytes[index] == b'E') {
        let mut cursor = index + 1;
        if cursor < bytes.len() && (bytes[cursor] == b'+' || bytes[cursor] == b'-') {
            cursor += 1;
        }
        let exponent_start = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > exponent_start {
            index = cursor;
        }
    }

    let prefix = std::str::from_utf8(&bytes[..index]).expect("prefix is ascii");
    prefix.parse::<f64>().unwrap_or(f64::NAN)
}

// Identifier uniqueness is the host's invariant, not enforced here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row(BTreeMap<String, CellValue>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: CellValue) {
        self.0.insert(key.into(), value);
    }

    pub fn with(mut self, key: impl Into<String>, value: CellValue) -> Self {
        self.set(key, value);
        self
    }

    pub fn identity(&self, row_key: &str) -> Option<String> {
        self.get(row_key).and_then(CellValue::identity)
    }

    // Edited fields win, unedited fields are retained.
    pub fn merged(&self, edits: &BTreeMap<String, CellValue>) -> Self {
        let mut fields = self.0.clone();
        for (key, value) in edits {
            fields.insert(key.clone(), value.clone());
        }
        Self(fields)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &CellValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{CellValue, DEFAULT_ROW_KEY, Row, parse_number};
    use std::collections::BTreeMap;

    #[test]
    fn parse_number_accepts_common_forms() {
        let cases = [
            ("3000", 3000.0),
            ("+3000", 3000.0),
            ("-200", -200.0),
            ("10.5", 10.5),
            (".75", 0.75),
            ("  42", 42.0),
            ("12abc", 12.0),
            ("1e3", 1000.0),
            ("2.5e-1", 0.25),
            ("7.", 7.0),
        ];
        for (input, expected) in cases {
            let got = parse_number(input);
            assert_eq!(got, expected, "input={input}");
        }
    }

    #[test]
    fn parse_number_rejects_non_numeric() {
        for input in ["", "abc", "+", "-", ".", "e3", "$5"] {
            assert!(parse_number(input).is_nan(), "input={input}");
        }
    }

    #[test]
    fn parse_number_stops_before_bare_exponent() {
        assert_eq!(parse_number("10e"), 10.0);
        assert_eq!(parse_number("10e+"), 10.0);
    }

    #[test]
    fn coercion_propagates_nan() {
        assert!(CellValue::Null.as_number().is_nan());
        assert!(CellValue::text("abc").as_number().is_nan());
        assert_eq!(CellValue::text("+3000").as_number(), 3000.0);
        assert_eq!(CellValue::number(2.5).as_number(), 2.5);
    }

    #[test]
    fn identity_canonicalizes_integral_numbers() {
        assert_eq!(CellValue::number(1.0).identity().as_deref(), Some("1"));
        assert_eq!(CellValue::number(1.5).identity().as_deref(), Some("1.5"));
        assert_eq!(CellValue::text("7").identity().as_deref(), Some("7"));
        assert_eq!(CellValue::Null.identity(), None);
    }

    #[test]
    fn row_identity_uses_designated_field() {
        let row = Row::new()
            .with("id", CellValue::number(4.0))
            .with(DEFAULT_ROW_KEY, CellValue::text("k-4"));

        assert_eq!(row.identity("id").as_deref(), Some("4"));
        assert_eq!(row.identity(DEFAULT_ROW_KEY).as_deref(), Some("k-4"));
        assert_eq!(row.identity("missing"), None);
    }

    #[test]
    fn merged_keeps_unedited_fields() {
        let row = Row::new()
            .with("id", CellValue::number(1.0))
            .with("user", CellValue::text("A"))
            .with("money", CellValue::text("10"))
            .with("comment", CellValue::text("x"));

        let mut edits = BTreeMap::new();
        edits.insert("money".to_owned(), CellValue::text("20"));

        let merged = row.merged(&edits);
        assert_eq!(merged.get("money"), Some(&CellValue::text("20")));
        assert_eq!(merged.get("user"), Some(&CellValue::text("A")));
        assert_eq!(merged.get("comment"), Some(&CellValue::text("x")));
        assert_eq!(merged.len(), 4);
    }

    #[test]
    fn blankness_drives_required_checks() {
        assert!(CellValue::Null.is_blank());
        assert!(CellValue::text("   ").is_blank());
        assert!(!CellValue::text("x").is_blank());
        assert!(!CellValue::number(0.0).is_blank());
    }

    #[test]
    fn cell_value_json_round_trip() {
        let row = Row::new()
            .with("id", CellValue::number(3.0))
            .with("user", CellValue::text("Casey"))
            .with("comment", CellValue::Null);

        let encoded = serde_json::to_string(&row).expect("row encodes");
        let decoded: Row = serde_json::from_str(&encoded).expect("row decodes");
        assert_eq!(decoded, row);

        let upstream: Row = serde_json::from_str(
            r#"{"id": 9, "money": "+3000", "disabled": true, "comment": null}"#,
        )
        .expect("upstream payload decodes");
        assert_eq!(upstream.identity("id").as_deref(), Some("9"));
        assert_eq!(upstream.get("disabled"), Some(&CellValue::Bool(true)));
        assert!(upstream.get("disabled").expect("flag present").is_truthy());
        assert_eq!(upstream.get("comment"), Some(&CellValue::Null));
    }
}
