// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Number,
    Date,
}

impl InputKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "number" => Some(Self::Number),
            "date" => Some(Self::Date),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub summable: bool,
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub input_kind: InputKind,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub width: Option<u16>,
}

const fn default_required() -> bool {
    true
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            summable: false,
            editable: false,
            input_kind: InputKind::Text,
            required: true,
            width: None,
        }
    }
}

// Out-of-range index is a no-op.
pub fn resize_column(columns: &[ColumnSpec], index: usize, width: u16) -> Vec<ColumnSpec> {
    let mut next = columns.to_vec();
    if let Some(column) = next.get_mut(index) {
        column.width = Some(width);
    }
    next
}

// Column set follows `incoming`; a width already set on the working
// copy wins for columns matched by key.
pub fn merge_column_widths(incoming: &[ColumnSpec], current: &[ColumnSpec]) -> Vec<ColumnSpec> {
    incoming
        .iter()
        .map(|column| {
            let width = current
                .iter()
                .find(|existing| existing.key == column.key)
                .and_then(|existing| existing.width)
                .or(column.width);
            ColumnSpec {
                width,
                ..column.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ColumnSpec, InputKind, merge_column_widths, resize_column};

    fn sample_columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("user", "user"),
            ColumnSpec {
                summable: true,
                input_kind: InputKind::Number,
                ..ColumnSpec::new("money", "amount")
            },
            ColumnSpec {
                input_kind: InputKind::Date,
                ..ColumnSpec::new("time", "time")
            },
        ]
    }

    #[test]
    fn input_kind_round_trip() {
        for kind in [InputKind::Text, InputKind::Number, InputKind::Date] {
            assert_eq!(InputKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(InputKind::parse("checkbox"), None);
    }

    #[test]
    fn resize_changes_only_the_indexed_column() {
        let columns = sample_columns();
        let resized = resize_column(&columns, 1, 120);

        assert_eq!(resized[1].width, Some(120));
        assert_eq!(resized[0], columns[0]);
        assert_eq!(resized[2], columns[2]);
        assert_eq!(resized.len(), columns.len());
    }

    #[test]
    fn resize_out_of_range_is_a_no_op() {
        let columns = sample_columns();
        assert_eq!(resize_column(&columns, 7, 80), columns);
    }

    #[test]
    fn interleaved_resizes_commute() {
        let columns = sample_columns();

        let first_then_third = resize_column(&resize_column(&columns, 0, 90), 2, 150);
        let third_then_first = resize_column(&resize_column(&columns, 2, 150), 0, 90);

        assert_eq!(first_then_third, third_then_first);
        assert_eq!(first_then_third[0].width, Some(90));
        assert_eq!(first_then_third[2].width, Some(150));
        assert_eq!(first_then_third[1].width, None);
    }

    #[test]
    fn merge_preserves_working_widths_by_key() {
        let incoming = sample_columns();
        let working = resize_column(&incoming, 1, 200);

        let merged = merge_column_widths(&incoming, &working);
        assert_eq!(merged[1].width, Some(200));
        assert_eq!(merged[0].width, None);
    }

    #[test]
    fn merge_follows_incoming_column_set() {
        let working = resize_column(&sample_columns(), 0, 64);
        let incoming = vec![
            ColumnSpec::new("user", "user"),
            ColumnSpec::new("comment", "comment"),
        ];

        let merged = merge_column_widths(&incoming, &working);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].width, Some(64));
        assert_eq!(merged[1].key, "comment");
        assert_eq!(merged[1].width, None);
    }

    #[test]
    fn column_spec_defaults_required() {
        let column: ColumnSpec =
            serde_json::from_str(r#"{"key": "user", "title": "user"}"#).expect("column decodes");
        assert!(column.required);
        assert!(!column.editable);
        assert_eq!(column.input_kind, InputKind::Text);
    }
}
