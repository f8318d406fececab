// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::columns::ColumnSpec;
use crate::hooks::GridHooks;
use crate::row::{CellValue, Row};

// Per-row field the host sets to keep a row's checkbox disabled.
pub const DISABLED_FIELD: &str = "disabled";

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnTotal {
    pub key: String,
    pub title: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    RowsSelected(Vec<Row>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormattedTotal {
    pub key: String,
    pub title: String,
    pub total: f64,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSummary {
    pub selected: usize,
    pub totals: Vec<FormattedTotal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckboxState {
    pub selected: bool,
    pub disabled: bool,
}

// One total per summable column, in descriptor order.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    selected_keys: Vec<String>,
    totals: Vec<ColumnTotal>,
}

impl SelectionState {
    pub fn new(columns: &[ColumnSpec]) -> Self {
        Self {
            selected_keys: Vec::new(),
            totals: totals_for(columns),
        }
    }

    pub fn selected_keys(&self) -> &[String] {
        &self.selected_keys
    }

    pub fn selected_count(&self) -> usize {
        self.selected_keys.len()
    }

    pub fn totals(&self) -> &[ColumnTotal] {
        &self.totals
    }

    // Totals are recomputed from scratch on every call, never
    // incrementally.
    pub fn select(&mut self, keys: Vec<String>, rows: &[Row]) -> Vec<SelectionEvent> {
        for entry in &mut self.totals {
            entry.total = rows
                .iter()
                .map(|row| row.get(&entry.key).map_or(f64::NAN, CellValue::as_number))
                .sum();
        }
        self.selected_keys = keys;
        vec![SelectionEvent::RowsSelected(rows.to_vec())]
    }

    pub fn clear(&mut self) -> Vec<SelectionEvent> {
        self.select(Vec::new(), &[])
    }

    // Rebuilding from the descriptors keeps column additions and
    // removals reflected after an external reset.
    pub fn reset(&mut self, columns: &[ColumnSpec]) {
        self.selected_keys.clear();
        self.totals = totals_for(columns);
    }

    pub fn summary(&self, hooks: &GridHooks) -> SelectionSummary {
        SelectionSummary {
            selected: self.selected_keys.len(),
            totals: self
                .totals
                .iter()
                .map(|entry| FormattedTotal {
                    key: entry.key.clone(),
                    title: entry.title.clone(),
                    total: entry.total,
                    formatted: hooks.format_total(&entry.key, entry.total),
                })
                .collect(),
        }
    }

    pub fn checkbox_for(&self, row: &Row, row_key: &str) -> CheckboxState {
        let selected = row
            .identity(row_key)
            .is_some_and(|identity| self.selected_keys.contains(&identity));
        let disabled = row
            .get(DISABLED_FIELD)
            .is_some_and(CellValue::is_truthy);
        CheckboxState { selected, disabled }
    }
}

fn totals_for(columns: &[ColumnSpec]) -> Vec<ColumnTotal> {
    columns
        .iter()
        .filter(|column| column.summable)
        .map(|column| ColumnTotal {
            key: column.key.clone(),
            title: column.title.clone(),
            total: 0.0,
        })
        .collect()
}
