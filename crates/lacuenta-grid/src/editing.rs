// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use crate::columns::{self, ColumnSpec, InputKind};
use crate::hooks::GridHooks;
use crate::row::{CellValue, DEFAULT_ROW_KEY, Row};

pub const OPERATIONS_KEY: &str = "edit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub column: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditEvent {
    EditStarted(String),
    // Another row already holds the edit lock.
    EditRejected(String),
    EditCancelled,
    // The fully merged row, for the host to persist.
    RowCommitted(Row),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellBinding {
    Display(String),
    Editor {
        kind: InputKind,
        value: CellValue,
        required: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub title: String,
    pub width: Option<u16>,
    pub resizable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOps {
    SaveCancel,
    Edit { enabled: bool },
}

// Single-writer: at most one row is in edit mode per table instance.
#[derive(Debug, Clone, PartialEq)]
pub struct EditController {
    row_key: String,
    resizable: bool,
    columns: Vec<ColumnSpec>,
    rows: Vec<Row>,
    editing: Option<String>,
    draft: BTreeMap<String, CellValue>,
    errors: Vec<FieldError>,
}

impl EditController {
    pub fn new(columns: Vec<ColumnSpec>, rows: Vec<Row>) -> Self {
        Self {
            row_key: DEFAULT_ROW_KEY.to_owned(),
            resizable: false,
            columns,
            rows,
            editing: None,
            draft: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_row_key(mut self, row_key: impl Into<String>) -> Self {
        self.row_key = row_key.into();
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn row_key(&self) -> &str {
        &self.row_key
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn editing_key(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn field_error(&self, column: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.column == column)
            .map(|error| error.message.as_str())
    }

    // External data replaces the row cache; the edit lock survives.
    pub fn sync_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    // Column additions and removals come only from the host.
    pub fn sync_columns(&mut self, columns: &[ColumnSpec]) {
        self.columns = columns::merge_column_widths(columns, &self.columns);
    }

    // Widths live on the working copy so they survive re-renders
    // triggered by data updates.
    pub fn resize_column(&mut self, index: usize, width: u16) {
        self.columns = columns::resize_column(&self.columns, index, width);
    }

    pub fn is_editing(&self, row: &Row) -> bool {
        match (&self.editing, row.identity(&self.row_key)) {
            (Some(editing), Some(identity)) => *editing == identity,
            _ => false,
        }
    }

    pub fn begin_edit(&mut self, key: &str) -> Vec<EditEvent> {
        if self.editing.is_some() {
            return vec![EditEvent::EditRejected(key.to_owned())];
        }

        self.draft = self.seed_draft(key);
        self.errors.clear();
        self.editing = Some(key.to_owned());
        vec![EditEvent::EditStarted(key.to_owned())]
    }

    pub fn set_field(&mut self, column: &str, value: CellValue) {
        if self.editing.is_none() {
            return;
        }
        if !self
            .columns
            .iter()
            .any(|spec| spec.key == column && spec.editable)
        {
            return;
        }
        self.errors.retain(|error| error.column != column);
        self.draft.insert(column.to_owned(), value);
    }

    pub fn cancel(&mut self) -> Vec<EditEvent> {
        if self.editing.is_none() {
            return Vec::new();
        }
        self.editing = None;
        self.draft.clear();
        self.errors.clear();
        vec![EditEvent::EditCancelled]
    }

    // Upsert: merge the draft over the row matched by identity, else
    // append it as a new row. On validation failure nothing transitions
    // and the failures attach to their fields.
    pub fn save(&mut self, hooks: &GridHooks) -> Vec<EditEvent> {
        let Some(editing) = self.editing.clone() else {
            return Vec::new();
        };

        let errors = self.validate_draft(hooks);
        if !errors.is_empty() {
            self.errors = errors;
            return Vec::new();
        }

        let position = self
            .rows
            .iter()
            .position(|row| row.identity(&self.row_key).as_deref() == Some(editing.as_str()));
        let committed = match position {
            Some(index) => {
                let merged = self.rows[index].merged(&self.draft);
                self.rows[index] = merged.clone();
                merged
            }
            None => {
                let row: Row = self.draft.clone().into_iter().collect();
                self.rows.push(row.clone());
                row
            }
        };

        self.editing = None;
        self.draft.clear();
        self.errors.clear();
        vec![EditEvent::RowCommitted(committed)]
    }

    pub fn cell_for(&self, row: &Row, column: &ColumnSpec, hooks: &GridHooks) -> CellBinding {
        if column.editable && self.is_editing(row) {
            let value = self.draft.get(&column.key).cloned().unwrap_or_default();
            return CellBinding::Editor {
                kind: column.input_kind,
                value,
                required: column.required,
            };
        }

        let value = row.get(&column.key).cloned().unwrap_or_default();
        CellBinding::Display(hooks.render(&column.key, &value))
    }

    // The working columns plus the trailing operations column. A header
    // without a width gets no resize handle.
    pub fn headers(&self) -> Vec<Header> {
        let mut headers: Vec<Header> = self
            .columns
            .iter()
            .map(|column| Header {
                key: column.key.clone(),
                title: column.title.clone(),
                width: column.width,
                resizable: self.resizable && column.width.is_some(),
            })
            .collect();
        headers.push(Header {
            key: OPERATIONS_KEY.to_owned(),
            title: OPERATIONS_KEY.to_owned(),
            width: None,
            resizable: false,
        });
        headers
    }

    pub fn row_ops(&self, row: &Row) -> RowOps {
        if self.is_editing(row) {
            RowOps::SaveCancel
        } else {
            RowOps::Edit {
                enabled: self.editing.is_none(),
            }
        }
    }

    fn seed_draft(&self, key: &str) -> BTreeMap<String, CellValue> {
        let Some(row) = self
            .rows
            .iter()
            .find(|row| row.identity(&self.row_key).as_deref() == Some(key))
        else {
            return BTreeMap::new();
        };

        self.columns
            .iter()
            .filter(|column| column.editable)
            .filter_map(|column| {
                row.get(&column.key)
                    .map(|value| (column.key.clone(), value.clone()))
            })
            .collect()
    }

    fn validate_draft(&self, hooks: &GridHooks) -> Vec<FieldError> {
        let mut errors = Vec::new();
        for column in self.columns.iter().filter(|column| column.editable) {
            let value = self.draft.get(&column.key).cloned().unwrap_or_default();
            if column.required && value.is_blank() {
                errors.push(FieldError {
                    column: column.key.clone(),
                    message: format!("{} is required", column.title),
                });
                continue;
            }
            if let Err(message) = hooks.validate(&column.key, &value) {
                errors.push(FieldError {
                    column: column.key.clone(),
                    message,
                });
            }
        }
        errors
    }
}
