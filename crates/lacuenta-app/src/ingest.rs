// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::Date;

use lacuenta_grid::{EditController, EditEvent, GridHooks, Row};

use crate::forms::{BillFormInput, BillPayload};
use crate::model::{ExpenseDraft, expense_hooks};

#[derive(Debug, Clone, PartialEq)]
pub enum IngestEvent {
    GenerateRequested(BillPayload),
    SaveRequested(ExpenseDraft),
    StatusUpdated(String),
}

// An uploaded bill becomes generated detail rows which the operator
// corrects inline before each one is persisted. The generate and save
// round trips belong to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestPageState {
    editor: EditController,
    today: Date,
    status_line: Option<String>,
}

impl IngestPageState {
    pub fn new(editor: EditController, today: Date) -> Self {
        Self {
            editor,
            today,
            status_line: None,
        }
    }

    pub fn hooks(&self) -> GridHooks {
        expense_hooks(self.today)
    }

    pub fn editor(&self) -> &EditController {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditController {
        &mut self.editor
    }

    pub fn status_line(&self) -> Option<&str> {
        self.status_line.as_deref()
    }

    pub fn submit_bill(&mut self, form: &BillFormInput) -> Vec<IngestEvent> {
        if let Err(error) = form.validate() {
            return vec![self.set_status(&error.to_string())];
        }
        vec![IngestEvent::GenerateRequested(form.to_payload())]
    }

    // Reconciliation, not reconstruction: column widths and the edit
    // lock are untouched.
    pub fn rows_generated(&mut self, rows: Vec<Row>) -> Vec<IngestEvent> {
        let count = rows.len();
        self.editor.sync_rows(rows);
        vec![self.set_status(&format!("{count} detail rows generated"))]
    }

    // A validation failure stays inside the controller; a commit is
    // forwarded as a save request.
    pub fn save_row(&mut self) -> Vec<IngestEvent> {
        let hooks = self.hooks();
        let mut out = Vec::new();
        for event in self.editor.save(&hooks) {
            if let EditEvent::RowCommitted(row) = event {
                match ExpenseDraft::from_row(&row, self.editor.row_key()) {
                    Ok(draft) => out.push(IngestEvent::SaveRequested(draft)),
                    Err(error) => out.push(self.set_status(&error.to_string())),
                }
            }
        }
        out
    }

    fn set_status(&mut self, message: &str) -> IngestEvent {
        self.status_line = Some(message.to_owned());
        IngestEvent::StatusUpdated(message.to_owned())
    }
}
