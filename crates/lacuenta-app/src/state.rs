// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;
use time::Date;

use lacuenta_grid::{CheckboxState, ColumnSpec, GridHooks, Row, SelectionState, SelectionSummary};

use crate::forms::ExpenseFormInput;
use crate::model::{ExpenseDraft, ExpensePage, Pagination};
use crate::query::{QueryParams, QueryValue, SortSpec, query_params};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalIntent {
    Create,
    Correct,
}

impl ModalIntent {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Create => "new bill",
            Self::Correct => "correct bill",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalState {
    pub intent: ModalIntent,
    pub values: ExpenseFormInput,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageCommand {
    Init,
    ToggleQueryForm,
    SubmitQuery(BTreeMap<String, QueryValue>),
    ResetQuery,
    TableChanged {
        pagination: Pagination,
        filters: BTreeMap<String, Vec<String>>,
        sorter: Option<SortSpec>,
    },
    PageLoaded(ExpensePage),
    RowsSelected {
        keys: Vec<String>,
        rows: Vec<Row>,
    },
    ClearSelection,
    RemoveSelected,
    RemoveCompleted,
    OpenCreateModal,
    OpenCorrectModal(Row),
    CloseModal,
    SubmitModal(ExpenseFormInput),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    FetchRequested(QueryParams),
    SaveRequested(ExpenseDraft),
    RemoveRequested(Vec<String>),
    SelectionChanged(Vec<Row>),
    QueryFormToggled(bool),
    ModalChanged(Option<ModalIntent>),
    StatusUpdated(String),
}

// All I/O is emitted as request events for the host's effect layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpensePageState {
    columns: Vec<ColumnSpec>,
    row_key: String,
    today: Date,
    expand_form: bool,
    form_values: BTreeMap<String, QueryValue>,
    selection: SelectionState,
    selected_rows: Vec<Row>,
    page: ExpensePage,
    modal: Option<ModalState>,
    status_line: Option<String>,
}

impl ExpensePageState {
    pub fn new(columns: Vec<ColumnSpec>, row_key: impl Into<String>, today: Date) -> Self {
        let selection = SelectionState::new(&columns);
        Self {
            columns,
            row_key: row_key.into(),
            today,
            expand_form: false,
            form_values: BTreeMap::new(),
            selection,
            selected_rows: Vec::new(),
            page: ExpensePage::default(),
            modal: None,
            status_line: None,
        }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn row_key(&self) -> &str {
        &self.row_key
    }

    pub fn expand_form(&self) -> bool {
        self.expand_form
    }

    pub fn page(&self) -> &ExpensePage {
        &self.page
    }

    pub fn rows(&self) -> Vec<Row> {
        self.page.rows()
    }

    pub fn selected_rows(&self) -> &[Row] {
        &self.selected_rows
    }

    pub fn modal(&self) -> Option<&ModalState> {
        self.modal.as_ref()
    }

    pub fn status_line(&self) -> Option<&str> {
        self.status_line.as_deref()
    }

    pub fn summary(&self, hooks: &GridHooks) -> SelectionSummary {
        self.selection.summary(hooks)
    }

    pub fn checkbox_for(&self, row: &Row) -> CheckboxState {
        self.selection.checkbox_for(row, &self.row_key)
    }

    pub fn dispatch(&mut self, command: PageCommand) -> Vec<PageEvent> {
        match command {
            PageCommand::Init => vec![PageEvent::FetchRequested(QueryParams::new())],
            PageCommand::ToggleQueryForm => {
                self.expand_form = !self.expand_form;
                vec![PageEvent::QueryFormToggled(self.expand_form)]
            }
            PageCommand::SubmitQuery(values) => {
                self.form_values = values;
                vec![PageEvent::FetchRequested(query_params(
                    None,
                    &self.form_values,
                    &BTreeMap::new(),
                    None,
                ))]
            }
            PageCommand::ResetQuery => {
                self.form_values.clear();
                vec![PageEvent::FetchRequested(QueryParams::new())]
            }
            PageCommand::TableChanged {
                pagination,
                filters,
                sorter,
            } => vec![PageEvent::FetchRequested(query_params(
                Some(&pagination),
                &self.form_values,
                &filters,
                sorter.as_ref(),
            ))],
            PageCommand::PageLoaded(page) => {
                self.page = page;
                self.selected_rows.clear();
                self.selection.reset(&self.columns);
                Vec::new()
            }
            PageCommand::RowsSelected { keys, rows } => {
                self.selection.select(keys, &rows);
                self.selected_rows = rows.clone();
                vec![PageEvent::SelectionChanged(rows)]
            }
            PageCommand::ClearSelection => {
                self.selection.clear();
                self.selected_rows.clear();
                vec![PageEvent::SelectionChanged(Vec::new())]
            }
            PageCommand::RemoveSelected => {
                if self.selected_rows.is_empty() {
                    return Vec::new();
                }
                let keys = self
                    .selected_rows
                    .iter()
                    .filter_map(|row| row.identity(&self.row_key))
                    .collect();
                vec![PageEvent::RemoveRequested(keys)]
            }
            PageCommand::RemoveCompleted => {
                self.selected_rows.clear();
                self.selection.reset(&self.columns);
                vec![self.set_status("bills removed")]
            }
            PageCommand::OpenCreateModal => {
                self.modal = Some(ModalState {
                    intent: ModalIntent::Create,
                    values: ExpenseFormInput::blank(),
                });
                vec![PageEvent::ModalChanged(Some(ModalIntent::Create))]
            }
            PageCommand::OpenCorrectModal(row) => {
                self.modal = Some(ModalState {
                    intent: ModalIntent::Correct,
                    values: ExpenseFormInput::from_row(&row, &self.row_key),
                });
                vec![PageEvent::ModalChanged(Some(ModalIntent::Correct))]
            }
            PageCommand::CloseModal => {
                self.modal = None;
                vec![PageEvent::ModalChanged(None)]
            }
            PageCommand::SubmitModal(form) => {
                if let Err(error) = form.validate(self.today) {
                    return vec![self.set_status(&error.to_string())];
                }
                let draft = match form.to_draft() {
                    Ok(draft) => draft,
                    Err(error) => return vec![self.set_status(&error.to_string())],
                };
                self.modal = None;
                vec![
                    PageEvent::SaveRequested(draft),
                    PageEvent::ModalChanged(None),
                    self.set_status("bill saved"),
                ]
            }
        }
    }

    fn set_status(&mut self, message: &str) -> PageEvent {
        self.status_line = Some(message.to_owned());
        PageEvent::StatusUpdated(message.to_owned())
    }
}
