// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;
use time::Date;

use crate::row::{CellValue, format_number};

pub type FieldValidator = Box<dyn Fn(&CellValue) -> Result<(), String>>;
pub type CellRenderer = Box<dyn Fn(&CellValue) -> String>;
pub type TotalFormatter = Box<dyn Fn(f64) -> String>;
pub type DatePredicate = Box<dyn Fn(Date) -> bool>;

// Host-supplied callbacks, handed to controller methods explicitly so
// the controllers themselves stay plain data.
#[derive(Default)]
pub struct GridHooks {
    validators: BTreeMap<String, FieldValidator>,
    renderers: BTreeMap<String, CellRenderer>,
    total_formats: BTreeMap<String, TotalFormatter>,
    disabled_date: Option<DatePredicate>,
}

impl GridHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validator(
        mut self,
        column: impl Into<String>,
        validator: impl Fn(&CellValue) -> Result<(), String> + 'static,
    ) -> Self {
        self.validators.insert(column.into(), Box::new(validator));
        self
    }

    pub fn with_renderer(
        mut self,
        column: impl Into<String>,
        renderer: impl Fn(&CellValue) -> String + 'static,
    ) -> Self {
        self.renderers.insert(column.into(), Box::new(renderer));
        self
    }

    pub fn with_total_format(
        mut self,
        column: impl Into<String>,
        format: impl Fn(f64) -> String + 'static,
    ) -> Self {
        self.total_formats.insert(column.into(), Box::new(format));
        self
    }

    pub fn with_disabled_date(mut self, predicate: impl Fn(Date) -> bool + 'static) -> Self {
        self.disabled_date = Some(Box::new(predicate));
        self
    }

    pub fn validate(&self, column: &str, value: &CellValue) -> Result<(), String> {
        match self.validators.get(column) {
            Some(validator) => validator(value),
            None => Ok(()),
        }
    }

    pub fn render(&self, column: &str, value: &CellValue) -> String {
        match self.renderers.get(column) {
            Some(renderer) => renderer(value),
            None => value.display(),
        }
    }

    // A non-finite total renders as-is.
    pub fn format_total(&self, column: &str, total: f64) -> String {
        match self.total_formats.get(column) {
            Some(format) => format(total),
            None if total.is_nan() => "NaN".to_owned(),
            None => format_number(total),
        }
    }

    pub fn date_disabled(&self, date: Date) -> bool {
        self.disabled_date.as_ref().is_some_and(|allow| allow(date))
    }
}
