// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

use lacuenta_grid::{CellValue, ColumnSpec, GridHooks, InputKind, Row};

use crate::money::{format_amount, parse_amount};

pub const TIME_LAYOUT: &str = "YYYY-MM-DD HH:mm:ss";

// Derived from the sign of the parsed amount, not from a string prefix
// probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashFlow {
    Expense,
    Income,
}

impl CashFlow {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "expense" => Some(Self::Expense),
            "income" => Some(Self::Income),
            _ => None,
        }
    }

    pub const fn badge(self) -> &'static str {
        match self {
            Self::Expense => "error",
            Self::Income => "success",
        }
    }

    pub const fn from_cents(cents: i64) -> Self {
        if cents < 0 { Self::Expense } else { Self::Income }
    }

    pub fn from_amount(input: &str) -> Option<Self> {
        parse_amount(input).ok().map(Self::from_cents)
    }
}

// money and time stay in their wire forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user: String,
    pub classify: String,
    pub business: String,
    pub money: String,
    pub time: String,
    #[serde(default)]
    pub comment: String,
}

impl Expense {
    pub fn cash_flow(&self) -> Option<CashFlow> {
        CashFlow::from_amount(&self.money)
    }

    // The derived status field is materialized here so display columns
    // stay value-only.
    pub fn to_row(&self) -> Row {
        let status = self
            .cash_flow()
            .map(|flow| flow.as_str().to_owned())
            .unwrap_or_default();
        Row::new()
            .with("id", CellValue::number(self.id as f64))
            .with("user", CellValue::text(self.user.clone()))
            .with("classify", CellValue::text(self.classify.clone()))
            .with("business", CellValue::text(self.business.clone()))
            .with("status", CellValue::text(status))
            .with("money", CellValue::text(self.money.clone()))
            .with("time", CellValue::text(self.time.clone()))
            .with("comment", CellValue::text(self.comment.clone()))
    }
}

// An add when id is absent, a correction when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub id: Option<i64>,
    pub user: String,
    pub classify: String,
    pub business: String,
    pub money: String,
    pub time: String,
    #[serde(default)]
    pub comment: String,
}

impl ExpenseDraft {
    // The grid validates before commit; these checks guard the other
    // call paths.
    pub fn from_row(row: &Row, row_key: &str) -> Result<Self> {
        let field = |key: &str| {
            row.get(key)
                .map(CellValue::display)
                .unwrap_or_default()
        };

        let draft = Self {
            id: row
                .identity(row_key)
                .and_then(|identity| identity.parse::<i64>().ok()),
            user: field("user"),
            classify: field("classify"),
            business: field("business"),
            money: field("money"),
            time: field("time"),
            comment: field("comment"),
        };

        if draft.user.trim().is_empty() {
            bail!("bill user is required");
        }
        if draft.money.trim().is_empty() {
            bail!("bill amount is required");
        }
        if draft.time.trim().is_empty() {
            bail!("bill time is required");
        }
        Ok(draft)
    }
}

// Pagination passes through unmodified; fields this layer does not
// understand ride along in extra.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<u64>,
    #[serde(default, rename = "pageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpensePage {
    #[serde(default)]
    pub list: Vec<Expense>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl ExpensePage {
    pub fn rows(&self) -> Vec<Row> {
        self.list.iter().map(Expense::to_row).collect()
    }
}

// Corrections on the list page go through the modal form, never inline.
pub fn expense_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("id", "id"),
        ColumnSpec::new("user", "user"),
        ColumnSpec::new("classify", "category"),
        ColumnSpec::new("business", "merchant"),
        ColumnSpec::new("status", "status"),
        ColumnSpec {
            summable: true,
            ..ColumnSpec::new("money", "amount")
        },
        ColumnSpec {
            input_kind: InputKind::Date,
            ..ColumnSpec::new("time", "time")
        },
        ColumnSpec {
            required: false,
            ..ColumnSpec::new("comment", "comment")
        },
    ]
}

pub fn ingest_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("key", "id"),
        ColumnSpec {
            editable: true,
            ..ColumnSpec::new("user", "user")
        },
        ColumnSpec {
            editable: true,
            ..ColumnSpec::new("classify", "category")
        },
        ColumnSpec {
            editable: true,
            ..ColumnSpec::new("business", "merchant")
        },
        ColumnSpec {
            editable: true,
            summable: true,
            input_kind: InputKind::Number,
            ..ColumnSpec::new("money", "amount")
        },
        ColumnSpec {
            editable: true,
            input_kind: InputKind::Date,
            ..ColumnSpec::new("time", "time")
        },
        ColumnSpec {
            editable: true,
            required: false,
            ..ColumnSpec::new("comment", "comment")
        },
    ]
}

pub fn expense_hooks(today: Date) -> GridHooks {
    GridHooks::new()
        .with_validator("money", |value| {
            let raw = value.display();
            match parse_amount(&raw) {
                Ok(_) => Ok(()),
                Err(error) => Err(error.to_string()),
            }
        })
        .with_validator("time", |value| {
            let raw = value.display();
            if parse_time(&raw).is_some() || parse_day(&raw).is_some() {
                Ok(())
            } else {
                Err(format!("time must look like {TIME_LAYOUT}"))
            }
        })
        .with_renderer("money", |value| {
            let raw = value.display();
            match parse_amount(&raw) {
                Ok(cents) => format_amount(cents),
                // Bad data stays visible.
                Err(_) => raw,
            }
        })
        .with_total_format("money", |total| {
            if total.is_finite() {
                format_amount((total * 100.0).round() as i64)
            } else {
                total.to_string()
            }
        })
        .with_disabled_date(move |date| date > today)
}

pub fn parse_time(input: &str) -> Option<PrimitiveDateTime> {
    PrimitiveDateTime::parse(
        input.trim(),
        &format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .ok()
}

pub fn format_time(value: PrimitiveDateTime) -> String {
    value
        .format(&format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .expect("time format is valid")
}

pub fn parse_day(input: &str) -> Option<Date> {
    Date::parse(input.trim(), &format_description!("[year]-[month]-[day]")).ok()
}

pub fn format_day(value: Date) -> String {
    value
        .format(&format_description!("[year]-[month]-[day]"))
        .expect("date format is valid")
}
