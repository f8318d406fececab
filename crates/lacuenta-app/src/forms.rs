// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};

use lacuenta_grid::{CellValue, Row};

use crate::model::{ExpenseDraft, format_time, parse_time};
use crate::money::{format_plain_amount, parse_amount};

// id rides along hidden and marks a correction; a blank form is an add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseFormInput {
    pub id: Option<i64>,
    pub user: String,
    pub classify: String,
    pub business: String,
    pub money_cents: Option<i64>,
    pub time: Option<PrimitiveDateTime>,
    pub comment: String,
}

impl ExpenseFormInput {
    pub fn blank() -> Self {
        Self {
            id: None,
            user: String::new(),
            classify: String::new(),
            business: String::new(),
            money_cents: None,
            time: None,
            comment: String::new(),
        }
    }

    // Fields that fail to parse come back empty for the operator to
    // fix.
    pub fn from_row(row: &Row, row_key: &str) -> Self {
        let field = |key: &str| row.get(key).map(CellValue::display).unwrap_or_default();
        Self {
            id: row
                .identity(row_key)
                .and_then(|identity| identity.parse::<i64>().ok()),
            user: field("user"),
            classify: field("classify"),
            business: field("business"),
            money_cents: parse_amount(&field("money")).ok(),
            time: parse_time(&field("time")),
            comment: field("comment"),
        }
    }

    pub fn validate(&self, today: Date) -> Result<()> {
        if self.user.trim().is_empty() {
            bail!("bill user is required -- enter a user and retry");
        }
        if self.classify.trim().chars().count() < 2 {
            bail!("bill category needs at least two characters");
        }
        if self.business.trim().chars().count() < 2 {
            bail!("bill merchant needs at least two characters");
        }
        if self.money_cents.is_none() {
            bail!("bill amount is required -- enter an amount and retry");
        }
        let Some(time) = self.time else {
            bail!("bill time is required -- pick a time and retry");
        };
        if time.date() > today {
            bail!("bill time cannot be after today");
        }
        Ok(())
    }

    pub fn to_draft(&self) -> Result<ExpenseDraft> {
        let Some(cents) = self.money_cents else {
            bail!("bill amount is required");
        };
        let Some(time) = self.time else {
            bail!("bill time is required");
        };
        Ok(ExpenseDraft {
            id: self.id,
            user: self.user.clone(),
            classify: self.classify.clone(),
            business: self.business.clone(),
            money: format_plain_amount(cents),
            time: format_time(time),
            comment: self.comment.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillFormInput {
    pub bill: String,
}

impl BillFormInput {
    pub fn validate(&self) -> Result<()> {
        if self.bill.trim().is_empty() {
            bail!("bill text is required -- paste the bill and retry");
        }
        Ok(())
    }

    pub fn to_payload(&self) -> BillPayload {
        BillPayload {
            bill: self.bill.trim().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillPayload {
    pub bill: String,
}
