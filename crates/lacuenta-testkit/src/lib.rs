// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use time::{Date, Duration, Month};

use lacuenta_app::{
    BillPayload, CashFlow, Expense, ExpenseDraft, ExpensePage, ExpenseService, Pagination,
    QueryParams, format_day, format_plain_amount, parse_amount,
};
use lacuenta_grid::{CellValue, Row};

const USERS: [&str; 8] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Quinn", "Rowan",
];

const CATEGORIES: [&str; 7] = [
    "food",
    "travel",
    "housing",
    "utilities",
    "clothing",
    "leisure",
    "health",
];

const MERCHANTS: [&str; 10] = [
    "Corner Deli",
    "Metro Transit",
    "Greenleaf Grocery",
    "City Power",
    "Hartley Books",
    "Summit Sports",
    "Brookside Cafe",
    "Apex Hardware",
    "Lakeview Pharmacy",
    "Willow Market",
];

const DEFAULT_PAGE_SIZE: u64 = 10;

fn seed_base_day() -> Date {
    Date::from_calendar_date(2026, Month::July, 1).expect("valid seed date")
}

// Deterministic: every fourth bill is an income; amounts and timestamps
// vary with the index so sorting and paging have something to bite on.
pub fn seed_expenses(count: usize) -> Vec<Expense> {
    (0..count)
        .map(|index| {
            let cents = 350 + (index as i64 % 9) * 1_275 + (index as i64 / 9) * 40;
            let income = index % 4 == 3;
            let money = if income {
                format!("+{}", format_plain_amount(cents * 10))
            } else {
                format_plain_amount(-cents)
            };
            let day = seed_base_day() + Duration::days(index as i64 / 3);
            let time = format!(
                "{} {:02}:{:02}:00",
                format_day(day),
                8 + (index % 12),
                (index * 7) % 60,
            );
            Expense {
                id: index as i64 + 1,
                user: USERS[index % USERS.len()].to_owned(),
                classify: CATEGORIES[index % CATEGORIES.len()].to_owned(),
                business: MERCHANTS[index % MERCHANTS.len()].to_owned(),
                money,
                time,
                comment: if index % 5 == 0 {
                    "receipt on file".to_owned()
                } else {
                    String::new()
                },
            }
        })
        .collect()
}

// In-memory stand-in for the host's effect layer.
#[derive(Debug, Clone, Default)]
pub struct MemoryService {
    ledger: Vec<Expense>,
    next_id: i64,
    generated: usize,
}

impl MemoryService {
    pub fn new(ledger: Vec<Expense>) -> Self {
        let next_id = ledger.iter().map(|bill| bill.id).max().unwrap_or(0) + 1;
        Self {
            ledger,
            next_id,
            generated: 0,
        }
    }

    pub fn with_seed(count: usize) -> Self {
        Self::new(seed_expenses(count))
    }

    pub fn ledger(&self) -> &[Expense] {
        &self.ledger
    }

    fn matches(bill: &Expense, params: &QueryParams) -> bool {
        if let Some(user) = params.get("user")
            && !user.is_empty()
            && bill.user != user
        {
            return false;
        }
        if let Some(status) = params.get("status")
            && !status.is_empty()
        {
            // The list page filter sends "0" for expense, "1" for
            // income, comma-joined when both are ticked.
            let wanted: Vec<&str> = status.split(',').collect();
            let flow = match bill.cash_flow() {
                Some(CashFlow::Expense) => "0",
                Some(CashFlow::Income) => "1",
                None => return false,
            };
            if !wanted.contains(&flow) {
                return false;
            }
        }
        true
    }
}

impl ExpenseService for MemoryService {
    fn query(&mut self, params: &QueryParams) -> Result<ExpensePage> {
        let mut hits: Vec<Expense> = self
            .ledger
            .iter()
            .filter(|bill| Self::matches(bill, params))
            .cloned()
            .collect();

        match params.get("sorter") {
            Some("time_ascend") => hits.sort_by(|a, b| a.time.cmp(&b.time)),
            Some("time_descend") => hits.sort_by(|a, b| b.time.cmp(&a.time)),
            _ => {}
        }

        let total = hits.len() as u64;
        let size = params
            .get("size")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .max(1);
        let page = params
            .get("page")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(1)
            .max(1);

        let start = ((page - 1) * size) as usize;
        let list = hits.into_iter().skip(start).take(size as usize).collect();

        Ok(ExpensePage {
            list,
            pagination: Pagination {
                current: Some(page),
                page_size: Some(size),
                total: Some(total),
                ..Pagination::default()
            },
        })
    }

    fn save(&mut self, draft: &ExpenseDraft) -> Result<()> {
        if let Some(id) = draft.id
            && let Some(bill) = self.ledger.iter_mut().find(|bill| bill.id == id)
        {
            bill.user = draft.user.clone();
            bill.classify = draft.classify.clone();
            bill.business = draft.business.clone();
            bill.money = draft.money.clone();
            bill.time = draft.time.clone();
            bill.comment = draft.comment.clone();
            return Ok(());
        }

        self.ledger.push(Expense {
            id: self.next_id,
            user: draft.user.clone(),
            classify: draft.classify.clone(),
            business: draft.business.clone(),
            money: draft.money.clone(),
            time: draft.time.clone(),
            comment: draft.comment.clone(),
        });
        self.next_id += 1;
        Ok(())
    }

    fn remove(&mut self, keys: &[String]) -> Result<()> {
        self.ledger
            .retain(|bill| !keys.contains(&bill.id.to_string()));
        Ok(())
    }

    // One detail row per bill line; the last token is the amount when
    // it parses.
    fn generate(&mut self, bill: &BillPayload) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        for line in bill.bill.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.generated += 1;

            let (business, money) = match line.rsplit_once(char::is_whitespace) {
                Some((head, tail)) if parse_amount(tail).is_ok() => {
                    (head.trim().to_owned(), tail.to_owned())
                }
                _ => (line.to_owned(), String::new()),
            };

            rows.push(
                Row::new()
                    .with("key", CellValue::text(format!("g-{}", self.generated)))
                    .with("user", CellValue::text(""))
                    .with("classify", CellValue::text(""))
                    .with("business", CellValue::text(business))
                    .with("money", CellValue::text(money))
                    .with("time", CellValue::text(""))
                    .with("comment", CellValue::text("")),
            );
        }
        Ok(rows)
    }
}
