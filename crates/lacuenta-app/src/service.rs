// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;

use lacuenta_grid::Row;

use crate::forms::BillPayload;
use crate::model::{ExpenseDraft, ExpensePage};
use crate::query::QueryParams;

// The host's effect layer. The pages emit fully-formed payloads and
// receive results back through fresh dispatches; no retries and no
// transport state live on this side of the seam.
pub trait ExpenseService {
    fn query(&mut self, params: &QueryParams) -> Result<ExpensePage>;
    fn save(&mut self, draft: &ExpenseDraft) -> Result<()>;
    fn remove(&mut self, keys: &[String]) -> Result<()>;
    fn generate(&mut self, bill: &BillPayload) -> Result<Vec<Row>>;
}
