// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use time::OffsetDateTime;

use lacuenta_app::{
    BillFormInput, ExpensePageState, ExpenseService, IngestEvent, IngestPageState, PageCommand,
    PageEvent, expense_hooks, format_day, ingest_columns,
};
use lacuenta_grid::{CellValue, EditController};
use lacuenta_testkit::MemoryService;

use crate::config::Config;

// Walks the bill list and bill-ingest pages against an in-memory
// ledger, playing the part of the host's effect layer.
pub fn run(config: &Config) -> Result<()> {
    let today = OffsetDateTime::now_utc().date();
    let mut service = MemoryService::with_seed(25);
    let hooks = expense_hooks(today);

    println!("bill list");
    let mut page = ExpensePageState::new(config.columns(), config.row_key(), today);
    let events = page.dispatch(PageCommand::Init);
    drain_page(&mut page, &mut service, events)?;
    println!("  fetched {} bills", page.page().list.len());

    let rows: Vec<_> = page.rows().into_iter().take(3).collect();
    let keys: Vec<String> = rows
        .iter()
        .filter_map(|row| row.identity(&config.row_key()))
        .collect();
    let events = page.dispatch(PageCommand::RowsSelected { keys, rows });
    drain_page(&mut page, &mut service, events)?;

    let summary = page.summary(&hooks);
    println!("  selected {} bills", summary.selected);
    for total in &summary.totals {
        println!("  {} total: {}", total.title, total.formatted);
    }

    if let Some(row) = page.rows().first().cloned() {
        page.dispatch(PageCommand::OpenCorrectModal(row));
        if let Some(modal) = page.modal() {
            let mut form = modal.values.clone();
            form.comment = "corrected in the walkthrough".to_owned();
            let events = page.dispatch(PageCommand::SubmitModal(form));
            drain_page(&mut page, &mut service, events)?;
        }
    }

    println!("bill ingest");
    let editor = EditController::new(ingest_columns(), Vec::new())
        .with_resizable(config.resizable());
    let mut ingest = IngestPageState::new(editor, today);

    let events = ingest.submit_bill(&BillFormInput {
        bill: "Corner Deli -12.5\nMetro Transit -2.5\n".to_owned(),
    });
    drain_ingest(&mut ingest, &mut service, events)?;

    ingest.editor_mut().begin_edit("g-1");
    ingest.editor_mut().set_field("user", CellValue::text("Casey"));
    ingest
        .editor_mut()
        .set_field("classify", CellValue::text("food"));
    ingest.editor_mut().set_field(
        "time",
        CellValue::text(format!("{} 12:30:00", format_day(today))),
    );
    let events = ingest.save_row();
    drain_ingest(&mut ingest, &mut service, events)?;

    println!("  {} bills in ledger", service.ledger().len());
    Ok(())
}

fn drain_page(
    page: &mut ExpensePageState,
    service: &mut MemoryService,
    events: Vec<PageEvent>,
) -> Result<()> {
    let mut queue = events;
    while !queue.is_empty() {
        let mut next = Vec::new();
        for event in queue {
            match event {
                PageEvent::FetchRequested(params) => {
                    let data = service.query(&params)?;
                    next.extend(page.dispatch(PageCommand::PageLoaded(data)));
                }
                PageEvent::SaveRequested(draft) => {
                    service.save(&draft)?;
                    next.extend(page.dispatch(PageCommand::Init));
                }
                PageEvent::RemoveRequested(keys) => {
                    service.remove(&keys)?;
                    next.extend(page.dispatch(PageCommand::RemoveCompleted));
                    next.extend(page.dispatch(PageCommand::Init));
                }
                PageEvent::StatusUpdated(message) => println!("  {message}"),
                PageEvent::SelectionChanged(_)
                | PageEvent::ModalChanged(_)
                | PageEvent::QueryFormToggled(_) => {}
            }
        }
        queue = next;
    }
    Ok(())
}

fn drain_ingest(
    ingest: &mut IngestPageState,
    service: &mut MemoryService,
    events: Vec<IngestEvent>,
) -> Result<()> {
    let mut queue = events;
    while !queue.is_empty() {
        let mut next = Vec::new();
        for event in queue {
            match event {
                IngestEvent::GenerateRequested(payload) => {
                    let rows = service.generate(&payload)?;
                    next.extend(ingest.rows_generated(rows));
                }
                IngestEvent::SaveRequested(draft) => {
                    service.save(&draft)?;
                }
                IngestEvent::StatusUpdated(message) => println!("  {message}"),
            }
        }
        queue = next;
    }
    Ok(())
}
