use crate::generator::{Generator, SelectOptions};

use quarry_core::{stmt::Query, Result};

/// Produces successive page SELECTs for a cursor loop driven by the caller:
/// ask for the next statement, run it, report how many rows came back.
///
/// Grouped queries bypass paging entirely and yield a single statement,
/// since offsets over aggregated rows do not line up with source rows.
#[derive(Debug, Clone)]
pub struct Pager {
    query: Query,
    batch_size: u64,
    cursor: u64,
    done: bool,
}

impl Pager {
    pub fn new(query: Query, batch_size: u64) -> Self {
        Self {
            query,
            batch_size: batch_size.max(1),
            cursor: 0,
            done: false,
        }
    }

    /// SQL for the next page, or `None` once exhausted.
    pub fn next_statement(&mut self, generator: &Generator<'_>) -> Result<Option<String>> {
        if self.done {
            return Ok(None);
        }

        if !self.query.group_by.is_empty() {
            self.done = true;
            let sql =
                generator.generate_select_statement(&self.query, &SelectOptions::default())?;
            return Ok(Some(sql));
        }

        let mut page = self.query.clone();
        page.limit = Some(self.batch_size);
        page.offset = Some(self.cursor);
        let options = SelectOptions {
            force_limit: true,
            ..Default::default()
        };
        Ok(Some(generator.generate_select_statement(&page, &options)?))
    }

    /// Records how many rows the last page returned. A short page marks the
    /// pager done.
    pub fn advance(&mut self, rows: usize) {
        if (rows as u64) < self.batch_size {
            self.done = true;
        }
        self.cursor += rows as u64;
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}
