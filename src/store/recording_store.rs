//! In-memory `Store` that records every call, for unit tests.

use super::{SqlValue, Statement, Store};
use anyhow::{bail, Result};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Execute(Statement, Vec<SqlValue>),
    Query(Statement, Vec<SqlValue>),
    Commit,
    Rollback,
}

#[derive(Default)]
pub struct RecordingStore {
    pub calls: Vec<StoreCall>,
    lookups: HashMap<String, Vec<SqlValue>>,
    fail_on: Option<(Statement, usize)>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `SongLookup` with these parameters return `row`.
    pub fn with_lookup(mut self, params: &[SqlValue], row: Vec<SqlValue>) -> Self {
        self.lookups.insert(Self::key(params), row);
        self
    }

    /// Makes the `nth` (0-based) execution of `statement` fail.
    pub fn failing_on(mut self, statement: Statement, nth: usize) -> Self {
        self.fail_on = Some((statement, nth));
        self
    }

    pub fn executed(&self, statement: Statement) -> Vec<&Vec<SqlValue>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                StoreCall::Execute(s, params) if *s == statement => Some(params),
                _ => None,
            })
            .collect()
    }

    pub fn commit_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, StoreCall::Commit))
            .count()
    }

    fn key(params: &[SqlValue]) -> String {
        params
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl Store for RecordingStore {
    fn execute(&mut self, statement: Statement, params: &[SqlValue]) -> Result<usize> {
        assert_eq!(
            params.len(),
            statement.param_count(),
            "wrong parameter count for {:?}",
            statement
        );
        if let Some((failing, nth)) = self.fail_on {
            if failing == statement && self.executed(statement).len() == nth {
                bail!("Injected failure on {:?}", statement);
            }
        }
        self.calls
            .push(StoreCall::Execute(statement, params.to_vec()));
        Ok(1)
    }

    fn query_one(
        &mut self,
        statement: Statement,
        params: &[SqlValue],
    ) -> Result<Option<Vec<SqlValue>>> {
        assert_eq!(params.len(), statement.param_count());
        self.calls.push(StoreCall::Query(statement, params.to_vec()));
        Ok(self.lookups.get(&Self::key(params)).cloned())
    }

    fn commit(&mut self) -> Result<()> {
        self.calls.push(StoreCall::Commit);
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.calls.push(StoreCall::Rollback);
        Ok(())
    }
}
