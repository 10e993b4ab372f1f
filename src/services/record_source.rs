//! Trait and in-memory implementation for grade record providers.

use anyhow::Result;

use crate::records::GradeRecord;

/// Abstraction over a provider of raw grade records (remote sheet, file,
/// fixed table).
///
/// Every call returns a fresh copy; callers own the records they get.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// Returns all grade records currently held by the source.
    async fn fetch(&self) -> Result<Vec<GradeRecord>>;

    /// Human readable origin, used in logs.
    fn describe(&self) -> String;
}

#[async_trait::async_trait]
impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    async fn fetch(&self) -> Result<Vec<GradeRecord>> {
        (**self).fetch().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Serves a fixed set of records.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<GradeRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<GradeRecord>) -> Self {
        Self { records }
    }
}

#[async_trait::async_trait]
impl RecordSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<GradeRecord>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static table ({} rows)", self.records.len())
    }
}
