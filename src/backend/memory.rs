// src/backend/memory.rs
//
// In-process implementations of the backend seams.
//
// Useful for tests and offline development. Filters, ordering, limits,
// upserts and counts follow PostgREST semantics closely enough for the
// operations in this crate; embedded resources in select clauses are
// ignored (every column is returned).

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::backend::gateway::{ObjectStore, TableGateway, UploadOptions};
use crate::backend::query::{Direction, Filter, Operator, Order, Query};
use crate::domain::{timestamp, Record};
use crate::error::{AppError, AppResult, BackendError};

/// Table gateway holding every table in memory
#[derive(Default)]
pub struct MemoryBackend {
    tables: RwLock<HashMap<String, Vec<Record>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents of a table
    pub fn seed(&self, table: &str, rows: Vec<Record>) {
        self.write().insert(table.to_string(), rows);
    }

    /// Snapshot of a table in insertion order
    pub fn rows(&self, table: &str) -> Vec<Record> {
        self.read().get(table).cloned().unwrap_or_default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Vec<Record>>> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Vec<Record>>> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_defaults(mut record: Record) -> Record {
        record
            .entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        record
            .entry("created_at")
            .or_insert_with(|| timestamp(Utc::now()));
        record
    }
}

#[async_trait]
impl TableGateway for MemoryBackend {
    async fn select(&self, table: &str, query: &Query) -> AppResult<Vec<Record>> {
        let tables = self.read();
        let mut rows: Vec<Record> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_all(row, &query.filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if !query.order.is_empty() {
            rows.sort_by(|a, b| compare_rows(a, b, &query.order));
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, record: Record) -> AppResult<Record> {
        let record = Self::with_defaults(record);
        self.write()
            .entry(table.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        changes: Record,
    ) -> AppResult<Vec<Record>> {
        ensure_filtered("update", table, filters)?;
        let mut tables = self.write();
        let mut updated = Vec::new();

        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut().filter(|row| matches_all(row, filters)) {
                for (key, value) in &changes {
                    row.insert(key.clone(), value.clone());
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> AppResult<()> {
        ensure_filtered("delete", table, filters)?;
        if let Some(rows) = self.write().get_mut(table) {
            rows.retain(|row| !matches_all(row, filters));
        }
        Ok(())
    }

    async fn upsert(&self, table: &str, record: Record, on_conflict: &str) -> AppResult<Record> {
        let mut tables = self.write();
        let rows = tables.entry(table.to_string()).or_default();

        let existing = record.get(on_conflict).and_then(|key| {
            rows.iter()
                .position(|row| row.get(on_conflict).is_some_and(|v| values_equal(v, key)))
        });

        match existing {
            Some(index) => {
                let row = &mut rows[index];
                for (key, value) in record {
                    row.insert(key, value);
                }
                Ok(row.clone())
            }
            None => {
                let record = Self::with_defaults(record);
                rows.push(record.clone());
                Ok(record)
            }
        }
    }

    async fn count(&self, table: &str, filters: &[Filter]) -> AppResult<u64> {
        let count = self
            .read()
            .get(table)
            .map(|rows| rows.iter().filter(|row| matches_all(row, filters)).count())
            .unwrap_or(0);
        Ok(count as u64)
    }
}

fn ensure_filtered(action: &str, table: &str, filters: &[Filter]) -> AppResult<()> {
    if filters.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "Refusing to {} every row of '{}'",
            action, table
        )));
    }
    Ok(())
}

fn matches_all(row: &Record, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| matches(row, filter))
}

fn matches(row: &Record, filter: &Filter) -> bool {
    let actual = row.get(&filter.column).unwrap_or(&Value::Null);
    let ordering = || compare_values(actual, &filter.value);

    match filter.op {
        Operator::Eq => values_equal(actual, &filter.value),
        Operator::Neq => !actual.is_null() && !values_equal(actual, &filter.value),
        Operator::Gt => ordering() == Some(Ordering::Greater),
        Operator::Gte => matches!(ordering(), Some(Ordering::Greater | Ordering::Equal)),
        Operator::Lt => ordering() == Some(Ordering::Less),
        Operator::Lte => matches!(ordering(), Some(Ordering::Less | Ordering::Equal)),
        Operator::Like => like(actual, &filter.value, false),
        Operator::ILike => like(actual, &filter.value, true),
        Operator::Is => match &filter.value {
            Value::Null => actual.is_null(),
            Value::Bool(expected) => actual.as_bool() == Some(*expected),
            _ => false,
        },
        Operator::In => match &filter.value {
            Value::Array(items) => items.iter().any(|item| values_equal(actual, item)),
            single => values_equal(actual, single),
        },
    }
}

/// SQL equality: NULL equals nothing; scalars compare by their text form
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => as_text(a) == as_text(b),
    }
}

fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Null, _) | (_, Value::Null) => None,
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        _ => Some(as_text(a).cmp(&as_text(b))),
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// NULLs sort as larger than any value (last ascending, first descending)
fn compare_rows(a: &Record, b: &Record, order: &[Order]) -> Ordering {
    for key in order {
        let left = a.get(&key.column).unwrap_or(&Value::Null);
        let right = b.get(&key.column).unwrap_or(&Value::Null);

        let ordering = match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => compare_values(left, right).unwrap_or(Ordering::Equal),
        };
        let ordering = match key.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// `%` / `*` match any run of characters, `_` exactly one
fn like(actual: &Value, pattern: &Value, case_insensitive: bool) -> bool {
    if actual.is_null() {
        return false;
    }
    let (mut text, mut pattern) = (as_text(actual), as_text(pattern));
    if case_insensitive {
        text = text.to_lowercase();
        pattern = pattern.to_lowercase();
    }
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    // dp[j]: pattern[..i] matches text[..j]
    let mut dp = vec![false; text.len() + 1];
    dp[0] = true;
    for p in &pattern {
        let mut next = vec![false; text.len() + 1];
        match p {
            '%' | '*' => {
                let mut seen = false;
                for j in 0..=text.len() {
                    seen |= dp[j];
                    next[j] = seen;
                }
            }
            '_' => {
                for j in 1..=text.len() {
                    next[j] = dp[j - 1];
                }
            }
            c => {
                for j in 1..=text.len() {
                    next[j] = dp[j - 1] && text[j - 1] == *c;
                }
            }
        }
        dp = next;
    }
    dp[text.len()]
}

// ============================================================================
// OBJECT STORE
// ============================================================================

/// Object store keeping uploaded bytes in memory
pub struct MemoryObjectStore {
    base_url: String,
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    /// `base_url` is the project URL public links are built from
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub fn object(&self, bucket: &str, path: &str) -> Option<Vec<u8>> {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&object_key(bucket, path))
            .cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new("http://localhost:54321")
    }
}

fn object_key(bucket: &str, path: &str) -> String {
    format!("{}/{}", bucket, path)
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        options: &UploadOptions,
    ) -> AppResult<()> {
        let mut objects = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        let key = object_key(bucket, path);

        if objects.contains_key(&key) && !options.upsert {
            return Err(AppError::Backend(BackendError {
                status: 409,
                code: Some("Duplicate".to_string()),
                message: "The resource already exists".to_string(),
                details: None,
                hint: None,
            }));
        }
        objects.insert(key, bytes);
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, path
        )
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> AppResult<()> {
        let mut objects = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        for path in paths {
            objects.remove(&object_key(bucket, path));
        }
        Ok(())
    }
}
