//! Normalization of parsed index records into raw entries.
//!
//! A record is `[bucketId, symbol]`. The symbol is either
//! `[label, [url, flag, scope], [url, flag, scope], ...]` or the older inline
//! form `[label, url, flag, scope]`. Both become one `RawEntry` per anchor.

use super::entities::decode_entities;
use crate::error::{LoadError, LoadWarning};
use crate::types::{EntryKind, RawEntry};
use serde_json::Value;

/// Entries extracted from one payload, plus the anchors that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loaded {
    pub entries: Vec<RawEntry>,
    pub warnings: Vec<LoadWarning>,
    /// Number of top-level symbol records seen
    pub records: usize,
}

impl Loaded {
    /// Appends another payload's entries, keeping their relative order.
    ///
    /// Record numbers in the appended warnings are shifted past the records
    /// already held, so they stay unique across payloads.
    pub fn extend(&mut self, other: Self) {
        let offset = self.records;
        self.entries.extend(other.entries);
        self.warnings
            .extend(other.warnings.into_iter().map(|warning| LoadWarning {
                record: warning.record + offset,
                ..warning
            }));
        self.records += other.records;
    }
}

pub(crate) fn entries_from_value(value: Value) -> Result<Loaded, LoadError> {
    let Value::Array(records) = value else {
        return Err(LoadError::Shape {
            position: 0,
            message: format!("expected an array of records, found {}", type_name(&value)),
        });
    };

    let mut loaded = Loaded {
        records: records.len(),
        ..Loaded::default()
    };

    for (position, record) in records.into_iter().enumerate() {
        let symbol = symbol_of(record).map_err(|message| LoadError::Shape { position, message })?;
        add_symbol(symbol, position, &mut loaded);
    }

    Ok(loaded)
}

/// Extracts the `[label, ...]` symbol array from a `[bucketId, symbol]` record.
fn symbol_of(record: Value) -> Result<Vec<Value>, String> {
    let Value::Array(mut fields) = record else {
        return Err(format!("expected a record array, found {}", type_name(&record)));
    };
    if fields.len() < 2 {
        return Err(format!("expected [id, symbol], found {} field(s)", fields.len()));
    }
    match fields.swap_remove(1) {
        Value::Array(symbol) => Ok(symbol),
        other => Err(format!("expected a symbol array, found {}", type_name(&other))),
    }
}

fn add_symbol(symbol: Vec<Value>, record: usize, loaded: &mut Loaded) {
    let mut fields = symbol.into_iter();
    let label = match fields.next() {
        Some(Value::String(label)) => decode_entities(&label).into_owned(),
        other => {
            let reason = format!(
                "expected a label string, found {}",
                other.as_ref().map_or("nothing", type_name)
            );
            skip(loaded, record, None, reason);
            return;
        }
    };

    let rest: Vec<Value> = fields.collect();

    // Inline form: the url sits directly after the label
    if matches!(rest.first(), Some(Value::String(_))) {
        match tuple_fields(&rest) {
            Ok((url, scope)) => loaded.entries.push(make_entry(&label, url, scope)),
            Err(reason) => skip(loaded, record, Some(0), reason),
        }
        return;
    }

    if rest.is_empty() {
        skip(loaded, record, None, format!("symbol '{}' has no anchors", label));
        return;
    }

    for (anchor, value) in rest.iter().enumerate() {
        match anchor_fields(value) {
            Ok((url, scope)) => loaded.entries.push(make_entry(&label, url, scope)),
            Err(reason) => skip(loaded, record, Some(anchor), reason),
        }
    }
}

fn skip(loaded: &mut Loaded, record: usize, anchor: Option<usize>, reason: String) {
    tracing::warn!(record, ?anchor, %reason, "Skipping malformed index entry");
    loaded.warnings.push(LoadWarning {
        record,
        anchor,
        reason,
    });
}

/// Reads `(url, scope)` out of a `[url, flag, scope]` anchor tuple.
fn anchor_fields(value: &Value) -> Result<(&str, &str), String> {
    let Some(fields) = value.as_array() else {
        return Err(format!("expected an anchor array, found {}", type_name(value)));
    };
    tuple_fields(fields)
}

/// Checks the `url, flag, scope` fields shared by nested and inline anchors.
fn tuple_fields(fields: &[Value]) -> Result<(&str, &str), String> {
    let url = fields
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| "anchor url is not a string".to_string())?;
    let scope = match fields.get(2) {
        None | Some(Value::Null) => "",
        Some(Value::String(scope)) => scope.as_str(),
        Some(other) => return Err(format!("anchor scope is {}", type_name(other))),
    };
    Ok((url, scope))
}

fn make_entry(label: &str, url: &str, scope: &str) -> RawEntry {
    let scope = decode_entities(scope);
    let kind = EntryKind::infer(url, &scope);
    RawEntry::new(label, scope, url, kind)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
