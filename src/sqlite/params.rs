use rusqlite::types::Value;

use crate::types::RowValues;

/// Convert a single `RowValue` to a rusqlite `Value`.
#[must_use]
pub fn row_value_to_sqlite_value(value: &RowValues) -> Value {
    match value {
        RowValues::Int(i) => Value::Integer(*i),
        RowValues::Float(f) => Value::Real(*f),
        RowValues::Text(s) => Value::Text(s.clone()),
        RowValues::Null => Value::Null,
        RowValues::Blob(bytes) => Value::Blob(bytes.clone()),
    }
}

/// Unified `SQLite` parameter container.
#[derive(Debug, Clone, Default)]
pub struct Params(pub Vec<Value>);

impl Params {
    /// Convert row values into `SQLite` values.
    #[must_use]
    pub fn convert(params: &[RowValues]) -> Self {
        Params(params.iter().map(row_value_to_sqlite_value).collect())
    }

    /// Borrow the underlying values.
    #[must_use]
    pub fn as_values(&self) -> &[Value] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_each_variant() {
        let params = Params::convert(&[
            RowValues::Int(20),
            RowValues::Float(1.5),
            RowValues::Text("%chai%".into()),
            RowValues::Null,
            RowValues::Blob(vec![0xAB]),
        ]);
        assert_eq!(
            params.as_values(),
            &[
                Value::Integer(20),
                Value::Real(1.5),
                Value::Text("%chai%".into()),
                Value::Null,
                Value::Blob(vec![0xAB]),
            ]
        );
    }
}
