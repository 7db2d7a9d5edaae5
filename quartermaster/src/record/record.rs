use im::OrdMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::common::{Value, FIELD_SEPARATOR};
use crate::errors::{ErrorKind, QuartermasterError, QuartermasterResult};
use crate::filter::{resolve, FieldPath};

type FieldVec = SmallVec<[String; 8]>;

/// An asset record: an ordered map of field names to [Value]s.
///
/// Records are plain data. Nested records are addressed with dotted paths, so
/// the value inside `{"model": {"name": "X-wing"}}` is read with
/// `record.get("model.name")`.
///
/// The map is an `im::OrdMap`, so cloning a record is O(1) and a filtered
/// result set can hold records without copying their fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    data: OrdMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Record {
            data: OrdMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of top level fields.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates the specified [Value] with the specified key in this record.
    ///
    /// Dotted keys (`"model.name"`) create the intermediate records on the way.
    /// An intermediate that holds a scalar is replaced by a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or contains an empty segment.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut ship = Record::new();
    /// ship.put("name", "Millennium Falcon")?;
    /// ship.put("model.manufacturer", "Corellian Engineering Corporation")?;
    /// assert_eq!(ship.size(), 2);
    /// ```
    pub fn put<T: Into<Value>>(&mut self, key: &str, value: T) -> QuartermasterResult<()> {
        if key.is_empty() {
            log::error!("Record does not support empty key");
            return Err(QuartermasterError::new(
                "Record does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        let value = value.into();
        if key.contains(FIELD_SEPARATOR) {
            let splits: Vec<&str> = key.split(FIELD_SEPARATOR).collect();
            self.deep_put(&splits, value)
        } else {
            self.data = self.data.update(key.to_string(), value);
            Ok(())
        }
    }

    /// Returns the value at the dotted path, or `None` when any segment along
    /// the path is missing.
    pub fn get(&self, path: &str) -> Option<&Value> {
        resolve(self, &FieldPath::parse(path))
    }

    /// Returns the top level value stored under `key`, without path traversal.
    #[inline]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Checks whether the dotted path resolves to a value, including `null`.
    pub fn contains_field(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Removes the value at `key`. Dotted keys remove from the nested record and
    /// drop nested records left empty.
    pub fn remove(&mut self, key: &str) -> QuartermasterResult<()> {
        if key.contains(FIELD_SEPARATOR) {
            let splits: Vec<&str> = key.split(FIELD_SEPARATOR).collect();
            self.deep_remove(&splits)
        } else {
            self.data = self.data.without(key);
            Ok(())
        }
    }

    /// Returns every leaf field as a dotted path, in key order.
    pub fn fields(&self) -> FieldVec {
        self.fields_internal("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Parses a record from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an encoding error for malformed JSON and a data type error when
    /// the JSON is valid but not an object.
    pub fn from_json(json: &str) -> QuartermasterResult<Record> {
        match serde_json::from_str::<serde_json::Value>(json)? {
            serde_json::Value::Object(map) => Ok(Record::from(map)),
            other => {
                log::error!("Expected a JSON object for a record, found {}", other);
                Err(QuartermasterError::new(
                    "Expected a JSON object for a record",
                    ErrorKind::InvalidDataType,
                ))
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .data
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect::<serde_json::Map<String, serde_json::Value>>();
        serde_json::Value::Object(map)
    }

    fn fields_internal(&self, prefix: &str) -> FieldVec {
        let mut fields = FieldVec::new();

        for (key, value) in self.data.iter() {
            let field = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}{}{}", prefix, FIELD_SEPARATOR, key)
            };

            if let Value::Record(nested) = value {
                fields.append(&mut nested.fields_internal(&field));
            } else {
                fields.push(field);
            }
        }
        fields
    }

    fn deep_put(&mut self, splits: &[&str], value: Value) -> QuartermasterResult<()> {
        let Some((&key, remaining)) = splits.split_first() else {
            log::error!("Empty embedded key");
            return Err(QuartermasterError::new(
                "Empty embedded key",
                ErrorKind::ValidationError,
            ));
        };

        if key.is_empty() {
            log::error!("Record does not support empty key segment");
            return Err(QuartermasterError::new(
                "Record does not support empty key segment",
                ErrorKind::ValidationError,
            ));
        }

        if remaining.is_empty() {
            self.data = self.data.update(key.to_string(), value);
            return Ok(());
        }

        let mut nested = match self.data.get(key) {
            Some(Value::Record(obj)) => obj.clone(),
            _ => Record::new(),
        };
        nested.deep_put(remaining, value)?;
        self.data = self.data.update(key.to_string(), Value::Record(nested));
        Ok(())
    }

    fn deep_remove(&mut self, splits: &[&str]) -> QuartermasterResult<()> {
        let Some((&key, remaining)) = splits.split_first() else {
            log::error!("Empty embedded key");
            return Err(QuartermasterError::new(
                "Empty embedded key",
                ErrorKind::ValidationError,
            ));
        };

        if remaining.is_empty() {
            self.data = self.data.without(key);
            return Ok(());
        }

        if let Some(Value::Record(obj)) = self.data.get(key) {
            let mut nested = obj.clone();
            nested.deep_remove(remaining)?;
            if nested.is_empty() {
                self.data = self.data.without(key);
            } else {
                self.data = self.data.update(key.to_string(), Value::Record(nested));
            }
        }
        Ok(())
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Record {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        let data = map
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect::<OrdMap<String, Value>>();
        Record { data }
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Record {
            data: iter.into_iter().collect(),
        }
    }
}

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Record] with JSON-like syntax.
///
/// # Examples
///
/// ```rust
/// use quartermaster::record;
///
/// let empty = record!{};
///
/// let item = record!{
///     quantity: 12,
///     model: {
///         name: "Thermal Detonator",
///         weight: 0.5,
///         stackable: true
///     },
///     tags: ["explosive", "restricted"]
/// };
/// assert_eq!(item.size(), 3);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::record::Record::new()
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::record!($($key : $value),*)
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            let mut record = $crate::record::Record::new();
            $(
                record.put(&$crate::record::normalize(stringify!($key)), $crate::record_value!($value))
                    .expect(&format!("Failed to put value {} in record", stringify!($value)));
            )*
            record
        }
    };
}

/// Helper macro to convert values for the [`record!`] macro.
#[macro_export]
macro_rules! record_value {
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::common::Value::Record($crate::record!{ $($key : $value),* })
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::record_value!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
