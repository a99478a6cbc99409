//! Typed runtime values handed to command bodies.

use std::cell::RefCell;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A coerced parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(String),
    /// Variant name of an enum parameter.
    Enum(String),
    Array(Box<[Value]>),
    List(Vec<Value>),
}

impl Value {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Str(_) => "String",
            Value::Enum(_) => "enum",
            Value::Array(_) => "array",
            Value::List(_) => "list",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Str(v) | Value::Enum(v) => f.write_str(v),
            Value::Array(items) => write_items(f, items),
            Value::List(items) => write_items(f, items),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

/// A positional value did not have the shape the command body asked for.
#[derive(Debug, Error, PartialEq)]
pub enum ArgumentError {
    #[error("no argument at position {0}")]
    Missing(usize),
    #[error("argument {index} is {found}, expected {expected}")]
    Mismatch {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
}

/// Conversion from a coerced [`Value`] into a native Rust type.
pub trait FromValue: Sized {
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! from_value {
    ($ty:ty, $name:literal, $($variant:ident)|+) => {
        impl FromValue for $ty {
            const EXPECTED: &'static str = $name;

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    $(Value::$variant(v) => Some(v.clone()),)+
                    _ => None,
                }
            }
        }
    };
}

from_value!(bool, "bool", Bool);
from_value!(char, "char", Char);
from_value!(i32, "i32", I32);
from_value!(i64, "i64", I64);
from_value!(u32, "u32", U32);
from_value!(u64, "u64", U64);
from_value!(f32, "f32", F32);
from_value!(f64, "f64", F64);
from_value!(String, "String", Str | Enum);

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "collection";

    fn from_value(value: &Value) -> Option<Self> {
        let items: &[Value] = match value {
            Value::Array(items) => &items[..],
            Value::List(items) => items.as_slice(),
            _ => return None,
        };
        items.iter().map(T::from_value).collect()
    }
}

/// Positional values bound for one invocation, in parameter order.
///
/// Lines a command body writes with [`Args::write_line`] are collected here and
/// become the leading messages of the invocation's response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: Vec<Value>,
    output: RefCell<Vec<String>>,
}

impl Args {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            output: RefCell::default(),
        }
    }

    /// Record one line of command output.
    pub fn write_line<S: Into<String>>(&self, line: S) {
        self.output.borrow_mut().push(line.into());
    }

    /// Drain the lines written so far.
    pub fn take_output(&self) -> Vec<String> {
        self.output.take()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn raw(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Convert the value at `index` to `T`.
    pub fn get<T: FromValue>(&self, index: usize) -> Result<T, ArgumentError> {
        let value = self.values.get(index).ok_or(ArgumentError::Missing(index))?;
        T::from_value(value).ok_or(ArgumentError::Mismatch {
            index,
            expected: T::EXPECTED,
            found: value.kind_name(),
        })
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
