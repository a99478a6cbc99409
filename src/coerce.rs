//! Conversion of command-line strings into typed [`Value`]s.
//!
//! Each [`TypeKind`] has one converter; collections map every supplied string through
//! the element converter, a bare boolean flag reads as `true`.

use std::str::FromStr;

use thiserror::Error;

use crate::arguments::NamedArgument;
use crate::descriptor::{ElementType, EnumType, ParameterDescriptor, ScalarType, TypeKind};
use crate::value::Value;

/// A supplied string could not be converted to the declared type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoerceError {
    #[error("argument '{0}' requires a value")]
    MissingValue(String),
    #[error("'{value}' is not a valid {expected}")]
    Invalid { value: String, expected: String },
    #[error("'{value}' is not one of the variants of {enum_name} ({variants})")]
    UnknownVariant {
        value: String,
        enum_name: String,
        variants: String,
    },
}

/// Convert the values supplied for `parameter` according to its declared kind.
pub fn coerce(parameter: &ParameterDescriptor, argument: &NamedArgument) -> Result<Value, CoerceError> {
    match &parameter.kind {
        TypeKind::Boolean => match argument.values.first() {
            Some(raw) => parse_scalar(raw, ScalarType::Bool),
            None => Ok(Value::Bool(true)),
        },
        TypeKind::Array(element) => Ok(Value::Array(
            coerce_all(&argument.values, element)?.into_boxed_slice(),
        )),
        TypeKind::List(element) => Ok(Value::List(coerce_all(&argument.values, element)?)),
        TypeKind::Nullable(element) => parse_element(first(argument)?, element),
        TypeKind::Enum(enum_type) => parse_enum(first(argument)?, enum_type),
        TypeKind::Scalar(scalar) => parse_scalar(first(argument)?, *scalar),
    }
}

fn first(argument: &NamedArgument) -> Result<&str, CoerceError> {
    argument
        .values
        .first()
        .map(String::as_str)
        .ok_or_else(|| CoerceError::MissingValue(argument.name.clone()))
}

fn coerce_all(values: &[String], element: &ElementType) -> Result<Vec<Value>, CoerceError> {
    values.iter().map(|raw| parse_element(raw, element)).collect()
}

/// Convert one string to a collection element or unwrapped nullable.
pub fn parse_element(raw: &str, element: &ElementType) -> Result<Value, CoerceError> {
    match element {
        ElementType::Scalar(scalar) => parse_scalar(raw, *scalar),
        ElementType::Enum(enum_type) => parse_enum(raw, enum_type),
    }
}

/// Parse `raw` as one of the enum's variant names (exact match).
pub fn parse_enum(raw: &str, enum_type: &EnumType) -> Result<Value, CoerceError> {
    let raw = raw.trim();
    if enum_type.variants.iter().any(|variant| variant == raw) {
        return Ok(Value::Enum(raw.to_string()));
    }
    Err(CoerceError::UnknownVariant {
        value: raw.to_string(),
        enum_name: enum_type.name.clone(),
        variants: enum_type.variants.join(", "),
    })
}

pub fn parse_scalar(raw: &str, scalar: ScalarType) -> Result<Value, CoerceError> {
    match scalar {
        ScalarType::String => Ok(Value::Str(raw.to_string())),
        ScalarType::Char => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Ok(Value::Char(ch)),
                _ => Err(invalid(raw, scalar)),
            }
        }
        ScalarType::Bool => {
            let trimmed = raw.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(invalid(raw, scalar))
            }
        }
        ScalarType::I32 => parse_number(raw, scalar).map(Value::I32),
        ScalarType::I64 => parse_number(raw, scalar).map(Value::I64),
        ScalarType::U32 => parse_number(raw, scalar).map(Value::U32),
        ScalarType::U64 => parse_number(raw, scalar).map(Value::U64),
        ScalarType::F32 => parse_number(raw, scalar).map(Value::F32),
        ScalarType::F64 => parse_number(raw, scalar).map(Value::F64),
    }
}

fn parse_number<T: FromStr>(raw: &str, scalar: ScalarType) -> Result<T, CoerceError> {
    raw.trim().parse().map_err(|_| invalid(raw, scalar))
}

fn invalid(raw: &str, scalar: ScalarType) -> CoerceError {
    CoerceError::Invalid {
        value: raw.to_string(),
        expected: scalar.name().to_string(),
    }
}
