//! Descriptor data model for controllers, commands and their parameters.
//!
//! Descriptors are plain data produced once at startup and read-only afterwards. The
//! declared type of a parameter is an explicit [`TypeKind`] so coercion and
//! documentation never guess at runtime types.

use std::fmt;

use serde::Serialize;

use crate::value::Value;

/// Primitive types a single command-line string can be converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    String,
    Char,
    Bool,
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
}

impl ScalarType {
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::String => "String",
            ScalarType::Char => "char",
            ScalarType::Bool => "bool",
            ScalarType::I32 => "i32",
            ScalarType::I64 => "i64",
            ScalarType::U32 => "u32",
            ScalarType::U64 => "u64",
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
        }
    }
}

/// A closed set of named variants, e.g. an application enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumType {
    pub name: String,
    pub variants: Vec<String>,
}

impl EnumType {
    pub fn new<S, I, V>(name: S, variants: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }
}

/// Type of one element: the unit a single string converts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "type", rename_all = "lowercase")]
pub enum ElementType {
    Scalar(ScalarType),
    Enum(EnumType),
}

impl ElementType {
    pub fn name(&self) -> &str {
        match self {
            ElementType::Scalar(scalar) => scalar.name(),
            ElementType::Enum(enum_type) => &enum_type.name,
        }
    }

    pub fn enum_type(&self) -> Option<&EnumType> {
        match self {
            ElementType::Enum(enum_type) => Some(enum_type),
            ElementType::Scalar(_) => None,
        }
    }
}

/// Declared shape of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "element", rename_all = "lowercase")]
pub enum TypeKind {
    Scalar(ScalarType),
    /// A value that may also be absent; supplied values convert as the inner type.
    Nullable(ElementType),
    Enum(EnumType),
    /// A flag: present without a value means `true`.
    Boolean,
    /// Fixed-size sequence built from all supplied values.
    Array(ElementType),
    /// Growable sequence built from all supplied values.
    List(ElementType),
}

impl TypeKind {
    pub fn is_collection(&self) -> bool {
        matches!(self, TypeKind::Array(_) | TypeKind::List(_))
    }

    /// The type a single value converts to, with collection and nullable wrappers removed.
    pub fn element(&self) -> ElementType {
        match self {
            TypeKind::Scalar(scalar) => ElementType::Scalar(*scalar),
            TypeKind::Enum(enum_type) => ElementType::Enum(enum_type.clone()),
            TypeKind::Boolean => ElementType::Scalar(ScalarType::Bool),
            TypeKind::Nullable(element) | TypeKind::Array(element) | TypeKind::List(element) => {
                element.clone()
            }
        }
    }

    /// Human-readable type, e.g. `i32` or `List of SampleEnum`.
    pub fn describe(&self) -> String {
        let element = self.element();
        if self.is_collection() {
            format!("List of {}", element.name())
        } else {
            element.name().to_string()
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Metadata for one parameter of a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub alias: Option<char>,
    pub description: Option<String>,
    pub kind: TypeKind,
    pub default: Option<Value>,
}

impl ParameterDescriptor {
    /// A required parameter without alias or description.
    pub fn new<S: Into<String>>(name: S, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            alias: None,
            description: None,
            kind,
            default: None,
        }
    }

    pub fn alias(mut self, alias: char) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Make the parameter optional, falling back to `value` when it is not supplied.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Whether a supplied argument name refers to this parameter, by name or alias.
    pub fn matches(&self, argument: &str) -> bool {
        if self.name.to_lowercase() == argument.to_lowercase() {
            return true;
        }
        let mut chars = argument.chars();
        match (self.alias, chars.next(), chars.next()) {
            (Some(alias), Some(first), None) => {
                alias.to_lowercase().eq(first.to_lowercase())
            }
            _ => false,
        }
    }
}

/// Metadata for one invokable command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Vec<ParameterDescriptor>,
    /// Invoked without constructing a fresh target instance.
    pub is_static: bool,
    /// Fallback for a controller when no command name matches.
    pub is_default: bool,
}

impl CommandDescriptor {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: Vec::new(),
            is_static: true,
            is_default: false,
        }
    }

    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn param(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// A named group of commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerDescriptor {
    pub name: String,
    pub description: String,
    pub commands: Vec<CommandDescriptor>,
}

impl ControllerDescriptor {
    pub fn new<N: Into<String>, D: Into<String>>(name: N, description: D) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            commands: Vec::new(),
        }
    }

    /// Look up a command by exact name.
    pub fn command(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|command| command.name == name)
    }

    pub fn default_command(&self) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|command| command.is_default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_enum() -> EnumType {
        EnumType::new("SampleEnum", ["EnumOne", "EnumTwo", "EnumThree"])
    }

    #[test]
    fn describes_collections_and_nullables() {
        assert_eq!(TypeKind::Scalar(ScalarType::I32).describe(), "i32");
        assert_eq!(
            TypeKind::List(ElementType::Enum(sample_enum())).describe(),
            "List of SampleEnum"
        );
        assert_eq!(
            TypeKind::Array(ElementType::Scalar(ScalarType::String)).describe(),
            "List of String"
        );
        assert_eq!(TypeKind::Nullable(ElementType::Scalar(ScalarType::F64)).to_string(), "f64");
        assert_eq!(TypeKind::Boolean.describe(), "bool");
    }

    #[test]
    fn matches_name_and_alias_ignoring_case() {
        let param = ParameterDescriptor::new("something", TypeKind::Scalar(ScalarType::I32))
            .alias('s');
        assert!(param.matches("something"));
        assert!(param.matches("SomeThing"));
        assert!(param.matches("s"));
        assert!(param.matches("S"));
        assert!(!param.matches("so"));
        assert!(!param.matches("x"));

        let plain = ParameterDescriptor::new("values", TypeKind::Boolean);
        assert!(!plain.matches("v"));
    }

    #[test]
    fn default_command_lookup() {
        let mut controller = ControllerDescriptor::new("default", "Has a fallback.");
        assert!(controller.default_command().is_none());

        let mut fallback = CommandDescriptor::new("bool");
        fallback.is_default = true;
        controller.commands.push(CommandDescriptor::new("other"));
        controller.commands.push(fallback);

        assert_eq!(controller.default_command().map(|c| c.name.as_str()), Some("bool"));
        assert!(controller.command("other").is_some());
        assert!(controller.command("Other").is_none());
    }
}
