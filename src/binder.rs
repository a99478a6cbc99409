//! Matching supplied named arguments to a command's declared parameters.

use tracing::debug;

use crate::arguments::NamedArgument;
use crate::coerce::{CoerceError, coerce};
use crate::descriptor::CommandDescriptor;
use crate::value::Value;

/// Outcome of binding: one value per parameter, or the reasons binding failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingResult {
    pub values: Vec<Value>,
    pub errors: Vec<String>,
}

impl BindingResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Bind `args` to the parameters of `command`.
///
/// User mistakes (unknown or missing parameters) are collected in
/// [`BindingResult::errors`]. A value that cannot be converted to its declared type
/// aborts binding with a [`CoerceError`]; callers report it as an invalid-arguments
/// failure rather than a validation message.
pub fn bind(command: &CommandDescriptor, args: &[NamedArgument]) -> Result<BindingResult, CoerceError> {
    let mut result = BindingResult::default();

    for argument in args {
        if !command.parameters.iter().any(|p| p.matches(&argument.name)) {
            result
                .errors
                .push(format!("The parameter '{}' is not a valid parameter", argument.name));
        }
    }

    for parameter in &command.parameters {
        match args.iter().find(|argument| parameter.matches(&argument.name)) {
            Some(argument) => result.values.push(coerce(parameter, argument)?),
            None => match &parameter.default {
                Some(default) => result.values.push(default.clone()),
                None => result
                    .errors
                    .push(format!("The parameter '{}' must be specified", parameter.name)),
            },
        }
    }

    if !result.is_success() {
        result.values.clear();
    }
    debug!(
        command = %command.name,
        values = result.values.len(),
        errors = result.errors.len(),
        "bound parameters"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ElementType, EnumType, ParameterDescriptor, ScalarType, TypeKind};
    use pretty_assertions::assert_eq;

    fn sample_enum() -> TypeKind {
        TypeKind::Enum(EnumType::new("SampleEnum", ["EnumOne", "EnumTwo", "EnumThree"]))
    }

    fn add_command() -> CommandDescriptor {
        CommandDescriptor::new("add")
            .param(ParameterDescriptor::new("firstNum", TypeKind::Scalar(ScalarType::I32)))
            .param(ParameterDescriptor::new("secondNum", TypeKind::Scalar(ScalarType::I32)))
    }

    #[test]
    fn missing_required_parameter() {
        let command = CommandDescriptor::new("example").param(ParameterDescriptor::new("sample", sample_enum()));
        let result = bind(&command, &[]).unwrap();
        assert_eq!(result.errors, vec!["The parameter 'sample' must be specified"]);
        assert!(result.values.is_empty());
    }

    #[test]
    fn values_follow_parameter_order() {
        let args = vec![
            NamedArgument::with_values("secondNum", 1, ["2"]),
            NamedArgument::with_values("FIRSTNUM", 2, ["1"]),
        ];
        let result = bind(&add_command(), &args).unwrap();
        assert!(result.is_success());
        assert_eq!(result.values, vec![Value::I32(1), Value::I32(2)]);
    }

    #[test]
    fn unknown_arguments_are_reported() {
        let args = vec![
            NamedArgument::with_values("firstNum", 1, ["1"]),
            NamedArgument::with_values("secondNum", 2, ["2"]),
            NamedArgument::with_values("invalidParam", 3, ["bad"]),
        ];
        let result = bind(&add_command(), &args).unwrap();
        assert_eq!(result.errors, vec!["The parameter 'invalidParam' is not a valid parameter"]);
        assert!(result.values.is_empty());
    }

    #[test]
    fn unknown_and_missing_errors_accumulate_in_order() {
        let args = vec![NamedArgument::with_values("third", 1, ["3"])];
        let result = bind(&add_command(), &args).unwrap();
        assert_eq!(
            result.errors,
            vec![
                "The parameter 'third' is not a valid parameter",
                "The parameter 'firstNum' must be specified",
                "The parameter 'secondNum' must be specified",
            ]
        );
    }

    #[test]
    fn defaults_and_aliases() {
        let command = CommandDescriptor::new("array")
            .param(ParameterDescriptor::new(
                "values",
                TypeKind::Array(ElementType::Scalar(ScalarType::String)),
            ))
            .param(ParameterDescriptor::new("something", TypeKind::Scalar(ScalarType::I32)).alias('s'))
            .param(
                ParameterDescriptor::new("opt", TypeKind::Scalar(ScalarType::I32))
                    .default_value(Value::I32(0)),
            );
        let args = vec![
            NamedArgument::with_values("values", 1, ["a", "b"]),
            NamedArgument::with_values("s", 2, ["5"]),
        ];
        let result = bind(&command, &args).unwrap();
        assert_eq!(
            result.values,
            vec![
                Value::Array(vec![Value::Str("a".into()), Value::Str("b".into())].into_boxed_slice()),
                Value::I32(5),
                Value::I32(0),
            ]
        );
    }

    #[test]
    fn bare_flag_binds_true() {
        let command = CommandDescriptor::new("bool").param(ParameterDescriptor::new("withOutput", TypeKind::Boolean));
        let result = bind(&command, &[NamedArgument::new("withOutput", 1)]).unwrap();
        assert_eq!(result.values, vec![Value::Bool(true)]);
    }

    #[test]
    fn empty_list_binds_empty() {
        let command = CommandDescriptor::new("list").param(ParameterDescriptor::new(
            "values",
            TypeKind::List(ElementType::Scalar(ScalarType::I32)),
        ));
        let result = bind(&command, &[NamedArgument::new("values", 1)]).unwrap();
        assert_eq!(result.values, vec![Value::List(Vec::new())]);
    }

    #[test]
    fn first_matching_argument_wins() {
        let command = CommandDescriptor::new("one")
            .param(ParameterDescriptor::new("n", TypeKind::Scalar(ScalarType::I32)).alias('x'));
        let args = vec![
            NamedArgument::with_values("x", 1, ["1"]),
            NamedArgument::with_values("n", 2, ["2"]),
        ];
        assert_eq!(bind(&command, &args).unwrap().values, vec![Value::I32(1)]);
    }

    #[test]
    fn coercion_failure_aborts_binding() {
        let command = CommandDescriptor::new("example").param(ParameterDescriptor::new("sample", sample_enum()));
        let args = vec![NamedArgument::with_values("sample", 1, ["Enum"])];
        assert!(matches!(
            bind(&command, &args),
            Err(CoerceError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn binding_is_repeatable() {
        let args = vec![
            NamedArgument::with_values("firstNum", 1, ["1"]),
            NamedArgument::with_values("bogus", 2, ["2"]),
        ];
        let command = add_command();
        assert_eq!(bind(&command, &args), bind(&command, &args));
    }
}
