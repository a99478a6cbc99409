//! Demo controllers registered by the `cliroute` binary.

use anyhow::{Result, bail};
use clap::ValueEnum;
use cliroute::{
    Args, CommandDescriptor, Controller, ElementType, EnumType, ParameterDescriptor, Registry,
    ScalarType, Target, TypeKind, Value,
};

/// Urgency attached to a note.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Normal,
    High,
}

impl Priority {
    fn enum_type() -> EnumType {
        EnumType::new(
            "Priority",
            Priority::value_variants()
                .iter()
                .filter_map(|variant| variant.to_possible_value())
                .map(|value| value.get_name().to_string()),
        )
    }
}

/// Every controller the binary exposes.
pub fn registry() -> Registry {
    Registry::new()
        .register(math())
        .register(greet())
        .register(notes())
}

fn int(name: &str) -> ParameterDescriptor {
    ParameterDescriptor::new(name, TypeKind::Scalar(ScalarType::I64))
}

fn math() -> Controller {
    Controller::new("math", "Performs math operations")
        .command(
            CommandDescriptor::new("add")
                .description("Adds two numbers")
                .param(ParameterDescriptor::new("firstNum", TypeKind::Scalar(ScalarType::I32)))
                .param(ParameterDescriptor::new("secondNum", TypeKind::Scalar(ScalarType::I32))),
            Target::from_fn(|args| {
                args.write_line((args.get::<i32>(0)? + args.get::<i32>(1)?).to_string());
                Ok(())
            }),
        )
        .command(
            CommandDescriptor::new("subtract")
                .description("Subtracts an amount from a number")
                .param(int("from").alias('f').description("Number to subtract from."))
                .param(int("amount").alias('a').description("Amount to subtract.")),
            Target::from_fn(|args| {
                args.write_line((args.get::<i64>(0)? - args.get::<i64>(1)?).to_string());
                Ok(())
            }),
        )
        .command(
            CommandDescriptor::new("sum").description("Adds every value").param(
                ParameterDescriptor::new("values", TypeKind::List(ElementType::Scalar(ScalarType::I64)))
                    .alias('v'),
            ),
            Target::from_fn(|args| {
                args.write_line(args.get::<Vec<i64>>(0)?.iter().sum::<i64>().to_string());
                Ok(())
            }),
        )
        .command(
            CommandDescriptor::new("divide")
                .description("Divides two numbers")
                .param(ParameterDescriptor::new("dividend", TypeKind::Scalar(ScalarType::F64)))
                .param(ParameterDescriptor::new("divisor", TypeKind::Scalar(ScalarType::F64))),
            Target::from_fn(divide),
        )
}

fn divide(args: &Args) -> Result<()> {
    let dividend: f64 = args.get(0)?;
    let divisor: f64 = args.get(1)?;
    if divisor == 0.0 {
        bail!("cannot divide {} by zero", dividend);
    }
    args.write_line((dividend / divisor).to_string());
    Ok(())
}

fn greet() -> Controller {
    Controller::new("greet", "Prints greetings").default_command(
        CommandDescriptor::new("hello")
            .description("Greets someone")
            .param(
                ParameterDescriptor::new("name", TypeKind::Scalar(ScalarType::String))
                    .alias('n')
                    .default_value(Value::from("world")),
            )
            .param(
                ParameterDescriptor::new("shout", TypeKind::Boolean)
                    .alias('s')
                    .default_value(Value::Bool(false)),
            )
            .param(
                ParameterDescriptor::new("times", TypeKind::Nullable(ElementType::Scalar(ScalarType::U32)))
                    .description("Repeat the greeting; once when omitted.")
                    .default_value(Value::Null),
            ),
        Target::from_fn(|args| {
            let name: String = args.get(0)?;
            let shout: bool = args.get(1)?;
            let times: Option<u32> = args.get(2)?;
            let mut greeting = format!("Hello, {name}!");
            if shout {
                greeting = greeting.to_uppercase();
            }
            for _ in 0..times.unwrap_or(1) {
                args.write_line(greeting.as_str());
            }
            Ok(())
        }),
    )
}

/// Instance controller: a fresh notebook is built for every call.
#[derive(Debug, Default)]
struct Notebook {
    entries: Vec<String>,
}

impl Notebook {
    fn tag(&mut self, args: &Args) -> Result<()> {
        let labels: Vec<String> = args.get(0)?;
        let priority: String = args.get(1)?;
        let Ok(priority) = Priority::from_str(&priority, false) else {
            bail!("unsupported priority '{}'", priority);
        };
        for label in labels {
            self.entries.push(format!("[{priority:?}] {label}"));
        }
        for entry in &self.entries {
            args.write_line(entry.as_str());
        }
        Ok(())
    }
}

fn notes() -> Controller {
    Controller::new("notes", "Tags notes with a priority").command(
        CommandDescriptor::new("tag")
            .description("Prints each label with its priority")
            .param(
                ParameterDescriptor::new("labels", TypeKind::Array(ElementType::Scalar(ScalarType::String)))
                    .alias('l'),
            )
            .param(
                ParameterDescriptor::new("priority", TypeKind::Enum(Priority::enum_type()))
                    .alias('p')
                    .default_value(Value::Enum("normal".to_string())),
            ),
        Target::instance(Notebook::tag),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cliroute::{CommandCatalog, Settings};
    use pretty_assertions::assert_eq;

    #[test]
    fn priority_variants_come_from_value_enum() {
        assert_eq!(Priority::enum_type().variants, vec!["low", "normal", "high"]);
    }

    #[test]
    fn every_controller_documents() {
        let registry = registry();
        let names: Vec<&str> = registry.controllers().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["math", "greet", "notes"]);

        let settings = Settings::default();
        let lines = cliroute::docs::controller_command_lines(
            registry.controller("notes").unwrap(),
            None,
            &settings,
        );
        assert!(lines.contains(
            &"--priority | --p (Priority): This parameter is Optional and must be one of the following (low, normal, high).".to_string()
        ));
    }
}
