//! Help text for controllers, commands and parameters.

use crate::descriptor::{CommandDescriptor, ControllerDescriptor, ParameterDescriptor};
use crate::settings::Settings;

/// One-line summary: `<name> - <description>`.
pub fn controller_line(controller: &ControllerDescriptor) -> String {
    format!("{} - {}", controller.name, controller.description)
}

/// `Required`/`Optional`, with the default value appended in detailed mode.
pub fn priority(parameter: &ParameterDescriptor, settings: &Settings) -> String {
    match &parameter.default {
        None => "Required".to_string(),
        Some(default) if settings.is_detailed() => {
            format!("Optional with a default value of {default}")
        }
        Some(_) => "Optional".to_string(),
    }
}

/// Lines documenting one parameter: the usage line and an optional description line.
pub fn parameter_lines(parameter: &ParameterDescriptor, settings: &Settings) -> Vec<String> {
    let prefix = &settings.argument_prefix;
    let alias = parameter
        .alias
        .map(|alias| format!(" | {prefix}{alias}"))
        .unwrap_or_default();

    let mut line = format!(
        "{prefix}{}{alias} ({}): This parameter is {}",
        parameter.name,
        parameter.kind.describe(),
        priority(parameter, settings)
    );
    if let Some(enum_type) = parameter.kind.element().enum_type() {
        let collection = if parameter.kind.is_collection() {
            "a collection of "
        } else {
            ""
        };
        line.push_str(&format!(
            " and must be {collection}one of the following ({})",
            enum_type.variants.join(", ")
        ));
    }
    line.push('.');

    let mut lines = vec![line];
    if let Some(description) = &parameter.description {
        lines.push(format!("Description: {description}"));
    }
    lines
}

/// Lines documenting a command, preceded by a blank separator line.
pub fn command_lines(command: &CommandDescriptor, settings: &Settings) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        command.name.clone(),
        format!("Description: {}", command.description.as_deref().unwrap_or("")),
    ];
    if !command.parameters.is_empty() {
        lines.push("Parameters:".to_string());
        for parameter in &command.parameters {
            lines.extend(parameter_lines(parameter, settings));
        }
    }
    lines
}

/// Documentation for `command_name`, or for every command when it is absent or unknown.
pub fn controller_command_lines(
    controller: &ControllerDescriptor,
    command_name: Option<&str>,
    settings: &Settings,
) -> Vec<String> {
    match command_name.and_then(|name| controller.command(name)) {
        Some(command) => command_lines(command, settings),
        None => controller
            .commands
            .iter()
            .flat_map(|command| command_lines(command, settings))
            .collect(),
    }
}
