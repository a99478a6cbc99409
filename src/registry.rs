//! Registration table mapping command descriptors to callable targets.
//!
//! The dispatcher only sees the [`CommandCatalog`] capability: a list of controller
//! descriptors plus `invoke(id, args)`. [`Registry`] is the table-driven
//! implementation hosts fill in at startup.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use thiserror::Error;

use crate::descriptor::{CommandDescriptor, ControllerDescriptor};
use crate::value::Args;

/// Identifies one command within one controller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandId {
    pub controller: String,
    pub command: String,
}

impl CommandId {
    pub fn new<C: Into<String>, M: Into<String>>(controller: C, command: M) -> Self {
        Self {
            controller: controller.into(),
            command: command.into(),
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.controller, self.command)
    }
}

/// The catalog has no callable target for a listed command.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no target registered for '{0}'")]
    UnknownTarget(CommandId),
}

/// Listing and invoking commands without knowing how they were registered.
pub trait CommandCatalog {
    fn controllers(&self) -> &[ControllerDescriptor];

    /// Run the command body with values bound in parameter order.
    fn invoke(&self, id: &CommandId, args: &Args) -> Result<()>;

    fn controller(&self, name: &str) -> Option<&ControllerDescriptor> {
        self.controllers().iter().find(|controller| controller.name == name)
    }
}

type CommandFn = dyn Fn(&Args) -> Result<()> + Send + Sync;

/// A callable command body.
#[derive(Clone)]
pub enum Target {
    /// A free function.
    Static(Arc<CommandFn>),
    /// A method on a type that is default-constructed for every call.
    Instance(Arc<CommandFn>),
}

impl Target {
    pub fn from_fn<F>(body: F) -> Self
    where
        F: Fn(&Args) -> Result<()> + Send + Sync + 'static,
    {
        Target::Static(Arc::new(body))
    }

    pub fn instance<T, F>(method: F) -> Self
    where
        T: Default,
        F: Fn(&mut T, &Args) -> Result<()> + Send + Sync + 'static,
    {
        Target::Instance(Arc::new(move |args: &Args| {
            let mut target = T::default();
            method(&mut target, args)
        }))
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Target::Static(_))
    }

    fn call(&self, args: &Args) -> Result<()> {
        match self {
            Target::Static(body) | Target::Instance(body) => body(args),
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Static(_) => f.write_str("Target::Static"),
            Target::Instance(_) => f.write_str("Target::Instance"),
        }
    }
}

/// Builder for one controller and the targets of its commands.
#[derive(Debug)]
pub struct Controller {
    descriptor: ControllerDescriptor,
    targets: Vec<(String, Target)>,
}

impl Controller {
    pub fn new<N: Into<String>, D: Into<String>>(name: N, description: D) -> Self {
        Self {
            descriptor: ControllerDescriptor::new(name, description),
            targets: Vec::new(),
        }
    }

    pub fn command(mut self, mut descriptor: CommandDescriptor, target: Target) -> Self {
        descriptor.is_static = target.is_static();
        self.targets.push((descriptor.name.clone(), target));
        self.descriptor.commands.push(descriptor);
        self
    }

    /// Register the fallback command; it stays callable by its own name too.
    ///
    /// Only one default per controller is meaningful; the first registered one wins.
    pub fn default_command(self, mut descriptor: CommandDescriptor, target: Target) -> Self {
        descriptor.is_default = true;
        self.command(descriptor, target)
    }
}

/// Controllers and their command targets, fixed after startup.
#[derive(Debug, Default)]
pub struct Registry {
    controllers: Vec<ControllerDescriptor>,
    targets: HashMap<CommandId, Target>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, controller: Controller) -> Self {
        let name = controller.descriptor.name.clone();
        for (command, target) in controller.targets {
            self.targets
                .entry(CommandId::new(name.clone(), command))
                .or_insert(target);
        }
        self.controllers.push(controller.descriptor);
        self
    }
}

impl CommandCatalog for Registry {
    fn controllers(&self) -> &[ControllerDescriptor] {
        &self.controllers
    }

    fn invoke(&self, id: &CommandId, args: &Args) -> Result<()> {
        let target = self
            .targets
            .get(id)
            .ok_or_else(|| CatalogError::UnknownTarget(id.clone()))?;
        target.call(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ParameterDescriptor, ScalarType, TypeKind};
    use crate::value::Value;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Counter {
        calls: u32,
    }

    #[test]
    fn registers_descriptors_and_invokes_targets() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let registry = Registry::new().register(
            Controller::new("math", "Performs math operations").command(
                CommandDescriptor::new("add")
                    .param(ParameterDescriptor::new("a", TypeKind::Scalar(ScalarType::I32)))
                    .param(ParameterDescriptor::new("b", TypeKind::Scalar(ScalarType::I32))),
                Target::from_fn(move |args| {
                    sink.lock().unwrap().push(args.get::<i32>(0)? + args.get::<i32>(1)?);
                    Ok(())
                }),
            ),
        );

        let math = registry.controller("math").unwrap();
        assert_eq!(math.commands.len(), 1);
        assert!(math.commands[0].is_static);

        registry
            .invoke(
                &CommandId::new("math", "add"),
                &Args::new(vec![Value::I32(1), Value::I32(2)]),
            )
            .unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![3]);
    }

    #[test]
    fn instance_targets_start_fresh() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let registry = Registry::new().register(Controller::new("count", "Counts").command(
            CommandDescriptor::new("bump"),
            Target::instance(move |counter: &mut Counter, _args| {
                counter.calls += 1;
                sink.lock().unwrap().push(counter.calls);
                Ok(())
            }),
        ));

        let id = CommandId::new("count", "bump");
        registry.invoke(&id, &Args::default()).unwrap();
        registry.invoke(&id, &Args::default()).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![1, 1]);
        assert!(!registry.controllers()[0].commands[0].is_static);
    }

    #[test]
    fn default_command_is_flagged() {
        let registry = Registry::new().register(
            Controller::new("default", "Fallback")
                .default_command(CommandDescriptor::new("bool"), Target::from_fn(|_| Ok(()))),
        );
        let controller = registry.controller("default").unwrap();
        assert_eq!(controller.default_command().map(|c| c.name.as_str()), Some("bool"));
    }

    #[test]
    fn unknown_id_is_an_error() {
        let registry = Registry::new();
        assert!(registry.invoke(&CommandId::new("x", "y"), &Args::default()).is_err());
    }
}
