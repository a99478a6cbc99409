//! Command resolution, binding and contained invocation.
//!
//! Every path through [`Dispatcher::execute`] ends in an [`InvocationResponse`]:
//! unknown commands and binding errors are reported as plain messages, failures raised
//! while invoking (including panics) are caught and turned into diagnostics. Lines a
//! command writes through [`Args::write_line`] lead the response messages.

use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use serde::Serialize;
use tracing::{debug, warn};

use crate::arguments::NamedArgument;
use crate::binder::bind;
use crate::coerce::CoerceError;
use crate::descriptor::{CommandDescriptor, ControllerDescriptor};
use crate::registry::{CatalogError, CommandCatalog, CommandId};
use crate::settings::Settings;
use crate::value::{ArgumentError, Args};

/// What the caller gets back from one command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvocationResponse {
    pub succeeded: bool,
    pub messages: Vec<String>,
}

impl InvocationResponse {
    pub fn success() -> Self {
        Self {
            succeeded: true,
            messages: Vec::new(),
        }
    }

    pub fn failure(messages: Vec<String>) -> Self {
        Self {
            succeeded: false,
            messages,
        }
    }
}

/// Resolves a command on a controller and invokes it through a [`CommandCatalog`].
pub struct Dispatcher<'a, C: CommandCatalog + ?Sized> {
    settings: &'a Settings,
    catalog: &'a C,
}

impl<'a, C: CommandCatalog + ?Sized> Dispatcher<'a, C> {
    pub fn new(settings: &'a Settings, catalog: &'a C) -> Self {
        Self { settings, catalog }
    }

    /// Run `command_name` on `controller`, falling back to the controller's default
    /// command when the name does not match.
    pub fn execute(
        &self,
        controller: &ControllerDescriptor,
        command_name: Option<&str>,
        args: &[NamedArgument],
    ) -> InvocationResponse {
        let resolved = command_name
            .and_then(|name| controller.command(name))
            .or_else(|| controller.default_command());
        let Some(command) = resolved else {
            debug!(controller = %controller.name, command = ?command_name, "command not found");
            return InvocationResponse::failure(vec![format!(
                "'{}' is not a valid command. Use '{}' to see available commands.",
                command_name.unwrap_or(""),
                self.settings.help_marker
            )]);
        };

        debug!(controller = %controller.name, command = %command.name, "resolved command");
        let id = CommandId::new(&controller.name, &command.name);
        self.invoke(&id, command, args)
    }

    fn invoke(
        &self,
        id: &CommandId,
        command: &CommandDescriptor,
        args: &[NamedArgument],
    ) -> InvocationResponse {
        let binding = match bind(command, args) {
            Ok(binding) => binding,
            Err(err) => {
                warn!(command = %id, error = %err, "argument conversion failed");
                return self.invalid_arguments();
            }
        };
        if !binding.is_success() {
            return InvocationResponse::failure(binding.errors);
        }

        let args = Args::new(binding.values);
        let outcome = contained(|| self.catalog.invoke(id, &args));
        let mut response = self.respond_to(id, outcome);
        let mut messages = args.take_output();
        messages.append(&mut response.messages);
        response.messages = messages;
        response
    }

    fn respond_to(
        &self,
        id: &CommandId,
        outcome: Result<anyhow::Result<()>, Contained>,
    ) -> InvocationResponse {
        match outcome {
            Ok(Ok(())) => InvocationResponse::success(),
            Ok(Err(err)) if is_argument_fault(&err) => {
                warn!(command = %id, error = %err, "command rejected its arguments");
                self.invalid_arguments()
            }
            Ok(Err(err)) => {
                warn!(command = %id, error = %err, "command failed");
                let backtrace = err.backtrace();
                let trace = (backtrace.status() == BacktraceStatus::Captured)
                    .then(|| backtrace.to_string());
                target_failure(&format!("{err:#}"), trace.as_deref())
            }
            Err(panic) => {
                let message = panic_message(panic.payload.as_ref());
                warn!(command = %id, panic = %message, "command panicked");
                target_failure(&message, panic.trace.as_deref())
            }
        }
    }

    fn invalid_arguments(&self) -> InvocationResponse {
        InvocationResponse::failure(vec![
            "An error occurred while attempting to execute the command.".to_string(),
            "This is most likely due to invalid arguments.".to_string(),
            format!(
                "Please verify the command usage with '{}' and try again.",
                self.settings.help_marker
            ),
        ])
    }
}

/// A panic caught while running a command body.
struct Contained {
    payload: Box<dyn Any + Send>,
    trace: Option<String>,
}

thread_local! {
    static CONTAINING: Cell<bool> = const { Cell::new(false) };
    static PANIC_TRACE: RefCell<Option<String>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

/// Hook that stays silent for panics raised inside [`contained`] and records their
/// backtrace instead; other panics go to the previously installed hook.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if CONTAINING.with(Cell::get) {
                let trace = Backtrace::force_capture().to_string();
                PANIC_TRACE.with(|slot| *slot.borrow_mut() = Some(trace));
            } else {
                previous(info);
            }
        }));
    });
}

fn contained<T>(body: impl FnOnce() -> T) -> Result<T, Contained> {
    install_panic_hook();
    let was_containing = CONTAINING.with(|flag| flag.replace(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(body));
    CONTAINING.with(|flag| flag.set(was_containing));
    outcome.map_err(|payload| Contained {
        payload,
        trace: PANIC_TRACE.with(|slot| slot.borrow_mut().take()),
    })
}

fn is_argument_fault(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ArgumentError>().is_some()
        || err.downcast_ref::<CoerceError>().is_some()
        || err.downcast_ref::<CatalogError>().is_some()
}

fn target_failure(message: &str, trace: Option<&str>) -> InvocationResponse {
    let mut messages = vec![
        "An error occurred while executing the command.".to_string(),
        format!("Message: {message}"),
    ];
    if let Some(trace) = trace.map(str::trim).filter(|trace| !trace.is_empty()) {
        messages.push(format!("Stack Trace: {trace}"));
    }
    InvocationResponse::failure(messages)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "command panicked".to_string()
    }
}
