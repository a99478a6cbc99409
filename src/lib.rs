//! Declarative command-line dispatch.
//!
//! Hosts describe controllers, commands and typed parameters once; the engine then
//! tokenizes raw input, groups named arguments, binds and coerces values, and invokes
//! the matching command, turning every failure into an [`InvocationResponse`].

mod arguments;
mod binder;
mod coerce;
mod console;
mod descriptor;
mod dispatch;
pub mod docs;
mod processor;
mod registry;
mod settings;
mod shell;
mod tokenizer;
mod value;

pub use arguments::{NamedArgument, ProcessedArguments, group_arguments, process_args};
pub use binder::{BindingResult, bind};
pub use coerce::{CoerceError, coerce, parse_element, parse_enum, parse_scalar};
pub use console::{BufferConsole, Console, StdConsole};
pub use descriptor::{
    CommandDescriptor, ControllerDescriptor, ElementType, EnumType, ParameterDescriptor,
    ScalarType, TypeKind,
};
pub use dispatch::{Dispatcher, InvocationResponse};
pub use processor::Processor;
pub use registry::{CatalogError, CommandCatalog, CommandId, Controller, Registry, Target};
pub use settings::{ParamDetail, Settings};
pub use shell::Shell;
pub use tokenizer::tokenize;
pub use value::{ArgumentError, Args, FromValue, Value};
