//! Maps command identifiers on the wire to constructible variants.
//!
//! The variant catalogue is a closed, explicitly-declared set: built-ins
//! register at first use of [`default_registry`] (race-free via
//! `once_cell`), and embedders can register their own variants on a
//! registry they own. Identifier lookup is exact; an unknown identifier
//! is a hard failure, never silently ignored.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use flowlink_core::{Error, Result};

use crate::basic;
use crate::command::RemoteCommand;
use crate::options;

/// Constructs a fresh, unconfigured instance of one variant.
pub type CommandFactory = fn() -> Box<dyn RemoteCommand>;

/// The catalogue of known command variants.
pub struct CommandRegistry {
    factories: HashMap<String, CommandFactory>,
}

impl CommandRegistry {
    /// An empty registry.
    pub fn new() -> CommandRegistry {
        CommandRegistry { factories: HashMap::new() }
    }

    /// A registry pre-populated with the built-in variants.
    pub fn with_builtins() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        for factory in basic::builtins() {
            registry.register(factory);
        }
        registry
    }

    /// Register a variant under the identifier its instances report.
    pub fn register(&mut self, factory: CommandFactory) {
        let name = factory().name().to_string();
        self.factories.insert(name, factory);
    }

    /// Whether an identifier is known.
    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// All registered identifiers, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Construct a fresh instance for an exact identifier.
    pub fn instantiate(&self, name: &str) -> Result<Box<dyn RemoteCommand>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| Error::UnknownCommand { name: name.to_string() })
    }

    /// Resolve a command-line string (`identifier [flags...]`) into a
    /// fully configured instance.
    ///
    /// The remaining tokens are handed to the variant's own option
    /// parsing; a rejected option surfaces as a resolution failure.
    pub fn resolve(&self, command_line: &str) -> Result<Box<dyn RemoteCommand>> {
        let tokens = options::split_options(command_line)?;
        let (name, opts) = tokens
            .split_first()
            .ok_or_else(|| Error::UnknownCommand { name: command_line.to_string() })?;
        let mut cmd = self.instantiate(name)?;
        cmd.parse_options(opts)?;
        Ok(cmd)
    }
}

impl Default for CommandRegistry {
    fn default() -> CommandRegistry {
        CommandRegistry::with_builtins()
    }
}

/// The process-wide registry of built-in variants.
pub fn default_registry() -> &'static CommandRegistry {
    static DEFAULT: Lazy<CommandRegistry> = Lazy::new(CommandRegistry::with_builtins);
    &DEFAULT
}
