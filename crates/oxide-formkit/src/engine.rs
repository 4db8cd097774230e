//! Registration with host template engines.
//!
//! Template engines that render from a JSON context typically let an
//! application register named functions that take keyword arguments and
//! return markup. [`FormExtension`] exposes a shared [`FormRenderer`] as one
//! such function, `form`, which dispatches on its `method` argument:
//!
//! | method     | arguments                    |
//! |------------|------------------------------|
//! | `label`    | `label`, `name`?, `id`?      |
//! | `error`    | `name`                       |
//! | `input`    | `name`, `params`?            |
//! | `textarea` | `name`, `params`?            |
//! | `select`   | `name`, `params`?            |

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::error::{FormError, Result};
use crate::params::FieldParams;
use crate::renderer::FormRenderer;

/// Keyword arguments passed to a view function.
pub type Args = HashMap<String, Value>;

/// A function callable from templates.
pub type ViewFunction = Arc<dyn Fn(&Args) -> Result<String> + Send + Sync>;

/// A host engine's function registration surface.
pub trait FunctionRegistry {
    /// Registers `function` under `name`, replacing any previous one.
    fn register_function(&mut self, name: &str, function: ViewFunction);

    /// Returns whether a function is registered under `name`.
    fn does_function_exist(&self, name: &str) -> bool;
}

/// Something that installs functions into a host engine.
pub trait Extension {
    fn register(&self, registry: &mut dyn FunctionRegistry);
}

/// A minimal function registry.
///
/// Serves as the host when no external engine is involved, and as a stand-in
/// for one in tests.
#[derive(Default, Clone)]
pub struct ViewFunctions {
    functions: HashMap<String, ViewFunction>,
}

impl ViewFunctions {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs an extension.
    #[must_use]
    pub fn extension(mut self, extension: &impl Extension) -> Self {
        extension.register(&mut self);
        self
    }

    /// Calls the function registered under `name`.
    pub fn call(&self, name: &str, args: &Args) -> Result<String> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| FormError::UnknownFunction(name.to_string()))?;
        function(args)
    }

    /// Returns the registered function names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}

impl fmt::Debug for ViewFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewFunctions")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FunctionRegistry for ViewFunctions {
    fn register_function(&mut self, name: &str, function: ViewFunction) {
        tracing::debug!(function = name, "registering view function");
        self.functions.insert(name.to_string(), function);
    }

    fn does_function_exist(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }
}

/// Exposes a [`FormRenderer`] to templates as the `form` function.
///
/// The renderer is shared: the application keeps a [`handle`](Self::handle)
/// to bind request data and errors before rendering, and to reset it
/// afterwards.
///
/// ```
/// use oxide_formkit::{FormExtension, ViewFunctions};
/// use serde_json::json;
///
/// let extension = FormExtension::default();
/// let views = ViewFunctions::new().extension(&extension);
///
/// let args = serde_json::from_value(json!({
///     "method": "label", "label": "Email", "name": "email",
/// }))
/// .unwrap();
/// assert_eq!(views.call("form", &args).unwrap(), r#"<label for="Email">Email</label>"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormExtension {
    renderer: Arc<RwLock<FormRenderer>>,
}

impl FormExtension {
    /// The name the renderer is registered under.
    pub const FUNCTION_NAME: &'static str = "form";

    /// Wraps an existing renderer.
    pub fn new(renderer: FormRenderer) -> Self {
        Self {
            renderer: Arc::new(RwLock::new(renderer)),
        }
    }

    /// Returns the shared renderer.
    pub fn handle(&self) -> Arc<RwLock<FormRenderer>> {
        Arc::clone(&self.renderer)
    }

    /// Dispatches one `form(...)` call.
    pub fn call(&self, args: &Args) -> Result<String> {
        dispatch(&self.renderer, args)
    }
}

impl Extension for FormExtension {
    fn register(&self, registry: &mut dyn FunctionRegistry) {
        let renderer = Arc::clone(&self.renderer);
        registry.register_function(
            Self::FUNCTION_NAME,
            Arc::new(move |args: &Args| dispatch(&renderer, args)),
        );
    }
}

fn dispatch(renderer: &RwLock<FormRenderer>, args: &Args) -> Result<String> {
    let method = required_str(args, "method")?;
    let form = renderer.read().map_err(|_| FormError::LockPoisoned)?;

    tracing::trace!(method, "dispatching form call");

    match method {
        "label" => Ok(form.label(
            required_str(args, "label")?,
            optional_str(args, "name")?,
            optional_str(args, "id")?,
        )),
        "error" => Ok(form.error(required_str(args, "name")?)),
        "input" => Ok(form.input(required_str(args, "name")?, params(args)?)),
        "textarea" => Ok(form.textarea(required_str(args, "name")?, params(args)?)),
        "select" => Ok(form.select(required_str(args, "name")?, params(args)?)),
        other => Err(FormError::UnknownMethod(other.to_string())),
    }
}

fn required_str<'a>(args: &'a Args, name: &str) -> Result<&'a str> {
    optional_str(args, name)?.ok_or_else(|| FormError::MissingArgument(name.to_string()))
}

fn optional_str<'a>(args: &'a Args, name: &str) -> Result<Option<&'a str>> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(FormError::invalid(
            name,
            format!("expected a string, got {other}"),
        )),
    }
}

fn params(args: &Args) -> Result<FieldParams> {
    args.get("params")
        .cloned()
        .map_or_else(|| Ok(FieldParams::new()), FieldParams::from_json)
}
