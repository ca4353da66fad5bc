//! JavaScript runtime management
//!
//! One QuickJS runtime and context per script. Uncaught exceptions are
//! pulled out of the context and reported with their message.

use crate::ScriptError;
use rquickjs::function::IntoArgs;
use rquickjs::{Context, Ctx, Function, Runtime};
use std::path::Path;

/// Script execution context
pub struct JsRuntime {
    #[allow(dead_code)] // Kept alive for context lifetime
    runtime: Runtime,
    context: Context,
}

impl JsRuntime {
    pub fn new() -> Result<Self, ScriptError> {
        let runtime = Runtime::new()?;
        let context = Context::full(&runtime)?;

        Ok(Self { runtime, context })
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn execute_file(&self, path: &Path) -> Result<(), ScriptError> {
        let source = std::fs::read_to_string(path)?;
        self.execute(&source)
    }

    pub fn execute(&self, source: &str) -> Result<(), ScriptError> {
        self.context.with(|ctx| {
            ctx.eval::<(), _>(source)
                .map_err(|err| caught(&ctx, err))
        })
    }

    /// Whether the script defines a global function called `name`.
    pub fn has_function(&self, name: &str) -> Result<bool, ScriptError> {
        self.context.with(|ctx| {
            let func: Option<Function> = ctx.globals().get(name)?;
            Ok(func.is_some())
        })
    }

    /// Call a global function if the script defines it.
    ///
    /// Returns `Ok(false)` when there is no such function.
    pub fn call_optional<A>(&self, name: &str, args: A) -> Result<bool, ScriptError>
    where
        A: for<'js> IntoArgs<'js>,
    {
        self.context.with(|ctx| {
            let func: Option<Function> = ctx.globals().get(name)?;
            let Some(func) = func else {
                return Ok(false);
            };
            func.call::<_, ()>(args).map_err(|err| caught(&ctx, err))?;
            Ok(true)
        })
    }
}

/// Turn a pending JavaScript exception into a readable error.
fn caught(ctx: &Ctx<'_>, err: rquickjs::Error) -> ScriptError {
    if !matches!(err, rquickjs::Error::Exception) {
        return ScriptError::Js(err);
    }

    let value = ctx.catch();
    if let Some(exception) = value.as_exception() {
        return ScriptError::Exception(
            exception
                .message()
                .unwrap_or_else(|| "exception without message".to_string()),
        );
    }
    let thrown = value
        .as_string()
        .and_then(|s| s.to_string().ok())
        .unwrap_or_else(|| format!("non-error value of type {}", value.type_name()));
    ScriptError::Exception(thrown)
}
