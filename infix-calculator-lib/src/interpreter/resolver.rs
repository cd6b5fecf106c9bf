use crate::interpreter::error::{Result, SyntaxError};
use std::collections::{BTreeMap, HashMap};

/// Maps variable names to values during evaluation.
///
/// Implementations are supplied by the caller; the evaluators only ever read through them.
pub trait VariableResolver {
    /// Looks up the value of a variable.
    ///
    /// Fails with [`SyntaxError::UnknownVariable`] if the name is not recognised.
    fn resolve(&self, name: &str) -> Result<f64>;
}

impl<R: VariableResolver + ?Sized> VariableResolver for &R {
    fn resolve(&self, name: &str) -> Result<f64> {
        (**self).resolve(name)
    }
}

impl<R: VariableResolver + ?Sized> VariableResolver for Box<R> {
    fn resolve(&self, name: &str) -> Result<f64> {
        (**self).resolve(name)
    }
}

impl VariableResolver for HashMap<String, f64> {
    fn resolve(&self, name: &str) -> Result<f64> {
        self.get(name)
            .copied()
            .ok_or_else(|| SyntaxError::UnknownVariable(name.to_string()))
    }
}

impl VariableResolver for BTreeMap<String, f64> {
    fn resolve(&self, name: &str) -> Result<f64> {
        self.get(name)
            .copied()
            .ok_or_else(|| SyntaxError::UnknownVariable(name.to_string()))
    }
}

/// Adapts a lookup closure into a [`VariableResolver`], `None` meaning the name is unknown.
///
/// # Examples
///
/// ```
/// use infix_calculator::{FnResolver, VariableResolver};
///
/// let resolver = FnResolver(|name: &str| (name == "e").then(|| std::f64::consts::E));
/// assert!(resolver.resolve("e").is_ok());
/// assert!(resolver.resolve("pi").is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnResolver<F>(pub F);

impl<F> VariableResolver for FnResolver<F>
where
    F: Fn(&str) -> Option<f64>,
{
    fn resolve(&self, name: &str) -> Result<f64> {
        (self.0)(name).ok_or_else(|| SyntaxError::UnknownVariable(name.to_string()))
    }
}
