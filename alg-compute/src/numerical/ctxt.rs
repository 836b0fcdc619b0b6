use crate::consts;
use levenshtein::levenshtein;
use std::{collections::HashMap, fmt, sync::Arc};

/// A native function available for use in a calculator context.
///
/// Functions are registered with a fixed arity; the evaluator checks the argument count of every
/// call site against it before invoking the body.
#[derive(Clone)]
pub struct Func {
    arity: usize,
    body: Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>,
}

impl Func {
    /// Creates a function from its arity and native implementation.
    pub fn new(arity: usize, body: impl Fn(&[f64]) -> f64 + Send + Sync + 'static) -> Self {
        Self { arity, body: Arc::new(body) }
    }

    /// The number of arguments the function takes.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Invokes the function. The caller must pass exactly [`arity`](Self::arity) arguments.
    pub fn call(&self, args: &[f64]) -> f64 {
        (self.body)(args)
    }
}

impl fmt::Debug for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Func")
            .field("arity", &self.arity)
            .field("body", &"<native>")
            .finish()
    }
}

/// A context to use when evaluating calculator input, containing the variables and functions
/// that can be used within the expression.
#[derive(Debug, Clone)]
pub struct Ctxt {
    /// The variables in the context.
    vars: HashMap<String, f64>,

    /// The functions in the context.
    funcs: HashMap<String, Func>,
}

impl Default for Ctxt {
    fn default() -> Self {
        Self {
            vars: consts::CONSTANTS
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
            funcs: crate::funcs::all()
                .into_iter()
                .map(|(name, func)| (name.to_string(), func))
                .collect(),
        }
    }
}

impl Ctxt {
    /// Creates a new empty context, with no variables or functions at all. Consider using the
    /// [`Default`] implementation instead, which preloads the named constants and the scalar
    /// utilities from [`crate::funcs`].
    pub fn new() -> Ctxt {
        Ctxt {
            vars: HashMap::new(),
            funcs: HashMap::new(),
        }
    }

    /// Add a variable to the context.
    pub fn add_var(&mut self, name: &str, value: f64) {
        self.vars.insert(name.to_string(), value);
    }

    /// Get the value of a variable in the context.
    pub fn get_var(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }

    /// Returns the variables in the context.
    pub fn get_vars(&self) -> &HashMap<String, f64> {
        &self.vars
    }

    /// Add a function to the context.
    pub fn add_func(&mut self, name: &str, func: Func) {
        self.funcs.insert(name.to_string(), func);
    }

    /// Get a function in the context.
    pub fn get_func(&self, name: &str) -> Option<&Func> {
        self.funcs.get(name)
    }

    /// Returns the functions in the context.
    pub fn get_funcs(&self) -> &HashMap<String, Func> {
        &self.funcs
    }

    /// Returns all variables in the context with a name similar to the given name.
    pub fn get_similar_vars(&self, name: &str) -> Vec<String> {
        let mut similar: Vec<String> = self.vars
            .keys()
            .filter(|n| levenshtein(n, name) < 2)
            .cloned()
            .collect();
        similar.sort();
        similar
    }

    /// Returns all functions in the context with a name similar to the given name.
    pub fn get_similar_funcs(&self, name: &str) -> Vec<String> {
        let mut similar: Vec<String> = self.funcs
            .keys()
            .filter(|n| levenshtein(n, name) < 2)
            .cloned()
            .collect();
        similar.sort();
        similar
    }
}
