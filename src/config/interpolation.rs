//! Variable interpolation for templates and role commands.
//!
//! Templates and command arguments use `${variable}` syntax.
//!
//! # Syntax
//!
//! - `${variable_name}` - replaced with variable value
//! - `$${escaped}` - produces literal `${escaped}` in output
//! - `$` followed by anything else is literal (`$PATH` stays `$PATH`)
//!
//! # Example
//!
//! ```text
//! export PANDA_HOME=${home}/panda
//! # With home="/Users/dev", produces: export PANDA_HOME=/Users/dev/panda
//! ```

use crate::error::{ProvisionError, Result};
use std::collections::HashMap;
use std::path::Path;

/// A segment of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name}
    Variable(String),
}

/// Parse a string containing ${var} interpolations.
pub fn parse_interpolation(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                if chars.peek() == Some(&'{') {
                    // $${...} -> literal ${...}
                    chars.next();
                    current_literal.push_str("${");
                    for c in chars.by_ref() {
                        current_literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                } else {
                    current_literal.push('$');
                }
            }
            Some('{') => {
                chars.next();

                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                segments.push(Segment::Variable(var_name.trim().to_string()));
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    segments
}

/// Context for variable resolution.
///
/// Variables are resolved in priority order:
/// 1. Run variables (captures, tokens)
/// 2. Environment variables
/// 3. Built-in variables (home, provision_version)
#[derive(Debug, Default, Clone)]
pub struct InterpolationContext {
    /// Variables set during the run
    pub variables: HashMap<String, String>,

    /// Environment variables
    pub env: HashMap<String, String>,

    /// Built-in variables
    pub builtins: HashMap<String, String>,
}

impl InterpolationContext {
    /// Create a new context with built-in variables.
    pub fn new() -> Self {
        let mut builtins = HashMap::new();
        builtins.insert(
            "provision_version".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );

        Self {
            builtins,
            ..Default::default()
        }
    }

    /// Add the home directory to builtins.
    pub fn with_home(mut self, home: &Path) -> Self {
        self.builtins
            .insert("home".to_string(), home.display().to_string());
        self
    }

    /// Add environment variables from a HashMap.
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Set a run variable, replacing any previous value.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.variables.insert(name.to_string(), value.into());
    }

    /// Resolve a variable name to its value.
    pub fn resolve(&self, name: &str) -> Option<String> {
        self.variables
            .get(name)
            .or_else(|| self.env.get(name))
            .or_else(|| self.builtins.get(name))
            .cloned()
    }
}

/// Resolve all variables in an interpolated string.
///
/// # Errors
///
/// Returns `ConfigValidationError` if any variable is not found in the context.
pub fn resolve_string(input: &str, context: &InterpolationContext) -> Result<String> {
    let mut result = String::with_capacity(input.len());

    for segment in parse_interpolation(input) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable(name) => {
                let value =
                    context
                        .resolve(&name)
                        .ok_or_else(|| ProvisionError::ConfigValidationError {
                            message: format!("Unresolved variable: ${{{}}}", name),
                        })?;
                result.push_str(&value);
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_literal_only() {
        let result = parse_interpolation("hello world");
        assert_eq!(result, vec![Segment::Literal("hello world".to_string())]);
    }

    #[test]
    fn parse_variable_with_surrounding_text() {
        let result = parse_interpolation("export PANDA_HOME=${home}/panda");
        assert_eq!(
            result,
            vec![
                Segment::Literal("export PANDA_HOME=".to_string()),
                Segment::Variable("home".to_string()),
                Segment::Literal("/panda".to_string()),
            ]
        );
    }

    #[test]
    fn parse_adjacent_variables() {
        let result = parse_interpolation("${a}${b}");
        assert_eq!(
            result,
            vec![
                Segment::Variable("a".to_string()),
                Segment::Variable("b".to_string()),
            ]
        );
    }

    #[test]
    fn parse_escaped_dollar_brace() {
        let result = parse_interpolation("$${NOT_INTERPOLATED}");
        assert_eq!(
            result,
            vec![Segment::Literal("${NOT_INTERPOLATED}".to_string())]
        );
    }

    #[test]
    fn parse_dollar_without_brace() {
        let result = parse_interpolation("export PATH=\"/usr/local/bin:$PATH\"");
        assert_eq!(
            result,
            vec![Segment::Literal(
                "export PATH=\"/usr/local/bin:$PATH\"".to_string()
            )]
        );
    }

    #[test]
    fn parse_empty_string() {
        assert!(parse_interpolation("").is_empty());
    }

    #[test]
    fn resolve_string_uses_priority_order() {
        let mut ctx = InterpolationContext::new();
        ctx.set("var", "from_run");
        ctx.env.insert("var".to_string(), "from_env".to_string());
        ctx.builtins
            .insert("var".to_string(), "from_builtin".to_string());

        assert_eq!(resolve_string("${var}", &ctx).unwrap(), "from_run");

        ctx.variables.clear();
        assert_eq!(resolve_string("${var}", &ctx).unwrap(), "from_env");

        ctx.env.clear();
        assert_eq!(resolve_string("${var}", &ctx).unwrap(), "from_builtin");
    }

    #[test]
    fn resolve_string_fails_on_missing_variable() {
        let ctx = InterpolationContext::new();
        let result = resolve_string("${missing}", &ctx);
        assert!(matches!(
            result,
            Err(ProvisionError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn context_with_home_adds_builtin() {
        let ctx = InterpolationContext::new().with_home(Path::new("/Users/dev"));
        assert_eq!(ctx.resolve("home"), Some("/Users/dev".to_string()));
        assert!(ctx.resolve("provision_version").is_some());
    }

    #[test]
    fn resolve_preserves_escaped() {
        let ctx = InterpolationContext::new();
        let result = resolve_string("$${NOT_RESOLVED}", &ctx).unwrap();
        assert_eq!(result, "${NOT_RESOLVED}");
    }
}
