//! Group registry for tracking capture groups
//!
//! Walks a translated tree and records its named capture groups in pattern
//! order. Names must be unique: two policy variables that adapt to the same
//! name (or one variable used twice) are reported here, before the regex
//! compiler ever sees the pattern.

use std::collections::HashSet;

use thiserror::Error;

use crate::ast::Expr;

/// Registry of named capture groups
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl GroupRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named capture group
    ///
    /// # Errors
    /// Returns an error if the name is already in use
    pub fn register_name(&mut self, name: &str) -> Result<(), GroupRegistryError> {
        if !self.seen.insert(name.to_string()) {
            return Err(GroupRegistryError::DuplicateGroupName(name.to_string()));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    /// Names of the named groups, in pattern order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Consume into the group names, in pattern order
    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

/// Errors that can occur in the group registry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroupRegistryError {
    /// A group name is used more than once
    #[error("duplicate group name: {0}")]
    DuplicateGroupName(String),
}

/// A visitor that collects group information from a translated tree
pub struct GroupCollector;

impl GroupCollector {
    /// Collect all groups from an expression into a fresh registry
    pub fn collect(expr: &Expr) -> Result<GroupRegistry, GroupRegistryError> {
        let mut registry = GroupRegistry::new();
        Self::visit_expr(expr, &mut registry)?;
        Ok(registry)
    }

    fn visit_expr(expr: &Expr, registry: &mut GroupRegistry) -> Result<(), GroupRegistryError> {
        match expr {
            Expr::Empty
            | Expr::Literal(_)
            | Expr::Atom { .. }
            | Expr::SimpleToken(_)
            | Expr::ComplexToken { .. } => Ok(()),

            Expr::Sequence(exprs) => {
                for expr in exprs {
                    Self::visit_expr(expr, registry)?;
                }
                Ok(())
            }

            Expr::NamedGroup { name, pattern } => {
                registry.register_name(name)?;
                Self::visit_expr(pattern, registry)
            }

            Expr::Group(expr)
            | Expr::NegativeLookahead(expr)
            | Expr::NegatedGroup(expr)
            | Expr::BracketGroup(expr)
            | Expr::AssignGroup { body: expr, .. } => Self::visit_expr(expr, registry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::passes::lower_all;

    fn collect(pattern: &str) -> Result<GroupRegistry, GroupRegistryError> {
        GroupCollector::collect(&lower_all(parse(pattern).unwrap()))
    }

    #[test]
    fn test_register_names_in_order() {
        let mut registry = GroupRegistry::new();
        registry.register_name("host").unwrap();
        registry.register_name("port").unwrap();
        assert_eq!(registry.names(), ["host", "port"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = GroupRegistry::new();
        registry.register_name("name").unwrap();
        let err = registry.register_name("name").unwrap_err();
        assert_eq!(err, GroupRegistryError::DuplicateGroupName("name".to_string()));
        assert_eq!(registry.into_names(), vec!["name".to_string()]);
    }

    #[test]
    fn test_collect_skips_plain_groups() {
        let registry = collect("<[<*>rbac].message> [a|b] <@.cpu>").unwrap();
        assert_eq!(registry.names(), ["message", "cpu"]);
    }

    #[test]
    fn test_collect_inside_lookahead() {
        let registry = collect("<![<@.word>]>").unwrap();
        assert_eq!(registry.names(), ["word"]);
    }

    #[test]
    fn test_collect_detects_repeated_variable() {
        let err = collect("^/<*>/[<*.source>%<@>|<*.source>]$").unwrap_err();
        assert_eq!(err, GroupRegistryError::DuplicateGroupName("source".to_string()));
    }

    #[test]
    fn test_collect_detects_adaptation_collision() {
        let err = collect("<*.host_name> <*.hostName>").unwrap_err();
        assert_eq!(err, GroupRegistryError::DuplicateGroupName("hostName".to_string()));
    }
}
