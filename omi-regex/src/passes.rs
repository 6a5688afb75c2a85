//! The five translation stages
//!
//! Each stage lowers one family of vendor constructs into regex constructs
//! and leaves everything else alone. Stages run in a fixed order:
//!
//! 1. `Simple` - `<*>`, `<@>`, `<#>`, `<_>`, `</>`, `<S>`
//! 2. `Complex` - counted and/or named tokens such as `<4*.stuff>`
//! 3. `Negation` - `<![...]>` to `(?!...)`
//! 4. `AssignOnly` - `<[...].name>` to `(?<name>...)`
//! 5. `Bracket` - remaining `[...]` to `(...)`
//!
//! A stage only rewrites nodes of its own family, and the nodes it produces
//! belong to no family, so running a stage twice changes nothing.

use crate::ast::{ActionKind, Count, Expr, Quantifier};
use crate::error::Result;
use crate::parser::{DEFAULT_MAX_DEPTH, Parser};
use crate::varname::adapt_var_name;

/// A single translation stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Unparameterized action tokens
    Simple,
    /// Counted and/or named action tokens
    Complex,
    /// Negated bracket groups
    Negation,
    /// Bracket groups captured under a name
    AssignOnly,
    /// Plain bracket groups
    Bracket,
}

impl Pass {
    /// All stages in the order they must run
    pub const ALL: [Pass; 5] = [
        Pass::Simple,
        Pass::Complex,
        Pass::Negation,
        Pass::AssignOnly,
        Pass::Bracket,
    ];

    /// Short name for reports
    pub fn name(self) -> &'static str {
        match self {
            Pass::Simple => "simple",
            Pass::Complex => "complex",
            Pass::Negation => "negation",
            Pass::AssignOnly => "assign-only",
            Pass::Bracket => "bracket",
        }
    }

    /// The character every construct of this stage contains
    pub fn trigger(self) -> char {
        match self {
            Pass::Bracket => '[',
            _ => '<',
        }
    }

    /// Lower every construct of this stage's family in the tree
    pub fn lower(self, expr: Expr) -> Expr {
        let expr = match expr {
            Expr::Sequence(exprs) => {
                Expr::Sequence(exprs.into_iter().map(|e| self.lower(e)).collect())
            }
            Expr::NegatedGroup(body) => Expr::NegatedGroup(Box::new(self.lower(*body))),
            Expr::AssignGroup { name, body } => Expr::AssignGroup {
                name,
                body: Box::new(self.lower(*body)),
            },
            Expr::BracketGroup(body) => Expr::BracketGroup(Box::new(self.lower(*body))),
            Expr::NamedGroup { name, pattern } => Expr::NamedGroup {
                name,
                pattern: Box::new(self.lower(*pattern)),
            },
            Expr::Group(body) => Expr::Group(Box::new(self.lower(*body))),
            Expr::NegativeLookahead(body) => Expr::NegativeLookahead(Box::new(self.lower(*body))),
            other => other,
        };
        self.rewrite(expr)
    }

    fn rewrite(self, expr: Expr) -> Expr {
        match (self, expr) {
            (Pass::Simple, Expr::SimpleToken(kind)) => Expr::atom(kind, kind.default_quantifier()),
            (Pass::Complex, Expr::ComplexToken { count, kind, name }) => {
                lower_complex(count, kind, name.as_deref())
            }
            (Pass::Negation, Expr::NegatedGroup(body)) => Expr::NegativeLookahead(body),
            (Pass::AssignOnly, Expr::AssignGroup { name, body }) => Expr::NamedGroup {
                name: adapt_var_name(&name),
                pattern: body,
            },
            (Pass::Bracket, Expr::BracketGroup(body)) => Expr::group(*body),
            (_, expr) => expr,
        }
    }

    /// Run this stage alone over a vendor pattern
    ///
    /// Returns the input unchanged when it lacks the stage's trigger character.
    pub fn apply(self, pattern: &str) -> Result<String> {
        self.apply_with_max_depth(pattern, DEFAULT_MAX_DEPTH)
    }

    /// Run this stage alone with an explicit nesting bound
    pub fn apply_with_max_depth(self, pattern: &str, max_depth: usize) -> Result<String> {
        if !pattern.contains(self.trigger()) {
            return Ok(pattern.to_string());
        }
        let ast = Parser::with_max_depth(pattern, max_depth).parse()?;
        Ok(self.lower(ast).to_regex_string())
    }
}

/// `<N T>` -> `atom{N}`, `<T.name>` -> `(?<name>atom?)`, `<N T.name>` -> `(?<name>atom{N})`
fn lower_complex(count: Option<Count>, kind: ActionKind, name: Option<&str>) -> Expr {
    let quantifier = count.map_or(kind.default_quantifier(), |n| Quantifier::Exactly(n.value));
    let atom = Expr::atom(kind, quantifier);
    match name {
        Some(name) => Expr::named_group(adapt_var_name(name), atom),
        None => atom,
    }
}

/// Lower every stage in order
pub fn lower_all(expr: Expr) -> Expr {
    Pass::ALL.iter().fold(expr, |expr, pass| pass.lower(expr))
}

/// Translate unparameterized action tokens only
pub fn translate_simple_tokens(pattern: &str) -> Result<String> {
    Pass::Simple.apply(pattern)
}

/// Translate counted and named action tokens only
pub fn translate_complex_tokens(pattern: &str) -> Result<String> {
    Pass::Complex.apply(pattern)
}

/// Translate negated bracket groups only
pub fn translate_negations(pattern: &str) -> Result<String> {
    Pass::Negation.apply(pattern)
}

/// Translate named bracket groups only
pub fn translate_assign_only_groups(pattern: &str) -> Result<String> {
    Pass::AssignOnly.apply(pattern)
}

/// Translate plain bracket groups only
pub fn translate_brackets(pattern: &str) -> Result<String> {
    Pass::Bracket.apply(pattern)
}
