//! Abstract Syntax Tree (AST) for action-group patterns
//!
//! The tree carries two families of variants:
//! - vendor constructs as parsed from the policy pattern (literal text,
//!   action tokens, negated groups, assign-only groups, bracket groups)
//! - regex constructs produced by the translation stages (quantified atoms,
//!   named groups, plain groups, negative lookahead)
//!
//! Rendering a vendor variant reproduces its source text exactly, so a tree
//! that has only been partially lowered still renders to a valid mix of regex
//! and untouched vendor syntax.

use std::fmt;

/// The repeat character of an action token (`<*>`, `<@>`, `<#>`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// `*` - any run of characters, separators included
    Any,
    /// `@` - a run of word characters
    Word,
    /// `#` - a run of digits
    Digit,
    /// `_` - a run of field separators (`_ / : -`)
    Separator,
    /// `/` - one or more line breaks
    LineBreak,
    /// `S` - whitespace
    Whitespace,
}

impl ActionKind {
    /// Map a vendor token character to its kind
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '*' => Some(ActionKind::Any),
            '@' => Some(ActionKind::Word),
            '#' => Some(ActionKind::Digit),
            '_' => Some(ActionKind::Separator),
            '/' => Some(ActionKind::LineBreak),
            'S' => Some(ActionKind::Whitespace),
            _ => None,
        }
    }

    /// The vendor token character
    pub fn as_char(self) -> char {
        match self {
            ActionKind::Any => '*',
            ActionKind::Word => '@',
            ActionKind::Digit => '#',
            ActionKind::Separator => '_',
            ActionKind::LineBreak => '/',
            ActionKind::Whitespace => 'S',
        }
    }

    /// The regex atom matching a single unit of this kind
    ///
    /// Atoms never contain square brackets, so the bracket stage leaves
    /// translated output alone.
    pub fn atom(self) -> &'static str {
        match self {
            ActionKind::Any => ".",
            ActionKind::Word => "\\w",
            ActionKind::Digit => "\\d",
            ActionKind::Separator => "(?:_|/|:|-)",
            ActionKind::LineBreak => "(?:\\n|\\r)",
            ActionKind::Whitespace => "(?: |\\t|\\n|\\r)",
        }
    }

    /// Quantifier applied when the token carries no explicit count
    pub fn default_quantifier(self) -> Quantifier {
        match self {
            ActionKind::Any => Quantifier::ZeroOrMoreLazy,
            ActionKind::Whitespace => Quantifier::None,
            _ => Quantifier::OneOrMoreLazy,
        }
    }
}

/// A quantifier on a translated atom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// No repeat operator
    None,
    /// Zero or more lazy (*?)
    ZeroOrMoreLazy,
    /// One or more lazy (+?)
    OneOrMoreLazy,
    /// Exactly n times ({n})
    Exactly(u32),
}

impl Quantifier {
    /// Convert quantifier to regex string
    pub fn to_regex_string(self) -> String {
        match self {
            Quantifier::None => String::new(),
            Quantifier::ZeroOrMoreLazy => "*?".to_string(),
            Quantifier::OneOrMoreLazy => "+?".to_string(),
            Quantifier::Exactly(n) => format!("{{{}}}", n),
        }
    }
}

/// An explicit repetition count as written in the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Count {
    /// The repetition count
    pub value: u32,
    /// Number of digits written, leading zeros included
    pub width: usize,
}

impl Count {
    /// Parse a run of ASCII digits; `None` when empty or out of range
    pub fn from_digits(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Count {
            value: digits.parse().ok()?,
            width: digits.len(),
        })
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.value, width = self.width)
    }
}

/// An expression in the AST
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Empty expression
    Empty,

    /// Verbatim text, including unrecognized `<...>` constructs
    Literal(String),

    /// Unparameterized action token: `<*>`, `<@>`, `<#>`, `<_>`, `</>`, `<S>`
    SimpleToken(ActionKind),

    /// Action token with a count and/or a capture name: `<4*.stuff>`
    ComplexToken {
        /// Exact repetition count
        count: Option<Count>,
        /// The repeat character
        kind: ActionKind,
        /// Capture variable name as written in the policy
        name: Option<String>,
    },

    /// `<![...]>` - the wrapped expression is the bracket group
    NegatedGroup(Box<Expr>),

    /// `<[...].name>` - the wrapped expression is the bracket group
    AssignGroup {
        /// Capture variable name as written in the policy
        name: String,
        /// The bracket group being captured
        body: Box<Expr>,
    },

    /// `[...]` grouping / alternation
    BracketGroup(Box<Expr>),

    /// A sequence of expressions (concatenation)
    Sequence(Vec<Expr>),

    /// A translated atom with its quantifier
    Atom {
        /// The repeat character the atom came from
        kind: ActionKind,
        /// The quantifier
        quantifier: Quantifier,
    },

    /// A named capturing group: (?<name>...)
    NamedGroup {
        /// The adapted group name
        name: String,
        /// The pattern inside the group
        pattern: Box<Expr>,
    },

    /// A capturing group: (...)
    Group(Box<Expr>),

    /// Negative lookahead assertion: (?!...)
    NegativeLookahead(Box<Expr>),
}

impl Expr {
    /// Create a literal expression
    pub fn literal(text: impl Into<String>) -> Self {
        Expr::Literal(text.into())
    }

    /// Create a sequence from a vector of expressions
    pub fn sequence(exprs: Vec<Expr>) -> Self {
        let mut exprs = exprs;
        match exprs.len() {
            0 => Expr::Empty,
            1 => exprs.remove(0),
            _ => Expr::Sequence(exprs),
        }
    }

    /// Create a translated atom
    pub fn atom(kind: ActionKind, quantifier: Quantifier) -> Self {
        Expr::Atom { kind, quantifier }
    }

    /// Create a named group expression
    pub fn named_group(name: impl Into<String>, pattern: Expr) -> Self {
        Expr::NamedGroup {
            name: name.into(),
            pattern: Box::new(pattern),
        }
    }

    /// Create a capturing group
    pub fn group(expr: Expr) -> Self {
        Expr::Group(Box::new(expr))
    }

    /// Whether any vendor construct is left in the tree
    pub fn has_vendor_syntax(&self) -> bool {
        match self {
            Expr::Empty | Expr::Literal(_) | Expr::Atom { .. } => false,
            Expr::SimpleToken(_)
            | Expr::ComplexToken { .. }
            | Expr::NegatedGroup(_)
            | Expr::AssignGroup { .. }
            | Expr::BracketGroup(_) => true,
            Expr::Sequence(exprs) => exprs.iter().any(Expr::has_vendor_syntax),
            Expr::NamedGroup { pattern, .. } => pattern.has_vendor_syntax(),
            Expr::Group(expr) | Expr::NegativeLookahead(expr) => expr.has_vendor_syntax(),
        }
    }

    /// Render the tree; lowered parts as regex, the rest as vendor source
    pub fn to_regex_string(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Expr::Empty => {}
            Expr::Literal(text) => out.push_str(text),
            Expr::SimpleToken(kind) => {
                out.push('<');
                out.push(kind.as_char());
                out.push('>');
            }
            Expr::ComplexToken { count, kind, name } => {
                out.push('<');
                if let Some(n) = count {
                    out.push_str(&n.to_string());
                }
                out.push(kind.as_char());
                if let Some(name) = name {
                    out.push('.');
                    out.push_str(name);
                }
                out.push('>');
            }
            Expr::NegatedGroup(body) => {
                out.push_str("<!");
                body.write_to(out);
                out.push('>');
            }
            Expr::AssignGroup { name, body } => {
                out.push('<');
                body.write_to(out);
                out.push('.');
                out.push_str(name);
                out.push('>');
            }
            Expr::BracketGroup(body) => {
                out.push('[');
                body.write_to(out);
                out.push(']');
            }
            Expr::Sequence(exprs) => {
                for expr in exprs {
                    expr.write_to(out);
                }
            }
            Expr::Atom { kind, quantifier } => {
                out.push_str(kind.atom());
                out.push_str(&quantifier.to_regex_string());
            }
            Expr::NamedGroup { name, pattern } => {
                out.push_str("(?<");
                out.push_str(name);
                out.push('>');
                pattern.write_to(out);
                out.push(')');
            }
            Expr::Group(expr) => {
                out.push('(');
                expr.write_to(out);
                out.push(')');
            }
            Expr::NegativeLookahead(expr) => {
                out.push_str("(?!");
                expr.write_to(out);
                out.push(')');
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_regex_string())
    }
}
