//! omi-regex
//!
//! Translates OMi policy action-group patterns (`<*>`, `<4@.name>`,
//! `<![...]>`, `<[a|b].name>`, `[a|b]`) into standard regular expressions
//! with named capture groups.
//!
//! The pattern is tokenized and parsed once into a small tree, then five
//! stages lower it to regex constructs in a fixed order: simple tokens,
//! complex tokens, negations, assign-only groups, brackets.

pub mod ast;
pub mod classify;
pub mod error;
pub mod groups;
pub mod lexer;
pub mod parser;
pub mod passes;
pub mod translate;
pub mod varname;

pub use ast::{ActionKind, Count, Expr, Quantifier};
pub use classify::{
    BROKEN_MARKER, ConstraintValue, REGEX_MARKER, classify, is_gratuitously_regexed_integer,
    varbind_value, varbind_values, varbind_values_with,
};
pub use error::{ParseError, Result, Span, TranslateError};
pub use groups::{GroupCollector, GroupRegistry, GroupRegistryError};
pub use lexer::{Lexeme, Lexer, Token};
pub use parser::{DEFAULT_MAX_DEPTH, Parser, parse};
pub use passes::{
    Pass, lower_all, translate_assign_only_groups, translate_brackets, translate_complex_tokens,
    translate_negations, translate_simple_tokens,
};
pub use translate::{
    CompiledPattern, TranslateOptions, TranslationReport, Translator, compile, render, translate,
    translate_debug,
};
pub use varname::adapt_var_name;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end() {
        // pattern -> tokens -> AST -> stages -> regex
        let pattern = "opener <4*.stuff> closer";
        assert!(Lexer::new(pattern).tokenize().len() > 1);
        assert!(parse(pattern).unwrap().has_vendor_syntax());
        assert_eq!(translate(pattern).unwrap(), ".*opener (?<stuff>.{4}) closer.*");
    }

    #[test]
    fn test_classify_then_translate() {
        let value = classify("^<[<*>Common/rbac<*>].message>$");
        assert!(value.is_pattern());
        assert_eq!(
            value.to_varbind_value(),
            "~^(?<message>(.*?Common/rbac.*?))$"
        );
    }
}
