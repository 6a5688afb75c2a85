//! Translation of action-group patterns into regular expressions
//!
//! Parses the vendor pattern once, runs the five stages in order, and renders
//! the result. Patterns are matched against whole values downstream, so an
//! unanchored pattern is padded with `.*` on the open side(s).

use std::fmt;

use fancy_regex::Regex;
use log::debug;

use crate::ast::Expr;
use crate::error::{Result, TranslateError};
use crate::groups::{GroupCollector, GroupRegistryError};
use crate::parser::{DEFAULT_MAX_DEPTH, Parser};
use crate::passes::{Pass, lower_all};

/// Padding applied to the open side of an unanchored pattern
pub const CONTEXT_WILDCARD: &str = ".*";

/// Options controlling translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Pad unanchored patterns with `.*`
    pub wrap_unanchored: bool,
    /// Maximum bracket nesting depth accepted by the parser
    pub max_depth: usize,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        TranslateOptions {
            wrap_unanchored: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TranslateOptions {
    /// Set whether unanchored patterns are padded with `.*`
    pub fn with_wrap_unanchored(mut self, wrap: bool) -> Self {
        self.wrap_unanchored = wrap;
        self
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// A translated pattern together with its compiled form
///
/// Compiling is the expensive step; callers matching many values against one
/// pattern should keep this around rather than translating again.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    whole_value: Regex,
    names: Vec<String>,
}

impl CompiledPattern {
    /// The translated regex source
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Consume into the translated regex source
    pub fn into_source(self) -> String {
        self.source
    }

    /// Capture group names, in pattern order
    pub fn capture_names(&self) -> &[String] {
        &self.names
    }

    /// Whether the pattern matches the whole input value
    pub fn is_match(&self, input: &str) -> Result<bool> {
        self.whole_value.is_match(input).map_err(match_error)
    }

    /// Captured variables when the pattern matches the whole input value
    ///
    /// Groups that did not participate in the match are left out.
    pub fn named_captures(&self, input: &str) -> Result<Option<Vec<(String, String)>>> {
        let Some(caps) = self.whole_value.captures(input).map_err(match_error)? else {
            return Ok(None);
        };
        let captured = self
            .names
            .iter()
            .filter_map(|name| {
                caps.name(name)
                    .map(|m| (name.clone(), m.as_str().to_string()))
            })
            .collect();
        Ok(Some(captured))
    }
}

fn match_error(err: fancy_regex::Error) -> TranslateError {
    TranslateError::Match(err.to_string())
}

/// Translates patterns with a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct Translator {
    options: TranslateOptions,
}

impl Translator {
    /// Create a translator with the given options
    pub fn new(options: TranslateOptions) -> Self {
        Translator { options }
    }

    /// The options in effect
    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    fn parse(&self, pattern: &str) -> Result<Expr> {
        Ok(Parser::with_max_depth(pattern, self.options.max_depth).parse()?)
    }

    fn wrap(&self, regex: String) -> String {
        if regex.is_empty() || !self.options.wrap_unanchored {
            return regex;
        }
        let mut wrapped = String::with_capacity(regex.len() + 2 * CONTEXT_WILDCARD.len());
        if !regex.starts_with('^') {
            wrapped.push_str(CONTEXT_WILDCARD);
        }
        wrapped.push_str(&regex);
        if !regex.ends_with('$') {
            wrapped.push_str(CONTEXT_WILDCARD);
        }
        wrapped
    }

    /// Run all five stages and render the result, without compiling it
    pub fn render(&self, pattern: &str) -> Result<String> {
        let ast = lower_all(self.parse(pattern)?);
        Ok(self.wrap(ast.to_regex_string()))
    }

    /// Translate and compile a pattern
    ///
    /// # Errors
    /// Fails when the pattern nests too deeply, when two capture variables
    /// end up with the same group name, or when the regex does not compile.
    pub fn compile(&self, pattern: &str) -> Result<CompiledPattern> {
        let ast = lower_all(self.parse(pattern)?);
        debug_assert!(!ast.has_vendor_syntax());
        let registry = GroupCollector::collect(&ast).map_err(|err| match err {
            GroupRegistryError::DuplicateGroupName(name) => TranslateError::DuplicateCaptureName {
                name,
                pattern: pattern.to_string(),
            },
        })?;

        let source = self.wrap(ast.to_regex_string());
        let whole_value = Regex::new(&format!("\\A(?:{})\\z", source)).map_err(|err| {
            TranslateError::Compile {
                regex: source.clone(),
                message: err.to_string(),
            }
        })?;
        debug!("Translated pattern `{}` to `{}`", pattern, source);

        Ok(CompiledPattern {
            source,
            whole_value,
            names: registry.into_names(),
        })
    }

    /// Translate a pattern and check that the result compiles
    pub fn translate(&self, pattern: &str) -> Result<String> {
        self.compile(pattern).map(CompiledPattern::into_source)
    }

    /// Translate with a stage-by-stage trace for debugging
    pub fn translate_debug(&self, pattern: &str) -> Result<TranslationReport> {
        let mut ast = self.parse(pattern)?;
        let parsed = format!("{:?}", ast);

        let mut stages = Vec::with_capacity(Pass::ALL.len());
        for pass in Pass::ALL {
            ast = pass.lower(ast);
            stages.push((pass, ast.to_regex_string()));
        }

        Ok(TranslationReport {
            input: pattern.to_string(),
            ast: parsed,
            stages,
            output: self.wrap(ast.to_regex_string()),
        })
    }
}

/// Run all five stages with default options, without compiling the result
pub fn render(pattern: &str) -> Result<String> {
    Translator::default().render(pattern)
}

/// Translate a pattern with default options and check that it compiles
///
/// # Example
/// ```
/// use omi_regex::translate;
///
/// let regex = translate("opener <4*.stuff> closer").unwrap();
/// assert_eq!(regex, ".*opener (?<stuff>.{4}) closer.*");
/// ```
pub fn translate(pattern: &str) -> Result<String> {
    Translator::default().translate(pattern)
}

/// Translate and compile a pattern with default options
pub fn compile(pattern: &str) -> Result<CompiledPattern> {
    Translator::default().compile(pattern)
}

/// Translate with a stage-by-stage trace, using default options
pub fn translate_debug(pattern: &str) -> Result<TranslationReport> {
    Translator::default().translate_debug(pattern)
}

/// Result of a translation with debug information
#[derive(Debug, Clone)]
pub struct TranslationReport {
    /// The original input pattern
    pub input: String,
    /// The parsed AST (debug format)
    pub ast: String,
    /// Rendered pattern after each stage
    pub stages: Vec<(Pass, String)>,
    /// The final output
    pub output: String,
}

impl fmt::Display for TranslationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Translation Report")?;
        writeln!(f, "==================")?;
        writeln!(f, "Input:  {}", self.input)?;
        writeln!(f, "AST:    {}", self.ast)?;
        for (pass, rendered) in &self.stages {
            writeln!(f, "{:<12} {}", format!("{}:", pass.name()), rendered)?;
        }
        write!(f, "Output: {}", self.output)
    }
}
