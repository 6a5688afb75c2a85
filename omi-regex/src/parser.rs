//! Parser for action-group patterns
//!
//! A recursive descent parser over the lexer's tokens. Square brackets are
//! paired up front with a stack, innermost first, so an unbalanced bracket is
//! known to be literal text before parsing starts.
//!
//! Grammar:
//!   pattern   := item*
//!   item      := action | negated | assign | bracket | literal
//!   action    := '<' digits? kind ('.' name)? '>'
//!   negated   := '<' '!' bracket '>'
//!   assign    := '<' bracket '.' name '>'
//!   bracket   := '[' item* ']'
//!   literal   := anything else, copied verbatim

use crate::ast::Expr;
use crate::error::ParseError;
use crate::lexer::{Lexeme, Lexer, Token, is_name_byte};

/// Default bound on bracket nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Parser for action-group patterns
pub struct Parser<'a> {
    input: &'a str,
    lexemes: Vec<Lexeme>,
    /// For each `[` lexeme, the index of its matching `]`
    matching: Vec<Option<usize>>,
    position: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the default depth bound
    pub fn new(input: &'a str) -> Self {
        Self::with_max_depth(input, DEFAULT_MAX_DEPTH)
    }

    /// Create a new parser with an explicit depth bound
    pub fn with_max_depth(input: &'a str, max_depth: usize) -> Self {
        let lexemes = Lexer::new(input).tokenize();
        let matching = match_brackets(&lexemes);
        Parser {
            input,
            lexemes,
            matching,
            position: 0,
            max_depth,
        }
    }

    /// Parse the entire input and return the AST
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        // The last lexeme is always Eof
        let end = self.lexemes.len() - 1;
        self.parse_sequence(end, 0)
    }

    fn token_at(&self, index: usize) -> Option<&Token> {
        self.lexemes.get(index).map(|l| &l.token)
    }

    fn text_at(&self, index: usize) -> &'a str {
        self.lexemes[index].span.slice(self.input)
    }

    /// Parse items up to (not including) lexeme `end`
    fn parse_sequence(&mut self, end: usize, depth: usize) -> Result<Expr, ParseError> {
        let mut items: Vec<Expr> = Vec::new();
        while self.position < end {
            let item = self.parse_item(depth)?;
            match (items.last_mut(), item) {
                (Some(Expr::Literal(prev)), Expr::Literal(text)) => prev.push_str(&text),
                (_, item) => items.push(item),
            }
        }
        Ok(Expr::sequence(items))
    }

    fn parse_item(&mut self, depth: usize) -> Result<Expr, ParseError> {
        let start = self.position;
        match self.token_at(start) {
            Some(Token::Action { count, kind, name }) => {
                let expr = if count.is_none() && name.is_none() {
                    Expr::SimpleToken(*kind)
                } else {
                    Expr::ComplexToken {
                        count: *count,
                        kind: *kind,
                        name: name.clone(),
                    }
                };
                self.position += 1;
                Ok(expr)
            }
            Some(Token::LeftBracket) => match self.matching[start] {
                Some(close) => self.parse_bracket_group(close, depth),
                None => Ok(self.take_literal()),
            },
            Some(Token::Open) => {
                if let Some(expr) = self.try_negated_group(depth)? {
                    return Ok(expr);
                }
                if let Some(expr) = self.try_assign_group(depth)? {
                    return Ok(expr);
                }
                Ok(self.take_literal())
            }
            _ => Ok(self.take_literal()),
        }
    }

    /// Consume the current lexeme as verbatim text
    fn take_literal(&mut self) -> Expr {
        let text = self.text_at(self.position);
        self.position += 1;
        Expr::literal(text)
    }

    /// bracket := '[' item* ']' with the current lexeme being `[`
    fn parse_bracket_group(&mut self, close: usize, depth: usize) -> Result<Expr, ParseError> {
        if depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                max_depth: self.max_depth,
                position: self.lexemes[self.position].span.start,
            });
        }
        self.position += 1; // consume '['
        let body = self.parse_sequence(close, depth + 1)?;
        self.position = close + 1; // consume ']'
        Ok(Expr::BracketGroup(Box::new(body)))
    }

    /// negated := '<' '!' bracket '>'
    fn try_negated_group(&mut self, depth: usize) -> Result<Option<Expr>, ParseError> {
        let open = self.position;
        if self.token_at(open + 1) != Some(&Token::Bang)
            || self.token_at(open + 2) != Some(&Token::LeftBracket)
        {
            return Ok(None);
        }
        let Some(close) = self.matching[open + 2] else {
            return Ok(None);
        };
        if self.token_at(close + 1) != Some(&Token::Close) {
            return Ok(None);
        }

        self.position = open + 2;
        let group = self.parse_bracket_group(close, depth)?;
        self.position = close + 2; // consume '>'
        Ok(Some(Expr::NegatedGroup(Box::new(group))))
    }

    /// assign := '<' bracket '.' name '>'
    fn try_assign_group(&mut self, depth: usize) -> Result<Option<Expr>, ParseError> {
        let open = self.position;
        if self.token_at(open + 1) != Some(&Token::LeftBracket) {
            return Ok(None);
        }
        let Some(close) = self.matching[open + 1] else {
            return Ok(None);
        };
        if self.token_at(close + 1) != Some(&Token::Dot)
            || self.token_at(close + 2) != Some(&Token::Text)
            || self.token_at(close + 3) != Some(&Token::Close)
        {
            return Ok(None);
        }
        let name = self.text_at(close + 2);
        if !name.bytes().all(is_name_byte) {
            return Ok(None);
        }

        self.position = open + 1;
        let group = self.parse_bracket_group(close, depth)?;
        self.position = close + 4; // consume '.', name and '>'
        Ok(Some(Expr::AssignGroup {
            name: name.to_string(),
            body: Box::new(group),
        }))
    }
}

/// Pair every `[` with its `]`, innermost first; unpaired brackets map to None
fn match_brackets(lexemes: &[Lexeme]) -> Vec<Option<usize>> {
    let mut matching = vec![None; lexemes.len()];
    let mut open = Vec::new();
    for (i, lexeme) in lexemes.iter().enumerate() {
        match lexeme.token {
            Token::LeftBracket => open.push(i),
            Token::RightBracket => {
                if let Some(start) = open.pop() {
                    matching[start] = Some(i);
                }
            }
            _ => {}
        }
    }
    matching
}

/// Parse a pattern with the default depth bound
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    Parser::new(input).parse()
}
