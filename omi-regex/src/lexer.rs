//! Lexer for tokenizing action-group patterns
//!
//! Action tokens (`<4*.name>`) are recognized whole here. Everything else is
//! split only at the characters the parser cares about: `<`, `>`, `!`, `.`,
//! `[` and `]`. A backslash always takes the following character with it as
//! plain text.

use std::fmt;

use crate::ast::{ActionKind, Count};
use crate::error::Span;

/// Vendor escape marker: an action token directly after it is kept literally
pub const ESCAPE_MARKER: &str = "{1}";

/// A token in an action-group pattern
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A complete action token `<[N]T[.name]>`
    Action {
        /// Exact repetition count
        count: Option<Count>,
        /// The repeat character
        kind: ActionKind,
        /// Capture variable name
        name: Option<String>,
    },
    /// An escape marker together with the action token it guards
    Escaped,
    /// `<` that does not start an action token
    Open,
    /// `>`
    Close,
    /// `!`
    Bang,
    /// `.`
    Dot,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// A run of any other text
    Text,
    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Action { count, kind, name } => {
                write!(f, "action `<")?;
                if let Some(n) = count {
                    write!(f, "{}", n)?;
                }
                write!(f, "{}", kind.as_char())?;
                if let Some(name) = name {
                    write!(f, ".{}", name)?;
                }
                write!(f, ">`")
            }
            Token::Escaped => write!(f, "escaped action"),
            Token::Open => write!(f, "`<`"),
            Token::Close => write!(f, "`>`"),
            Token::Bang => write!(f, "`!`"),
            Token::Dot => write!(f, "`.`"),
            Token::LeftBracket => write!(f, "`[`"),
            Token::RightBracket => write!(f, "`]`"),
            Token::Text => write!(f, "text"),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// A token with its location in the input
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    /// The token
    pub token: Token,
    /// Where it was found
    pub span: Span,
}

/// Check if a byte may appear in a capture variable name
pub fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn is_delimiter(b: u8) -> bool {
    matches!(b, b'<' | b'>' | b'!' | b'.' | b'[' | b']')
}

/// Lexer for tokenizing action-group patterns
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input string
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0 }
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    /// Try to read an action token starting at `start`; returns it and its end
    fn scan_action(&self, start: usize) -> Option<(Token, usize)> {
        let bytes = self.bytes();
        if bytes.get(start) != Some(&b'<') {
            return None;
        }

        let mut i = start + 1;
        let digits_start = i;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        let count = if i > digits_start {
            Some(Count::from_digits(&self.input[digits_start..i])?)
        } else {
            None
        };

        let kind = ActionKind::from_char(char::from(*bytes.get(i)?))?;
        i += 1;

        let name = if bytes.get(i) == Some(&b'.') {
            i += 1;
            let name_start = i;
            while bytes.get(i).copied().is_some_and(is_name_byte) {
                i += 1;
            }
            if i == name_start {
                return None;
            }
            Some(self.input[name_start..i].to_string())
        } else {
            None
        };

        if bytes.get(i) != Some(&b'>') {
            return None;
        }
        Some((Token::Action { count, kind, name }, i + 1))
    }

    /// `(?<` opens a named regex group; the `<` never starts an action token
    fn follows_group_opener(&self, start: usize) -> bool {
        self.input[..start].ends_with("(?")
    }

    /// If an escape marker followed by an action token starts at `start`,
    /// return the end of the action token
    fn scan_escaped(&self, start: usize) -> Option<usize> {
        if !self.input[start..].starts_with(ESCAPE_MARKER) {
            return None;
        }
        self.scan_action(start + ESCAPE_MARKER.len())
            .map(|(_, end)| end)
    }

    /// Read a text run starting at the current position
    fn read_text(&mut self) -> usize {
        let bytes = self.bytes();
        let start = self.position;
        let mut i = start;
        while let Some(&b) = bytes.get(i) {
            if is_delimiter(b) {
                break;
            }
            if b == b'{' && i > start && self.scan_escaped(i).is_some() {
                break;
            }
            if b == b'\\' {
                i += 1;
                // Take the whole escaped character, which may be multi-byte
                if let Some(c) = self.input[i..].chars().next() {
                    i += c.len_utf8();
                }
                continue;
            }
            i += 1;
        }
        i
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Lexeme {
        let start = self.position;
        let Some(&b) = self.bytes().get(start) else {
            return Lexeme {
                token: Token::Eof,
                span: Span::new(start, start),
            };
        };

        let (token, end) = match b {
            b'<' if self.follows_group_opener(start) => (Token::Open, start + 1),
            b'<' => match self.scan_action(start) {
                Some((token, end)) => (token, end),
                None => (Token::Open, start + 1),
            },
            b'>' => (Token::Close, start + 1),
            b'!' => (Token::Bang, start + 1),
            b'.' => (Token::Dot, start + 1),
            b'[' => (Token::LeftBracket, start + 1),
            b']' => (Token::RightBracket, start + 1),
            b'{' => match self.scan_escaped(start) {
                Some(end) => (Token::Escaped, end),
                None => (Token::Text, self.read_text()),
            },
            _ => (Token::Text, self.read_text()),
        };

        self.position = end;
        Lexeme {
            token,
            span: Span::new(start, end),
        }
    }

    /// Tokenize the entire input; the last lexeme is always `Eof`
    pub fn tokenize(&mut self) -> Vec<Lexeme> {
        let mut lexemes = Vec::new();
        loop {
            let lexeme = self.next_token();
            let done = lexeme.token == Token::Eof;
            lexemes.push(lexeme);
            if done {
                break;
            }
        }
        lexemes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        Lexer::new(input)
            .tokenize()
            .into_iter()
            .map(|l| l.token)
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokens(""), vec![Token::Eof]);
    }

    #[test]
    fn test_simple_action() {
        assert_eq!(
            tokens("<*>"),
            vec![
                Token::Action {
                    count: None,
                    kind: ActionKind::Any,
                    name: None
                },
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_complex_action() {
        assert_eq!(
            tokens("<16#.host_name-too>"),
            vec![
                Token::Action {
                    count: Some(Count::from_digits("16").unwrap()),
                    kind: ActionKind::Digit,
                    name: Some("host_name-too".to_string())
                },
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_text_spans_cover_input() {
        let input = "opener <4*.stuff> closer";
        let lexemes = Lexer::new(input).tokenize();
        assert_eq!(lexemes[0].token, Token::Text);
        assert_eq!(lexemes[0].span.slice(input), "opener ");
        assert_eq!(lexemes[2].span.slice(input), " closer");
    }

    #[test]
    fn test_unrecognized_angle_construct() {
        assert_eq!(
            tokens("<$1>"),
            vec![Token::Open, Token::Text, Token::Close, Token::Eof]
        );
        // Lowercase s is not the whitespace token
        assert_eq!(
            tokens("<s>"),
            vec![Token::Open, Token::Text, Token::Close, Token::Eof]
        );
        // Empty name
        assert_eq!(tokens("<*.>")[0], Token::Open);
    }

    #[test]
    fn test_bracket_and_group_tokens() {
        assert_eq!(
            tokens("<![a]>"),
            vec![
                Token::Open,
                Token::Bang,
                Token::LeftBracket,
                Token::Text,
                Token::RightBracket,
                Token::Close,
                Token::Eof
            ]
        );
        assert_eq!(
            tokens("<[a].x>"),
            vec![
                Token::Open,
                Token::LeftBracket,
                Token::Text,
                Token::RightBracket,
                Token::Dot,
                Token::Text,
                Token::Close,
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_escape_marker() {
        let input = "a{1}<*>b";
        let lexemes = Lexer::new(input).tokenize();
        assert_eq!(lexemes[0].token, Token::Text);
        assert_eq!(lexemes[0].span.slice(input), "a");
        assert_eq!(lexemes[1].token, Token::Escaped);
        assert_eq!(lexemes[1].span.slice(input), "{1}<*>");
        assert_eq!(lexemes[2].span.slice(input), "b");
    }

    #[test]
    fn test_brace_without_action_is_text() {
        let input = "x{1}y";
        let lexemes = Lexer::new(input).tokenize();
        assert_eq!(lexemes[0].token, Token::Text);
        assert_eq!(lexemes[0].span.slice(input), "x{1}y");
    }

    #[test]
    fn test_backslash_keeps_next_char() {
        let input = "a\\[b\\]";
        let lexemes = Lexer::new(input).tokenize();
        assert_eq!(lexemes.len(), 2);
        assert_eq!(lexemes[0].span.slice(input), input);
    }

    #[test]
    fn test_non_ascii_text() {
        let input = "héllo <@>";
        let lexemes = Lexer::new(input).tokenize();
        assert_eq!(lexemes[0].span.slice(input), "héllo ");
        assert!(matches!(lexemes[1].token, Token::Action { .. }));
    }

    #[test]
    fn test_leading_zeros_are_kept() {
        let input = "<004*>";
        match &tokens(input)[0] {
            Token::Action { count: Some(count), .. } => {
                assert_eq!(count.value, 4);
                assert_eq!(count.to_string(), "004");
            }
            other => panic!("expected an action, got {other:?}"),
        }
    }

    #[test]
    fn test_regex_group_opener_is_not_an_action() {
        let input = "(?<S>x)";
        let lexemes = Lexer::new(input).tokenize();
        assert_eq!(lexemes[0].span.slice(input), "(?");
        assert_eq!(lexemes[1].token, Token::Open);
        assert_eq!(lexemes[2].span.slice(input), "S");
        assert_eq!(lexemes[3].token, Token::Close);
        // Only the exact `(?` prefix is special
        assert!(matches!(tokens("(<S>")[1], Token::Action { .. }));
        assert!(matches!(tokens("?<S>")[1], Token::Action { .. }));
    }

    #[test]
    fn test_count_overflow_is_not_an_action() {
        assert_eq!(tokens("<99999999999*>")[0], Token::Open);
    }
}
