// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical primitives for Sinope source code.
//!
//! Each primitive is a pure recognizer over `(source, byte offset)`: it
//! skips leading trivia according to the cursor's [`TriviaPolicy`], matches
//! its fixed character class, and returns a [`Token`] or a
//! [`ParseError`] at the failing position.
//!
//! # Newlines
//!
//! Trivia is strictly horizontal — space, tab, and `;` line comments up to
//! (but not including) the newline. No primitive ever consumes a newline as
//! whitespace, which is what makes newlines significant exactly at statement
//! terminator positions and nowhere else.
//!
//! # Operators
//!
//! The operator vocabulary is data: one spelling set per precedence tier
//! plus the assignment set. Recognition is longest-spelling-first across the
//! union of all sets, so `+=` is never half-matched as `+`, `==` never as
//! `=`, and `(**)` never as a shorter decorated form. Decorated spellings
//! such as `(+)` and `[^]` are single multi-character operator tokens; `(`
//! and `[` occur nowhere else in the grammar.

use ecow::EcoString;

use super::error::{ParseError, TokenClass};
use super::{Span, Token, TokenKind};

/// What a primitive may skip before matching: horizontal whitespace and a
/// line comment running to end-of-line.
///
/// A plain value threaded into the cursor rather than a shared default, so
/// the skipping behaviour of every recognizer is visible at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriviaPolicy {
    comment_intro: char,
}

impl TriviaPolicy {
    /// A policy that skips space/tab and line comments introduced by `intro`.
    #[must_use]
    pub const fn line_comments(intro: char) -> Self {
        Self {
            comment_intro: intro,
        }
    }
}

impl Default for TriviaPolicy {
    fn default() -> Self {
        Self::line_comments(';')
    }
}

/// The operator category an operator spelling belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OperatorKind {
    /// Exponentiation tier.
    Power,
    /// Multiplicative tier.
    Multiplicative,
    /// Additive tier.
    Additive,
    /// Relational tier.
    Relational,
    /// Assignment operators; joins sub-expression elements, never part of
    /// the expression tiers.
    Assignment,
}

pub(crate) const POWER_OPERATORS: &[&str] = &["^", "(^)", "[^]"];

pub(crate) const MULTIPLICATIVE_OPERATORS: &[&str] = &[
    "*", "**", "/", "%", "(.)", "(*)", "(**)", "(/)", "(%)", "[.]", "[*]", "[**]", "[/]", "[%]",
];

pub(crate) const ADDITIVE_OPERATORS: &[&str] = &["+", "-", "(+)", "(-)", "[+]", "[-]"];

pub(crate) const RELATIONAL_OPERATORS: &[&str] = &[
    "<", ">", "<=", ">=", "<>", "==", "(<)", "(>)", "(<=)", "(>=)", "(<>)", "(==)", "(=)", "[<]",
    "[>]", "[<=]", "[>=]", "[<>]", "[==]", "[=]",
];

pub(crate) const ASSIGNMENT_OPERATORS: &[&str] = &["=", "+=", "-=", "*=", "/=", "%="];

/// All operator sets with their categories.
const OPERATOR_SETS: &[(&[&str], OperatorKind)] = &[
    (POWER_OPERATORS, OperatorKind::Power),
    (MULTIPLICATIVE_OPERATORS, OperatorKind::Multiplicative),
    (ADDITIVE_OPERATORS, OperatorKind::Additive),
    (RELATIONAL_OPERATORS, OperatorKind::Relational),
    (ASSIGNMENT_OPERATORS, OperatorKind::Assignment),
];

/// Finds the longest operator spelling that prefixes `rest`.
fn match_operator(rest: &str) -> Option<(&'static str, OperatorKind)> {
    let mut best: Option<(&'static str, OperatorKind)> = None;
    for (spellings, kind) in OPERATOR_SETS {
        for spelling in *spellings {
            if rest.starts_with(spelling)
                && best.is_none_or(|(found, _)| spelling.len() > found.len())
            {
                best = Some((spelling, *kind));
            }
        }
    }
    best
}

/// Returns true if `c` can start an identifier.
pub(crate) fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '_' | '?' | '!')
}

/// Returns true if `c` can continue an identifier.
pub(crate) fn is_identifier_char(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}

/// Returns true if `c` is legal inside a symbol literal.
fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '?'
                | '_'
                | '+'
                | '-'
                | '*'
                | '/'
                | '%'
                | '.'
                | ':'
                | '<'
                | '>'
                | '='
                | '('
                | ')'
                | '['
                | ']'
        )
}

/// A cursor over source text: the explicit position value threaded through
/// every recognizer.
///
/// `Copy` on purpose — callers checkpoint with a plain assignment where a
/// bounded look-ahead is needed (argument-label detection, the optional
/// expression inside an interpolation slot).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'src> {
    source: &'src str,
    position: usize,
    policy: TriviaPolicy,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(source: &'src str, policy: TriviaPolicy) -> Self {
        Self {
            source,
            position: 0,
            policy,
        }
    }

    /// Peeks at the next character without consuming it.
    pub(crate) fn peek_char(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    /// Consumes the next character and returns it.
    pub(crate) fn advance(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    pub(crate) fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Consumes `n` bytes; `n` must land on a character boundary.
    fn advance_bytes(&mut self, n: usize) {
        self.position += n;
        debug_assert!(self.source.is_char_boundary(self.position));
    }

    /// Returns the current byte position.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    pub(crate) fn current_position(&self) -> u32 {
        self.position as u32
    }

    /// Creates a span from `start` to the current position.
    pub(crate) fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.current_position())
    }

    /// Extracts source text for a span.
    pub(crate) fn text_for(&self, span: Span) -> &'src str {
        &self.source[span.as_range()]
    }

    /// Returns true if the cursor has consumed all input.
    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Skips horizontal whitespace and line comments per the policy.
    ///
    /// Never consumes a newline: a comment is skipped up to the `\n` that
    /// ends it, leaving the newline for a terminator position.
    pub(crate) fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(' ' | '\t') => {
                    self.advance_while(|c| matches!(c, ' ' | '\t'));
                }
                Some(c) if c == self.policy.comment_intro => {
                    self.advance_while(|c| c != '\n');
                }
                _ => break,
            }
        }
    }

    /// A span covering the character at the current position (or empty at
    /// end of input), for error reporting.
    pub(crate) fn here(&self) -> Span {
        let start = self.current_position();
        match self.peek_char() {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "a char is at most 4 bytes"
            )]
            Some(c) => Span::new(start, start + c.len_utf8() as u32),
            None => Span::new(start, start),
        }
    }

    /// Recognizes an identifier: start `[A-Za-z_?!]`, then `[A-Za-z0-9_?!]*`.
    pub(crate) fn identifier(&mut self) -> Result<Token, ParseError> {
        self.skip_trivia();
        let start = self.current_position();
        if !self.peek_char().is_some_and(is_identifier_start) {
            return Err(ParseError::lexical_mismatch(
                TokenClass::Identifier,
                self.here(),
            ));
        }
        self.advance();
        self.advance_while(is_identifier_char);
        let span = self.span_from(start);
        let text = EcoString::from(self.text_for(span));
        Ok(Token::new(TokenKind::Identifier(text), span))
    }

    /// Recognizes an integer literal: a digit, then digits and `_`.
    ///
    /// Underscore placement is not validated: `1_`, `1__2` are accepted as
    /// written. A leading underscore is an identifier, not an integer.
    pub(crate) fn integer_literal(&mut self) -> Result<Token, ParseError> {
        self.skip_trivia();
        let start = self.current_position();
        if !self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            return Err(ParseError::lexical_mismatch(
                TokenClass::IntegerLiteral,
                self.here(),
            ));
        }
        self.advance();
        self.advance_while(|c| c.is_ascii_digit() || c == '_');
        let span = self.span_from(start);
        let text = EcoString::from(self.text_for(span));
        Ok(Token::new(TokenKind::Integer(text), span))
    }

    /// Recognizes a symbol literal: `#` followed by one or more symbol
    /// characters. The `#` is consumed but excluded from the value.
    ///
    /// The character class is greedy and includes `.`, so `#foo.bar` is a
    /// single symbol and a `.` directly after a symbol is absorbed into it.
    pub(crate) fn symbol_literal(&mut self) -> Result<Token, ParseError> {
        self.skip_trivia();
        let start = self.current_position();
        if self.peek_char() != Some('#') {
            return Err(ParseError::lexical_mismatch(
                TokenClass::SymbolLiteral,
                self.here(),
            ));
        }
        self.advance();
        let content_start = self.current_position();
        self.advance_while(is_symbol_char);
        let content = self.span_from(content_start);
        if content.is_empty() {
            return Err(ParseError::lexical_mismatch(
                TokenClass::SymbolLiteral,
                self.here(),
            ));
        }
        let text = EcoString::from(self.text_for(content));
        Ok(Token::new(TokenKind::Symbol(text), self.span_from(start)))
    }

    /// Peeks the operator at the current position, if any, without
    /// consuming. Longest spelling wins across all operator sets.
    pub(crate) fn peek_operator(&self) -> Option<(&'static str, OperatorKind)> {
        let mut probe = *self;
        probe.skip_trivia();
        match_operator(&probe.source[probe.position..])
    }

    /// Consumes a previously peeked operator spelling.
    pub(crate) fn take_operator(&mut self, spelling: &'static str, kind: OperatorKind) -> Token {
        self.skip_trivia();
        let start = self.current_position();
        debug_assert!(self.source[self.position..].starts_with(spelling));
        self.advance_bytes(spelling.len());
        let span = self.span_from(start);
        let text = EcoString::from(spelling);
        let token_kind = match kind {
            OperatorKind::Assignment => TokenKind::Assign(text),
            _ => TokenKind::Operator(text),
        };
        Token::new(token_kind, span)
    }

    /// Recognizes the `:` closing an argument label.
    ///
    /// No trivia is skipped: a label's colon must be adjacent to its
    /// identifier, otherwise the identifier reads as a chain element.
    pub(crate) fn colon(&mut self) -> Result<Token, ParseError> {
        let start = self.current_position();
        if self.peek_char() != Some(':') {
            return Err(ParseError::lexical_mismatch(
                TokenClass::ArgumentLabel,
                self.here(),
            ));
        }
        self.advance();
        Ok(Token::new(TokenKind::Colon, self.span_from(start)))
    }

    /// Recognizes a statement terminator if one is present: `.` or a run of
    /// newline/carriage-return characters (the run is a single terminator).
    pub(crate) fn try_terminator(&mut self) -> Option<Token> {
        self.skip_trivia();
        let start = self.current_position();
        match self.peek_char() {
            Some('.') => {
                self.advance();
            }
            Some('\r' | '\n') => {
                self.advance_while(|c| matches!(c, '\r' | '\n'));
            }
            _ => return None,
        }
        Some(Token::new(TokenKind::Terminator, self.span_from(start)))
    }
}
