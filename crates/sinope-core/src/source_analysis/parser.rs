// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for Sinope source code.
//!
//! The parser builds a [`StatementSequence`] by threading an explicit
//! [`Cursor`] through the grammar layers: lexical primitives at the bottom,
//! then the string-literal grammar, the expression grammar, and the
//! statement grammar on top. The string-literal and expression grammars are
//! mutually recursive — an interpolated string embeds expressions, and an
//! expression's primaries include string literals.
//!
//! # Binary Operator Precedence (Pratt Parsing)
//!
//! Binary operator precedence uses Pratt parsing over a binding-power
//! table, so adding or reordering a tier is a table edit rather than a new
//! grammar rule.
//!
//! | Level | Operators | Associativity |
//! |-------|-----------------------------------|------|
//! | 10 | `<` `>` `<=` `>=` `<>` `==` + decorated | Left |
//! | 20 | `+` `-` + decorated               | Left |
//! | 30 | `*` `**` `/` `%` + decorated      | Left |
//! | 40 | `^` `(^)` `[^]`                   | Left |
//!
//! A prefix operator (any spelling from the four tiers) binds tighter than
//! every binary tier and is right-associative, so `- - x` nests inward.
//!
//! # Failure
//!
//! The first unmatched position aborts the whole parse: errors propagate
//! immediately to the caller with no recovery, no multi-error accumulation,
//! and no backtracking past a committed operator choice. The one bounded
//! look-ahead is the optional expression inside an interpolation slot.
//!
//! # Usage
//!
//! ```
//! use sinope_core::source_analysis::parse;
//!
//! let program = parse("1 + 2 * 3").expect("valid input");
//! assert_eq!(program.statements.len(), 1);
//! ```

use crate::ast::{
    ArgumentGroup, CallExpression, Expression, Identifier, IntegerLiteral, InterpolationPart,
    KeywordArgument, MessageChain, Primary, StatementSequence, StringLiteral, SubExpression,
    SymbolLiteral, TextSegment,
};

use super::error::{ParseError, ParseErrorKind, TokenClass};
use super::lexer::{is_identifier_start, Cursor, OperatorKind, TriviaPolicy};
use super::{Span, Token, TokenKind};

/// Maximum nesting depth for expressions before the parser bails out.
///
/// Bounds recursion on adversarial input (stacked prefix operators,
/// expressions nested through string interpolation). Each level uses
/// several stack frames through the parser call chain; 64 is generous for
/// any realistic program. `stacker::maybe_grow` at the expression entry
/// point is the second line of defence.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Binding power for binary operators (Pratt parsing).
///
/// Higher values bind tighter; `left < right` makes a tier
/// left-associative.
#[derive(Debug, Clone, Copy)]
struct BindingPower {
    left: u8,
    right: u8,
}

impl BindingPower {
    /// Creates a left-associative binding power.
    const fn left_assoc(precedence: u8) -> Self {
        Self {
            left: precedence,
            right: precedence + 1,
        }
    }
}

/// Gets the binding power for an operator category.
///
/// Returns `None` for assignment operators, which end the expression and
/// belong to the statement grammar. Tiers are listed loosest to tightest;
/// the spelling sets themselves live next to the lexical primitives.
fn binary_binding_power(kind: OperatorKind) -> Option<BindingPower> {
    match kind {
        OperatorKind::Relational => Some(BindingPower::left_assoc(10)),
        OperatorKind::Additive => Some(BindingPower::left_assoc(20)),
        OperatorKind::Multiplicative => Some(BindingPower::left_assoc(30)),
        OperatorKind::Power => Some(BindingPower::left_assoc(40)),
        OperatorKind::Assignment => None,
    }
}

/// Parses source text into a [`StatementSequence`].
///
/// This is the entire boundary of the engine: UTF-8 text in, a tree or the
/// first error out. Parsing is pure and synchronous; independent calls may
/// run in parallel freely.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered; the input is not repaired
/// or partially recovered.
///
/// # Examples
///
/// ```
/// use sinope_core::source_analysis::parse;
///
/// let program = parse("x y z").expect("valid input");
/// assert_eq!(program.statements.len(), 1);
///
/// assert!(parse("(1").is_err());
/// ```
pub fn parse(source: &str) -> Result<StatementSequence, ParseError> {
    parse_with_max_depth(source, MAX_NESTING_DEPTH)
}

/// Parses with a caller-chosen nesting depth limit.
///
/// # Errors
///
/// As [`parse`]; exceeding `max_depth` fails with
/// [`ParseErrorKind::NestingTooDeep`].
pub fn parse_with_max_depth(
    source: &str,
    max_depth: usize,
) -> Result<StatementSequence, ParseError> {
    Parser::new(source, max_depth).parse_statement_sequence()
}

/// Checks whether source text appears syntactically complete for REPL
/// evaluation.
///
/// A heuristic for deciding between evaluating the buffer and showing a
/// continuation prompt. Input is incomplete when a string literal is
/// unterminated or when the first error sits at the very end of the input
/// (a trailing operator, an argument label missing its value, an
/// interpolation slot still open). Errors before the end mean the input is
/// complete but invalid — the evaluator should report them.
///
/// # Examples
///
/// ```
/// use sinope_core::source_analysis::is_input_complete;
///
/// assert!(is_input_complete("3 + 4"));
/// assert!(!is_input_complete("3 +"));
/// assert!(!is_input_complete("\"an open string"));
/// ```
#[must_use]
pub fn is_input_complete(source: &str) -> bool {
    if source.trim().is_empty() {
        return true;
    }
    match parse(source) {
        Ok(_) => true,
        Err(error) => match error.kind {
            ParseErrorKind::UnterminatedString => false,
            _ => (error.span.end() as usize) < source.trim_end().len(),
        },
    }
}

/// The parser state: a cursor plus the nesting guard.
struct Parser<'src> {
    source: &'src str,
    cursor: Cursor<'src>,
    nesting_depth: usize,
    max_nesting_depth: usize,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str, max_nesting_depth: usize) -> Self {
        Self {
            source,
            cursor: Cursor::new(source, TriviaPolicy::default()),
            nesting_depth: 0,
            max_nesting_depth,
        }
    }

    // ========================================================================
    // Statement Grammar
    // ========================================================================

    /// Parses the whole input: sub-expressions separated by terminators.
    ///
    /// Leading, consecutive, and trailing terminators are all permitted, so
    /// `"."` and the empty input both yield an empty sequence.
    fn parse_statement_sequence(&mut self) -> Result<StatementSequence, ParseError> {
        let mut statements = Vec::new();
        self.skip_terminators();
        while !self.at_end() {
            statements.push(self.parse_sub_expression()?);
            if self.at_end() {
                break;
            }
            self.expect_terminator()?;
            self.skip_terminators();
        }
        let span = Span::from(0..self.source.len());
        Ok(StatementSequence::new(statements, span))
    }

    /// True if only trivia remains.
    fn at_end(&self) -> bool {
        let mut probe = self.cursor;
        probe.skip_trivia();
        probe.is_at_end()
    }

    /// Consumes any number of terminators (including none).
    fn skip_terminators(&mut self) {
        while self.cursor.try_terminator().is_some() {}
    }

    /// Requires a terminator between statements.
    fn expect_terminator(&mut self) -> Result<Token, ParseError> {
        match self.cursor.try_terminator() {
            Some(token) => Ok(token),
            // try_terminator consumed trivia, so the cursor already sits
            // on the offending character
            None => Err(ParseError::syntax(
                vec![TokenClass::Terminator],
                self.cursor.here(),
            )),
        }
    }

    /// Parses one statement: call expressions joined by assignment
    /// operators into a single flat span.
    ///
    /// The span is recognized but not decomposed — no target/value
    /// structure is produced here.
    fn parse_sub_expression(&mut self) -> Result<SubExpression, ParseError> {
        let first = self.parse_call_expression()?;
        let mut span = first.span;
        let mut elements = vec![first];
        let mut operators = Vec::new();
        while let Some((spelling, OperatorKind::Assignment)) = self.cursor.peek_operator() {
            operators.push(self.cursor.take_operator(spelling, OperatorKind::Assignment));
            let element = self.parse_call_expression()?;
            span = span.merge(element.span);
            elements.push(element);
        }
        Ok(SubExpression::new(elements, operators, span))
    }

    // ========================================================================
    // Expression Grammar
    // ========================================================================

    /// Parses an operator expression with an optional trailing argument
    /// group.
    fn parse_call_expression(&mut self) -> Result<CallExpression, ParseError> {
        let expression = self.parse_operator_expression()?;
        let arguments = self.parse_optional_argument_group()?;
        let span = arguments
            .as_ref()
            .map_or(expression.span(), |group| expression.span().merge(group.span));
        Ok(CallExpression {
            expression,
            arguments,
            span,
        })
    }

    /// Parses a full precedence-tier expression.
    ///
    /// Entry point for the expression grammar; also reached recursively
    /// from interpolation slots and argument values. Grows the stack on the
    /// heap when the remaining space runs low, so the nesting-depth guard
    /// is what bounds recursion, not the OS stack.
    fn parse_operator_expression(&mut self) -> Result<Expression, ParseError> {
        stacker::maybe_grow(32 * 1024, 256 * 1024, || self.parse_binary_expression(0))
    }

    /// Pratt parsing over the binding-power table.
    fn parse_binary_expression(&mut self, min_bp: u8) -> Result<Expression, ParseError> {
        self.enter_nesting()?;
        let result = self.binary_expression_inner(min_bp);
        self.leave_nesting();
        result
    }

    fn binary_expression_inner(&mut self, min_bp: u8) -> Result<Expression, ParseError> {
        let mut left = self.parse_unary_expression()?;

        while let Some((spelling, kind)) = self.cursor.peek_operator() {
            // Assignment operators end the expression; the statement
            // grammar owns them.
            let Some(bp) = binary_binding_power(kind) else {
                break;
            };
            if bp.left < min_bp {
                break;
            }

            let operator = self.cursor.take_operator(spelling, kind);
            let right = self.parse_binary_expression(bp.right)?;
            let span = left.span().merge(right.span());
            left = Expression::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    /// Parses a prefix operator chain or a message chain.
    ///
    /// Any spelling from the four expression tiers works as a prefix
    /// operator; stacked prefixes nest right-associatively.
    fn parse_unary_expression(&mut self) -> Result<Expression, ParseError> {
        if let Some((spelling, kind)) = self.cursor.peek_operator() {
            if kind != OperatorKind::Assignment {
                self.enter_nesting()?;
                let operator = self.cursor.take_operator(spelling, kind);
                let operand = self.parse_unary_expression();
                self.leave_nesting();
                let operand = Box::new(operand?);
                let span = operator.span().merge(operand.span());
                return Ok(Expression::Unary {
                    operator,
                    operand,
                    span,
                });
            }
        }
        self.parse_message_chain().map(Expression::Chain)
    }

    /// Parses a greedy run of juxtaposed primaries.
    fn parse_message_chain(&mut self) -> Result<MessageChain, ParseError> {
        let first = self.parse_primary()?;
        let mut span = first.span();
        let mut messages = vec![first];
        while self.chain_continues() {
            let next = self.parse_primary()?;
            span = span.merge(next.span());
            messages.push(next);
        }
        Ok(MessageChain::new(messages, span))
    }

    /// True if the next token extends the current message chain.
    ///
    /// An identifier immediately followed by `:` is an argument label, not
    /// a chain element — that carve-out is what lets `to: 10 do: f` read as
    /// two labelled pairs instead of the chain `10 do` swallowing a label.
    fn chain_continues(&self) -> bool {
        let mut probe = self.cursor;
        probe.skip_trivia();
        match probe.peek_char() {
            Some(c) if is_identifier_start(c) => !Self::label_ahead(probe),
            Some(c) if c.is_ascii_digit() => true,
            Some('"' | '#') => true,
            _ => false,
        }
    }

    /// True if the probe is looking at `identifier:`.
    fn label_ahead(mut probe: Cursor<'_>) -> bool {
        probe.identifier().is_ok() && probe.peek_char() == Some(':')
    }

    /// Parses one primary: identifier, integer, string, or symbol literal.
    fn parse_primary(&mut self) -> Result<Primary, ParseError> {
        self.cursor.skip_trivia();
        match self.cursor.peek_char() {
            Some(c) if is_identifier_start(c) => {
                let token = self.cursor.identifier()?;
                Ok(Primary::Identifier(identifier_node(token)))
            }
            Some(c) if c.is_ascii_digit() => {
                let token = self.cursor.integer_literal()?;
                let span = token.span();
                match token.into_kind() {
                    TokenKind::Integer(digits) => {
                        Ok(Primary::Integer(IntegerLiteral { digits, span }))
                    }
                    _ => unreachable!("integer_literal() produces integer tokens"),
                }
            }
            Some('"') => self.parse_string_literal().map(Primary::String),
            Some('#') => {
                let token = self.cursor.symbol_literal()?;
                let span = token.span();
                match token.into_kind() {
                    TokenKind::Symbol(value) => Ok(Primary::Symbol(SymbolLiteral { value, span })),
                    _ => unreachable!("symbol_literal() produces symbol tokens"),
                }
            }
            _ => Err(ParseError::syntax(
                vec![
                    TokenClass::Identifier,
                    TokenClass::IntegerLiteral,
                    TokenClass::StringLiteral,
                    TokenClass::SymbolLiteral,
                ],
                self.cursor.here(),
            )),
        }
    }

    // ========================================================================
    // Argument Groups
    // ========================================================================

    /// Parses a trailing argument group if one is present.
    fn parse_optional_argument_group(&mut self) -> Result<Option<ArgumentGroup>, ParseError> {
        if !self.argument_label_ahead() {
            return Ok(None);
        }
        let first = self.parse_keyword_argument()?;
        let mut span = first.span;
        let mut arguments = vec![first];
        while self.argument_label_ahead() {
            let argument = self.parse_keyword_argument()?;
            span = span.merge(argument.span);
            arguments.push(argument);
        }
        Ok(Some(ArgumentGroup::new(arguments, span)))
    }

    /// True if the next token is an argument label.
    fn argument_label_ahead(&self) -> bool {
        let mut probe = self.cursor;
        probe.skip_trivia();
        probe.peek_char().is_some_and(is_identifier_start) && Self::label_ahead(probe)
    }

    /// Parses one `label: value` pair. The value is a full precedence-tier
    /// expression.
    fn parse_keyword_argument(&mut self) -> Result<KeywordArgument, ParseError> {
        let label = self.cursor.identifier()?;
        let _colon = self.cursor.colon()?;
        let label = identifier_node(label);
        let value = self.parse_operator_expression()?;
        let span = label.span.merge(value.span());
        Ok(KeywordArgument { label, value, span })
    }

    // ========================================================================
    // String Literal Grammar
    // ========================================================================

    /// Parses a string literal; the cursor must be looking at `"`.
    ///
    /// The simple form is tried first via a forward scan: if the closing
    /// quote appears before any `$`, the literal is plain text. Otherwise
    /// the interpolated form is parsed, invoking the expression grammar for
    /// each `$…$` slot.
    fn parse_string_literal(&mut self) -> Result<StringLiteral, ParseError> {
        self.enter_nesting()?;
        let result = self.string_literal_inner();
        self.leave_nesting();
        result
    }

    fn string_literal_inner(&mut self) -> Result<StringLiteral, ParseError> {
        self.cursor.skip_trivia();
        let start = self.cursor.current_position();
        self.cursor.advance(); // opening quote

        if self.simple_form_ahead(start)? {
            let content_start = self.cursor.current_position();
            self.cursor.advance_while(|c| c != '"');
            let content = self.cursor.span_from(content_start);
            self.cursor.advance(); // closing quote
            return Ok(StringLiteral::Simple {
                value: self.cursor.text_for(content).into(),
                span: self.cursor.span_from(start),
            });
        }

        // Interpolated form. The head runs to the first `$`, which opens
        // the first expression slot.
        let (head, _) = self.text_segment(start)?;

        let mut parts = Vec::new();
        loop {
            let slot_open = self.cursor.current_position();
            self.cursor.advance(); // the opening `$`

            let expression = self.interpolated_expression()?;

            // The slot's closing `$`.
            self.cursor.skip_trivia();
            match self.cursor.peek_char() {
                Some('$') => {
                    self.cursor.advance();
                }
                Some(_) => {
                    // Closing quote (or anything else) before the `$`.
                    return Err(ParseError::unbalanced_interpolation(Span::new(
                        slot_open,
                        slot_open + 1,
                    )));
                }
                None => {
                    return Err(ParseError::unbalanced_interpolation(
                        self.cursor.span_from(slot_open),
                    ));
                }
            }

            let (text, delimiter) = self.text_segment(start)?;
            let span = Span::new(slot_open, text.span.end());
            parts.push(InterpolationPart {
                expression,
                text,
                span,
            });

            if delimiter == '"' {
                self.cursor.advance(); // closing quote
                break;
            }
        }

        Ok(StringLiteral::Interpolated {
            head,
            parts,
            span: self.cursor.span_from(start),
        })
    }

    /// Scans ahead (without consuming) to decide between the simple and
    /// interpolated forms.
    fn simple_form_ahead(&self, string_start: u32) -> Result<bool, ParseError> {
        let mut probe = self.cursor;
        loop {
            match probe.peek_char() {
                None => {
                    return Err(ParseError::unterminated_string(
                        probe.span_from(string_start),
                    ))
                }
                Some('"') => return Ok(true),
                Some('$') => return Ok(false),
                Some(_) => {
                    probe.advance();
                }
            }
        }
    }

    /// Consumes a text segment up to the next `$` or `"` (left unconsumed)
    /// and returns it with the delimiter that ended it.
    fn text_segment(&mut self, string_start: u32) -> Result<(TextSegment, char), ParseError> {
        let seg_start = self.cursor.current_position();
        let delimiter = loop {
            match self.cursor.peek_char() {
                None => {
                    return Err(ParseError::unterminated_string(
                        self.cursor.span_from(string_start),
                    ))
                }
                Some(c @ ('$' | '"')) => break c,
                Some(_) => {
                    self.cursor.advance();
                }
            }
        };
        let span = self.cursor.span_from(seg_start);
        let segment = TextSegment {
            text: self.cursor.text_for(span).into(),
            span,
        };
        Ok((segment, delimiter))
    }

    /// Attempts the optional expression inside an interpolation slot.
    ///
    /// An empty slot (`$$`) is legal, so a failed expression parse restores
    /// the checkpoint and yields `None` — the one bounded look-ahead in the
    /// grammar. Depth-limit errors still propagate.
    fn interpolated_expression(&mut self) -> Result<Option<Expression>, ParseError> {
        let saved_cursor = self.cursor;
        let saved_depth = self.nesting_depth;
        match self.parse_operator_expression() {
            Ok(expression) => Ok(Some(expression)),
            Err(error) if matches!(error.kind, ParseErrorKind::NestingTooDeep) => Err(error),
            Err(_) => {
                self.cursor = saved_cursor;
                self.nesting_depth = saved_depth;
                Ok(None)
            }
        }
    }

    // ========================================================================
    // Nesting Guard
    // ========================================================================

    fn enter_nesting(&mut self) -> Result<(), ParseError> {
        if self.nesting_depth >= self.max_nesting_depth {
            let mut probe = self.cursor;
            probe.skip_trivia();
            return Err(ParseError::nesting_too_deep(probe.here()));
        }
        self.nesting_depth += 1;
        Ok(())
    }

    fn leave_nesting(&mut self) {
        self.nesting_depth -= 1;
    }
}

/// Converts an identifier token into its tree node.
fn identifier_node(token: Token) -> Identifier {
    let span = token.span();
    match token.into_kind() {
        TokenKind::Identifier(name) => Identifier::new(name, span),
        _ => unreachable!("identifier() produces identifier tokens"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> StatementSequence {
        parse(source).expect("expected input to parse")
    }

    /// The single statement's single element's expression.
    fn only_expression(program: &StatementSequence) -> &Expression {
        assert_eq!(program.statements.len(), 1, "expected one statement");
        let statement = &program.statements[0];
        assert_eq!(statement.elements.len(), 1, "expected one element");
        &statement.elements[0].expression
    }

    fn chain_names(expression: &Expression) -> Vec<String> {
        match expression {
            Expression::Chain(chain) => chain
                .messages
                .iter()
                .map(|p| match p {
                    Primary::Identifier(id) => id.name.to_string(),
                    Primary::Integer(int) => int.digits.to_string(),
                    Primary::Symbol(sym) => format!("#{}", sym.value),
                    Primary::String(_) => "<string>".to_string(),
                })
                .collect(),
            other => panic!("expected a message chain, got {other:?}"),
        }
    }

    fn operator_of(expression: &Expression) -> &str {
        match expression {
            Expression::Binary { operator, .. } | Expression::Unary { operator, .. } => {
                operator.kind().as_str().expect("operator has text")
            }
            Expression::Chain(_) => panic!("expected an operator expression"),
        }
    }

    // ------------------------------------------------------------------
    // Message chains
    // ------------------------------------------------------------------

    #[test]
    fn single_identifier_program() {
        let program = parse_ok("frobnicate?");
        let expression = only_expression(&program);
        assert_eq!(chain_names(expression), ["frobnicate?"]);
    }

    #[test]
    fn chain_of_three_identifiers() {
        let program = parse_ok("x y z");
        let expression = only_expression(&program);
        assert_eq!(chain_names(expression), ["x", "y", "z"]);
    }

    #[test]
    fn chain_mixes_primaries() {
        let program = parse_ok("x 42 \"s\" #t");
        let Expression::Chain(chain) = only_expression(&program) else {
            panic!("expected a chain");
        };
        assert_eq!(chain.len(), 4);
        assert!(matches!(&chain.messages[1], Primary::Integer(i) if i.digits == "42"));
        assert!(matches!(
            &chain.messages[2],
            Primary::String(StringLiteral::Simple { value, .. }) if value == "s"
        ));
        assert!(matches!(&chain.messages[3], Primary::Symbol(s) if s.value == "t"));
    }

    #[test]
    fn integer_with_odd_underscores_is_accepted() {
        let program = parse_ok("1__2_");
        let Expression::Chain(chain) = only_expression(&program) else {
            panic!("expected a chain");
        };
        assert!(matches!(&chain.messages[0], Primary::Integer(i) if i.digits == "1__2_"));
    }

    #[test]
    fn symbol_literal_keeps_interior_dot() {
        let program = parse_ok("#foo.bar");
        let Expression::Chain(chain) = only_expression(&program) else {
            panic!("expected a chain");
        };
        assert!(matches!(&chain.messages[0], Primary::Symbol(s) if s.value == "foo.bar"));
    }

    #[test]
    fn dot_after_identifier_is_a_terminator() {
        // contrast with the symbol case: `.` is only symbol content after `#`
        let program = parse_ok("foo.bar");
        assert_eq!(program.statements.len(), 2);
    }

    // ------------------------------------------------------------------
    // Operator precedence
    // ------------------------------------------------------------------

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let program = parse_ok("1 + 2 * 3");
        let expression = only_expression(&program);
        assert_eq!(operator_of(expression), "+");
        let Expression::Binary { left, right, .. } = expression else {
            panic!("expected a binary operation");
        };
        assert_eq!(chain_names(left), ["1"]);
        assert_eq!(operator_of(right), "*");
    }

    #[test]
    fn full_tier_ordering() {
        // ^ over * over + over <
        let program = parse_ok("1 ^ 2 * 3 + 4 < 5");
        let expression = only_expression(&program);
        assert_eq!(operator_of(expression), "<");
        let Expression::Binary { left, .. } = expression else {
            panic!("expected a binary operation");
        };
        assert_eq!(operator_of(left), "+");
        let Expression::Binary { left, .. } = left.as_ref() else {
            panic!("expected a binary operation");
        };
        assert_eq!(operator_of(left), "*");
        let Expression::Binary { left, .. } = left.as_ref() else {
            panic!("expected a binary operation");
        };
        assert_eq!(operator_of(left), "^");
    }

    #[test]
    fn binary_tiers_are_left_associative() {
        let program = parse_ok("8 - 2 - 1");
        let expression = only_expression(&program);
        let Expression::Binary { left, right, .. } = expression else {
            panic!("expected a binary operation");
        };
        assert_eq!(operator_of(left), "-");
        assert_eq!(chain_names(right), ["1"]);

        // exponentiation too
        let program = parse_ok("2 ^ 3 ^ 2");
        let Expression::Binary { left, .. } = only_expression(&program) else {
            panic!("expected a binary operation");
        };
        assert_eq!(operator_of(left), "^");
    }

    #[test]
    fn decorated_spellings_are_single_tokens() {
        let program = parse_ok("a [+] b (+) c");
        let expression = only_expression(&program);
        assert_eq!(operator_of(expression), "(+)");
        let Expression::Binary { left, .. } = expression else {
            panic!("expected a binary operation");
        };
        assert_eq!(operator_of(left), "[+]");

        // decorated power spelling sits in the power tier
        let program = parse_ok("2 [*] 3 [^] 4");
        let expression = only_expression(&program);
        assert_eq!(operator_of(expression), "[*]");
    }

    #[test]
    fn chains_are_operands() {
        let program = parse_ok("x y + z w");
        let Expression::Binary { left, right, .. } = only_expression(&program) else {
            panic!("expected a binary operation");
        };
        assert_eq!(chain_names(left), ["x", "y"]);
        assert_eq!(chain_names(right), ["z", "w"]);
    }

    #[test]
    fn prefix_operators_nest_rightward() {
        let program = parse_ok("- x");
        let expression = only_expression(&program);
        assert_eq!(operator_of(expression), "-");

        let program = parse_ok("- - x");
        let Expression::Unary { operand, .. } = only_expression(&program) else {
            panic!("expected a unary operation");
        };
        assert!(matches!(operand.as_ref(), Expression::Unary { .. }));

        // any tier's spelling works as a prefix
        let program = parse_ok("(<=) x");
        assert_eq!(operator_of(only_expression(&program)), "(<=)");
    }

    #[test]
    fn prefix_binds_tighter_than_binary() {
        let program = parse_ok("1 + - 2");
        let Expression::Binary { right, .. } = only_expression(&program) else {
            panic!("expected a binary operation");
        };
        assert!(matches!(right.as_ref(), Expression::Unary { .. }));
    }

    // ------------------------------------------------------------------
    // Argument groups
    // ------------------------------------------------------------------

    #[test]
    fn argument_group_with_two_pairs() {
        let program = parse_ok("repeat to: 10 do: f");
        let statement = &program.statements[0];
        let element = &statement.elements[0];
        assert_eq!(chain_names(&element.expression), ["repeat"]);

        let group = element.arguments.as_ref().expect("expected arguments");
        assert_eq!(group.len(), 2);
        assert_eq!(group.arguments[0].label.name, "to");
        assert_eq!(chain_names(&group.arguments[0].value), ["10"]);
        assert_eq!(group.arguments[1].label.name, "do");
        assert_eq!(chain_names(&group.arguments[1].value), ["f"]);
    }

    #[test]
    fn argument_values_are_full_expressions() {
        let program = parse_ok("f at: 1 + 2 * 3");
        let element = &program.statements[0].elements[0];
        let group = element.arguments.as_ref().expect("expected arguments");
        assert_eq!(operator_of(&group.arguments[0].value), "+");
    }

    #[test]
    fn duplicate_labels_are_permitted() {
        let program = parse_ok("f a: 1 a: 2");
        let element = &program.statements[0].elements[0];
        let group = element.arguments.as_ref().expect("expected arguments");
        assert_eq!(group.len(), 2);
        assert_eq!(group.arguments[0].label.name, "a");
        assert_eq!(group.arguments[1].label.name, "a");
    }

    #[test]
    fn label_requires_adjacent_colon() {
        // with a space before `:` the identifier is a chain element and the
        // bare colon is unparseable
        assert!(parse("f to : 1").is_err());
    }

    #[test]
    fn no_grouping_parentheses() {
        // `(` only occurs inside decorated operator spellings; there is no
        // parenthesized-expression construct
        let error = parse("(1 to: 10) do: f").unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::SyntaxError { .. }));
        assert_eq!(error.span.start(), 0);
    }

    // ------------------------------------------------------------------
    // Assignment spans
    // ------------------------------------------------------------------

    #[test]
    fn assignment_span_stays_flat() {
        let program = parse_ok("x = 1");
        let statement = &program.statements[0];
        assert!(statement.is_assignment_span());
        assert_eq!(statement.elements.len(), 2);
        assert_eq!(statement.operators.len(), 1);
        assert!(matches!(statement.operators[0].kind(), TokenKind::Assign(op) if op == "="));

        let program = parse_ok("x += y -= z");
        let statement = &program.statements[0];
        assert_eq!(statement.elements.len(), 3);
        assert_eq!(statement.operators.len(), 2);
        assert!(matches!(statement.operators[1].kind(), TokenKind::Assign(op) if op == "-="));
    }

    #[test]
    fn assignment_element_can_carry_arguments() {
        let program = parse_ok("total = n to: 10");
        let statement = &program.statements[0];
        assert_eq!(statement.elements.len(), 2);
        assert!(statement.elements[1].arguments.is_some());
    }

    #[test]
    fn compound_assignment_is_not_split_into_operator_and_assign() {
        // `+=` must lex as one assignment operator, not `+` then `=`
        let program = parse_ok("x += 1");
        let statement = &program.statements[0];
        assert_eq!(statement.elements.len(), 2);
        assert!(matches!(statement.operators[0].kind(), TokenKind::Assign(op) if op == "+="));
    }

    #[test]
    fn double_equals_is_relational_not_assignment() {
        let program = parse_ok("x == y");
        let statement = &program.statements[0];
        assert!(!statement.is_assignment_span());
        assert_eq!(operator_of(&statement.elements[0].expression), "==");
    }

    // ------------------------------------------------------------------
    // String literals
    // ------------------------------------------------------------------

    fn parse_string(source: &str) -> StringLiteral {
        let program = parse_ok(source);
        let Expression::Chain(chain) = only_expression(&program) else {
            panic!("expected a chain");
        };
        let Primary::String(literal) = &chain.messages[0] else {
            panic!("expected a string literal");
        };
        literal.clone()
    }

    #[test]
    fn simple_string() {
        let literal = parse_string("\"hello world\"");
        assert!(matches!(literal, StringLiteral::Simple { value, .. } if value == "hello world"));
    }

    #[test]
    fn interpolated_string_single_slot() {
        let literal = parse_string("\"a $x$ b\"");
        let StringLiteral::Interpolated { head, parts, .. } = literal else {
            panic!("expected an interpolated literal");
        };
        assert_eq!(head.text, "a ");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].text.text, " b");
        let expression = parts[0].expression.as_ref().expect("expected an expression");
        assert_eq!(chain_names(expression), ["x"]);
    }

    #[test]
    fn interpolated_string_multiple_slots() {
        let literal = parse_string("\"x $a$ y $b$ z\"");
        let StringLiteral::Interpolated { head, parts, .. } = literal else {
            panic!("expected an interpolated literal");
        };
        assert_eq!(head.text, "x ");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].text.text, " y ");
        assert_eq!(parts[1].text.text, " z");
        assert!(parts[0].expression.is_some());
        assert!(parts[1].expression.is_some());
    }

    #[test]
    fn interpolation_slot_may_be_empty() {
        let literal = parse_string("\"a $$ b\"");
        let StringLiteral::Interpolated { parts, .. } = literal else {
            panic!("expected an interpolated literal");
        };
        assert_eq!(parts.len(), 1);
        assert!(parts[0].expression.is_none());
    }

    #[test]
    fn interpolation_segments_may_be_empty_text() {
        let literal = parse_string("\"$x$\"");
        let StringLiteral::Interpolated { head, parts, .. } = literal else {
            panic!("expected an interpolated literal");
        };
        assert_eq!(head.text, "");
        assert_eq!(parts[0].text.text, "");
    }

    #[test]
    fn interpolation_nests_through_strings() {
        let literal = parse_string("\"a $\"inner\"$ b\"");
        let StringLiteral::Interpolated { parts, .. } = literal else {
            panic!("expected an interpolated literal");
        };
        let expression = parts[0].expression.as_ref().expect("expected an expression");
        let Expression::Chain(chain) = expression else {
            panic!("expected a chain");
        };
        assert!(matches!(
            &chain.messages[0],
            Primary::String(StringLiteral::Simple { value, .. }) if value == "inner"
        ));
    }

    #[test]
    fn interpolated_expression_can_be_compound() {
        let literal = parse_string("\"sum: $a + b * 2$\"");
        let StringLiteral::Interpolated { parts, .. } = literal else {
            panic!("expected an interpolated literal");
        };
        let expression = parts[0].expression.as_ref().expect("expected an expression");
        assert_eq!(operator_of(expression), "+");
    }

    #[test]
    fn unterminated_string_reports_eof() {
        let error = parse("\"abc").unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::UnterminatedString));

        let error = parse("\"a $x$ b").unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::UnterminatedString));
    }

    #[test]
    fn unbalanced_interpolation_before_closing_quote() {
        let error = parse("\"hello $name\"").unwrap_err();
        assert!(matches!(
            error.kind,
            ParseErrorKind::UnbalancedInterpolation
        ));
    }

    #[test]
    fn unbalanced_interpolation_at_eof() {
        let error = parse("\"hello $").unwrap_err();
        assert!(matches!(
            error.kind,
            ParseErrorKind::UnbalancedInterpolation
        ));
    }

    #[test]
    fn strings_may_span_newlines() {
        let literal = parse_string("\"line one\nline two\"");
        assert!(matches!(
            literal,
            StringLiteral::Simple { value, .. } if value == "line one\nline two"
        ));
    }

    // ------------------------------------------------------------------
    // Statement sequences and terminators
    // ------------------------------------------------------------------

    #[test]
    fn lone_terminator_is_an_empty_sequence() {
        assert!(parse_ok(".").is_empty());
        assert!(parse_ok("..").is_empty());
        assert!(parse_ok("\n\n").is_empty());
        assert!(parse_ok("").is_empty());
    }

    #[test]
    fn trailing_terminator_is_optional() {
        assert_eq!(parse_ok("x").statements.len(), 1);
        assert_eq!(parse_ok("x.").statements.len(), 1);
        assert_eq!(parse_ok("x.\n").statements.len(), 1);
    }

    #[test]
    fn newline_runs_separate_statements() {
        let program = parse_ok("x\ny\r\n\r\nz");
        assert_eq!(program.statements.len(), 3);
    }

    #[test]
    fn dot_separates_statements_on_one_line() {
        let program = parse_ok("x y. z");
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn comments_are_trivia() {
        let program = parse_ok("x ; trailing note\ny");
        assert_eq!(program.statements.len(), 2);

        // a comment line between statements
        let program = parse_ok("x\n; note\ny");
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn newline_is_not_whitespace_inside_expressions() {
        let error = parse("1 +\n2").unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::SyntaxError { .. }));
    }

    #[test]
    fn expected_terminator_after_statement() {
        let error = parse("x ]").unwrap_err();
        let ParseErrorKind::SyntaxError { expected } = error.kind else {
            panic!("expected a syntax error");
        };
        assert_eq!(expected, vec![TokenClass::Terminator]);
    }

    // ------------------------------------------------------------------
    // Determinism, depth, positions
    // ------------------------------------------------------------------

    #[test]
    fn parsing_is_deterministic() {
        let source = "acc = acc + 1. \"v: $acc [*] 2$!\" print to: 10 do: f\n#done";
        assert_eq!(parse(source), parse(source));
    }

    #[test]
    fn nesting_depth_is_bounded_and_configurable() {
        let source = format!("{}x", "- ".repeat(80));
        let error = parse(&source).unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::NestingTooDeep));

        assert!(parse_with_max_depth(&source, 200).is_ok());
    }

    #[test]
    fn error_positions_are_precise() {
        let error = parse("x\n   @").unwrap_err();
        let position = super::super::Position::from_byte_offset("x\n   @", error.span.start())
            .expect("offset in bounds");
        assert_eq!(position.line, 1);
        assert_eq!(position.column, 3);
    }

    // ------------------------------------------------------------------
    // Input completeness
    // ------------------------------------------------------------------

    #[test]
    fn complete_inputs() {
        assert!(is_input_complete(""));
        assert!(is_input_complete("   \n"));
        assert!(is_input_complete("3 + 4"));
        assert!(is_input_complete("x to: 10"));
        // complete but invalid: the evaluator reports the error
        assert!(is_input_complete("(1 to: 10) do: f"));
        assert!(is_input_complete("\"hello $name\""));
    }

    #[test]
    fn incomplete_inputs() {
        assert!(!is_input_complete("3 +"));
        assert!(!is_input_complete("x ="));
        assert!(!is_input_complete("x to:"));
        assert!(!is_input_complete("\"an open string"));
        assert!(!is_input_complete("\"hello $"));
    }
}
