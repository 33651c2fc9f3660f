//! Selector grammar parser using nom
//!
//! Grammar:
//! ```text
//! expr      := or_expr
//! or_expr   := and_expr ('or' and_expr)*
//! and_expr  := not_expr ('and' not_expr)*
//! not_expr  := 'not' not_expr | atom
//! atom      := '*' | 'all' | extremal | filter | '(' expr ')'
//! extremal  := ('>>' | '<<') axis index? | ('>' | '<') axis index?
//! filter    := ('+' | '-' | '|' | '#') axis
//! index     := '[' digits ']'
//! axis      := 'x' | 'y' | 'z'
//! ```
//!
//! Nesting is limited to [`MAX_DEPTH`] levels.
//!
//! Keywords and axis letters are case-insensitive. `not` binds tighter
//! than `and`, which binds tighter than `or`; binary operators are
//! left-associative. `>X[n]` and `<X[n]` restrict to elements parallel
//! to the axis, while `>>X[n]` and `<<X[n]` rank every element.

use crate::ast::*;
use crate::error::ParseError;
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    character::complete::{char, digit1, multispace0, one_of, satisfy},
    combinator::{cut, map, map_res, not, opt, value},
    error::ErrorKind,
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

/// Parse a selector query into an expression tree
pub fn parse_selector(query: &str) -> Result<SelectorExpr, ParseError> {
    if query.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    match expr(query) {
        Ok(("", result)) => Ok(result),
        Ok((remaining, _)) => Err(unexpected_at(query, remaining)),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            if e.code == ErrorKind::TooLarge {
                return Err(ParseError::TooDeep {
                    position: offset(query, e.input.trim_start()),
                    limit: MAX_DEPTH,
                });
            }
            if e.code == ErrorKind::MapRes {
                let text: String = e.input.chars().take_while(|c| c.is_ascii_digit()).collect();
                return Err(ParseError::InvalidIndex {
                    position: offset(query, e.input),
                    text,
                });
            }
            Err(unexpected_at(query, e.input))
        }
        Err(nom::Err::Incomplete(_)) => Err(ParseError::UnexpectedEnd {
            position: query.len(),
        }),
    }
}

fn offset(query: &str, rest: &str) -> usize {
    query.len() - rest.len()
}

/// Build the error for the unparsed tail of a query
fn unexpected_at(query: &str, rest: &str) -> ParseError {
    let trimmed = rest.trim_start();
    if trimmed.is_empty() {
        return ParseError::UnexpectedEnd {
            position: query.len(),
        };
    }
    let found = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_string();
    ParseError::UnexpectedToken {
        position: offset(query, trimmed),
        found,
    }
}

/// Parse whitespace
fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Succeeds without consuming when the next char cannot continue a word
fn word_end(input: &str) -> IResult<&str, ()> {
    not(satisfy(|c: char| c.is_alphanumeric() || c == '_'))(input)
}

/// Parse a case-insensitive keyword that ends at a word boundary
fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    ws(terminated(tag_no_case(word), word_end))
}

/// Parse an expression (entry point)
fn expr(input: &str) -> IResult<&str, SelectorExpr> {
    or_expr(input, 0)
}

/// Failure raised once nesting passes [`MAX_DEPTH`]
fn too_deep(input: &str) -> nom::Err<nom::error::Error<&str>> {
    nom::Err::Failure(nom::error::Error::new(input, ErrorKind::TooLarge))
}

/// Parse `operand (op operand)*`, folding to the left
fn chain<'a>(
    input: &'a str,
    depth: usize,
    op: &'static str,
    operand: fn(&'a str, usize) -> IResult<&'a str, SelectorExpr>,
    combine: fn(SelectorExpr, SelectorExpr) -> SelectorExpr,
) -> IResult<&'a str, SelectorExpr> {
    let (mut input, mut acc) = operand(input, depth)?;
    let mut height = acc.depth();

    loop {
        let (rest, right) = match preceded(keyword(op), cut(|i| operand(i, depth)))(input) {
            Ok(parsed) => parsed,
            Err(nom::Err::Error(_)) => return Ok((input, acc)),
            Err(e) => return Err(e),
        };
        height = height.max(right.depth()) + 1;
        if height > MAX_DEPTH {
            return Err(too_deep(input));
        }
        acc = combine(acc, right);
        input = rest;
    }
}

/// Parse OR expressions
fn or_expr(input: &str, depth: usize) -> IResult<&str, SelectorExpr> {
    chain(input, depth, "or", and_expr, SelectorExpr::or)
}

/// Parse AND expressions
fn and_expr(input: &str, depth: usize) -> IResult<&str, SelectorExpr> {
    chain(input, depth, "and", not_expr, SelectorExpr::and)
}

/// Parse NOT expressions
fn not_expr(input: &str, depth: usize) -> IResult<&str, SelectorExpr> {
    let (rest, negated) = opt(keyword("not"))(input)?;
    if negated.is_none() {
        return atom(input, depth);
    }
    if depth >= MAX_DEPTH {
        return Err(too_deep(input));
    }

    let (rest, inner) = cut(|i| not_expr(i, depth + 1))(rest)?;
    if inner.depth() >= MAX_DEPTH {
        return Err(too_deep(input));
    }
    Ok((rest, SelectorExpr::not(inner)))
}

/// Parse atomic expressions
fn atom(input: &str, depth: usize) -> IResult<&str, SelectorExpr> {
    ws(alt((
        value(SelectorExpr::All, char('*')),
        value(SelectorExpr::All, terminated(tag_no_case("all"), word_end)),
        |i| parenthesized(i, depth),
        extremal,
        direction_filter,
    )))(input)
}

/// Parse `( expr )`, one nesting level deeper
fn parenthesized(input: &str, depth: usize) -> IResult<&str, SelectorExpr> {
    let (rest, _) = char('(')(input)?;
    if depth >= MAX_DEPTH {
        return Err(too_deep(input));
    }
    terminated(cut(|i| or_expr(i, depth + 1)), cut(char(')')))(rest)
}

/// Parse an axis letter
fn axis(input: &str) -> IResult<&str, Axis> {
    terminated(
        alt((
            value(Axis::X, one_of("xX")),
            value(Axis::Y, one_of("yY")),
            value(Axis::Z, one_of("zZ")),
        )),
        word_end,
    )(input)
}

/// Parse a bracketed group index: [n]
fn group_index(input: &str) -> IResult<&str, usize> {
    preceded(
        ws(char('[')),
        cut(terminated(
            ws(map_res(digit1, |digits: &str| digits.parse::<usize>())),
            char(']'),
        )),
    )(input)
}

/// Parse `>`, `<`, `>>` and `<<` predicates
fn extremal(input: &str) -> IResult<&str, SelectorExpr> {
    alt((
        map(
            preceded(tag(">>"), cut(pair(axis, opt(group_index)))),
            |(axis, index)| SelectorExpr::farthest(axis, index),
        ),
        map(
            preceded(tag("<<"), cut(pair(axis, opt(group_index)))),
            |(axis, index)| SelectorExpr::closest(axis, index),
        ),
        map(
            preceded(char('>'), cut(pair(axis, opt(group_index)))),
            |(axis, index)| match index {
                Some(i) => SelectorExpr::AxisParallelIndexed {
                    axis,
                    sign: Sign::Positive,
                    group_index: Some(i),
                },
                None => SelectorExpr::farthest(axis, None),
            },
        ),
        map(
            preceded(char('<'), cut(pair(axis, opt(group_index)))),
            |(axis, index)| match index {
                Some(i) => SelectorExpr::AxisParallelIndexed {
                    axis,
                    sign: Sign::Negative,
                    group_index: Some(i),
                },
                None => SelectorExpr::closest(axis, None),
            },
        ),
    ))(input)
}

/// Parse `+X`, `-X`, `|X` and `#X` direction filters
fn direction_filter(input: &str) -> IResult<&str, SelectorExpr> {
    alt((
        map(preceded(char('+'), cut(axis)), |axis| {
            SelectorExpr::DirectionAligned {
                axis,
                sign: Sign::Positive,
            }
        }),
        map(preceded(char('-'), cut(axis)), |axis| {
            SelectorExpr::DirectionAligned {
                axis,
                sign: Sign::Negative,
            }
        }),
        map(preceded(char('|'), cut(axis)), |axis| {
            SelectorExpr::DirectionParallel { axis }
        }),
        map(preceded(char('#'), cut(axis)), |axis| {
            SelectorExpr::DirectionPerpendicular { axis }
        }),
    ))(input)
}
