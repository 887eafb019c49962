//! `nom` grammar for radial expressions
//!
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/') unary)*
//! unary := ('-' | '+') unary | power
//! power := atom (('**' | '^') unary)?
//! atom  := number | ident '(' expr ')' | ident | '(' expr ')'
//! ```

use crate::errors::ExpressionError;
use crate::expression::ast::{BinaryOp, Node};
use crate::float_types::Real;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit0, digit1, multispace0, one_of},
    combinator::{map, map_res, not, opt, recognize},
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{delimited, pair, terminated, tuple},
};

/// Deepest nesting accepted, counted both as grammar recursion (brackets,
/// signs, powers) and as height of the resulting tree.
pub const MAX_DEPTH: usize = 256;

/// A subtree and its height.
type Tree = (Node, usize);

/// Parse `source` into an unbound syntax tree.
pub fn parse(source: &str) -> Result<Node, ExpressionError> {
    if source.trim().is_empty() {
        return Err(ExpressionError::Empty);
    }

    match expr(source, 0) {
        Ok(("", (node, _))) => Ok(node),
        Ok((rest, _)) => Err(syntax_error(source, rest)),
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::TooLarge => {
            Err(ExpressionError::TooDeep { limit: MAX_DEPTH })
        },
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(syntax_error(source, e.input)),
        Err(nom::Err::Incomplete(_)) => Err(syntax_error(source, "")),
    }
}

fn syntax_error(source: &str, rest: &str) -> ExpressionError {
    let found = match rest.chars().next() {
        Some(c) => c.to_string(),
        None => "end of input".to_string(),
    };
    ExpressionError::Syntax {
        position: source.len() - rest.len(),
        found,
    }
}

fn too_deep(input: &str) -> nom::Err<Error<&str>> {
    nom::Err::Failure(Error::new(input, ErrorKind::TooLarge))
}

/// One more level of grammar recursion.
fn descend(input: &str, level: usize) -> Result<usize, nom::Err<Error<&str>>> {
    if level >= MAX_DEPTH {
        return Err(too_deep(input));
    }
    Ok(level + 1)
}

/// Height of a node whose tallest child is `height`.
fn taller(input: &str, height: usize) -> Result<usize, nom::Err<Error<&str>>> {
    if height >= MAX_DEPTH {
        return Err(too_deep(input));
    }
    Ok(height + 1)
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn symbol<'a>(c: char) -> impl FnMut(&'a str) -> IResult<&'a str, char> {
    ws(char(c))
}

fn power_op(input: &str) -> IResult<&str, &str> {
    ws(alt((tag("**"), tag("^"))))(input)
}

/// Left-fold an operator chain, checking the height as it grows.
fn fold<'a>(input: &'a str, first: Tree, rest: Vec<(BinaryOp, Tree)>) -> IResult<&'a str, Tree> {
    let mut acc = first;
    for (op, (rhs, rhs_height)) in rest {
        let height = taller(input, acc.1.max(rhs_height))?;
        acc = (Node::Binary(op, Box::new(acc.0), Box::new(rhs)), height);
    }
    Ok((input, acc))
}

fn expr(input: &str, level: usize) -> IResult<&str, Tree> {
    let (input, first) = term(input, level)?;
    let (input, rest) = many0(pair(
        ws(alt((
            map(char('+'), |_| BinaryOp::Add),
            map(char('-'), |_| BinaryOp::Sub),
        ))),
        |i| term(i, level),
    ))(input)?;
    fold(input, first, rest)
}

fn term(input: &str, level: usize) -> IResult<&str, Tree> {
    let (input, first) = unary(input, level)?;
    let (input, rest) = many0(pair(
        ws(alt((
            map(terminated(char('*'), not(char('*'))), |_| BinaryOp::Mul),
            map(char('/'), |_| BinaryOp::Div),
        ))),
        |i| unary(i, level),
    ))(input)?;
    fold(input, first, rest)
}

fn unary(input: &str, level: usize) -> IResult<&str, Tree> {
    if let Ok((rest, _)) = symbol('-')(input) {
        let inner = descend(input, level)?;
        match unary(rest, inner) {
            Ok((rest, (node, height))) => {
                let height = taller(rest, height)?;
                return Ok((rest, (Node::Neg(Box::new(node)), height)));
            },
            Err(nom::Err::Error(_)) => {},
            Err(e) => return Err(e),
        }
    } else if let Ok((rest, _)) = symbol('+')(input) {
        let inner = descend(input, level)?;
        match unary(rest, inner) {
            Ok(parsed) => return Ok(parsed),
            Err(nom::Err::Error(_)) => {},
            Err(e) => return Err(e),
        }
    }
    power(input, level)
}

/// Right-associative: the exponent is a full `unary`, so `2^3^2 = 2^(3^2)`.
fn power(input: &str, level: usize) -> IResult<&str, Tree> {
    let (input, (base, base_height)) = atom(input, level)?;
    let Ok((rest, _)) = power_op(input) else {
        return Ok((input, (base, base_height)));
    };
    let inner = descend(input, level)?;
    match unary(rest, inner) {
        Ok((rest, (exponent, exponent_height))) => {
            let height = taller(rest, base_height.max(exponent_height))?;
            let node = Node::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent));
            Ok((rest, (node, height)))
        },
        Err(nom::Err::Error(_)) => Ok((input, (base, base_height))),
        Err(e) => Err(e),
    }
}

fn atom(input: &str, level: usize) -> IResult<&str, Tree> {
    ws(|input| {
        alt((
            map(number, |value| (Node::Number(value), 1)),
            |i| call(i, level),
            map(identifier, |name| (Node::Ident(name.to_string()), 1)),
            |i| group(i, level),
        ))(input)
    })(input)
}

fn call(input: &str, level: usize) -> IResult<&str, Tree> {
    let (rest, name) = identifier(input)?;
    let (rest, _) = symbol('(')(rest)?;
    let inner = descend(input, level)?;
    let (rest, (argument, height)) = expr(rest, inner)?;
    let (rest, _) = char(')')(rest)?;
    let height = taller(rest, height)?;
    Ok((rest, (Node::Call(name.to_string(), Box::new(argument)), height)))
}

fn group(input: &str, level: usize) -> IResult<&str, Tree> {
    let (rest, _) = char('(')(input)?;
    let inner = descend(input, level)?;
    let (rest, parsed) = expr(rest, inner)?;
    let (rest, _) = char(')')(rest)?;
    Ok((rest, parsed))
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

/// Unsigned decimal literal with optional fraction and exponent.
fn number(input: &str) -> IResult<&str, Real> {
    map_res(
        recognize(tuple((
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        str::parse::<Real>,
    )(input)
}
