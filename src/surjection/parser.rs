//! Parsing surjection elements from the format produced by their `Display` implementation, for
//! instance `(1,3,1,2,1,4) - 2 * (1,2,3,2,1,4)`.

use std::str::FromStr;

use anyhow::{anyhow, Context};
use nom::{
    branch::alt,
    character::complete::{char, digit1, space0},
    combinator::{all_consuming, map, map_res, opt, value},
    error::{context, ParseError, VerboseError},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, terminated},
    IResult as IResultBase, Parser,
};

use super::SurjectionElement;
use crate::Convention;

type IResult<I, O> = IResultBase<I, O, VerboseError<I>>;

/// A list of sequences with their coefficients.
type Terms = Vec<(Vec<u32>, i64)>;

/// Pad both ends with whitespace
fn space<'a, O, E: ParseError<&'a str>, F: Parser<&'a str, O, E>>(
    f: F,
) -> impl FnMut(&'a str) -> IResultBase<&'a str, O, E> {
    delimited(space0, f, space0)
}

fn digits<T: FromStr>(i: &str) -> IResult<&str, T> {
    map_res(space(digit1), FromStr::from_str)(i)
}

fn sign(i: &str) -> IResult<&str, i64> {
    space(alt((value(1, char('+')), value(-1, char('-')))))(i)
}

fn sequence(i: &str) -> IResult<&str, Vec<u32>> {
    context(
        "sequence",
        space(delimited(
            char('('),
            separated_list1(char(','), digits),
            char(')'),
        )),
    )(i)
}

/// A sequence with an optional coefficient in front, as in `(1,2)`, `3(1,2)` or `3 * (1,2)`.
fn term(i: &str) -> IResult<&str, (Vec<u32>, i64)> {
    let (i, coeff) = opt(terminated(digits, opt(space(char('*')))))(i)?;
    let (i, seq) = sequence(i)?;
    Ok((i, (seq, coeff.unwrap_or(1))))
}

fn terms(i: &str) -> IResult<&str, Terms> {
    let (i, first_sign) = opt(sign)(i)?;
    let (i, (first, coeff)) = term(i)?;
    let (i, rest) = many0(pair(sign, term))(i)?;

    let mut result = vec![(first, first_sign.unwrap_or(1) * coeff)];
    result.extend(rest.into_iter().map(|(s, (seq, c))| (seq, s * c)));
    Ok((i, result))
}

fn element(i: &str) -> IResult<&str, Terms> {
    let zero = all_consuming(map(space(char('0')), |_| Vec::new()));
    all_consuming(alt((zero, terms)))(i)
}

fn convert_error(i: &str) -> impl FnOnce(nom::Err<VerboseError<&str>>) -> anyhow::Error + '_ {
    move |err| {
        anyhow!(match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => nom::error::convert_error(i, e),
            _ => format!("{err:#}"),
        })
    }
}

impl FromStr for SurjectionElement {
    type Err = anyhow::Error;

    /// Parses an integral element in the default convention.
    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (_, terms) = element(s)
            .map_err(convert_error(s))
            .with_context(|| format!("Error when parsing surjection element {s}"))?;
        Ok(Self::from_terms(terms, None, Convention::default())?)
    }
}
