use nom::{
    IResult,
    character::complete::{digit1, satisfy},
    combinator::map_res,
    multi::many0,
};

use crate::error::Error;

pub fn skip_whitespace(
    input: &str,
) -> std::result::Result<&str, nom::Err<nom::error::Error<&str>>> {
    many0(satisfy(char::is_whitespace))(input).map(|(input, _)| input)
}

pub fn parse_whitespace(input: &str) -> IResult<&str, ()> {
    skip_whitespace(input).map(|input| (input, ()))
}

/// Parses a decimal number without sign.
pub fn parse_unsigned<Number: std::str::FromStr>(input: &str) -> IResult<&str, Number> {
    map_res(digit1, |digits: &str| digits.parse::<Number>())(input)
}

pub fn translate_nom_error(error: nom::Err<nom::error::Error<&str>>) -> Error {
    match error {
        nom::Err::Incomplete(needed) => Error::ParserIncomplete(needed),
        nom::Err::Error(error) | nom::Err::Failure(error) => Error::Parser {
            input: error.input.to_string(),
            kind: error.code,
        },
    }
}

/// Fails if a parser left anything but whitespace behind.
pub fn ensure_consumed(input: &str) -> Result<(), Error> {
    let rest = skip_whitespace(input).map_err(translate_nom_error)?;
    if rest.is_empty() {
        Ok(())
    } else {
        Err(Error::Parser {
            input: rest.to_string(),
            kind: nom::error::ErrorKind::Eof,
        })
    }
}
