use anyhow::Result;
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_while},
    character::complete::{alpha1, alphanumeric1, char, multispace1},
    combinator::{all_consuming, map, opt, recognize, value, verify},
    multi::{fold_many0, many0_count, many1_count, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
    IResult,
};

use crate::error::{error, Error};

use super::{IoDirectives, IoKind, QualifiedName};

pub(super) fn parse(i: &str) -> Result<IoDirectives> {
    match all_consuming(terminated(io_directives, sp))(i) {
        Ok((_, io)) => Ok(io),
        Err(e) => error(Error::IoParseError(e.to_string())),
    }
}

fn sp(i: &str) -> IResult<&str, &str> {
    let chars = " \t\r\n";

    take_while(move |c| chars.contains(c))(i)
}

fn kind(i: &str) -> IResult<&str, IoKind> {
    preceded(
        char('.'),
        alt((
            value(IoKind::Input, tag("input")),
            value(IoKind::Output, tag("output")),
            value(IoKind::Printsize, tag("printsize")),
            value(IoKind::Limitsize, tag("limitsize")),
        )),
    )(i)
}

fn identifier(i: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ))(i)
}

fn qualified_name(i: &str) -> IResult<&str, QualifiedName> {
    map(separated_list1(char('.'), identifier), |segments: Vec<&str>| {
        QualifiedName::new(segments)
    })(i)
}

fn key(i: &str) -> IResult<&str, &str> {
    recognize(many1_count(alt((alphanumeric1, tag("_"), tag(".")))))(i)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringFragment<'a> {
    Literal(&'a str),
    EscapedChar(char),
}

fn escaped_char(i: &str) -> IResult<&str, char> {
    preceded(
        char('\\'),
        alt((
            value('\n', char('n')),
            value('\r', char('r')),
            value('\t', char('t')),
            value('\\', char('\\')),
            value('"', char('"')),
        )),
    )(i)
}

fn fragment(i: &str) -> IResult<&str, StringFragment<'_>> {
    alt((
        map(
            verify(is_not("\"\\"), |s: &str| !s.is_empty()),
            StringFragment::Literal,
        ),
        map(escaped_char, StringFragment::EscapedChar),
    ))(i)
}

fn string(i: &str) -> IResult<&str, String> {
    let build_string = fold_many0(fragment, String::new, |mut string, fragment| {
        match fragment {
            StringFragment::Literal(s) => string.push_str(s),
            StringFragment::EscapedChar(c) => string.push(c),
        }
        string
    });

    delimited(char('"'), build_string, char('"'))(i)
}

fn directive(i: &str) -> IResult<&str, (String, String)> {
    map(
        separated_pair(
            preceded(sp, key),
            preceded(sp, char('=')),
            preceded(sp, string),
        ),
        |(k, v)| (k.to_owned(), v),
    )(i)
}

fn directives(i: &str) -> IResult<&str, Vec<(String, String)>> {
    delimited(
        preceded(sp, char('(')),
        separated_list0(preceded(sp, char(',')), directive),
        preceded(sp, char(')')),
    )(i)
}

fn io_directives(i: &str) -> IResult<&str, IoDirectives> {
    map(
        tuple((
            preceded(sp, kind),
            preceded(multispace1, qualified_name),
            opt(directives),
        )),
        |(kind, name, directives)| {
            let mut io = IoDirectives::new(kind, name);

            for (k, v) in directives.unwrap_or_default() {
                io.add_directive(k, v);
            }

            io
        },
    )(i)
}
