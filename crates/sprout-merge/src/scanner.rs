//! Tolerant scanner for JSX opening tags.
//!
//! Finds every opening tag in a source file along with its attributes and
//! their byte spans. Anything that does not parse as an opening tag is
//! skipped, so closing tags, fragments, comparisons and generic parameters
//! never stop the scan.

use std::ops::Range;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{consumed, map, opt, recognize, value},
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

/// An opening or self-closing tag.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenTag<'a> {
    pub name: &'a str,
    pub attributes: Vec<Attribute<'a>>,
    /// Span from `<` to the closing `>` inclusive.
    pub span: Range<usize>,
    pub self_closing: bool,
}

impl<'a> OpenTag<'a> {
    /// First attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute<'a>> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Text of a quoted attribute value.
    pub fn quoted(&self, name: &str) -> Option<&'a str> {
        match self.attribute(name)?.value {
            Some(AttrValue::Quoted { text, .. }) => Some(text),
            _ => None,
        }
    }
}

/// A single attribute. Spread attributes have an empty name.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute<'a> {
    pub name: &'a str,
    pub value: Option<AttrValue<'a>>,
    /// Span of the whole attribute, name through value.
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue<'a> {
    /// `"..."` or `'...'`; `span` covers the text between the quotes.
    Quoted { text: &'a str, span: Range<usize> },
    /// `{...}`, braces included.
    Expression(&'a str),
}

/// Scan `source` for opening tags, in document order.
pub fn scan_open_tags(source: &str) -> Vec<OpenTag<'_>> {
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(found) = source[pos..].find('<') {
        let start = pos + found;
        match open_tag(&source[start..]) {
            Ok((rest, raw)) => {
                let end = source.len() - rest.len();
                tags.push(raw.locate(source, start..end));
                pos = end;
            }
            Err(_) => pos = start + 1,
        }
    }

    tags
}

struct RawTag<'a> {
    name: &'a str,
    attributes: Vec<(&'a str, RawAttribute<'a>)>,
    self_closing: bool,
}

struct RawAttribute<'a> {
    name: &'a str,
    value: Option<RawValue<'a>>,
}

#[derive(Clone, Copy)]
enum RawValue<'a> {
    Quoted(&'a str),
    Expression(&'a str),
}

impl<'a> RawTag<'a> {
    fn locate(self, source: &'a str, span: Range<usize>) -> OpenTag<'a> {
        let attributes = self
            .attributes
            .into_iter()
            .map(|(whole, attr)| {
                let start = offset(source, whole);
                Attribute {
                    name: attr.name,
                    value: attr.value.map(|value| match value {
                        RawValue::Quoted(text) => {
                            let at = offset(source, text);
                            AttrValue::Quoted {
                                text,
                                span: at..at + text.len(),
                            }
                        }
                        RawValue::Expression(expr) => AttrValue::Expression(expr),
                    }),
                    span: start..start + whole.len(),
                }
            })
            .collect();

        OpenTag {
            name: self.name,
            attributes,
            span,
            self_closing: self.self_closing,
        }
    }
}

/// Byte offset of `part` inside `base`. `part` must be a subslice of `base`.
fn offset(base: &str, part: &str) -> usize {
    part.as_ptr() as usize - base.as_ptr() as usize
}

fn open_tag(input: &str) -> IResult<&str, RawTag<'_>> {
    let (input, _) = char('<')(input)?;
    let (input, name) = tag_name(input)?;
    let (input, attributes) = many0(preceded(multispace1, consumed(attribute)))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, self_closing) = alt((value(true, tag("/>")), value(false, char('>'))))(input)?;

    Ok((
        input,
        RawTag {
            name,
            attributes,
            self_closing,
        },
    ))
}

fn tag_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ':')),
    ))(input)
}

fn attribute_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_' || c == '$'),
        take_while(|c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')),
    ))(input)
}

fn attribute(input: &str) -> IResult<&str, RawAttribute<'_>> {
    alt((
        map(braced, |expr| RawAttribute {
            name: "",
            value: Some(RawValue::Expression(expr)),
        }),
        map(
            pair(
                attribute_name,
                opt(preceded(
                    tuple((multispace0, char('='), multispace0)),
                    attribute_value,
                )),
            ),
            |(name, value)| RawAttribute { name, value },
        ),
    ))(input)
}

fn attribute_value(input: &str) -> IResult<&str, RawValue<'_>> {
    alt((
        map(quoted, RawValue::Quoted),
        map(braced, RawValue::Expression),
    ))(input)
}

fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
        delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
    ))(input)
}

/// A balanced `{...}` expression. String literals and block comments inside
/// are skipped so their braces do not count.
fn braced(input: &str) -> IResult<&str, &str> {
    char('{')(input)?;

    let bytes = input.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        match b {
            b'"' | b'\'' | b'`' => quote = Some(b),
            b'/' if bytes.get(i + 1) == Some(&b'*') => match input[i + 2..].find("*/") {
                Some(close) => {
                    i += close + 4;
                    continue;
                }
                None => break,
            },
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[i + 1..], &input[..i + 1]));
                }
            }
            _ => {}
        }
        i += 1;
    }

    Err(nom::Err::Error(Error::new(input, ErrorKind::Char)))
}
