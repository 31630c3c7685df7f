//! Low-level nom parser functions for CSS color values.
//!
//! Only the legacy numeric forms (`#rgb`, `#rrggbb`, `rgb()`, `rgba()` and a
//! handful of keywords) are parsed into a [`Color`]. Modern color functions
//! are recognised, never converted.

use folio_types::Color;
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while_m_n};
use nom::character::complete::{char, space0};
use nom::combinator::{map, map_res, opt};
use nom::number::complete::float;
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Function names a legacy rasterizer cannot parse.
pub const MODERN_COLOR_FUNCTIONS: &[&str] =
    &["oklch", "oklab", "lab", "lch", "hwb", "color", "color-mix"];

// --- Helper Parsers ---

fn ws<'a, O, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(space0, inner, space0)
}

fn number(input: &str) -> IResult<&str, f32> {
    float(input)
}

/// A color channel: `0..=255` or a percentage.
fn channel(input: &str) -> IResult<&str, u8> {
    map(pair(number, opt(char('%'))), |(value, percent)| {
        let scaled = if percent.is_some() { value * 2.55 } else { value };
        scaled.round().clamp(0.0, 255.0) as u8
    })
    .parse(input)
}

fn alpha(input: &str) -> IResult<&str, f32> {
    map(pair(number, opt(char('%'))), |(value, percent)| {
        let a = if percent.is_some() { value / 100.0 } else { value };
        a.clamp(0.0, 1.0)
    })
    .parse(input)
}

// --- Color Parsers ---

fn from_hex(input: &str) -> Result<u8, std::num::ParseIntError> {
    u8::from_str_radix(input, 16)
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn hex_primary(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, is_hex_digit), from_hex).parse(input)
}

fn hex_doubled(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(1, 1, is_hex_digit), |s: &str| {
        from_hex(&s.repeat(2))
    })
    .parse(input)
}

fn hex_color_6(input: &str) -> IResult<&str, Color> {
    map((hex_primary, hex_primary, hex_primary), |(r, g, b)| {
        Color::rgb(r, g, b)
    })
    .parse(input)
}

fn hex_color_3(input: &str) -> IResult<&str, Color> {
    map((hex_doubled, hex_doubled, hex_doubled), |(r, g, b)| {
        Color::rgb(r, g, b)
    })
    .parse(input)
}

/// Parses a hex color (e.g., "#FF0000" or "#F00").
pub fn parse_hex_color(input: &str) -> IResult<&str, Color> {
    preceded(char('#'), alt((hex_color_6, hex_color_3))).parse(input)
}

/// Parses `rgb()`/`rgba()` in both the comma and the space-separated syntax.
pub fn parse_rgb_function(input: &str) -> IResult<&str, Color> {
    map(
        (
            alt((tag_no_case("rgba"), tag_no_case("rgb"))),
            ws(char('(')),
            ws(channel),
            opt(char(',')),
            ws(channel),
            opt(char(',')),
            ws(channel),
            opt(preceded(alt((char(','), char('/'))), ws(alpha))),
            char(')'),
        ),
        |(_, _, r, _, g, _, b, a, _)| Color::rgba(r, g, b, a.unwrap_or(1.0)),
    )
    .parse(input)
}

fn named_color(input: &str) -> IResult<&str, Color> {
    alt((
        map(tag_no_case("transparent"), |_| Color::transparent()),
        map(tag_no_case("black"), |_| Color::rgb(0, 0, 0)),
        map(tag_no_case("white"), |_| Color::white()),
        map(tag_no_case("red"), |_| Color::rgb(255, 0, 0)),
        map(tag_no_case("green"), |_| Color::rgb(0, 128, 0)),
        map(tag_no_case("blue"), |_| Color::rgb(0, 0, 255)),
        map(tag_no_case("gray"), |_| Color::gray(128)),
        map(tag_no_case("grey"), |_| Color::gray(128)),
    ))
    .parse(input)
}

/// Parses any color form this crate understands.
pub fn parse_color(input: &str) -> IResult<&str, Color> {
    alt((parse_hex_color, parse_rgb_function, named_color)).parse(input)
}

/// Helper to run a nom parser and convert its result to a `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, F>(mut parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>>,
{
    match parser.parse(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}

// --- High-level Functions ---

pub fn parse_color_value(value: &str) -> Result<Color, StyleParseError> {
    run_parser(parse_color, value)
}

/// True when `value` is exactly one legacy `rgb()`/`rgba()` triplet.
pub fn is_legacy_triplet(value: &str) -> bool {
    run_parser(parse_rgb_function, value).is_ok()
}

/// True when `value` calls any function in [`MODERN_COLOR_FUNCTIONS`],
/// anywhere in the value (shadow lists included).
pub fn contains_modern_color_function(value: &str) -> bool {
    calls_any(value, MODERN_COLOR_FUNCTIONS)
}

/// True when `value` calls `rgb()` or `rgba()` anywhere, as computed shadow
/// lists do.
pub fn contains_legacy_color_function(value: &str) -> bool {
    calls_any(value, &["rgb", "rgba"])
}

fn calls_any(value: &str, names: &[&str]) -> bool {
    let lower = value.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    lower.match_indices('(').any(|(open, _)| {
        let start = bytes[..open]
            .iter()
            .rposition(|b| !(b.is_ascii_alphanumeric() || *b == b'-'))
            .map(|i| i + 1)
            .unwrap_or(0);
        names.contains(&&lower[start..open])
    })
}

/// `transparent`, or any legacy color whose alpha is zero.
pub fn is_fully_transparent(value: &str) -> bool {
    parse_color_value(value)
        .map(|c| c.is_transparent())
        .unwrap_or(false)
}
