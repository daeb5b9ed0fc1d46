//! Spreadsheet CSV export reader
//!
//! Cells are comma separated. A cell wrapped in double quotes may contain
//! commas, line breaks and `""` for a literal quote. Records end with `\n`
//! or `\r\n`.

use crate::{Result, SeedError};
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_till},
    character::complete::char,
    combinator::{map, value, verify},
    multi::{fold_many0, separated_list1},
    sequence::delimited,
    IResult,
};

fn quoted_body(input: &str) -> IResult<&str, String> {
    fold_many0(
        alt((value("\"", tag("\"\"")), is_not("\""))),
        String::new,
        |mut acc, part| {
            acc.push_str(part);
            acc
        },
    )(input)
}

fn quoted_cell(input: &str) -> IResult<&str, String> {
    delimited(char('"'), quoted_body, char('"'))(input)
}

/// Unquoted cell; may be empty but may not open with a quote
fn plain_cell(input: &str) -> IResult<&str, String> {
    map(
        verify(take_till(|c: char| c == ',' || c == '\n' || c == '\r'), |s: &str| {
            !s.starts_with('"')
        }),
        str::to_string,
    )(input)
}

fn record(input: &str) -> IResult<&str, Vec<String>> {
    separated_list1(char(','), alt((quoted_cell, plain_cell)))(input)
}

fn record_end(input: &str) -> IResult<&str, &str> {
    alt((tag("\r\n"), tag("\n")))(input)
}

/// Parse a whole CSV document into records of cells
///
/// Blank lines come back as a single empty cell; callers decide whether to
/// skip them.
pub fn parse_csv(input: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut remaining = input.strip_prefix('\u{feff}').unwrap_or(input);

    while !remaining.is_empty() {
        let number = records.len() + 1;
        let (after, cells) = record(remaining)
            .map_err(|e| SeedError::ParseError(format!("CSV record {number}: {e}")))?;

        remaining = if after.is_empty() {
            after
        } else {
            match record_end(after) {
                Ok((next, _)) => next,
                Err(_) => {
                    let context: String = after.chars().take(20).collect();
                    return Err(SeedError::ParseError(format!(
                        "CSV record {number}: unexpected text after cell: {context:?}"
                    )));
                }
            }
        };
        records.push(cells);
    }

    Ok(records)
}

/// True when every cell is empty or whitespace
pub fn is_blank_record(cells: &[String]) -> bool {
    cells.iter().all(|cell| cell.trim().is_empty())
}
