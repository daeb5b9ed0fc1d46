//! Effect text parser
//!
//! An effect cell holds one effect per line:
//!
//! ```text
//! Damage, 3, Hero, Spell
//! Poison, 2
//! BuffStat, 2, , , stat=Health, turns=2, percent
//! Taunt
//! ```
//!
//! Fields are `kind, amount, target, damage type, extras...`. Trailing fields
//! may be left off and empty fields count as absent.

use crate::core::{EffectInput, EffectPayload};
use crate::loader::kinds::EffectKindTable;
use crate::loader::normalize::{
    parse_label, parse_optional_int, parse_optional_label, parse_required_int,
};
use crate::logger::SeedLogger;
use crate::{Result, SeedError};
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till},
    character::complete::{char, space0},
    combinator::{all_consuming, map, rest, value},
    multi::separated_list1,
    sequence::{delimited, preceded, terminated},
    IResult,
};

/// Optional trailing setting on an effect line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Extra<'a> {
    Stat(&'a str),
    Turns(&'a str),
    Percent,
}

fn fields(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(separated_list1(char(','), take_till(|c: char| c == ',')))(input)
}

fn key<'a>(name: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(tag_no_case(name), delimited(space0, char('='), space0))
}

fn extra(input: &str) -> IResult<&str, Extra<'_>> {
    all_consuming(alt((
        map(preceded(key("stat"), rest), Extra::Stat),
        map(preceded(key("turns"), rest), Extra::Turns),
        value(Extra::Percent, alt((tag_no_case("percent"), tag("%")))),
    )))(input)
}

fn apply_extra(payload: &mut EffectPayload, raw: &str) -> Result<()> {
    let (_, parsed) = extra(raw).map_err(|_| {
        SeedError::malformed("extra", raw, "expected stat=<Stat>, turns=<n> or percent")
    })?;

    match parsed {
        Extra::Stat(stat) => payload.stat = Some(parse_label("stat", stat)?),
        Extra::Turns(turns) => payload.duration = Some(parse_required_int("duration", turns)?),
        Extra::Percent => payload.percentage = true,
    }
    Ok(())
}

/// Parse one effect line
///
/// An unknown kind name is not an error here: it resolves to
/// `EffectKindRef::Unrecognized` and the builder reports it. Bad numbers or
/// labels fail this line only.
pub fn parse_effect_line(line: &str, table: &EffectKindTable) -> Result<EffectInput> {
    let trimmed = line.trim();
    let (_, parts) = fields(trimmed)
        .map_err(|e| SeedError::ParseError(format!("effect line {trimmed:?}: {e}")))?;

    let mut parts = parts.into_iter().map(str::trim);

    let name = parts.next().unwrap_or_default();
    if name.is_empty() {
        return Err(SeedError::malformed("effect", trimmed, "effect name is empty"));
    }
    let kind = table.resolve(name);

    let mut payload = EffectPayload {
        amount: parse_optional_int("amount", parts.next().unwrap_or_default())?,
        target_type: parse_optional_label(parts.next().unwrap_or_default())?,
        damage_type: parse_optional_label(parts.next().unwrap_or_default())?,
        ..Default::default()
    };

    for raw in parts.filter(|raw| !raw.is_empty()) {
        apply_extra(&mut payload, raw)?;
    }

    Ok(EffectInput { kind, payload })
}

/// Parse a multi-line effect cell
///
/// Blank lines are ignored. A line that fails to parse is logged against
/// `card_name` and left out; the remaining lines still parse.
pub fn parse_effect_cell(
    cell: &str,
    table: &EffectKindTable,
    logger: &SeedLogger,
    card_name: &str,
) -> Vec<EffectInput> {
    cell.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match parse_effect_line(line, table) {
            Ok(input) => Some(input),
            Err(error) => {
                logger.warn(
                    "effect",
                    &format!("Skipping effect {line:?} for card {card_name}: {error}"),
                );
                None
            }
        })
        .collect()
}
