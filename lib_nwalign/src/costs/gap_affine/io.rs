//! Parsing of gap penalty strings such as `20I/2E` or `*TE/10`.
//!
//! A string is a `/`-separated list of tokens. Each token is a non-negative
//! number or `*` (a forbidding penalty) followed by letters that select which
//! of the six gap cost pairs it applies to:
//! `Q` and `T` select the side, `I` interior gaps, `L` and `R` left and right
//! terminal gaps, and `E` both terminal positions. Without side letters a token
//! applies to both sides, and without position letters to all positions.
//! Later tokens override earlier ones.

use log::trace;
use nom::{
    IResult,
    branch::alt,
    character::complete::{char, one_of},
    combinator::map,
    multi::{many0, separated_list1},
    sequence::{delimited, pair},
};

use super::{GapCostSet, GapPosition, GapSide};
use crate::{
    error::{Error, Result},
    io::{ensure_consumed, parse_unsigned, parse_whitespace, translate_nom_error},
    score::Score,
};


/// The penalty that `*` stands for.
pub const FORBIDDING_GAP_PENALTY: i64 = 1000;

/// Which half of a [`GapCosts`](super::GapCosts) pair a penalty string sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapPenaltyComponent {
    Open,
    Extend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PenaltyToken {
    penalty: i64,
    selectors: Vec<char>,
}

impl GapCostSet {
    /// Creates the default costs and overrides them with the given open and extend penalty strings.
    pub fn from_penalty_strings(open: &str, extend: &str) -> Result<Self> {
        let mut result = Self::default();
        result.apply_penalty_string(open, GapPenaltyComponent::Open)?;
        result.apply_penalty_string(extend, GapPenaltyComponent::Extend)?;
        Ok(result)
    }

    /// Overrides the selected component of all gap cost pairs named in the penalty string.
    pub fn apply_penalty_string(
        &mut self,
        penalty_string: &str,
        component: GapPenaltyComponent,
    ) -> Result<()> {
        if penalty_string.trim().is_empty() {
            return Err(Error::InvalidGapPenalty(
                "the penalty string is empty".to_string(),
            ));
        }

        let (rest, tokens) = parse_penalty_tokens(penalty_string).map_err(translate_nom_error)?;
        ensure_consumed(rest)?;

        for token in tokens {
            let (sides, positions) = token.selection();
            trace!(
                "Setting {component:?} of {sides:?} x {positions:?} to {}",
                token.penalty
            );

            for &side in &sides {
                for &position in &positions {
                    let costs = self.get_mut(side, position);
                    let value = Score::new(token.penalty);
                    match component {
                        GapPenaltyComponent::Open => costs.open = value,
                        GapPenaltyComponent::Extend => costs.extend = value,
                    }
                }
            }
        }

        Ok(())
    }
}

impl PenaltyToken {
    fn selection(&self) -> (Vec<GapSide>, Vec<GapPosition>) {
        let mut sides = Vec::new();
        let mut positions = Vec::new();

        for selector in &self.selectors {
            match selector {
                'Q' => sides.push(GapSide::Query),
                'T' => sides.push(GapSide::Target),
                'I' => positions.push(GapPosition::Interior),
                'L' => positions.push(GapPosition::Left),
                'R' => positions.push(GapPosition::Right),
                'E' => positions.extend([GapPosition::Left, GapPosition::Right]),
                _ => unreachable!("the parser only accepts selector letters"),
            }
        }

        if sides.is_empty() {
            sides.extend([GapSide::Query, GapSide::Target]);
        }
        if positions.is_empty() {
            positions.extend(GapPosition::ALL);
        }
        sides.dedup();
        positions.sort_by_key(|position| *position as u8);
        positions.dedup();

        (sides, positions)
    }
}

fn parse_penalty_tokens(input: &str) -> IResult<&str, Vec<PenaltyToken>> {
    separated_list1(
        delimited(parse_whitespace, char('/'), parse_whitespace),
        parse_penalty_token,
    )(input)
}

fn parse_penalty_token(input: &str) -> IResult<&str, PenaltyToken> {
    let (input, _) = parse_whitespace(input)?;
    map(
        pair(
            alt((
                map(char('*'), |_| FORBIDDING_GAP_PENALTY),
                parse_unsigned::<i64>,
            )),
            many0(one_of("QTILRE")),
        ),
        |(penalty, selectors)| PenaltyToken { penalty, selectors },
    )(input)
}
