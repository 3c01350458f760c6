use std::fmt::Display;

use crate::score::Score;

pub mod io;

/// The sequence that receives the gap symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapSide {
    /// A gap in the query, i.e. target symbols aligned to nothing.
    Query,
    /// A gap in the target, i.e. query symbols aligned to nothing.
    Target,
}

/// Where a gap sits relative to the sequence that contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapPosition {
    /// Before the first symbol.
    Left,
    Interior,
    /// After the last symbol.
    Right,
}

impl GapPosition {
    pub const ALL: [GapPosition; 3] = [GapPosition::Left, GapPosition::Interior, GapPosition::Right];

    /// Classifies a gap by the number of symbols of its sequence that precede it.
    ///
    /// A gap in an empty sequence is a left gap.
    #[inline]
    pub fn classify(preceding_symbols: usize, sequence_length: usize) -> Self {
        if preceding_symbols == 0 {
            Self::Left
        } else if preceding_symbols < sequence_length {
            Self::Interior
        } else {
            Self::Right
        }
    }
}

/// Affine costs of a gap: `open` once per gap run and `extend` per gap symbol, including the first.
///
/// Both are penalties, i.e. they are subtracted from the alignment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GapCosts {
    pub open: Score,
    pub extend: Score,
}

impl GapCosts {
    pub const fn new(open: i64, extend: i64) -> Self {
        Self {
            open: Score::new(open),
            extend: Score::new(extend),
        }
    }

    /// The penalty of a single gap run of the given length.
    #[inline]
    pub fn penalty(&self, length: usize) -> Score {
        if length == 0 {
            Score::ZERO
        } else {
            self.open + self.extend.times(length)
        }
    }

    /// The penalty of the first symbol of a gap run.
    #[inline]
    pub fn open_and_extend(&self) -> Score {
        self.open + self.extend
    }
}

/// Gap costs for every combination of [`GapSide`] and [`GapPosition`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GapCostSet {
    pub query_left: GapCosts,
    pub query_interior: GapCosts,
    pub query_right: GapCosts,
    pub target_left: GapCosts,
    pub target_interior: GapCosts,
    pub target_right: GapCosts,
}

impl GapCostSet {
    /// Uses the same costs regardless of side and position.
    pub fn uniform(costs: GapCosts) -> Self {
        Self::from_terminal_interior(costs, costs)
    }

    /// Uses `terminal` for left and right gaps and `interior` for all others, on both sides.
    pub fn from_terminal_interior(terminal: GapCosts, interior: GapCosts) -> Self {
        Self {
            query_left: terminal,
            query_interior: interior,
            query_right: terminal,
            target_left: terminal,
            target_interior: interior,
            target_right: terminal,
        }
    }

    pub fn get(&self, side: GapSide, position: GapPosition) -> &GapCosts {
        match (side, position) {
            (GapSide::Query, GapPosition::Left) => &self.query_left,
            (GapSide::Query, GapPosition::Interior) => &self.query_interior,
            (GapSide::Query, GapPosition::Right) => &self.query_right,
            (GapSide::Target, GapPosition::Left) => &self.target_left,
            (GapSide::Target, GapPosition::Interior) => &self.target_interior,
            (GapSide::Target, GapPosition::Right) => &self.target_right,
        }
    }

    pub fn get_mut(&mut self, side: GapSide, position: GapPosition) -> &mut GapCosts {
        match (side, position) {
            (GapSide::Query, GapPosition::Left) => &mut self.query_left,
            (GapSide::Query, GapPosition::Interior) => &mut self.query_interior,
            (GapSide::Query, GapPosition::Right) => &mut self.query_right,
            (GapSide::Target, GapPosition::Left) => &mut self.target_left,
            (GapSide::Target, GapPosition::Interior) => &mut self.target_interior,
            (GapSide::Target, GapPosition::Right) => &mut self.target_right,
        }
    }

    /// The costs of a gap in `side` after `preceding_symbols` symbols of a sequence of length `sequence_length`.
    #[inline]
    pub fn for_gap(
        &self,
        side: GapSide,
        preceding_symbols: usize,
        sequence_length: usize,
    ) -> &GapCosts {
        self.get(
            side,
            GapPosition::classify(preceding_symbols, sequence_length),
        )
    }
}

impl Default for GapCostSet {
    /// Terminal gaps open at 2 and extend at 1, interior gaps open at 20 and extend at 2.
    fn default() -> Self {
        Self::from_terminal_interior(GapCosts::new(2, 1), GapCosts::new(20, 2))
    }
}

impl Display for GapCostSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut separator = "";
        for (side, side_name) in [(GapSide::Query, "query"), (GapSide::Target, "target")] {
            for (position, position_name) in GapPosition::ALL
                .into_iter()
                .zip(["left", "interior", "right"])
            {
                let costs = self.get(side, position);
                write!(
                    f,
                    "{separator}{side_name} {position_name}: {}+{}n",
                    costs.open, costs.extend
                )?;
                separator = ", ";
            }
        }
        Ok(())
    }
}
