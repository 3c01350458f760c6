//! Reusable buffers of the aligner.

use std::ops::{BitOr, BitOrAssign};

use log::debug;
use ndarray::ArrayViewMut2;

use crate::{
    error::{Error, Result},
    score::Score,
};

/// Traceback information of one cell of the dynamic programming matrix.
///
/// The four flags are independent, any subset may be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct DirectionFlags(u8);

impl DirectionFlags {
    pub const EMPTY: Self = Self(0);
    /// The best score of the cell ends in a gap in the target.
    pub const UP: Self = Self(1);
    /// The best score of the cell ends in a gap in the query.
    pub const LEFT: Self = Self(2);
    /// The gap in the target leaving this cell extends a gap instead of opening one.
    pub const EXTEND_UP: Self = Self(4);
    /// The gap in the query leaving this cell extends a gap instead of opening one.
    pub const EXTEND_LEFT: Self = Self(8);

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for DirectionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DirectionFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Buffers for aligning sequence pairs, grown on demand and never shrunk.
///
/// A workspace belongs to a single caller at a time.
/// Reusing it across alignments avoids reallocating for every pair.
#[derive(Debug, Default)]
pub struct AlignmentWorkspace {
    directions: Vec<DirectionFlags>,
    scores: Vec<Score>,
}

impl AlignmentWorkspace {
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a workspace that can align sequences of the given lengths without growing.
    pub fn with_capacity(query_length: usize, target_length: usize) -> Result<Self> {
        let mut workspace = Self::new();
        workspace.ensure_capacity(query_length, target_length)?;
        Ok(workspace)
    }

    /// Grows the buffers to hold `query_length * target_length` direction cells
    /// and `2 * query_length` running scores.
    pub fn ensure_capacity(&mut self, query_length: usize, target_length: usize) -> Result<()> {
        let direction_cells = query_length.checked_mul(target_length).ok_or(
            Error::WorkspaceAllocation {
                requested_bytes: usize::MAX,
            },
        )?;
        let score_slots = query_length
            .checked_mul(2)
            .ok_or(Error::WorkspaceAllocation {
                requested_bytes: usize::MAX,
            })?;

        grow(&mut self.directions, direction_cells, DirectionFlags::EMPTY)?;
        grow(&mut self.scores, score_slots, Score::ZERO)?;
        Ok(())
    }

    pub fn direction_capacity(&self) -> usize {
        self.directions.len()
    }

    pub fn score_capacity(&self) -> usize {
        self.scores.len()
    }

    /// Returns the zeroed direction matrix indexed by `[target_index, query_index]`
    /// and the running score slots of one alignment.
    ///
    /// [`ensure_capacity`](Self::ensure_capacity) must have been called with the same lengths.
    pub(crate) fn prepare(
        &mut self,
        query_length: usize,
        target_length: usize,
    ) -> (ArrayViewMut2<'_, DirectionFlags>, &mut [Score]) {
        let direction_cells = query_length * target_length;
        let directions = &mut self.directions[..direction_cells];
        directions.fill(DirectionFlags::EMPTY);

        let directions = ArrayViewMut2::from_shape((target_length, query_length), directions)
            .unwrap_or_else(|error| {
                unreachable!("direction buffer has exactly the requested size: {error}")
            });
        (directions, &mut self.scores[..2 * query_length])
    }
}

fn grow<T: Copy>(buffer: &mut Vec<T>, length: usize, value: T) -> Result<()> {
    if length <= buffer.len() {
        return Ok(());
    }

    let requested_bytes = length.saturating_mul(size_of::<T>());
    debug!(
        "Growing workspace buffer from {} to {length} entries ({requested_bytes} bytes)",
        buffer.len()
    );
    buffer
        .try_reserve_exact(length - buffer.len())
        .map_err(|_| Error::WorkspaceAllocation { requested_bytes })?;
    buffer.resize(length, value);
    Ok(())
}
