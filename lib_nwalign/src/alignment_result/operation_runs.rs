use std::{fmt::Display, str::FromStr};

use nom::{
    IResult,
    character::complete::one_of,
    combinator::{map, opt},
    multi::many0,
    sequence::pair,
};

use crate::{
    error::{Error, Result},
    io::{ensure_consumed, parse_unsigned, translate_nom_error},
};

/// One column of a pairwise alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignmentOperation {
    /// A query symbol aligned to a target symbol, whether equal or not.
    Match,
    /// A target symbol aligned to a gap in the query.
    Insertion,
    /// A query symbol aligned to a gap in the target.
    Deletion,
}

impl AlignmentOperation {
    pub fn consumes_query(&self) -> bool {
        matches!(self, Self::Match | Self::Deletion)
    }

    pub fn consumes_target(&self) -> bool {
        matches!(self, Self::Match | Self::Insertion)
    }

    pub fn is_gap(&self) -> bool {
        !matches!(self, Self::Match)
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Match => 'M',
            Self::Insertion => 'I',
            Self::Deletion => 'D',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'M' => Some(Self::Match),
            'I' => Some(Self::Insertion),
            'D' => Some(Self::Deletion),
            _ => None,
        }
    }
}

impl Display for AlignmentOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A run-length encoded alignment, ordered from the first to the last column.
///
/// Consecutive equal operations are always merged into a single run,
/// so the rendered string is the shortest encoding of the alignment.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct OperationRuns {
    runs: Vec<(usize, AlignmentOperation)>,
}

impl OperationRuns {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            runs: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, operation: AlignmentOperation) {
        self.push_run(1, operation);
    }

    pub fn push_run(&mut self, count: usize, operation: AlignmentOperation) {
        if count == 0 {
            return;
        }

        if let Some((multiplicity, last_operation)) = self.runs.last_mut() {
            if *last_operation == operation {
                *multiplicity += count;
                return;
            }
        }
        self.runs.push((count, operation));
    }

    /// Reverses the order of the runs in place.
    pub fn reverse(&mut self) {
        self.runs.reverse();
    }

    /// Releases capacity beyond the stored runs.
    pub fn shrink_to_fit(&mut self) {
        self.runs.shrink_to_fit();
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.runs.capacity()
    }

    pub fn runs(&self) -> &[(usize, AlignmentOperation)] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn iter_flat(&self) -> impl Iterator<Item = AlignmentOperation> + '_ {
        self.runs
            .iter()
            .flat_map(|&(count, operation)| std::iter::repeat_n(operation, count))
    }

    /// The number of alignment columns.
    pub fn alignment_length(&self) -> usize {
        self.runs.iter().map(|(count, _)| count).sum()
    }

    /// The number of query symbols the alignment covers.
    pub fn query_length(&self) -> usize {
        self.consumed(AlignmentOperation::consumes_query)
    }

    /// The number of target symbols the alignment covers.
    pub fn target_length(&self) -> usize {
        self.consumed(AlignmentOperation::consumes_target)
    }

    fn consumed(&self, consumes: impl Fn(&AlignmentOperation) -> bool) -> usize {
        self.runs
            .iter()
            .filter(|(_, operation)| consumes(operation))
            .map(|(count, _)| count)
            .sum()
    }

    pub fn cigar(&self) -> String {
        self.to_string()
    }

    pub fn write_cigar(&self, writer: &mut impl std::fmt::Write) -> std::fmt::Result {
        for (count, operation) in &self.runs {
            if *count == 1 {
                write!(writer, "{operation}")?;
            } else {
                write!(writer, "{count}{operation}")?;
            }
        }

        Ok(())
    }

    /// Renders the aligned query and target rows, with `-` in place of gap symbols.
    pub fn gapped_rows(&self, query: &[u8], target: &[u8]) -> Result<(String, String)> {
        if self.query_length() != query.len() || self.target_length() != target.len() {
            return Err(Error::InvalidOperationRuns(format!(
                "{self} covers {} query and {} target symbols, but the sequences have lengths {} and {}",
                self.query_length(),
                self.target_length(),
                query.len(),
                target.len()
            )));
        }

        let alignment_length = self.alignment_length();
        let mut query_row = String::with_capacity(alignment_length);
        let mut target_row = String::with_capacity(alignment_length);
        let mut query = query.iter().copied().map(char::from);
        let mut target = target.iter().copied().map(char::from);

        for operation in self.iter_flat() {
            query_row.push(if operation.consumes_query() {
                query.next().unwrap_or('-')
            } else {
                '-'
            });
            target_row.push(if operation.consumes_target() {
                target.next().unwrap_or('-')
            } else {
                '-'
            });
        }

        Ok((query_row, target_row))
    }
}

impl Display for OperationRuns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_cigar(f)
    }
}

impl FromStr for OperationRuns {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let (rest, runs) = parse_runs(input).map_err(translate_nom_error)?;
        ensure_consumed(rest)?;

        let mut result = Self::with_capacity(runs.len());
        for (count, operation) in runs {
            match count {
                Some(0) => {
                    return Err(Error::InvalidOperationRuns(format!(
                        "zero-length run of {operation} in {input:?}"
                    )));
                }
                count => result.push_run(count.unwrap_or(1), operation),
            }
        }
        Ok(result)
    }
}

impl From<Vec<(usize, AlignmentOperation)>> for OperationRuns {
    fn from(runs: Vec<(usize, AlignmentOperation)>) -> Self {
        let mut result = Self::with_capacity(runs.len());
        for (count, operation) in runs {
            result.push_run(count, operation);
        }
        result
    }
}

impl From<OperationRuns> for String {
    fn from(runs: OperationRuns) -> Self {
        runs.to_string()
    }
}

impl TryFrom<String> for OperationRuns {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

fn parse_runs(input: &str) -> IResult<&str, Vec<(Option<usize>, AlignmentOperation)>> {
    many0(pair(
        opt(parse_unsigned::<usize>),
        map(one_of("MID"), |symbol| {
            AlignmentOperation::from_symbol(symbol).unwrap_or(AlignmentOperation::Match)
        }),
    ))(input)
}
