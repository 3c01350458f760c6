use anyhow::{Result, anyhow};
use log::debug;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use utf8_chars::BufReadCharsExt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FastaRecord {
    pub id: String,
    pub comment: String,
    /// The sequence with all whitespace removed.
    pub sequence: String,
}

/// Parses a fasta file containing exactly two records.
pub fn parse_pair_fasta_file(path: impl AsRef<Path>) -> Result<(FastaRecord, FastaRecord)> {
    let records = parse_fasta_file(path)?;
    let record_count = records.len();
    let mut records = records.into_iter();

    match (records.next(), records.next(), records.next()) {
        (Some(first), Some(second), None) => Ok((first, second)),
        _ => Err(anyhow!(
            "Expected paired fasta file with two records, but found {record_count} records"
        )),
    }
}

/// Parses a fasta file containing at least one record.
pub fn parse_fasta_file(path: impl AsRef<Path>) -> Result<Vec<FastaRecord>> {
    let path = path.as_ref();
    debug!("Parsing fasta file {path:?}");

    let file =
        File::open(path).map_err(|error| anyhow!("Unable to open input file {path:?}: {error}"))?;
    let records = parse_fasta(file)?;
    debug!("Found {} records in {path:?}", records.len());
    Ok(records)
}

fn parse_fasta(reader: impl Read) -> Result<Vec<FastaRecord>> {
    #[derive(Clone, Copy)]
    enum State {
        FileStart,
        Id,
        Comment,
        Sequence,
    }

    let input = CharacterIterator::new(BufReader::new(reader));
    let mut state = State::FileStart;
    let mut line_start = true;
    let mut current = FastaRecord::default();
    let mut records = Vec::new();

    for character in input {
        match (state, character?) {
            (State::FileStart, Character::Newline) => line_start = true,
            (State::FileStart, Character::RecordStart) => {
                if !line_start {
                    return Err(anyhow!(
                        "First fasta record is not preceded by a newline character"
                    ));
                }
                state = State::Id;
            }
            (State::FileStart, Character::Other(c)) => {
                if !c.is_whitespace() {
                    return Err(anyhow!(
                        "Found non-whitespace character before first fasta record: {c}"
                    ));
                }
                line_start = false;
            }

            (State::Id | State::Comment, Character::Newline) => {
                state = State::Sequence;
                line_start = true;
            }
            (State::Id, Character::Other(c)) if c.is_whitespace() => state = State::Comment,
            (State::Id, Character::Other(c)) => current.id.push(c),
            (State::Id, Character::RecordStart) => current.id.push('>'),
            (State::Comment, Character::Other(c)) => current.comment.push(c),
            (State::Comment, Character::RecordStart) => current.comment.push('>'),

            (State::Sequence, Character::Newline) => line_start = true,
            (State::Sequence, Character::RecordStart) if line_start => {
                records.push(std::mem::take(&mut current));
                state = State::Id;
            }
            (State::Sequence, Character::RecordStart) => {
                return Err(anyhow!(
                    "Record start character inside sequence of fasta record {}",
                    current.id
                ));
            }
            (State::Sequence, Character::Other(c)) => {
                if !c.is_whitespace() {
                    current.sequence.push(c);
                }
                line_start = false;
            }
        }
    }

    match state {
        State::FileStart => Err(anyhow!("Input contains no fasta record")),
        _ => {
            records.push(current);
            Ok(records)
        }
    }
}

enum Character {
    Newline,
    RecordStart,
    Other(char),
}

struct CharacterIterator<Reader: Read> {
    reader: BufReader<Reader>,
}

impl<Reader: Read> CharacterIterator<Reader> {
    fn new(reader: BufReader<Reader>) -> Self {
        Self { reader }
    }
}

impl<Reader: Read> Iterator for CharacterIterator<Reader> {
    type Item = Result<Character>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader
            .read_char_raw()
            .map(|result| {
                result.map(|c| match c {
                    '\n' | '\r' => Character::Newline,
                    '>' => Character::RecordStart,
                    c => Character::Other(c),
                })
            })
            .map_err(|error| anyhow!("Error reading character from fasta input: {error}"))
            .transpose()
    }
}
