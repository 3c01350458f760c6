use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, ensure};
use clap::{Args, Parser};
use lib_nwalign::{
    AlignmentResult, AlignmentWorkspace, SequencePairId,
    alphabet::validate_sequence,
    costs::{GapCostSet, ScoringMatrix},
    needleman_wunsch_align,
};
use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

use crate::align::fasta_parser::{FastaRecord, parse_fasta_file, parse_pair_fasta_file};

mod fasta_parser;

#[derive(Parser)]
pub struct Cli {
    #[clap(long, short = 'l', default_value = "info")]
    log_level: LevelFilter,

    /// A file to additionally write the log into.
    #[clap(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    input: CliInput,

    /// The file to store the alignments and their statistics in toml format.
    #[clap(long, short = 'o')]
    output: Option<PathBuf>,

    /// A toml file with the keys `match_score`, `mismatch_score`, `gap_open` and `gap_extend`.
    ///
    /// Keys present in the file take precedence over the corresponding command line arguments.
    #[clap(long, short = 'c')]
    configuration: Option<PathBuf>,

    /// The score of aligning two equal unambiguous nucleotides.
    #[clap(long, default_value = "2", allow_hyphen_values = true)]
    match_score: i64,

    /// The score of aligning two different unambiguous nucleotides.
    #[clap(long, default_value = "-4", allow_hyphen_values = true)]
    mismatch_score: i64,

    /// Gap opening penalties, e.g. `20I/2E`.
    ///
    /// Tokens are separated by `/`, each being a number or `*` (forbidden) followed by
    /// letters selecting the `Q`uery or `T`arget side and the `I`nterior, `L`eft, `R`ight or both `E`nd positions.
    #[clap(long, default_value = "20I/2E")]
    gap_open: String,

    /// Gap extension penalties, in the same format as the opening penalties.
    #[clap(long, default_value = "2I/1E")]
    gap_extend: String,

    /// A string of (ASCII) characters that should be skipped in the input fasta.
    ///
    /// For example, `-` characters of a multiple alignment can be skipped this way.
    #[clap(long, default_value = "")]
    skip_characters: String,
}

#[derive(Args)]
struct CliInput {
    #[clap(flatten)]
    separate_input: Option<CliSeparateInput>,

    #[clap(flatten)]
    pair_input: Option<CliPairInput>,
}

#[derive(Args)]
#[group(multiple = true)]
struct CliSeparateInput {
    /// The path to the query fasta file, which may contain multiple records.
    #[clap(long, short = 'q', required = false, requires = "target")]
    query: PathBuf,

    /// The path to the target fasta file, which may contain multiple records.
    #[clap(long, short = 't', required = false, requires = "query")]
    target: PathBuf,
}

#[derive(Args)]
struct CliPairInput {
    /// The path to a fasta file containing the query followed by the target.
    #[clap(long, short = 'p', required = false, conflicts_with_all = ["query", "target"])]
    pair_fasta: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScoringConfiguration {
    match_score: Option<i64>,
    mismatch_score: Option<i64>,
    gap_open: Option<String>,
    gap_extend: Option<String>,
}

#[derive(Serialize)]
struct AlignmentOutput<'records> {
    alignments: Vec<PairOutput<'records>>,
}

#[derive(Serialize)]
struct PairOutput<'records> {
    query_id: &'records str,
    target_id: &'records str,
    query_length: usize,
    target_length: usize,
    result: AlignmentResult,
}

pub fn cli(cli: Cli) -> Result<()> {
    init_logging(cli.log_level, cli.log_file.as_deref())?;

    // Load input sequences.
    let (mut queries, mut targets) =
        if let Some(CliPairInput { pair_fasta }) = &cli.input.pair_input {
            info!("Loading pair file {pair_fasta:?}");
            let (query, target) = parse_pair_fasta_file(pair_fasta)?;
            (vec![query], vec![target])
        } else if let Some(CliSeparateInput { query, target }) = &cli.input.separate_input {
            info!("Loading query file {query:?}");
            let queries = parse_fasta_file(query)?;

            info!("Loading target file {target:?}");
            let targets = parse_fasta_file(target)?;

            (queries, targets)
        } else {
            return Err(anyhow!("No fasta input file given"));
        };

    ensure!(
        cli.skip_characters.is_ascii(),
        "Skip characters must be ASCII, but got {:?}",
        cli.skip_characters
    );
    for record in queries.iter_mut().chain(targets.iter_mut()) {
        record
            .sequence
            .retain(|c| !cli.skip_characters.contains(c));
        validate_sequence(record.sequence.as_bytes())
            .with_context(|| format!("Invalid sequence in fasta record {}", record.id))?;
    }

    let (scoring_matrix, gap_costs) = load_scoring(&cli)?;
    info!(
        "Scoring matches with {} and mismatches with {}",
        scoring_matrix.score(b'A', b'A'),
        scoring_matrix.score(b'A', b'C')
    );
    info!("Gap penalties: {gap_costs}");

    let mut workspace = AlignmentWorkspace::new();
    let mut alignments = Vec::with_capacity(queries.len() * targets.len());
    let mut inconsistent = 0usize;

    for (query_index, query) in queries.iter().enumerate() {
        for (target_index, target) in targets.iter().enumerate() {
            let result = needleman_wunsch_align(
                query.sequence.as_bytes(),
                target.sequence.as_bytes(),
                &scoring_matrix,
                &gap_costs,
                &mut workspace,
                SequencePairId::new(query_index, target_index),
            )?;
            debug!(
                "Aligned {} ({} nt) to {} ({} nt)",
                query.id,
                query.sequence.len(),
                target.id,
                target.sequence.len()
            );

            if !result.is_consistent() {
                inconsistent += 1;
            }
            println!("{} {}: {result}", query.id, target.id);
            alignments.push(pair_output(query, target, result));
        }
    }

    if inconsistent > 0 {
        warn!("{inconsistent} alignments did not reproduce their score during traceback");
    }

    if let Some(output) = &cli.output {
        info!("Writing {} alignments to {output:?}", alignments.len());
        let mut output = BufWriter::new(
            File::create(output)
                .with_context(|| format!("Unable to create output file {output:?}"))?,
        );
        write!(output, "{}", toml::to_string(&AlignmentOutput { alignments })?)?;
        output.flush()?;
    }

    Ok(())
}

fn pair_output<'records>(
    query: &'records FastaRecord,
    target: &'records FastaRecord,
    result: AlignmentResult,
) -> PairOutput<'records> {
    PairOutput {
        query_id: &query.id,
        target_id: &target.id,
        query_length: query.sequence.len(),
        target_length: target.sequence.len(),
        result,
    }
}

fn load_scoring(cli: &Cli) -> Result<(ScoringMatrix, GapCostSet)> {
    let configuration = if let Some(path) = &cli.configuration {
        info!("Loading configuration file {path:?}");
        let configuration = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read configuration file {path:?}"))?;
        toml::from_str(&configuration)
            .with_context(|| format!("Invalid configuration file {path:?}"))?
    } else {
        ScoringConfiguration::default()
    };

    let scoring_matrix = ScoringMatrix::nucleotide(
        configuration.match_score.unwrap_or(cli.match_score),
        configuration.mismatch_score.unwrap_or(cli.mismatch_score),
    );
    let gap_open = configuration.gap_open.as_deref().unwrap_or(&cli.gap_open);
    let gap_extend = configuration
        .gap_extend
        .as_deref()
        .unwrap_or(&cli.gap_extend);
    let gap_costs = GapCostSet::from_penalty_strings(gap_open, gap_extend)
        .with_context(|| format!("Invalid gap penalties {gap_open:?} and {gap_extend:?}"))?;

    Ok((scoring_matrix, gap_costs))
}

fn init_logging(log_level: LevelFilter, log_file: Option<&Path>) -> Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Some(log_file) = log_file {
        let file = File::create(log_file)
            .with_context(|| format!("Unable to create log file {log_file:?}"))?;
        loggers.push(WriteLogger::new(log_level, Config::default(), file));
    }

    // A logger may already be installed when aligning repeatedly within one process.
    if CombinedLogger::init(loggers).is_err() {
        debug!("Logger was already initialised");
    }

    Ok(())
}
