use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "afiface - chain-aware confidence score extraction for multi-chain structure predictions.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S output.format=csv
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print global pLDDT, pTM and ipTM of one or more model output files.
    Summary(SummaryArgs),
    /// Summarize predicted aligned error within and between groups of chains.
    Pae(PaeArgs),
    /// Compute plain and contact-area weighted pLDDT over interface residues.
    Interface(InterfaceArgs),
    /// Collect per-model score files of one or all proteins into a table.
    Collect(CollectArgs),
    /// Print the confidence data read from a model output file as JSON.
    Dump(DumpArgs),
    /// Build a structure prediction job (JSON) from protein, DNA and RNA FASTA files.
    Af3Input(Af3InputArgs),
}

/// Arguments for the `summary` subcommand.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Model output files (JSON).
    #[arg(required = true, value_name = "MODEL")]
    pub models: Vec<PathBuf>,

    /// Print summaries as JSON instead of the score-file text form.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `pae` subcommand.
#[derive(Args, Debug)]
pub struct PaeArgs {
    /// Model output file (JSON).
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// FASTA file that was used for modeling.
    #[arg(long, required = true, value_name = "PATH")]
    pub fasta: PathBuf,

    /// Comma separated chain labels of the first subunit, e.g. 'A,B'.
    #[arg(long, value_name = "CHAINS", requires = "chains2")]
    pub chains1: Option<String>,

    /// Comma separated chain labels of the second subunit.
    #[arg(long, value_name = "CHAINS", requires = "chains1")]
    pub chains2: Option<String>,

    /// Report only PAE statistics, without pTM, ipTM and median pLDDT.
    #[arg(long)]
    pub pae_only: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the `interface` subcommand.
#[derive(Args, Debug)]
pub struct InterfaceArgs {
    /// Model output file (JSON).
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Structure of the same model (PDB), passed to the contact program.
    #[arg(value_name = "PDB")]
    pub pdb: PathBuf,

    /// FASTA file that was used for modeling.
    #[arg(long, required = true, value_name = "PATH")]
    pub fasta: PathBuf,

    /// Read a precomputed contact table instead of running the contact program.
    #[arg(long, value_name = "PATH", conflicts_with = "all_residues")]
    pub contacts: Option<PathBuf>,

    /// Treat every residue as interface with unit contact area.
    #[arg(long)]
    pub all_residues: bool,

    /// Only aggregate residues of these comma separated chains.
    #[arg(long, value_name = "CHAINS", conflicts_with = "between")]
    pub chains: Option<String>,

    /// Only use contacts between two chain groups, e.g. 'A,B:C'.
    #[arg(long, value_name = "GROUP:GROUP")]
    pub between: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the `collect` subcommand.
#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Directory holding one results subdirectory per protein.
    #[arg(value_name = "DIR")]
    pub directory: PathBuf,

    /// Protein subdirectory name ('all' collects every subdirectory).
    #[arg(value_name = "PROTEIN")]
    pub protein: String,

    /// Read multimer model results.
    #[arg(long)]
    pub multimer: bool,
}

/// Arguments for the `dump` subcommand.
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Model output file (JSON).
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,
}

/// Arguments for the `af3-input` subcommand.
#[derive(Args, Debug)]
#[command(group(
    clap::ArgGroup::new("molecules")
        .args(["proteins", "dna", "rna"])
        .multiple(true)
        .required(true)
))]
pub struct Af3InputArgs {
    /// Protein FASTA file.
    #[arg(long, value_name = "PATH")]
    pub proteins: Option<PathBuf>,

    /// Copies of each protein sequence, e.g. '2:1'.
    #[arg(long, value_name = "COUNTS", default_value = "", requires = "proteins")]
    pub protein_stoich: String,

    /// DNA FASTA file.
    #[arg(long, value_name = "PATH")]
    pub dna: Option<PathBuf>,

    /// Copies of each DNA sequence, e.g. '1:2'.
    #[arg(long, value_name = "COUNTS", default_value = "", requires = "dna")]
    pub dna_stoich: String,

    /// RNA FASTA file.
    #[arg(long, value_name = "PATH")]
    pub rna: Option<PathBuf>,

    /// Copies of each RNA sequence, e.g. '1:1'.
    #[arg(long, value_name = "COUNTS", default_value = "", requires = "rna")]
    pub rna_stoich: String,

    /// Job name.
    #[arg(long, default_value = "af3_job")]
    pub name: String,
}

/// Output flags shared by the report subcommands.
#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Output CSV instead of JSON.
    #[arg(long)]
    pub output_csv: bool,

    /// Skip the CSV header row.
    #[arg(long)]
    pub no_header: bool,
}
