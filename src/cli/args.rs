// args.rs - Command line arguments definition

use argh::FromArgs;

pub const DEFAULT_THREADS: usize = 6;
pub const DEFAULT_SENSITIVITY: &str = "very-sensitive";

#[derive(FromArgs, Debug)]
/// dbcompare - clean protein databases and compare them pairwise with DIAMOND
pub struct Args {
    /// working directory holding the stage folders (default: ~/Desktop/Databases_analysis_diamond)
    #[argh(option)]
    pub root: Option<String>,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// raw input folder (default: <root>/Sequences_db)
    #[argh(option)]
    pub sequences_dir: Option<String>,

    /// cleaned FASTA folder (default: <root>/Cleaned_sequences_db)
    #[argh(option)]
    pub cleaned_dir: Option<String>,

    /// DMND index folder (default: <root>/DMND_files_db)
    #[argh(option)]
    pub index_dir: Option<String>,

    /// comparison results folder (default: <root>/Comparison_results)
    #[argh(option)]
    pub results_dir: Option<String>,

    /// ledger file name inside the cleaned folder (default: Cleaned_stats.tsv)
    #[argh(option)]
    pub ledger_name: Option<String>,

    /// diamond executable (default: diamond)
    #[argh(option)]
    pub diamond: Option<String>,

    /// threads passed to diamond blastp (default: 6)
    #[argh(option, default = "DEFAULT_THREADS")]
    pub threads: usize,

    /// diamond sensitivity: fast, default, mid-sensitive, sensitive, more-sensitive, very-sensitive, ultra-sensitive (default: very-sensitive)
    #[argh(option, default = "String::from(DEFAULT_SENSITIVITY)")]
    pub sensitivity: String,

    /// rscript executable (default: Rscript)
    #[argh(option)]
    pub rscript: Option<String>,

    /// python interpreter for .py visualisation scripts (default: python3)
    #[argh(option)]
    pub python: Option<String>,

    /// visualisation script, .R or .py (default: <root>/Functions/visualize_rstudio.R)
    #[argh(option)]
    pub script: Option<String>,

    /// include only databases whose name matches this regex
    #[argh(option)]
    pub include_db: Option<String>,

    /// exclude databases whose name matches this regex
    #[argh(option)]
    pub exclude_db: Option<String>,

    #[argh(subcommand)]
    pub command: Command,
}

#[derive(FromArgs, Debug, PartialEq)]
#[argh(subcommand)]
pub enum Command {
    Init(InitCommand),
    Check(CheckCommand),
    Clean(CleanCommand),
    Makedb(MakedbCommand),
    Compare(CompareCommand),
    Visualize(VisualizeCommand),
    GenerateConfig(GenerateConfigCommand),
}

#[derive(FromArgs, Debug, PartialEq)]
/// create the working folders
#[argh(subcommand, name = "init")]
pub struct InitCommand {}

#[derive(FromArgs, Debug, PartialEq)]
/// check that diamond, R and the R libraries are installed
#[argh(subcommand, name = "check")]
pub struct CheckCommand {}

#[derive(FromArgs, Debug, PartialEq)]
/// clean every raw FASTA file and record the yield ledger
#[argh(subcommand, name = "clean")]
pub struct CleanCommand {}

#[derive(FromArgs, Debug, PartialEq)]
/// convert cleaned FASTA files to DMND databases
#[argh(subcommand, name = "makedb")]
pub struct MakedbCommand {}

#[derive(FromArgs, Debug, PartialEq)]
/// run diamond blastp for a reference database (or all) against every cleaned file
#[argh(subcommand, name = "compare")]
pub struct CompareCommand {
    /// reference database name (without .dmnd) or 'all'
    #[argh(positional)]
    pub reference: String,
}

#[derive(FromArgs, Debug, PartialEq)]
/// plot comparison results with the visualisation script
#[argh(subcommand, name = "visualize")]
pub struct VisualizeCommand {
    /// reference results folder or 'all'
    #[argh(positional)]
    pub reference: String,

    /// maximum peptide length for the X axis, or 'auto'
    #[argh(positional, default = "String::from(\"auto\")")]
    pub max_length: String,
}

#[derive(FromArgs, Debug, PartialEq)]
/// print a sample configuration file and exit
#[argh(subcommand, name = "generate-config")]
pub struct GenerateConfigCommand {}
