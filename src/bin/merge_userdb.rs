use clap::Parser;
use dict_core::logging::init_logging;
use dict_core::summary::{print_error, print_merge_summary};
use dict_core::{merge_userdb, resolve_sources, write_report, ExportTarget, Result, UserDbMergeOptions, WeightPolicy};
use std::path::PathBuf;
use std::process::ExitCode;

/// Merges Rime userdb.txt snapshots from several machines into one.
///
/// Commit counts and decay weights add up, timestamps are averaged pairwise in
/// input order, and the last input wins the pronunciation.
#[derive(Parser, Debug)]
#[command(
    name = "merge_userdb",
    version,
    after_help = "Example:\n  merge_userdb -o custom_pinyin.userdb.txt -e custom_pinyin.dict.yaml \\\n    -i \"linux.userdb.txt,android.userdb.txt,windows.userdb.txt\" -w 4,3,1"
)]
struct Args {
    /// Merged snapshot, in userdb.txt format.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Merged dictionary export (e.g. custom_pinyin.dict.yaml).
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Dictionary name written in the export header. Defaults to the export file name.
    #[arg(short, long, requires = "export")]
    name: Option<String>,

    /// Comma-separated userdb.txt files, merged in this order.
    #[arg(short, long, value_delimiter = ',')]
    input: Vec<PathBuf>,

    /// Comma-separated weights, one per input. Missing weights default to 1.
    #[arg(short, long, value_delimiter = ',')]
    weight: Vec<f64>,

    /// Write the run diagnostics to this JSON file.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: Args) -> Result<()> {
    let sources = resolve_sources(&args.input, &args.weight, WeightPolicy::PadWithOne)?;
    let options = UserDbMergeOptions {
        sources,
        snapshot: args.output,
        export: args.export.map(|path| ExportTarget { path, name: args.name }),
    };

    let report = merge_userdb(&options)?;
    if let Some(path) = &args.report {
        write_report(path, &report)?;
    }
    print_merge_summary(&report);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}
