use clap::Parser;
use dict_core::logging::init_logging;
use dict_core::summary::{print_error, print_merge_summary};
use dict_core::{merge_dict, resolve_sources, write_report, DictMergeOptions, Result, WeightPolicy};
use std::path::PathBuf;
use std::process::ExitCode;

/// Merges Rime dictionaries (`phrase<TAB>pinyin<TAB>weight`) by phrase.
#[derive(Parser, Debug)]
#[command(
    name = "merge_dict",
    version,
    after_help = "Example:\n  merge_dict -o custom_pinyin.dict.yaml -n custom_pinyin \\\n    -i \"linux.dict.txt,android.dict.txt,windows.dict.txt\" -w 4,3,1"
)]
struct Args {
    /// Merged dictionary (e.g. a.dict.yaml).
    #[arg(short, long)]
    output: PathBuf,

    /// Comma-separated dictionaries, merged in this order.
    #[arg(short, long, value_delimiter = ',')]
    input: Vec<PathBuf>,

    /// Comma-separated weights, exactly one per input.
    #[arg(short, long, value_delimiter = ',')]
    weight: Vec<f64>,

    /// Prepend a dictionary header with this name.
    #[arg(short, long)]
    name: Option<String>,

    /// Write the run diagnostics to this JSON file.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: Args) -> Result<()> {
    let sources = resolve_sources(&args.input, &args.weight, WeightPolicy::Exact)?;
    let options = DictMergeOptions {
        sources,
        output: args.output,
        name: args.name,
    };

    let report = merge_dict(&options)?;
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
