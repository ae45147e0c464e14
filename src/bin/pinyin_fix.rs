use clap::Parser;
use dict_core::core::converter::{PinyinOptions, PinyinStyle};
use dict_core::logging::init_logging;
use dict_core::summary::{print_error, print_parse_summary};
use dict_core::{fix_pinyin, PinyinFixOptions, Result};
use std::path::PathBuf;
use std::process::ExitCode;

/// Repairs wrong pinyin of single characters in a Rime dictionary.
///
/// Writes `<name>.dict.yaml` (phrases, untouched) and `<name>.single.dict.yaml`
/// (single characters with every reading from the pinyin table).
#[derive(Parser, Debug)]
#[command(name = "pinyin_fix", version)]
struct Args {
    /// Dictionary to repair.
    #[arg(short, long)]
    input: PathBuf,

    /// Directory receiving the repaired dictionaries.
    #[arg(short, long)]
    output: PathBuf,

    /// Dictionary name.
    #[arg(short, long, default_value = "base")]
    name: String,

    /// Pinyin spelling.
    #[arg(long, value_enum, default_value_t = PinyinStyle::Plain)]
    style: PinyinStyle,

    /// Keep only the most common reading of polyphonic characters.
    #[arg(long)]
    no_heteronym: bool,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: Args) -> Result<()> {
    let options = PinyinFixOptions {
        input: args.input,
        output_dir: args.output,
        name: args.name,
        pinyin: PinyinOptions {
            style: args.style,
            heteronym: !args.no_heteronym,
        },
    };

    let report = fix_pinyin(&options)?;
    print_parse_summary(options.input.display(), &report.parse);
    println!("  {}: {} lines", options.phrase_path().display(), report.phrase_lines);
    println!("  {}: {} lines", options.single_path().display(), report.single_lines);
    if report.unresolved > 0 {
        println!("  {} characters kept their original pinyin", report.unresolved);
    }
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
