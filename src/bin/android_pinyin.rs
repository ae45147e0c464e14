use clap::Parser;
use dict_core::core::engine::ANDROID_DICT_NAME;
use dict_core::logging::init_logging;
use dict_core::summary::{print_error, print_parse_summary};
use dict_core::{convert_rawdict, RawDictOptions, Result};
use std::path::PathBuf;
use std::process::ExitCode;

/// Converts the Android PinyinIME raw dictionary into a Rime dictionary.
#[derive(Parser, Debug)]
#[command(name = "android_pinyin", version)]
struct Args {
    /// Raw dictionary (`hanzi freq flag syllables...`, UTF-8 or UTF-16 with BOM).
    #[arg(short, long, default_value = "rawdict_utf16_65105_freq.txt")]
    input: PathBuf,

    /// Rime dictionary to write.
    #[arg(short, long, default_value = "android_pinyin_simple.dict.yaml")]
    output: PathBuf,

    /// Dictionary name written in the header.
    #[arg(short, long, default_value = ANDROID_DICT_NAME)]
    name: String,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: Args) -> Result<()> {
    let options = RawDictOptions {
        input: args.input,
        output: args.output,
        name: args.name,
    };
    let report = convert_rawdict(&options)?;
    print_parse_summary(options.output.display(), &report);
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
