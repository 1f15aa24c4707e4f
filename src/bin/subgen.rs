use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use subgen::Error;
use subgen::backends::whisper::WhisperTranscriber;
use subgen::batch::{RunSummary, confirm_batch, run_batch};
use subgen::job::{BatchJob, ModelVariant, resolve_model_path};
use subgen::logging;
use subgen::resolver;

#[derive(Parser, Debug)]
#[command(name = "subgen")]
#[command(about = "Batch audio/video transcription to SRT subtitles")]
struct Params {
    /// Input media file or directory.
    pub input: PathBuf,

    /// Also emit a plain-text transcript per file.
    #[arg(short = 't', long = "text")]
    pub text: bool,

    /// Also emit an LRC lyrics file per file.
    #[arg(long = "lrc")]
    pub lrc: bool,

    /// Output directory (default: next to each input file).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Use the large-v3 model instead of the default base model.
    #[arg(long = "large-v3")]
    pub large_v3: bool,

    /// Recurse into subdirectories when the input is a directory.
    #[arg(short = 'r', long = "recursive")]
    pub recursive: bool,

    /// Language hint (e.g. en, zh, yue); omitted lets the model auto-detect.
    #[arg(long = "language", visible_alias = "lang")]
    pub language: Option<String>,

    /// Directory holding GGML model artifacts
    /// (default: $SUBGEN_MODEL_DIR, else ./models).
    #[arg(long = "model-dir")]
    pub model_dir: Option<PathBuf>,

    /// Skip the multi-file confirmation prompt.
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
}

fn main() -> ExitCode {
    logging::init();
    let params = Params::parse();

    match run(&params) {
        Ok(summary) if summary.total() == 0 => {
            eprintln!("no supported media files found in {}", params.input.display());
            ExitCode::from(2)
        }
        Ok(summary) if summary.all_succeeded() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err}");
            if let Error::NotFound { path } = &err {
                if path.extension().is_some_and(|e| e == "bin") {
                    eprintln!("hint: fetch models with `model-downloader --name <base|large-v3>`");
                }
            }
            ExitCode::from(2)
        }
    }
}

fn run(params: &Params) -> subgen::Result<RunSummary> {
    let files = resolver::resolve(&params.input, params.recursive)?;
    if files.is_empty() {
        return Ok(RunSummary::default());
    }

    // Multi-file batches need an explicit go-ahead before any work starts.
    if files.len() > 1 && !params.yes {
        let stdin = io::stdin();
        confirm_batch(&files, stdin.lock(), io::stdout())?;
    }

    let variant = if params.large_v3 {
        ModelVariant::LargeV3
    } else {
        ModelVariant::Base
    };

    let model_path = resolve_model_path(&model_dir(params), variant)?;
    let mut transcriber = WhisperTranscriber::new(&model_path)?;

    let job = BatchJob {
        files,
        model: variant,
        language: params.language.clone(),
        output_dir: params.output.clone(),
        write_text: params.text,
        write_lrc: params.lrc,
    };

    let summary = run_batch(&mut transcriber, &job);
    print!("{summary}");
    Ok(summary)
}

fn model_dir(params: &Params) -> PathBuf {
    params
        .model_dir
        .clone()
        .or_else(|| std::env::var_os("SUBGEN_MODEL_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("./models"))
}
