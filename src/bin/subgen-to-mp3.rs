use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use subgen::convert::convert_to_mp3;
use subgen::logging;

#[derive(Parser, Debug)]
#[command(name = "subgen-to-mp3")]
#[command(about = "Convert an audio file to MP3 next to the original")]
struct Params {
    /// Input audio file (m4a, wav, mp3, aac, flac, ogg, wma).
    pub input: PathBuf,
}

fn main() -> ExitCode {
    logging::init();
    let params = Params::parse();

    match convert_to_mp3(&params.input) {
        Ok(conversion) => {
            println!(
                "wrote {} in {:.2}s",
                conversion.output.display(),
                conversion.elapsed.as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}
