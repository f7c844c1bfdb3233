use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{error, info};

use tor_compress::{decompress_file, default_output_path, Algorithm};

#[derive(Parser, Debug)]
#[command(about = "Restore a file compressed with Huffman or LZW coding")]
struct Args {
    /// Path to the compressed file
    input: PathBuf,
    /// Path to write the restored output, defaults to the input path without `.tor`
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Algorithm the file was compressed with
    #[arg(short, long, value_enum, default_value_t = Algorithm::Lzw)]
    algo: Algorithm,
    /// Log every step of the decoding
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if args.input.is_dir() {
        error!("Decompressing a directory is not supported: {}", args.input.display());
        process::exit(1);
    }

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input, false));

    info!("--- Start Decoding ({:?}) ---", args.algo);

    let codec = args.algo.codec();
    let output_size = match decompress_file(codec.as_ref(), &args.input, &output) {
        Ok(size) => size,
        Err(e) => {
            error!("Failed to decompress {}: {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let input_size = fs::metadata(&args.input).map(|m| m.len()).unwrap_or(0);

    println!(
        "\r\n✅ decoding successful.\n\
         📂 input file:        {} ({} bytes)\n\
         💾 output file:       {} ({} bytes)",
        args.input.display(),
        input_size,
        output.display(),
        output_size
    );

    info!("--- End ---");
}
