use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{error, info};

use tor_compress::huffman::{count_frequencies, entropy_from_freq};
use tor_compress::{compress_file, default_output_path, Algorithm};

#[derive(Parser, Debug)]
#[command(about = "Compress a file with Huffman or LZW coding")]
struct Args {
    /// Path to the file to compress
    input: PathBuf,
    /// Path to write the compressed output, defaults to the input path plus `.tor`
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Compression algorithm
    #[arg(short, long, value_enum, default_value_t = Algorithm::Lzw)]
    algo: Algorithm,
    /// Log every step of the encoding
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if args.input.is_dir() {
        error!("Compressing a directory is not supported: {}", args.input.display());
        process::exit(1);
    }

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input, true));

    info!("--- Start Encoding ({:?}) ---", args.algo);

    let codec = args.algo.codec();
    let ratio = match compress_file(codec.as_ref(), &args.input, &output) {
        Ok(ratio) => ratio,
        Err(e) => {
            error!("Failed to compress {}: {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let input_size = fs::metadata(&args.input).map(|m| m.len()).unwrap_or(0);
    let output_size = fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
    let file_entropy = fs::read(&args.input)
        .map(|data| entropy_from_freq(&count_frequencies(&data)))
        .unwrap_or(0.0);

    println!(
        "\r\n✅ Encoding successful.\n\
         📂  Input:       {} ({} bytes)\n\
         💾  Output:      {} ({} bytes)\n\
         ⚙️  Algorithm:   {:?}\n\
         ℹ️  Entropy:     {:.4} bits/symbol\n\
         🗜️  Ratio:       {:.4}%",
        args.input.display(),
        input_size,
        output.display(),
        output_size,
        args.algo,
        file_entropy,
        ratio
    );

    info!("--- End ---");
}
