use std::fs;
use std::path::PathBuf;

use tor_compress::{compress_file, decompress_file, default_output_path, Algorithm, CodecError};

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tor-compress-{}-{}", std::process::id(), name))
}

#[test]
fn compress_then_decompress_file() {
    for algo in [Algorithm::Huffman, Algorithm::Lzw] {
        let input = scratch_path(&format!("{:?}.txt", algo));
        let data = b"She sells sea shells by the sea shore. ".repeat(50);
        fs::write(&input, &data).unwrap();

        let compressed = default_output_path(&input, true);
        let restored = scratch_path(&format!("{:?}.restored", algo));

        let codec = algo.codec();
        let ratio = compress_file(codec.as_ref(), &input, &compressed).unwrap();
        assert!(ratio > 0.0);
        assert!(fs::metadata(&compressed).unwrap().len() < data.len() as u64);

        let written = decompress_file(codec.as_ref(), &compressed, &restored).unwrap();
        assert_eq!(written, data.len());
        assert_eq!(fs::read(&restored).unwrap(), data);

        for path in [input, compressed, restored] {
            let _ = fs::remove_file(path);
        }
    }
}

#[test]
fn aborted_compress_writes_nothing() {
    let input = scratch_path("no-gain.bin");
    let output = scratch_path("no-gain.bin.tor");
    let _ = fs::remove_file(&output);
    fs::write(&input, (0..=255u8).collect::<Vec<_>>()).unwrap();

    for algo in [Algorithm::Huffman, Algorithm::Lzw] {
        let result = compress_file(algo.codec().as_ref(), &input, &output);
        assert!(matches!(result, Err(CodecError::NoGain { .. })));
        assert!(!output.exists());
    }

    let _ = fs::remove_file(&input);
}

#[test]
fn missing_input_is_io_error() {
    let input = scratch_path("does-not-exist");
    let output = scratch_path("does-not-exist.tor");

    let result = compress_file(Algorithm::Lzw.codec().as_ref(), &input, &output);
    assert!(matches!(result, Err(CodecError::Io(_))));
}
