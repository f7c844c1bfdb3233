use std::path::{Path, PathBuf};

use super::{default_output_path, Algorithm, Compressed};
use crate::error::CodecError;

#[test]
fn test_default_compress_path_appends_suffix() {
    assert_eq!(
        default_output_path(Path::new("data/image1.ppm"), true),
        PathBuf::from("data/image1.ppm.tor")
    );
}

#[test]
fn test_default_decompress_path_strips_suffix() {
    assert_eq!(
        default_output_path(Path::new("data/image1.ppm.tor"), false),
        PathBuf::from("data/image1.ppm")
    );
    assert_eq!(
        default_output_path(Path::new("a.tor.b"), false),
        PathBuf::from("a")
    );
}

#[test]
fn test_default_decompress_path_without_suffix() {
    assert_eq!(
        default_output_path(Path::new("archive.bin"), false),
        PathBuf::from("archive.bin_extracted")
    );
}

#[test]
fn test_gain_check_computes_ratio() {
    let compressed = Compressed::check_gain(200, vec![0; 50]).unwrap();
    assert!((compressed.ratio - 75.0).abs() < 1e-9);
}

#[test]
fn test_equal_size_is_no_gain() {
    match Compressed::check_gain(4, vec![0; 4]) {
        Err(CodecError::NoGain { input, output }) => assert_eq!((input, output), (4, 4)),
        other => panic!("expected NoGain, got {:?}", other),
    }
}

#[test]
fn test_default_algorithm_is_lzw() {
    assert_eq!(Algorithm::default(), Algorithm::Lzw);
}
