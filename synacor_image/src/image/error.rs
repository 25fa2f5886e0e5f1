use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("program image has an odd length ({bytes} bytes); images are 16-bit little-endian words")]
    OddLength { bytes: usize },

    #[error("program image is too large ({words} words; memory holds at most 32768 words)")]
    TooLarge { words: usize },

    #[error("failed to read program image: {0}")]
    Io(#[from] std::io::Error),
}
