//! Error types for rdb
//! rdb 错误类型定义

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  #[error("IO: {0}")]
  Io(#[from] std::io::Error),

  #[error("Decode: {0}")]
  Decode(#[from] bitcode::Error),

  #[error("Varint overflow")]
  VarintOverflow,

  #[error("Invalid level flag: {0}")]
  InvalidFlag(u8),

  #[error("Level {level} holds {count} runs, capacity {k}")]
  RunCount { level: usize, count: u64, k: usize },

  #[error("Level {level} beyond max depth {max}")]
  Depth { level: usize, max: usize },

  #[error("Run at level {level} slot {slot} out of order at entry {at}")]
  Unsorted { level: usize, slot: usize, at: usize },

  #[error("Create run at level {level} slot {slot}: {msg}")]
  Create {
    level: usize,
    slot: usize,
    msg: String,
  },

  #[error("Cascade from level {level} failed: {source}")]
  Cascade {
    level: usize,
    #[source]
    source: Box<Error>,
  },

  #[error("Run released")]
  Released,
}

pub type Result<T> = std::result::Result<T, Error>;
