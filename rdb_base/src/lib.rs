#![cfg_attr(docsrs, feature(doc_cfg))]

//! rdb_base - Shared types for leveled sorted runs
//! 分层有序 run 的共享类型
//!
//! Contains Container, Comparator, the Run contract and varint framing.
//! 包含 Container、Comparator、Run 契约与 varint 编码。

mod cmp;
mod container;
mod error;
mod key_gen;
mod run;
pub mod varint;

pub use cmp::{Asc, BytePrefix, Comparator, Desc};
pub use container::Container;
pub use error::{Error, Result};
pub use key_gen::KeyGen;
pub use run::{Entry, Run, RunFactory};
