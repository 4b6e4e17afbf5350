#![cfg_attr(docsrs, feature(doc_cfg))]

//! rdb_level - Leveled sorted-run collector
//! 分层有序 run 收集器
//!
//! Level n keeps at most k runs. When a full level receives one more run,
//! its runs are merged into a single run handed to level n+1.
//! 第 n 层最多保存 k 个 run。已满的层再收到 run 时，
//! 其所有 run 归并为一个 run 交给第 n+1 层。

mod add;
mod cascade;
mod collector;
mod conf;
mod info;
mod level;
mod persist;
mod roll_out;

pub use collector::RunCollector;
pub use conf::{Conf, MAX_LEVELS, ParsedConf, default};
pub use level::Level;
pub use rdb_base::{Error, Result};
pub use roll_out::roll_out;

/// Collector backed by in-memory sorted runs
/// 基于内存有序 run 的收集器
pub type MemCollector<K, V, C> = RunCollector<K, V, rdb_run::MemFactory<C>, C>;
