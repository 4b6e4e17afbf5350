//! Run - Capability set of a sorted run and its factory
//! 有序 run 的能力集合及其工厂

use std::io::{Read, Write};

use crate::{Comparator, Container, Result};

/// Entry of a run
/// run 的条目
pub type Entry<K, V> = (K, Container<V>);

/// Immutable sorted run owned by one level slot
/// 由某一层槽位独占的不可变有序 run
pub trait Run<K, V> {
  /// Ingest a sorted sequence handed over from below
  /// 接收下层交来的有序序列
  fn receive<I: Iterator<Item = Entry<K, V>>>(&mut self, run: I) -> Result<()>;

  /// Point lookup
  /// 点查
  fn get(&self, key: &K) -> Result<Option<Container<V>>>;

  /// Iterate all entries ascending
  /// 升序迭代所有条目
  fn iter(&self) -> Result<impl Iterator<Item = Entry<K, V>> + '_>;

  /// Entries whose key equals `prefix` under `cmp`, ascending
  /// 在 `cmp` 下与 `prefix` 相等的条目，升序
  fn prefix<'a, P: Comparator<K>>(
    &'a self,
    cmp: &'a P,
    prefix: &'a K,
  ) -> Result<impl Iterator<Item = Entry<K, V>> + 'a>;

  /// Number of entries
  /// 条目数
  fn len(&self) -> usize;

  #[inline]
  fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> Result<()>;

  fn read_from<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<()>;

  /// Bytes holding data
  /// 存放数据的字节数
  fn used_bytes(&self) -> Result<u64>;

  /// Bytes occupied including framing
  /// 含帧头的占用字节数
  fn bytes(&self) -> Result<u64>;

  /// Structure description
  /// 结构描述
  fn info(&self) -> String;

  /// Free resources, the run must not be used afterwards
  /// 释放资源，之后不可再使用
  fn release(&mut self) -> Result<()>;
}

/// Creates runs for level slots
/// 为层级槽位创建 run
pub trait RunFactory<K, V> {
  type Run: Run<K, V>;

  fn create_run(&self, level: usize, slot: usize) -> Result<Self::Run>;
}
