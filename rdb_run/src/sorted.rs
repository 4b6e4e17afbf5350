//! SortedRun - Vec of entries sorted by the shared comparator
//! 按共享比较器排序的条目数组
//!
//! Disk format: varint(len) + bitcode(entries)
//! 磁盘格式：varint(len) + bitcode(entries)

use std::{
  cell::OnceCell,
  cmp::Ordering,
  io::{Read, Write},
};

use bitcode::{DecodeOwned, Encode};
use rdb_base::{Comparator, Container, Entry, Error, Result, Run, varint};

pub struct SortedRun<K, V, C> {
  level: usize,
  slot: usize,
  cmp: C,
  entries: Vec<Entry<K, V>>,
  /// Encoded length of entries, reset on change
  /// 条目的编码长度，内容变化时重置
  used: OnceCell<u64>,
  released: bool,
}

impl<K, V, C: Comparator<K>> SortedRun<K, V, C> {
  #[inline]
  pub fn new(level: usize, slot: usize, cmp: C) -> Self {
    Self {
      level,
      slot,
      cmp,
      entries: Vec::new(),
      used: OnceCell::new(),
      released: false,
    }
  }

  #[inline]
  pub fn level(&self) -> usize {
    self.level
  }

  #[inline]
  pub fn slot(&self) -> usize {
    self.slot
  }

  #[inline]
  fn live(&self) -> Result<()> {
    if self.released {
      return Err(Error::Released);
    }
    Ok(())
  }

  /// Append one entry, later duplicates replace earlier ones.
  /// Returns false if the entry is out of order.
  /// 追加一个条目，后来的重复键覆盖先前的。条目乱序时返回 false。
  fn push(&mut self, (key, val): Entry<K, V>) -> bool {
    if let Some(last) = self.entries.last_mut() {
      match self.cmp.cmp(&last.0, &key) {
        Ordering::Equal => {
          last.1 = val;
          return true;
        }
        Ordering::Greater => {
          self.entries.push((key, val));
          return false;
        }
        Ordering::Less => {}
      }
    }
    self.entries.push((key, val));
    true
  }

  /// Stable sort then keep the last of each equal key
  /// 稳定排序后每个相等键保留最后一个
  fn resort(&mut self) {
    let cmp = &self.cmp;
    self.entries.sort_by(|a, b| cmp.cmp(&a.0, &b.0));
    let mut kept: Vec<Entry<K, V>> = Vec::with_capacity(self.entries.len());
    for e in self.entries.drain(..) {
      match kept.last_mut() {
        Some(last) if cmp.cmp(&last.0, &e.0).is_eq() => *last = e,
        _ => kept.push(e),
      }
    }
    self.entries = kept;
  }
}

impl<K, V, C> SortedRun<K, V, C>
where
  K: Encode,
  V: Encode,
{
  #[inline]
  fn encode(&self) -> Vec<u8> {
    bitcode::encode(&self.entries)
  }
}

impl<K, V, C> Run<K, V> for SortedRun<K, V, C>
where
  K: Clone + Encode + DecodeOwned,
  V: Clone + Encode + DecodeOwned,
  C: Comparator<K>,
{
  fn receive<I: Iterator<Item = Entry<K, V>>>(&mut self, run: I) -> Result<()> {
    self.live()?;
    self.used.take();
    let (lower, _) = run.size_hint();
    self.entries.reserve(lower);
    let mut sorted = true;
    for e in run {
      // Once out of order, equal neighbours are left for resort
      // 一旦乱序，相邻相等键交给 resort 处理
      if sorted {
        sorted = self.push(e);
      } else {
        self.entries.push(e);
      }
    }
    if !sorted {
      log::warn!(
        "run L{}#{} received unsorted input, resorting",
        self.level,
        self.slot
      );
      self.resort();
    }
    log::trace!(
      "run L{}#{} holds {} entries",
      self.level,
      self.slot,
      self.entries.len()
    );
    Ok(())
  }

  fn get(&self, key: &K) -> Result<Option<Container<V>>> {
    self.live()?;
    Ok(
      self
        .entries
        .binary_search_by(|(k, _)| self.cmp.cmp(k, key))
        .ok()
        .map(|i| self.entries[i].1.clone()),
    )
  }

  fn iter(&self) -> Result<impl Iterator<Item = Entry<K, V>> + '_> {
    self.live()?;
    Ok(self.entries.iter().cloned())
  }

  fn prefix<'a, P: Comparator<K>>(
    &'a self,
    cmp: &'a P,
    prefix: &'a K,
  ) -> Result<impl Iterator<Item = Entry<K, V>> + 'a> {
    self.live()?;
    let start = self
      .entries
      .partition_point(|(k, _)| cmp.cmp(k, prefix).is_lt());
    Ok(
      self.entries[start..]
        .iter()
        .take_while(move |(k, _)| cmp.cmp(k, prefix).is_eq())
        .cloned(),
    )
  }

  #[inline]
  fn len(&self) -> usize {
    self.entries.len()
  }

  fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
    self.live()?;
    let buf = self.encode();
    let _ = self.used.set(buf.len() as u64);
    varint::write(w, buf.len() as u64)?;
    w.write_all(&buf)?;
    Ok(())
  }

  fn read_from<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<()> {
    self.live()?;
    let len = varint::read(r)?;
    let mut buf = Vec::new();
    Read::take(&mut *r, len).read_to_end(&mut buf)?;
    if buf.len() as u64 != len {
      return Err(Error::Io(std::io::ErrorKind::UnexpectedEof.into()));
    }
    let entries: Vec<Entry<K, V>> = bitcode::decode(&buf)?;
    if let Some(at) = entries
      .windows(2)
      .position(|w| !self.cmp.cmp(&w[0].0, &w[1].0).is_lt())
    {
      return Err(Error::Unsorted {
        level: self.level,
        slot: self.slot,
        at: at + 1,
      });
    }
    self.entries = entries;
    self.used = OnceCell::from(len);
    Ok(())
  }

  fn used_bytes(&self) -> Result<u64> {
    self.live()?;
    Ok(*self.used.get_or_init(|| self.encode().len() as u64))
  }

  fn bytes(&self) -> Result<u64> {
    let used = self.used_bytes()?;
    Ok(used + varint::len(used) as u64)
  }

  #[inline]
  fn info(&self) -> String {
    self.entries.len().to_string()
  }

  fn release(&mut self) -> Result<()> {
    self.entries = Vec::new();
    self.used.take();
    self.released = true;
    Ok(())
  }
}
