//! Single level: at most k run slots
//! 单层：最多 k 个 run 槽位

use rdb_base::{Container, Result, Run};

/// Run slots of one level number
/// 某一层号的 run 槽位
pub struct Level<R> {
  n: usize,
  k: usize,
  max_run_len: usize,
  /// Slot order = insertion order, last is newest
  /// 槽位顺序即插入顺序，最后一个最新
  runs: Vec<R>,
}

impl<R> Level<R> {
  #[inline]
  pub fn new(n: usize, k: usize, max_run_len: usize) -> Self {
    Self {
      n,
      k,
      max_run_len,
      runs: Vec::with_capacity(k),
    }
  }

  #[inline]
  pub fn n(&self) -> usize {
    self.n
  }

  #[inline]
  pub fn k(&self) -> usize {
    self.k
  }

  #[inline]
  pub fn max_run_len(&self) -> usize {
    self.max_run_len
  }

  /// Occupied slots
  /// 已占用槽位数
  #[inline]
  pub fn len(&self) -> usize {
    self.runs.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.runs.is_empty()
  }

  #[inline]
  pub fn is_full(&self) -> bool {
    self.runs.len() >= self.k
  }

  #[inline]
  pub fn runs(&self) -> &[R] {
    &self.runs
  }

  #[inline]
  pub(crate) fn push(&mut self, run: R) {
    debug_assert!(self.runs.len() < self.k, "level {} over capacity", self.n);
    self.runs.push(run);
  }
}

impl<R> Level<R> {
  /// Newest slot first
  /// 最新槽位优先
  pub fn get<K, V>(&self, key: &K) -> Result<Option<Container<V>>>
  where
    R: Run<K, V>,
  {
    for run in self.runs.iter().rev() {
      if let Some(c) = run.get(key)? {
        return Ok(Some(c));
      }
    }
    Ok(None)
  }

  /// Release every run and empty the slots, first error is returned
  /// 释放所有 run 并清空槽位，返回第一个错误
  pub(crate) fn release<K, V>(&mut self) -> Result<()>
  where
    R: Run<K, V>,
  {
    let mut first = Ok(());
    for mut run in self.runs.drain(..) {
      if let Err(err) = run.release() {
        log::warn!("release run at level {}: {err}", self.n);
        if first.is_ok() {
          first = Err(err);
        }
      }
    }
    first
  }
}
