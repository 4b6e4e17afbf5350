//! K-way merge with last-writer-wins tie-break
//! 后写优先的多路归并

use std::{cmp::Ordering, iter::FusedIterator};

use rdb_base::Comparator;

/// Pull next item, drop the source once exhausted
/// 拉取下一个条目，源耗尽即丢弃
#[inline]
fn pull<I: Iterator>(src: &mut Option<I>) -> Option<I::Item> {
  let item = src.as_mut()?.next();
  if item.is_none() {
    *src = None;
  }
  item
}

/// Merged iterator over sorted sources
/// 多个有序源的合并迭代器
///
/// Source index encodes recency: the last source is the newest.
/// On equal keys the higher index wins and the older entry is dropped.
/// 源下标表示新旧：最后一个源最新。
/// 键相等时下标大者胜出，旧条目被丢弃。
pub struct MergeIter<K, T, I, C> {
  cmp: C,
  /// None once exhausted or closed
  /// 耗尽或关闭后为 None
  sources: Vec<Option<I>>,
  /// Next not-yet-emitted entry of each source
  /// 每个源下一个尚未输出的条目
  current: Vec<Option<(K, T)>>,
}

impl<K, T, I, C> MergeIter<K, T, I, C>
where
  I: Iterator<Item = (K, T)>,
  C: Comparator<K>,
{
  /// Sources ordered oldest first
  /// 源按从旧到新排列
  pub fn new(iters: Vec<I>, cmp: C) -> Self {
    let mut sources: Vec<Option<I>> = iters.into_iter().map(Some).collect();
    let current = sources.iter_mut().map(pull).collect();
    Self {
      cmp,
      sources,
      current,
    }
  }

  /// Sources ordered youngest first
  /// 源按从新到旧排列
  #[inline]
  pub fn newest_first(mut iters: Vec<I>, cmp: C) -> Self {
    iters.reverse();
    Self::new(iters, cmp)
  }

  #[inline]
  pub fn has_next(&self) -> bool {
    self.current.iter().any(Option::is_some)
  }

  /// Number of sources, exhausted ones included
  /// 源数量，包含已耗尽的
  #[inline]
  pub fn width(&self) -> usize {
    self.current.len()
  }

  /// Drop every open source and pending entry
  /// 丢弃所有未关闭的源与待输出条目
  pub fn close(&mut self) {
    for src in &mut self.sources {
      *src = None;
    }
    for cur in &mut self.current {
      *cur = None;
    }
  }

  /// Take current entry of source i and preload the next one
  /// 取出源 i 的当前条目并预加载下一个
  #[inline]
  fn advance(&mut self, i: usize) -> Option<(K, T)> {
    let next = pull(&mut self.sources[i]);
    std::mem::replace(&mut self.current[i], next)
  }

  #[inline]
  fn cmp_at(&self, i: usize, best: usize) -> Option<Ordering> {
    match (&self.current[i], &self.current[best]) {
      (Some((a, _)), Some((b, _))) => Some(self.cmp.cmp(a, b)),
      _ => None,
    }
  }
}

impl<K, T, I, C> Iterator for MergeIter<K, T, I, C>
where
  I: Iterator<Item = (K, T)>,
  C: Comparator<K>,
{
  type Item = (K, T);

  fn next(&mut self) -> Option<Self::Item> {
    let mut best: Option<usize> = None;
    for i in 0..self.current.len() {
      if self.current[i].is_none() {
        continue;
      }
      let Some(b) = best else {
        best = Some(i);
        continue;
      };
      match self.cmp_at(i, b) {
        Some(Ordering::Less) => best = Some(i),
        Some(Ordering::Equal) => {
          // Newer source wins, consume the tied older entry
          // 新源胜出，消费较旧的相等条目
          let _ = self.advance(b);
          best = Some(i);
        }
        _ => {}
      }
    }
    self.advance(best?)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    let pending = self.current.iter().filter(|c| c.is_some()).count();
    let mut upper = Some(pending);
    for src in self.sources.iter().flatten() {
      upper = match (upper, src.size_hint().1) {
        (Some(a), Some(b)) => a.checked_add(b),
        _ => None,
      };
    }
    // Duplicates may collapse down to a single entry
    // 重复键可能合并为一个条目
    (pending.min(1), upper)
  }
}

impl<K, T, I, C> FusedIterator for MergeIter<K, T, I, C>
where
  I: Iterator<Item = (K, T)>,
  C: Comparator<K>,
{
}
