//! Live - Hide tombstones from a merged stream
//! 从归并流中隐藏删除标记

use std::iter::FusedIterator;

use rdb_base::Container;

/// Yields (key, value) for live entries only
/// 只输出存活条目的 (键, 值)
pub struct Live<I>(pub I);

impl<K, V, I> Iterator for Live<I>
where
  I: Iterator<Item = (K, Container<V>)>,
{
  type Item = (K, V);

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    self
      .0
      .by_ref()
      .find_map(|(k, c)| c.into_val().map(|v| (k, v)))
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (0, self.0.size_hint().1)
  }
}

impl<K, V, I> FusedIterator for Live<I> where I: FusedIterator<Item = (K, Container<V>)> {}
