//! Roll-out: merge all runs of a level into one
//! 合并一层的所有 run 为一个

use rdb_base::{Comparator, Container, Entry, Result, Run, RunFactory};
use rdb_merge::MergeIter;

use crate::{Level, RunCollector};

/// Merge runs of a level, slot order = oldest first so the newest wins
/// 归并一层的 run，槽位顺序从旧到新，最新者胜出
pub fn roll_out<'a, K, V, R, C>(
  level: &'a Level<R>,
  cmp: C,
) -> Result<MergeIter<K, Container<V>, impl Iterator<Item = Entry<K, V>> + 'a, C>>
where
  R: Run<K, V>,
  C: Comparator<K>,
{
  let iters = level
    .runs()
    .iter()
    .map(|r| r.iter())
    .collect::<Result<Vec<_>>>()?;
  Ok(MergeIter::new(iters, cmp))
}

impl<K, V, F, C> RunCollector<K, V, F, C>
where
  F: RunFactory<K, V>,
  C: Comparator<K> + Clone,
{
  /// Combined run of level n, None if the level does not exist
  /// 第 n 层的合并 run，层不存在时为 None
  pub fn roll_out(
    &self,
    n: usize,
  ) -> Result<Option<MergeIter<K, Container<V>, impl Iterator<Item = Entry<K, V>> + '_, C>>> {
    match self.levels.get(n) {
      Some(level) => roll_out::<K, V, _, _>(level, self.cmp.clone()).map(Some),
      None => Ok(None),
    }
  }
}
