//! Size-based run admission
//! 基于大小的 run 准入

use rdb_base::{Comparator, Container, KeyGen, Result, RunFactory};

use crate::{RunCollector, conf::MAX_LEVELS};

impl<K, V, F, C> RunCollector<K, V, F, C>
where
  F: RunFactory<K, V>,
  C: Comparator<K> + Clone,
{
  /// First level whose max run length admits size, created on demand
  /// 最大 run 长度能容纳 size 的第一层，按需创建
  fn admit(&mut self, size: usize) -> usize {
    let mut n = 0;
    loop {
      self.ensure(n);
      if size <= self.levels[n].max_run_len() || n + 1 == MAX_LEVELS {
        if n > 0 {
          log::debug!("run of {size} entries bypasses to level {n}");
        }
        return n;
      }
      n += 1;
    }
  }

  /// Add a fresh run of live values
  /// 添加一个全部为存活值的新 run
  ///
  /// Runs longer than a level's max run length skip straight to a deeper level.
  /// 超过某层最大 run 长度的 run 直接跳到更深的层。
  pub fn add_run<G: KeyGen<K, V>>(&mut self, src: G) -> Result<()> {
    let n = self.admit(src.size());
    self.receive_at(n, src.into_iter().map(|(k, v)| (k, Container::new(v))))
  }

  /// Add a run of tombstones, keys must be sorted
  /// 添加一个删除标记 run，键必须有序
  pub fn rm_run(&mut self, keys: Vec<K>) -> Result<()> {
    let n = self.admit(keys.len());
    self.receive_at(n, keys.into_iter().map(|k| (k, Container::rm())))
  }
}
