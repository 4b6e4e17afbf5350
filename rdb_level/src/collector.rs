//! RunCollector - Chain of capacity-bounded levels
//! 容量受限的层级链

use std::marker::PhantomData;

use rdb_base::{Comparator, Container, Entry, Result, Run, RunFactory};
use rdb_merge::MergeIter;
use rdb_run::MemFactory;

use crate::{Conf, Level, ParsedConf};

/// Leveled run collector
/// 分层 run 收集器
///
/// Levels live in a Vec indexed by level number; level 0 always exists,
/// deeper levels are created on first use.
/// 层级按层号存放于 Vec；第 0 层始终存在，更深的层首次使用时创建。
pub struct RunCollector<K, V, F: RunFactory<K, V>, C> {
  pub(crate) conf: ParsedConf,
  pub(crate) factory: F,
  pub(crate) cmp: C,
  pub(crate) levels: Vec<Level<F::Run>>,
  _kv: PhantomData<fn() -> (K, V)>,
}

impl<K, V, F, C> RunCollector<K, V, F, C>
where
  F: RunFactory<K, V>,
  C: Comparator<K> + Clone,
{
  pub fn new(conf: &[Conf], factory: F, cmp: C) -> Self {
    let conf = ParsedConf::new(conf);
    let mut c = Self {
      conf,
      factory,
      cmp,
      levels: Vec::new(),
      _kv: PhantomData,
    };
    c.ensure(0);
    c
  }

  #[inline]
  pub fn conf(&self) -> &ParsedConf {
    &self.conf
  }

  #[inline]
  pub fn cmp(&self) -> &C {
    &self.cmp
  }

  #[inline]
  pub fn factory(&self) -> &F {
    &self.factory
  }

  /// Number of levels created so far
  /// 已创建的层数
  #[inline]
  pub fn depth(&self) -> usize {
    self.levels.len()
  }

  #[inline]
  pub fn level(&self, n: usize) -> Option<&Level<F::Run>> {
    self.levels.get(n)
  }

  #[inline]
  pub fn levels(&self) -> &[Level<F::Run>] {
    &self.levels
  }

  /// Create levels up to n
  /// 创建直到第 n 层
  pub(crate) fn ensure(&mut self, n: usize) {
    while self.levels.len() <= n {
      let i = self.levels.len();
      if i > 0 {
        log::debug!("create level {i}");
      }
      self
        .levels
        .push(Level::new(i, self.conf.k, self.conf.max_run_len(i)));
    }
  }

  /// Lookup: level 0 first, newest slot first inside a level
  /// 查找：先第 0 层，层内最新槽位优先
  pub fn get(&self, key: &K) -> Result<Option<Container<V>>> {
    for level in &self.levels {
      if let Some(c) = level.get::<K, V>(key)? {
        return Ok(Some(c));
      }
    }
    Ok(None)
  }

  /// Live value of key, None if absent or deleted
  /// 键的存活值，不存在或已删除时为 None
  #[inline]
  pub fn get_val(&self, key: &K) -> Result<Option<V>> {
    Ok(self.get(key)?.and_then(Container::into_val))
  }

  /// Merged scan of entries matching prefix under `prefix_cmp`
  /// 在 `prefix_cmp` 下匹配前缀的条目的归并扫描
  ///
  /// Sources are listed youngest first (level 0 newest slot ... deepest
  /// level oldest slot); the youngest copy of a duplicated key wins.
  /// 源按从新到旧排列（第 0 层最新槽位 ... 最深层最旧槽位）；
  /// 重复键取最新的副本。
  pub fn prefix_search<'a, P: Comparator<K>>(
    &'a self,
    prefix_cmp: &'a P,
    prefix: &'a K,
  ) -> Result<MergeIter<K, Container<V>, impl Iterator<Item = Entry<K, V>> + 'a, C>> {
    let mut iters = Vec::with_capacity(self.levels.iter().map(Level::len).sum());
    for level in &self.levels {
      for run in level.runs().iter().rev() {
        iters.push(run.prefix(prefix_cmp, prefix)?);
      }
    }
    Ok(MergeIter::newest_first(iters, self.cmp.clone()))
  }

  /// Release all runs and drop every level except an empty level 0
  /// 释放所有 run，只保留空的第 0 层
  pub fn clear(&mut self) -> Result<()> {
    let mut first = Ok(());
    for level in &mut self.levels {
      if let Err(err) = level.release::<K, V>()
        && first.is_ok()
      {
        first = Err(err);
      }
    }
    self.levels.truncate(1);
    first
  }

  /// Release all runs, the collector is consumed
  /// 释放所有 run，收集器被消耗
  pub fn release(mut self) -> Result<()> {
    self.clear()
  }
}

impl<K, V, C> RunCollector<K, V, MemFactory<C>, C>
where
  MemFactory<C>: RunFactory<K, V>,
  C: Comparator<K> + Clone,
{
  /// Collector of in-memory sorted runs
  /// 内存有序 run 收集器
  #[inline]
  pub fn mem(conf: &[Conf], cmp: C) -> Self {
    Self::new(conf, MemFactory::new(cmp.clone()), cmp)
  }
}
