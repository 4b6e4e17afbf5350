//! Factory creating SortedRun for every slot
//! 为每个槽位创建 SortedRun 的工厂

use bitcode::{DecodeOwned, Encode};
use rdb_base::{Comparator, Result, RunFactory};

use crate::SortedRun;

#[derive(Debug, Clone, Default)]
pub struct MemFactory<C> {
  cmp: C,
}

impl<C> MemFactory<C> {
  #[inline]
  pub fn new(cmp: C) -> Self {
    Self { cmp }
  }
}

impl<K, V, C> RunFactory<K, V> for MemFactory<C>
where
  K: Clone + Encode + DecodeOwned,
  V: Clone + Encode + DecodeOwned,
  C: Comparator<K> + Clone,
{
  type Run = SortedRun<K, V, C>;

  #[inline]
  fn create_run(&self, level: usize, slot: usize) -> Result<Self::Run> {
    Ok(SortedRun::new(level, slot, self.cmp.clone()))
  }
}
