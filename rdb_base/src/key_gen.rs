//! KeyGen - Source of a fresh run
//! 新 run 的数据源

use std::collections::BTreeMap;

/// Sorted key/value generator with a known size
/// 已知大小的有序键值生成器
pub trait KeyGen<K, V>: IntoIterator<Item = (K, V)> {
  fn size(&self) -> usize;
}

impl<K, V> KeyGen<K, V> for Vec<(K, V)> {
  #[inline]
  fn size(&self) -> usize {
    self.len()
  }
}

impl<K, V> KeyGen<K, V> for BTreeMap<K, V> {
  #[inline]
  fn size(&self) -> usize {
    self.len()
  }
}
