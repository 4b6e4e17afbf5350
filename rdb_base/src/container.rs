//! Container - Value with deletion marker
//! 带删除标记的值

use bitcode::{Decode, Encode};

/// Value wrapper carrying a tombstone flag
/// 携带删除标记的值包装
///
/// A live container always holds a value; a tombstone may or may not.
/// 存活的容器一定有值；删除标记可以有也可以没有。
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Container<V> {
  val: Option<V>,
  rm: bool,
}

impl<V> Container<V> {
  /// Live value
  /// 存活值
  #[inline]
  pub fn new(val: V) -> Self {
    Self {
      val: Some(val),
      rm: false,
    }
  }

  /// Tombstone without payload
  /// 无载荷的删除标记
  #[inline]
  pub fn rm() -> Self {
    Self { val: None, rm: true }
  }

  /// Tombstone keeping the deleted payload
  /// 保留被删除载荷的删除标记
  #[inline]
  pub fn rm_with(val: V) -> Self {
    Self {
      val: Some(val),
      rm: true,
    }
  }

  #[inline]
  pub fn is_rm(&self) -> bool {
    self.rm
  }

  /// Value if live, None for tombstones
  /// 存活时返回值，删除标记返回 None
  #[inline]
  pub fn val(&self) -> Option<&V> {
    if self.rm { None } else { self.val.as_ref() }
  }

  /// Raw payload, tombstones included
  /// 原始载荷，包含删除标记
  #[inline]
  pub fn payload(&self) -> Option<&V> {
    self.val.as_ref()
  }

  #[inline]
  pub fn into_val(self) -> Option<V> {
    if self.rm { None } else { self.val }
  }
}

impl<V> From<V> for Container<V> {
  #[inline]
  fn from(val: V) -> Self {
    Self::new(val)
  }
}
