//! Comparator - Total order shared by levels, runs and merges
//! 比较器 - 层级、run 与归并共享的全序

use std::cmp::Ordering;

/// Key comparator
/// 键比较器
pub trait Comparator<K: ?Sized> {
  fn cmp(&self, a: &K, b: &K) -> Ordering;
}

impl<K: ?Sized, F: Fn(&K, &K) -> Ordering> Comparator<K> for F {
  #[inline(always)]
  fn cmp(&self, a: &K, b: &K) -> Ordering {
    self(a, b)
  }
}

/// Ascending order (Standard behavior)
/// 升序（标准行为）
#[derive(Debug, Clone, Copy, Default)]
pub struct Asc;

impl<K: Ord + ?Sized> Comparator<K> for Asc {
  #[inline(always)]
  fn cmp(&self, a: &K, b: &K) -> Ordering {
    a.cmp(b)
  }
}

/// Descending order (Reverse behavior)
/// 降序（反向行为）
#[derive(Debug, Clone, Copy, Default)]
pub struct Desc;

impl<K: Ord + ?Sized> Comparator<K> for Desc {
  #[inline(always)]
  fn cmp(&self, a: &K, b: &K) -> Ordering {
    b.cmp(a)
  }
}

/// Prefix comparator for byte keys: only the first `prefix.len()` bytes count
/// 字节键前缀比较器：只比较前 `prefix.len()` 个字节
///
/// Argument order is `(entry_key, prefix)`.
/// 参数顺序为 `(entry_key, prefix)`。
#[derive(Debug, Clone, Copy, Default)]
pub struct BytePrefix;

impl<K: AsRef<[u8]> + ?Sized> Comparator<K> for BytePrefix {
  #[inline]
  fn cmp(&self, key: &K, prefix: &K) -> Ordering {
    let key = key.as_ref();
    let prefix = prefix.as_ref();
    let n = key.len().min(prefix.len());
    match key[..n].cmp(&prefix[..n]) {
      // Shorter key sorts before any longer key sharing its bytes
      // 较短的键排在共享其字节的较长键之前
      Ordering::Equal if key.len() < prefix.len() => Ordering::Less,
      ord => ord,
    }
  }
}
