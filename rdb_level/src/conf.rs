//! Level configuration
//! 层级配置

/// Max number of levels in a chain
/// 层级链的最大层数
///
/// With ratio >= 2 the deepest level admits runs of any size.
/// 倍数 >= 2 时最深层可接收任意大小的 run。
pub const MAX_LEVELS: usize = usize::BITS as usize;

/// Default configuration values
/// 默认配置值
pub mod default {
  /// Runs per level
  /// 每层 run 数
  pub const K: usize = 4;
  /// Max entries of a run admitted at level 0
  /// 第 0 层接收的 run 最大条目数
  pub const RUN_LEN: usize = 1 << 16;
}

/// Collector configuration
/// 收集器配置
#[derive(Debug, Clone, Copy)]
pub enum Conf {
  /// Run slots per level
  /// 每层 run 槽位数
  K(usize),
  /// Max run length at level 0
  /// 第 0 层最大 run 长度
  RunLen(usize),
  /// Growth of max run length per level (defaults to k)
  /// 每层最大 run 长度的增长倍数（默认为 k）
  Ratio(usize),
}

/// Parsed configuration
/// 解析后的配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedConf {
  pub k: usize,
  pub run_len: usize,
  pub ratio: usize,
}

impl Default for ParsedConf {
  fn default() -> Self {
    Self::new(&[])
  }
}

impl ParsedConf {
  pub fn new(conf: &[Conf]) -> Self {
    let mut k = default::K;
    let mut run_len = default::RUN_LEN;
    let mut ratio = None;
    for item in conf {
      match *item {
        Conf::K(v) => k = v.max(1),
        Conf::RunLen(v) => run_len = v.max(1),
        Conf::Ratio(v) => ratio = Some(v),
      }
    }
    // Ratio below 2 would never let an oversized run settle
    // 倍数小于 2 时超大 run 永远无法落层
    let ratio = ratio.unwrap_or(k).max(2);
    Self { k, run_len, ratio }
  }

  /// Admission threshold of level n: run_len * ratio^n
  /// 第 n 层准入阈值：run_len * ratio^n
  pub fn max_run_len(&self, n: usize) -> usize {
    let mut len = self.run_len;
    for _ in 0..n {
      len = len.saturating_mul(self.ratio);
      if len == usize::MAX {
        break;
      }
    }
    len
  }
}
