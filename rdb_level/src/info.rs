//! Size and structure diagnostics
//! 大小与结构诊断

use rdb_base::{Comparator, Result, Run, RunFactory};

use crate::RunCollector;

impl<K, V, F, C> RunCollector<K, V, F, C>
where
  F: RunFactory<K, V>,
  C: Comparator<K> + Clone,
{
  pub fn used_bytes(&self) -> Result<u64> {
    let mut sum = 0;
    for run in self.levels.iter().flat_map(|l| l.runs()) {
      sum += run.used_bytes()?;
    }
    Ok(sum)
  }

  pub fn bytes(&self) -> Result<u64> {
    let mut sum = 0;
    for run in self.levels.iter().flat_map(|l| l.runs()) {
      sum += run.bytes()?;
    }
    Ok(sum)
  }

  /// Entries over all runs, duplicates across runs counted each time
  /// 所有 run 的条目数，跨 run 的重复键分别计数
  pub fn entries(&self) -> usize {
    self
      .levels
      .iter()
      .flat_map(|l| l.runs())
      .map(|r| r.len())
      .sum()
  }

  /// "(runs of level 0),(runs of level 1),..."
  pub fn info(&self) -> String {
    let mut out = String::new();
    for (n, level) in self.levels.iter().enumerate() {
      if n > 0 {
        out.push(',');
      }
      out.push('(');
      for (i, run) in level.runs().iter().enumerate() {
        if i > 0 {
          out.push(',');
        }
        out.push_str(&run.info());
      }
      out.push(')');
    }
    out
  }
}
