//! Level chain persistence
//! 层级链持久化
//!
//! Per level: varint(counter) + runs in slot order + flag(1)
//! flag 1 = another level follows, 0 = end of chain
//! 每层：varint(counter) + 按槽位顺序的 run + flag(1)
//! flag 1 = 后面还有一层，0 = 链结束

use std::io::{Read, Write};

use rdb_base::{Comparator, Error, Result, Run, RunFactory, varint};

use crate::{Level, RunCollector, conf::MAX_LEVELS};

const MORE: u8 = 1;
const END: u8 = 0;

impl<K, V, F, C> RunCollector<K, V, F, C>
where
  F: RunFactory<K, V>,
  C: Comparator<K> + Clone,
{
  pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
    let last = self.levels.len() - 1;
    for (n, level) in self.levels.iter().enumerate() {
      varint::write(w, level.len() as u64)?;
      for run in level.runs() {
        run.write_to(w)?;
      }
      w.write_all(&[if n < last { MORE } else { END }])?;
    }
    Ok(())
  }

  /// Replace current content with the chain read from r
  /// 用从 r 读取的层级链替换当前内容
  ///
  /// On error the runs read so far are released and the collector is unchanged.
  /// 出错时释放已读取的 run，收集器保持不变。
  pub fn read_from<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<()> {
    let mut levels = Vec::new();
    if let Err(err) = self.read_levels(r, &mut levels) {
      for level in &mut levels {
        let _ = level.release::<K, V>();
      }
      return Err(err);
    }
    log::debug!("read {} levels", levels.len());
    let old = std::mem::replace(&mut self.levels, levels);
    for mut level in old {
      if let Err(err) = level.release::<K, V>() {
        log::warn!("release replaced level {}: {err}", level.n());
      }
    }
    Ok(())
  }

  fn read_levels<R: Read + ?Sized>(
    &self,
    r: &mut R,
    levels: &mut Vec<Level<F::Run>>,
  ) -> Result<()> {
    loop {
      let n = levels.len();
      if n >= MAX_LEVELS {
        return Err(Error::Depth {
          level: n,
          max: MAX_LEVELS,
        });
      }
      let count = varint::read(r)?;
      if count > self.conf.k as u64 {
        return Err(Error::RunCount {
          level: n,
          count,
          k: self.conf.k,
        });
      }
      levels.push(Level::new(n, self.conf.k, self.conf.max_run_len(n)));
      for slot in 0..count as usize {
        let mut run = self.factory.create_run(n, slot)?;
        if let Err(err) = run.read_from(r) {
          if let Err(e) = run.release() {
            log::warn!("release unread run at level {n} slot {slot}: {e}");
          }
          return Err(err);
        }
        levels[n].push(run);
      }
      let mut flag = [0u8; 1];
      r.read_exact(&mut flag)?;
      match flag[0] {
        END => return Ok(()),
        MORE => {}
        other => return Err(Error::InvalidFlag(other)),
      }
    }
  }
}
