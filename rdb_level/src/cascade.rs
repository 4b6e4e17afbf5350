//! Run admission and cascading promotion
//! run 接收与级联提升

use rdb_base::{Comparator, Entry, Error, Result, Run, RunFactory};

use crate::{RunCollector, conf::MAX_LEVELS, roll_out};

impl<K, V, F, C> RunCollector<K, V, F, C>
where
  F: RunFactory<K, V>,
  C: Comparator<K> + Clone,
{
  /// Store a sorted run at level 0
  /// 在第 0 层存放一个有序 run
  #[inline]
  pub fn receive_run<I: Iterator<Item = Entry<K, V>>>(&mut self, run: I) -> Result<()> {
    self.receive_at(0, run)
  }

  /// Store a sorted run at level n, cascading first if the level is full
  /// 在第 n 层存放一个有序 run，层满时先级联
  ///
  /// On cascade failure nothing is stored and `Error::Cascade` is returned;
  /// promotions already done for deeper levels are kept.
  /// 级联失败时不存放任何数据并返回 `Error::Cascade`；
  /// 已完成的更深层提升保持不变。
  pub fn receive_at<I: Iterator<Item = Entry<K, V>>>(&mut self, n: usize, run: I) -> Result<()> {
    if n >= MAX_LEVELS {
      return Err(Error::Depth {
        level: n,
        max: MAX_LEVELS,
      });
    }
    self.ensure(n);
    if self.levels[n].is_full()
      && let Err(err) = self.cascade(n)
    {
      log::error!("cascade from level {n}: {err}");
      return Err(Error::Cascade {
        level: n,
        source: Box::new(err),
      });
    }
    let slot = self.levels[n].len();
    let new = self.fill(n, slot, run)?;
    self.levels[n].push(new);
    log::trace!("level {n} slot {slot} filled");
    Ok(())
  }

  /// Create a run through the factory and feed it, released on failure
  /// 通过工厂创建 run 并填充，失败时释放
  fn fill<I: Iterator<Item = Entry<K, V>>>(&self, n: usize, slot: usize, run: I) -> Result<F::Run> {
    let mut new = self.factory.create_run(n, slot)?;
    if let Err(err) = new.receive(run) {
      if let Err(e) = new.release() {
        log::warn!("release failed run at level {n} slot {slot}: {e}");
      }
      return Err(err);
    }
    Ok(new)
  }

  /// Empty level n by promoting it, deepest promotion first
  /// 通过提升清空第 n 层，从最深处开始提升
  fn cascade(&mut self, n: usize) -> Result<()> {
    let mut top = n;
    loop {
      if top >= MAX_LEVELS {
        return Err(Error::Depth {
          level: top,
          max: MAX_LEVELS,
        });
      }
      self.ensure(top);
      if !self.levels[top].is_full() {
        break;
      }
      top += 1;
    }
    for l in (n..top).rev() {
      self.promote(l)?;
    }
    Ok(())
  }

  /// Merge level l into one run stored at level l+1, then release level l
  /// 将第 l 层归并为一个 run 存入第 l+1 层，然后释放第 l 层
  fn promote(&mut self, l: usize) -> Result<()> {
    let (lower, upper) = self.levels.split_at_mut(l + 1);
    let src = &mut lower[l];
    let dst = &mut upper[0];
    let slot = dst.len();
    log::debug!(
      "roll out level {l} ({} runs) into level {} slot {slot}",
      src.len(),
      l + 1
    );

    let mut new = self.factory.create_run(l + 1, slot)?;
    let filled =
      roll_out::<K, V, _, _>(&*src, self.cmp.clone()).and_then(|merged| new.receive(merged));
    if let Err(err) = filled {
      if let Err(e) = new.release() {
        log::warn!("release failed run at level {} slot {slot}: {e}", l + 1);
      }
      return Err(err);
    }
    dst.push(new);

    // Data already lives in level l+1, a failed release only leaks
    // 数据已在第 l+1 层，释放失败只会泄漏
    if let Err(err) = src.release::<K, V>() {
      log::warn!("release level {l} after roll out: {err}");
    }
    Ok(())
  }
}
