use std::ops::Range;

use aok::{OK, Void};
use rdb_base::{Asc, Container, Error, Run};
use rdb_level::{Conf, MAX_LEVELS, MemCollector};
use rdb_merge::Live;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

type Mc = MemCollector<u32, String, Asc>;

fn run(keys: Range<u32>, tag: &str) -> Vec<(u32, String)> {
  keys.map(|k| (k, format!("{tag}{k}"))).collect()
}

fn val(c: &Mc, k: u32) -> Option<String> {
  c.get_val(&k).unwrap()
}

fn by_tens(a: &u32, b: &u32) -> std::cmp::Ordering {
  (a / 10).cmp(&(b / 10))
}

#[test]
fn test_three_disjoint_runs() -> Void {
  let mut c = Mc::mem(&[Conf::K(2), Conf::RunLen(1000)], Asc);
  c.add_run(run(0..10, "a"))?;
  c.add_run(run(10..20, "b"))?;
  c.add_run(run(20..30, "c"))?;

  assert_eq!(c.depth(), 2);
  let l0 = c.level(0).unwrap();
  let l1 = c.level(1).unwrap();
  assert_eq!(l0.len(), 1);
  assert_eq!(l1.len(), 1);
  assert_eq!(l1.runs()[0].len(), 20);

  // 5 and 15 live in level 1, 25 in level 0
  // 5 与 15 在第 1 层，25 在第 0 层
  assert!(l0.get::<u32, String>(&5)?.is_none());
  assert!(l0.get::<u32, String>(&15)?.is_none());
  assert!(l1.get::<u32, String>(&5)?.is_some());
  assert!(l1.get::<u32, String>(&15)?.is_some());
  assert!(l0.get::<u32, String>(&25)?.is_some());

  assert_eq!(val(&c, 5).as_deref(), Some("a5"));
  assert_eq!(val(&c, 15).as_deref(), Some("b15"));
  assert_eq!(val(&c, 25).as_deref(), Some("c25"));
  assert_eq!(val(&c, 30), None);
  assert_eq!(c.info(), "(10),(20)");
  OK
}

#[test]
fn test_cascade_counter() -> Void {
  let mut c = Mc::mem(&[Conf::K(3)], Asc);
  for i in 0..3 {
    c.add_run(run(i * 10..i * 10 + 5, "x"))?;
  }
  assert_eq!(c.depth(), 1);
  assert_eq!(c.level(0).unwrap().len(), 3);

  c.add_run(run(100..101, "y"))?;
  assert_eq!(c.level(0).unwrap().len(), 1);
  assert_eq!(c.level(1).unwrap().len(), 1);
  assert_eq!(c.level(1).unwrap().runs()[0].len(), 15);
  assert_eq!(c.entries(), 16);
  OK
}

#[test]
fn test_cascade_through_levels() -> Void {
  let mut c = Mc::mem(&[Conf::K(2)], Asc);
  let mut infos = Vec::new();
  for i in 0..7 {
    c.add_run(run(i..i + 1, "v"))?;
    infos.push(c.info());
  }
  assert_eq!(
    infos,
    [
      "(1)",
      "(1,1)",
      "(1),(2)",
      "(1,1),(2)",
      "(1),(2,2)",
      "(1,1),(2,2)",
      "(1),(2),(4)",
    ]
  );
  for i in 0..7 {
    assert_eq!(val(&c, i), Some(format!("v{i}")));
  }
  OK
}

#[test]
fn test_newest_wins() -> Void {
  let mut c = Mc::mem(&[Conf::K(2)], Asc);
  c.add_run(vec![(1, "old".to_owned()), (2, "old".to_owned())])?;
  c.add_run(vec![(1, "new".to_owned())])?;
  assert_eq!(val(&c, 1).as_deref(), Some("new"));
  assert_eq!(val(&c, 2).as_deref(), Some("old"));

  // Merged run keeps the newer value
  // 合并后的 run 保留较新的值
  c.add_run(vec![(3, "x".to_owned())])?;
  assert_eq!(c.level(1).unwrap().len(), 1);
  assert_eq!(val(&c, 1).as_deref(), Some("new"));

  // Level 0 shadows level 1
  // 第 0 层遮蔽第 1 层
  c.add_run(vec![(1, "newest".to_owned())])?;
  assert_eq!(val(&c, 1).as_deref(), Some("newest"));
  OK
}

#[test]
fn test_oversized_bypass() -> Void {
  let mut c = Mc::mem(&[Conf::K(2), Conf::RunLen(50)], Asc);
  c.add_run(run(0..10, "s"))?;
  c.add_run(run(0..100, "b"))?;
  assert_eq!(c.level(0).unwrap().len(), 1);
  assert_eq!(c.level(1).unwrap().len(), 1);
  assert_eq!(c.level(1).unwrap().runs()[0].len(), 100);
  // Level 0 is searched first, so the older small run shadows the bypassing one
  // 第 0 层先被查找，因此较旧的小 run 遮蔽了跳层的 run
  assert_eq!(val(&c, 5).as_deref(), Some("s5"));
  assert_eq!(val(&c, 50).as_deref(), Some("b50"));

  // 50 * 2^3 = 400 admits 300 at level 3
  // 50 * 2^3 = 400 可在第 3 层容纳 300
  c.add_run(run(0..300, "h"))?;
  assert_eq!(c.depth(), 4);
  assert!(c.level(2).unwrap().is_empty());
  assert_eq!(c.level(3).unwrap().len(), 1);
  assert_eq!(c.info(), "(10),(100),(),(300)");
  OK
}

#[test]
fn test_prefix_search() -> Void {
  let mut c = Mc::mem(&[Conf::K(2)], Asc);
  c.add_run(run(10..20, "a"))?;
  c.add_run(run(15..25, "b"))?;
  c.add_run(run(18..19, "c"))?;
  assert_eq!(c.info(), "(1),(15)");

  let got: Vec<(u32, String)> = Live(c.prefix_search(&by_tens, &13)?).collect();
  let mut want = run(10..15, "a");
  want.extend(run(15..18, "b"));
  want.extend(run(18..19, "c"));
  want.extend(run(19..20, "b"));
  assert_eq!(got, want);

  // Fresh iterator per call
  // 每次调用返回新的迭代器
  assert_eq!(c.prefix_search(&by_tens, &20)?.count(), 5);
  assert_eq!(c.prefix_search(&by_tens, &20)?.count(), 5);
  assert_eq!(c.prefix_search(&by_tens, &90)?.count(), 0);
  OK
}

#[test]
fn test_tombstones() -> Void {
  let mut c = Mc::mem(&[Conf::K(2)], Asc);
  c.add_run(run(0..5, "v"))?;
  c.rm_run(vec![2, 3])?;

  assert_eq!(c.get(&2)?, Some(Container::rm()));
  assert_eq!(val(&c, 2), None);
  assert_eq!(val(&c, 1).as_deref(), Some("v1"));

  // Tombstones survive the merge and still shadow
  // 删除标记在合并后仍然存在并继续遮蔽
  c.add_run(run(10..11, "w"))?;
  assert_eq!(c.level(1).unwrap().len(), 1);
  assert!(c.get(&3)?.is_some_and(|v| v.is_rm()));

  let live: Vec<u32> = Live(c.prefix_search(&|_: &u32, _: &u32| std::cmp::Ordering::Equal, &0)?)
    .map(|(k, _)| k)
    .collect();
  assert_eq!(live, vec![0, 1, 4, 10]);

  c.add_run(vec![(2, "back".to_owned())])?;
  assert_eq!(val(&c, 2).as_deref(), Some("back"));
  OK
}

#[test]
fn test_roll_out() -> Void {
  let mut c = Mc::mem(&[Conf::K(3)], Asc);
  c.add_run(vec![(1, "a".to_owned()), (2, "a".to_owned())])?;
  c.add_run(vec![(2, "b".to_owned()), (3, "b".to_owned())])?;

  let merged: Vec<(u32, Option<String>)> = c
    .roll_out(0)?
    .unwrap()
    .map(|(k, v)| (k, v.into_val()))
    .collect();
  assert_eq!(
    merged,
    vec![
      (1, Some("a".to_owned())),
      (2, Some("b".to_owned())),
      (3, Some("b".to_owned())),
    ]
  );
  assert!(c.roll_out(1)?.is_none());
  // Roll-out only reads
  // 合并只读
  assert_eq!(c.level(0).unwrap().len(), 2);
  OK
}

#[test]
fn test_clear_release() -> Void {
  let mut c = Mc::mem(&[Conf::K(2)], Asc);
  for i in 0..5 {
    c.add_run(run(i * 10..i * 10 + 10, "v"))?;
  }
  assert!(c.depth() > 1);
  assert!(c.bytes()? > c.used_bytes()?);

  c.clear()?;
  assert_eq!(c.depth(), 1);
  assert_eq!(c.entries(), 0);
  assert_eq!(c.info(), "()");
  assert_eq!(c.get(&5)?, None);
  assert_eq!(c.used_bytes()?, 0);

  c.add_run(run(0..3, "again"))?;
  assert_eq!(val(&c, 1).as_deref(), Some("again1"));
  c.release()?;
  OK
}

#[test]
fn test_receive_run_direct() -> Void {
  let mut c = Mc::mem(&[Conf::K(2), Conf::RunLen(1)], Asc);
  // receive_run skips admission, any size lands in level 0
  // receive_run 跳过准入检查，任何大小都进入第 0 层
  c.receive_run((0..10u32).map(|k| (k, Container::new(k.to_string()))))?;
  assert_eq!(c.level(0).unwrap().len(), 1);
  c.receive_at(2, (0..3u32).map(|k| (k, Container::rm())))?;
  assert_eq!(c.depth(), 3);
  assert_eq!(c.info(), "(10),(),(3)");
  // Level 0 is newer than level 2
  // 第 0 层比第 2 层新
  assert_eq!(val(&c, 1).as_deref(), Some("1"));
  OK
}

#[test]
fn test_receive_at_depth_bound() -> Void {
  let mut c = Mc::mem(&[Conf::K(2)], Asc);
  for n in [MAX_LEVELS, usize::MAX] {
    assert!(matches!(
      c.receive_at(n, (0..3u32).map(|k| (k, Container::rm()))),
      Err(Error::Depth { max, .. }) if max == MAX_LEVELS
    ));
  }
  assert_eq!(c.depth(), 1);

  c.receive_at(MAX_LEVELS - 1, (0..3u32).map(|k| (k, Container::new(k.to_string()))))?;
  assert_eq!(c.depth(), MAX_LEVELS);
  assert_eq!(val(&c, 2).as_deref(), Some("2"));
  OK
}
