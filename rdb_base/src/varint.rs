//! LEB128 varint framing
//! LEB128 变长整数编码

use std::io::{Read, Write};

use crate::{Error, Result};

/// Max encoded length of u64
/// u64 最大编码长度
pub const MAX_LEN: usize = 10;

/// Encoded length of n
/// n 的编码长度
#[inline]
pub fn len(mut n: u64) -> usize {
  let mut len = 1;
  while n >= 0x80 {
    n >>= 7;
    len += 1;
  }
  len
}

#[inline]
pub fn encode(mut n: u64, buf: &mut Vec<u8>) {
  while n >= 0x80 {
    buf.push((n as u8) | 0x80);
    n >>= 7;
  }
  buf.push(n as u8);
}

pub fn write<W: Write + ?Sized>(w: &mut W, n: u64) -> Result<()> {
  let mut buf = Vec::with_capacity(MAX_LEN);
  encode(n, &mut buf);
  w.write_all(&buf)?;
  Ok(())
}

pub fn read<R: Read + ?Sized>(r: &mut R) -> Result<u64> {
  let mut n = 0u64;
  let mut byte = [0u8; 1];
  for i in 0..MAX_LEN {
    r.read_exact(&mut byte)?;
    let b = byte[0];
    let shift = 7 * i as u32;
    // Last byte may only carry the top bit of u64
    // 最后一个字节只能携带 u64 的最高位
    if i == MAX_LEN - 1 && b > 1 {
      return Err(Error::VarintOverflow);
    }
    n |= u64::from(b & 0x7f) << shift;
    if b & 0x80 == 0 {
      return Ok(n);
    }
  }
  Err(Error::VarintOverflow)
}
