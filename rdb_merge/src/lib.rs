#![cfg_attr(docsrs, feature(doc_cfg))]

//! Merge iterator for multiple sorted runs
//! 多路有序 run 的归并迭代器

mod live;
mod merge;

pub use live::Live;
pub use merge::MergeIter;
