#![cfg_attr(docsrs, feature(doc_cfg))]

//! In-memory sorted run and its factory
//! 内存有序 run 及其工厂

mod factory;
mod sorted;

pub use factory::MemFactory;
pub use sorted::SortedRun;
