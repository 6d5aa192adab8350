//! SessionRegistry の実装
//!
//! - `inmemory`: プロセス内の `BTreeMap` を使った実装

pub mod inmemory;

pub use inmemory::InMemorySessionRegistry;
