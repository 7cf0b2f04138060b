//! Repository 実装
//!
//! 現在はインメモリ実装のみ。レジストリはプロセスの生存期間だけ
//! 存在すればよく、永続化は仕様外。

pub mod inmemory;

pub use inmemory::InMemoryRegistryRepository;
