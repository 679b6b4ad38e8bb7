pub mod initialize;
pub mod journal;
pub mod migrate;
pub mod pool;
