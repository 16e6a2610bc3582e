//! Declarative pool and oracle configuration.
//!
//! Config structs validate their invariants on construction, so a value
//! that exists is always usable to build a pool or an oracle.

mod oracle;
mod pool;

pub use oracle::OracleConfig;
pub use pool::PoolConfig;
