//! Command handlers organized by store.
//!
//! | Module | Commands | Store |
//! |--------|----------|-------|
//! | `aggregate` | 13 | AggregateStore (both domains) |
//! | `data` | 3 | FlatStore |

pub mod aggregate;
pub mod data;
