//! # pla-rs: completing partially specified truth tables
//!
//! **`pla-rs`** turns a sparse truth table, given as rows of ternary input patterns
//! and output labels, into a complete specification over the whole input space,
//! ready to be handed to a two-level logic minimizer such as Espresso.
//!
//! ## How completion works
//!
//! Every explicit row is kept verbatim, wildcards included. Every concrete input
//! that *no* explicit pattern covers gets a row of its own with the all-don't-care
//! output, meaning "unspecified". Inputs that are reached by some wildcard pattern
//! are left alone, even if they never appear literally.
//!
//! ```rust
//! use pla_rs::complete::complete;
//! use pla_rs::types::Row;
//!
//! let rows = vec![Row::parse("0-", "1").unwrap()];
//! let table = complete(&rows, 2, 1).unwrap();
//!
//! let lines: Vec<String> = table.iter().map(|r| r.to_string()).collect();
//! assert_eq!(lines, ["0- 1", "10 -", "11 -"]);
//! ```
//!
//! ## PLA files
//!
//! ```rust
//! use pla_rs::complete::Completer;
//! use pla_rs::pla::Pla;
//!
//! let pla: Pla = ".i 2\n.o 1\n11 1\n.e\n".parse().unwrap();
//! let completed = pla.complete(&Completer::default()).unwrap();
//! assert_eq!(completed.rows.len(), 4);
//! print!("{}", completed);
//! ```
//!
//! ## Core Components
//!
//! - **[`enumerate`]**: all bitstrings of a given width, in counting order.
//! - **[`matcher`]**: wildcard matching of concrete inputs against patterns.
//! - **[`complete`]**: the completion engine and its configuration.
//! - **[`pla`]**: reading and writing the PLA text format.
//! - **[`cache`]**: optional caching of completed tables.

pub mod bitset;
pub mod cache;
pub mod complete;
pub mod enumerate;
pub mod error;
pub mod matcher;
pub mod pla;
pub mod table;
pub mod types;

pub use error::{Error, Result};
