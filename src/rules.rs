//! Built-in rule tables.
//!
//! Tables are ordered: position encodes priority, and the first rule whose
//! start condition matches a line wins. Today the only table is the Maven one;
//! tables for other build tools would live alongside it.

pub mod maven;

#[cfg(test)]
mod tests;
