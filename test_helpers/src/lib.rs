//! Test helpers shared across the flagtag crates.
//!
//! Tagged options can read their defaults from environment variables, so
//! tests need a way to set and clear variables without leaking state into
//! other tests. The [`env`] module provides guards for that.

pub mod env;
