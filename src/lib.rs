//! # minidawg
//!
//! Incremental construction of minimal
//! [DAWGs](https://en.wikipedia.org/wiki/Deterministic_acyclic_finite_state_automaton)
//! (Directed Acyclic Word Graphs) from sorted word lists.
//!
//! A DAWG is the smallest deterministic acyclic automaton accepting a finite set of words:
//! a trie whose identical suffixes have been merged. This crate builds one in a single pass
//! over sorted input using the incremental algorithm of
//! [Daciuk et al. (2000)](https://arxiv.org/abs/cs/0007009v1). Only the path of the most
//! recently added word is ever mutable; everything that falls off that path is folded into
//! an existing equivalent state or registered as a new canonical one on the spot.
//!
//! ## Features
//!
//! - **Generic over symbol type**: works with `char`, `u8`, `u16`, or any type implementing
//!   [`Symbol`](dawg::Symbol)
//! - **Minimal**: the finished graph has one state per distinct right language
//! - **Fast**: O(word length) lookups, binary search over wide states
//! - **Thread-safe**: a finished [`Dawg`](dawg::Dawg) only holds shared references to
//!   immutable arena-allocated states
//!
//! ## Quick Start
//!
//! ```
//! use minidawg::dawg::builder::Builder;
//! use minidawg::dawg::Arena;
//!
//! let arena = Arena::new();
//! let mut builder = Builder::new(&arena);
//! for word in ["tap", "taps", "top", "tops"] {
//!     builder.add(word).unwrap();
//! }
//! let dawg = builder.finish();
//!
//! assert!(dawg.contains("tops"));
//! assert!(!dawg.contains("to"));
//! // "ta" and "to" lead to the very same state.
//! assert!(std::ptr::eq(dawg.walk("ta").unwrap(), dawg.walk("to").unwrap()));
//! ```
//!
//! Words must arrive in ascending order. Repeating the previous word is harmless, going
//! backwards is an error:
//!
//! ```
//! use minidawg::dawg::builder::{build_dawg, BuildError};
//! use minidawg::dawg::Arena;
//!
//! let arena = Arena::new();
//! assert!(matches!(
//!     build_dawg(&arena, ["b", "b", "a"]),
//!     Err(BuildError::Order { .. })
//! ));
//! ```
//!
//! ## Generic Usage
//!
//! ```
//! use minidawg::dawg::builder::build_dawg;
//! use minidawg::dawg::Arena;
//!
//! let arena = Arena::new();
//! let words: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![1, 2, 4], vec![2, 3, 4]];
//! let dawg = build_dawg(&arena, words).unwrap();
//! assert!(dawg.contains(&[1, 2, 3]));
//! assert!(!dawg.contains(&[1, 2, 5]));
//! ```

#![warn(missing_docs)]

/// DAWG states, register, builder and queries.
pub mod dawg;
