/// Incremental DAWG construction from sorted words.
pub mod builder;
/// Indented text rendering of a finished DAWG.
mod dump;
/// Membership and traversal queries on a finished DAWG.
pub mod query;
/// The register of canonical states and their fingerprints.
pub mod register;
/// States and their transition lists.
pub mod state;
/// Transition labels and conversion of words into symbols.
pub mod symbol;

pub use builder::{build_dawg, BuildError, Builder};
pub use query::Dawg;
pub use state::State;
pub use symbol::{IntoWord, Symbol};

/// Re-export `typed_arena::Arena`, which owns every state of a DAWG.
pub use typed_arena::Arena;
