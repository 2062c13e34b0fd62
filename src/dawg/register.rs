//! The register of canonical states.
//!
//! States are folded bottom-up: by the time a state is fingerprinted, every
//! state it points to is already canonical. Comparing destinations by address
//! is then as good as comparing the subgraphs below them, so a fingerprint
//! only needs to look one level down.

use std::fmt;

use hashbrown::HashMap;
use log::trace;
use smallvec::SmallVec;
use typed_arena::Arena;

use super::state::{FrontierState, State, Transitions};
use super::symbol::Symbol;

/// A summary of a state's finality and transitions, with destinations
/// identified by address.
///
/// Two states have equal fingerprints iff they agree on finality and on the
/// symbols of their transitions, and each pair of corresponding transitions
/// leads to the very same canonical state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint<S: Symbol> {
    is_final: bool,
    transitions: SmallVec<[(S, usize); 4]>,
}

impl<S: Symbol> Fingerprint<S> {
    /// Computes the fingerprint of a state with the given finality and transitions.
    pub fn of(is_final: bool, transitions: &Transitions<'_, S>) -> Self {
        Fingerprint {
            is_final,
            transitions: transitions
                .iter()
                .map(|(symbol, dest)| (symbol, identity(dest)))
                .collect(),
        }
    }
}

/// Renders e.g. `!2'a'|0x5581f0c2b4a0'b'|0x5581f0c2b4d8`.
impl<S: Symbol> fmt::Display for Fingerprint<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_final {
            f.write_str("!")?;
        }
        write!(f, "{}", self.transitions.len())?;
        for (symbol, dest) in &self.transitions {
            write!(f, "{symbol:?}|{dest:#x}")?;
        }
        Ok(())
    }
}

fn identity<S: Symbol>(state: &State<'_, S>) -> usize {
    state as *const State<'_, S> as usize
}

impl<S: Symbol> State<'_, S> {
    /// Computes this state's fingerprint.
    pub fn fingerprint(&self) -> Fingerprint<S> {
        Fingerprint::of(self.is_final(), self.transitions())
    }
}

impl<S: Symbol> FrontierState<'_, S> {
    pub(crate) fn fingerprint(&self) -> Fingerprint<S> {
        Fingerprint::of(self.is_final(), self.transitions())
    }
}

/// Maps fingerprints to the canonical state that has them.
///
/// Entries are added once per distinct fingerprint and never replaced or
/// removed.
pub struct Register<'a, S: Symbol> {
    states: HashMap<Fingerprint<S>, &'a State<'a, S>>,
}

impl<'a, S: Symbol> Register<'a, S> {
    /// Creates an empty register.
    pub fn new() -> Self {
        Register {
            states: HashMap::new(),
        }
    }

    /// Returns the canonical state with the given fingerprint, if any.
    pub fn lookup(&self, fingerprint: &Fingerprint<S>) -> Option<&'a State<'a, S>> {
        self.states.get(fingerprint).copied()
    }

    /// Records `state` as the canonical representative of its fingerprint.
    ///
    /// The fingerprint must not be registered yet.
    pub(crate) fn insert(&mut self, state: &'a State<'a, S>) {
        let previous = self.states.insert(state.fingerprint(), state);
        debug_assert!(
            previous.is_none(),
            "fingerprint {} registered twice",
            state.fingerprint()
        );
    }

    /// Turns a frontier state into a canonical one.
    ///
    /// Returns the registered equivalent if there is one; the frontier state
    /// is then dropped without ever entering the arena. Otherwise the state is
    /// moved into the arena and registered.
    pub(crate) fn seal(
        &mut self,
        arena: &'a Arena<State<'a, S>>,
        state: FrontierState<'a, S>,
    ) -> &'a State<'a, S> {
        let fingerprint = state.fingerprint();
        if let Some(existing) = self.lookup(&fingerprint) {
            trace!("replacing state {fingerprint} with registered equivalent");
            return existing;
        }
        let sealed: &'a State<'a, S> = arena.alloc(state.seal());
        trace!("registering state {fingerprint}");
        self.insert(sealed);
        sealed
    }

    /// True if this exact state object is a registered representative.
    pub fn contains(&self, state: &State<'a, S>) -> bool {
        self.lookup(&state.fingerprint())
            .is_some_and(|registered| std::ptr::eq(registered, state))
    }

    /// Returns an iterator over every registered state, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &'a State<'a, S>> + '_ {
        self.states.values().copied()
    }

    /// Returns the number of registered states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True if nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<S: Symbol> Default for Register<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}
