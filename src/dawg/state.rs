use std::fmt;

use super::symbol::Symbol;

/// The outgoing transitions of a state, sorted strictly ascending by symbol.
///
/// Doesn't allocate until there are at least three transitions. Most states of
/// a natural-language DAWG have one or two.
#[derive(Clone, Debug)]
pub enum Transitions<'a, S: Symbol> {
    /// No transitions.
    None,
    /// Exactly one transition (symbol, destination).
    One((S, &'a State<'a, S>)),
    /// Exactly two transitions (symbol1, destination1, symbol2, destination2).
    Two((S, &'a State<'a, S>, S, &'a State<'a, S>)),
    /// Three or more transitions stored in a vector.
    Many(Vec<(S, &'a State<'a, S>)>),
}

impl<'a, S: Symbol> Transitions<'a, S> {
    /// Returns the transition at the specified position.
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<(S, &'a State<'a, S>)> {
        match self {
            Transitions::None => None,
            Transitions::One(t) => match index {
                0 => Some(*t),
                _ => None,
            },
            Transitions::Two((s1, d1, s2, d2)) => match index {
                0 => Some((*s1, *d1)),
                1 => Some((*s2, *d2)),
                _ => None,
            },
            Transitions::Many(transitions) => transitions.get(index).copied(),
        }
    }

    /// Returns the transition with the greatest symbol.
    #[inline]
    pub fn last(&self) -> Option<(S, &'a State<'a, S>)> {
        match self.len() {
            0 => None,
            n => self.get(n - 1),
        }
    }

    /// Returns the destination of the transition labeled `symbol`.
    ///
    /// Lists of three or more transitions are binary searched.
    #[inline]
    pub fn find(&self, symbol: S) -> Option<&'a State<'a, S>> {
        match self {
            Transitions::None => None,
            Transitions::One((s, dest)) => (*s == symbol).then_some(*dest),
            Transitions::Two((s1, d1, s2, d2)) => {
                if symbol == *s1 {
                    Some(*d1)
                } else if symbol == *s2 {
                    Some(*d2)
                } else {
                    None
                }
            }
            Transitions::Many(transitions) => transitions
                .binary_search_by(|(s, _)| s.cmp(&symbol))
                .ok()
                .map(|i| transitions[i].1),
        }
    }

    /// Returns the number of transitions.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Transitions::None => 0,
            Transitions::One(_) => 1,
            Transitions::Two(_) => 2,
            Transitions::Many(transitions) => transitions.len(),
        }
    }

    /// True if there are no transitions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Transitions::None)
    }

    /// Returns an iterator over the transitions in ascending symbol order.
    #[inline]
    pub fn iter(&self) -> TransitionIter<'_, 'a, S> {
        TransitionIter {
            transitions: self,
            front: 0,
            back: self.len(),
        }
    }

    /// True if the symbols are strictly increasing, i.e. sorted without duplicates.
    pub fn is_strictly_increasing(&self) -> bool {
        self.iter()
            .zip(self.iter().skip(1))
            .all(|((s1, _), (s2, _))| s1 < s2)
    }

    /// Appends a transition. The symbol must be greater than every symbol
    /// already present.
    fn push(&mut self, symbol: S, dest: &'a State<'a, S>) {
        debug_assert!(
            self.last().is_none_or(|(last, _)| last < symbol),
            "transition symbols must be strictly increasing: {symbol:?} after {:?}",
            self.last().map(|(s, _)| s)
        );
        let t = (symbol, dest);
        match self {
            Transitions::None => *self = Transitions::One(t),
            Transitions::One((s1, d1)) => *self = Transitions::Two((*s1, *d1, t.0, t.1)),
            Transitions::Two((s1, d1, s2, d2)) => {
                *self = Transitions::Many(vec![(*s1, *d1), (*s2, *d2), t])
            }
            Transitions::Many(transitions) => transitions.push(t),
        }
    }
}

/// An iterator over the transitions of a state.
#[derive(Clone)]
pub struct TransitionIter<'t, 'a, S: Symbol> {
    transitions: &'t Transitions<'a, S>,
    front: usize,
    back: usize,
}

impl<'a, S: Symbol> Iterator for TransitionIter<'_, 'a, S> {
    type Item = (S, &'a State<'a, S>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let next = self.transitions.get(self.front)?;
        self.front += 1;
        Some(next)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<S: Symbol> DoubleEndedIterator for TransitionIter<'_, '_, S> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.transitions.get(self.back)
    }
}

impl<S: Symbol> ExactSizeIterator for TransitionIter<'_, '_, S> {}

/// A canonical state of the automaton.
///
/// Only obtainable by sealing a frontier state, after which it lives in
/// the builder's arena and is shared by reference between every transition
/// that leads to it. It has no mutating methods.
pub struct State<'a, S: Symbol> {
    transitions: Transitions<'a, S>,
    is_final: bool,
}

impl<'a, S: Symbol> State<'a, S> {
    /// True if reaching this state after consuming the input accepts it.
    #[inline]
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Always true: a `State` is sealed for good.
    #[inline]
    pub fn is_canonical(&self) -> bool {
        true
    }

    /// The outgoing transitions.
    #[inline]
    pub fn transitions(&self) -> &Transitions<'a, S> {
        &self.transitions
    }

    /// Returns the state the `symbol` transition leads to.
    #[inline]
    pub fn get(&self, symbol: S) -> Option<&'a State<'a, S>> {
        self.transitions.find(symbol)
    }

    /// Returns the number of outgoing transitions.
    #[inline]
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}

impl<S: Symbol> fmt::Debug for State<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("is_final", &self.is_final)
            .field(
                "symbols",
                &self.transitions.iter().map(|(s, _)| s).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// A state on the builder's frontier that may still gain transitions.
pub(crate) struct FrontierState<'a, S: Symbol> {
    transitions: Transitions<'a, S>,
    is_final: bool,
}

impl<'a, S: Symbol> FrontierState<'a, S> {
    pub(crate) fn new(is_final: bool) -> Self {
        FrontierState {
            transitions: Transitions::None,
            is_final,
        }
    }

    pub(crate) fn is_final(&self) -> bool {
        self.is_final
    }

    pub(crate) fn set_final(&mut self) {
        self.is_final = true;
    }

    pub(crate) fn transitions(&self) -> &Transitions<'a, S> {
        &self.transitions
    }

    /// Appends a transition. Destinations are always sealed states.
    pub(crate) fn push(&mut self, symbol: S, dest: &'a State<'a, S>) {
        self.transitions.push(symbol, dest);
    }

    /// Freezes this state. The result must go through the register before it
    /// is linked into the graph.
    pub(crate) fn seal(self) -> State<'a, S> {
        State {
            transitions: self.transitions,
            is_final: self.is_final,
        }
    }
}
