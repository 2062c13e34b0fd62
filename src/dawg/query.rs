use hashbrown::HashSet;

use super::state::State;
use super::symbol::{IntoWord, Symbol};

/// A finished DAWG.
///
/// Every reachable state is canonical and immutable, so a `Dawg` can be
/// copied freely and queried from any number of threads.
///
/// ```
/// use minidawg::dawg::builder::build_dawg;
/// use minidawg::dawg::Arena;
///
/// let arena = Arena::new();
/// let dawg = build_dawg(&arena, ["BAKE", "CAKE", "FAKE", "LAKE", "MAKE"]).unwrap();
/// assert!(dawg.contains("CAKE"));
/// assert!(!dawg.contains("AKE"));
/// assert!(dawg.has_prefix("MA"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Dawg<'a, S: Symbol> {
    root: &'a State<'a, S>,
    word_count: usize,
}

impl<'a, S: Symbol> Dawg<'a, S> {
    pub(crate) fn new(root: &'a State<'a, S>, word_count: usize) -> Self {
        Dawg { root, word_count }
    }

    /// Returns the start state.
    pub fn root(&self) -> &'a State<'a, S> {
        self.root
    }

    /// Follows `word` from the start state and returns the state it ends in.
    ///
    /// Returns `None` as soon as a symbol has no transition.
    pub fn walk(&self, word: impl IntoWord<S>) -> Option<&'a State<'a, S>> {
        word.collect_word()
            .iter()
            .try_fold(self.root, |state, &symbol| state.get(symbol))
    }

    /// True if `word` is one of the words the DAWG was built from.
    #[inline]
    pub fn contains(&self, word: impl IntoWord<S>) -> bool {
        self.walk(word).is_some_and(|state| state.is_final())
    }

    /// True if some word starts with `prefix`.
    #[inline]
    pub fn has_prefix(&self, prefix: impl IntoWord<S>) -> bool {
        self.walk(prefix).is_some()
    }

    /// Returns the number of distinct words.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Returns every state reachable from the start state exactly once, in
    /// depth-first order with transitions taken in ascending symbol order.
    pub fn reachable(&self) -> Vec<&'a State<'a, S>> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        while let Some(state) = stack.pop() {
            if !visited.insert(state as *const State<'a, S>) {
                continue;
            }
            order.push(state);
            stack.extend(state.transitions().iter().rev().map(|(_, dest)| dest));
        }
        order
    }

    /// Returns the number of distinct reachable states, the start state included.
    pub fn state_count(&self) -> usize {
        self.reachable().len()
    }

    /// Returns the number of transitions between distinct reachable states.
    pub fn transition_count(&self) -> usize {
        self.reachable()
            .iter()
            .map(|state| state.transition_count())
            .sum()
    }

    /// Returns an iterator over all words in lexicographic order.
    pub fn words(&self) -> Words<'a, S> {
        Words {
            start: Some(self.root),
            stack: vec![(self.root, 0)],
            prefix: Vec::new(),
        }
    }
}

impl<'a> Dawg<'a, char> {
    /// Returns an iterator over all words as strings, in lexicographic order.
    pub fn strings(&self) -> impl Iterator<Item = String> + 'a {
        self.words().map(|word| word.into_iter().collect())
    }
}

/// Iterator over the words of a [`Dawg`], see [`Dawg::words`].
pub struct Words<'a, S: Symbol> {
    start: Option<&'a State<'a, S>>,
    stack: Vec<(&'a State<'a, S>, usize)>,
    prefix: Vec<S>,
}

impl<'a, S: Symbol> Iterator for Words<'a, S> {
    type Item = Vec<S>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            if start.is_final() {
                return Some(Vec::new());
            }
        }
        loop {
            let (state, index) = self.stack.last_mut()?;
            let next = state.transitions().get(*index);
            *index += 1;
            match next {
                Some((symbol, dest)) => {
                    self.prefix.push(symbol);
                    self.stack.push((dest, 0));
                    if dest.is_final() {
                        return Some(self.prefix.clone());
                    }
                }
                None => {
                    self.stack.pop();
                    self.prefix.pop();
                }
            }
        }
    }
}
