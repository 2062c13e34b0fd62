//! Indented text rendering of a finished DAWG.
//!
//! Each state is printed as `#id`, with ids handed out in the order states
//! are first reached. Each transition is printed on its own line as the
//! symbol, followed by `!` when it leads to a final state, and the
//! destination is printed below it one level deeper. A state that has already
//! been printed shows up again as its bare `#id`, which is how shared suffixes
//! become visible.

use std::fmt;

use hashbrown::HashMap;

use super::query::Dawg;
use super::state::State;
use super::symbol::Symbol;

const INDENT: usize = 3;

impl<S: Symbol + fmt::Display> fmt::Display for Dawg<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids = HashMap::new();
        write_state(f, self.root(), 0, &mut ids)
    }
}

fn write_state<'a, S: Symbol + fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    state: &'a State<'a, S>,
    depth: usize,
    ids: &mut HashMap<*const State<'a, S>, usize>,
) -> fmt::Result {
    let pad = depth * INDENT;
    let key = state as *const State<'a, S>;
    if let Some(id) = ids.get(&key) {
        return writeln!(f, "{:pad$}#{id}", "");
    }
    let id = ids.len();
    ids.insert(key, id);
    writeln!(f, "{:pad$}#{id}", "")?;
    for (symbol, dest) in state.transitions().iter() {
        let mark = if dest.is_final() { "!" } else { "" };
        writeln!(f, "{:pad$}{symbol}{mark}", "")?;
        write_state(f, dest, depth + 1, ids)?;
    }
    Ok(())
}
