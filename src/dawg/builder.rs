use std::cmp::Ordering;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::debug;
use mark_last::MarkLastIterator;
use thiserror::Error;
use typed_arena::Arena;

use super::query::Dawg;
use super::register::Register;
use super::state::{FrontierState, State};
use super::symbol::{IntoWord, Symbol};

/// Incremental construction of a minimal DAWG from sorted words.
///
/// The path spelling the most recently added word (the frontier) is the only
/// part of the graph that can still change, and it is kept as a stack of
/// mutable states outside the arena. When a new word diverges from the
/// previous one, every frontier state below the divergence point is sealed,
/// deepest first, and either registered as canonical or replaced by an
/// equivalent registered state.
pub struct Builder<'a, S: Symbol> {
    arena: &'a Arena<State<'a, S>>,
    root: FrontierState<'a, S>,
    frontier: Vec<FrontierEntry<'a, S>>,
    register: Register<'a, S>,
    word_count: usize,
}

/// A frontier state together with the symbol of the transition leading to it.
struct FrontierEntry<'a, S: Symbol> {
    symbol: S,
    state: FrontierState<'a, S>,
}

impl<'a, S: Symbol> Builder<'a, S> {
    /// Creates a builder that allocates canonical states in `arena`.
    pub fn new(arena: &'a Arena<State<'a, S>>) -> Self {
        Builder {
            arena,
            root: FrontierState::new(false),
            frontier: Vec::new(),
            register: Register::new(),
            word_count: 0,
        }
    }

    /// Adds a word to the DAWG being constructed.
    ///
    /// Adding the same word twice in a row is a no-op. The empty word is
    /// accepted, but only as the first word: it marks the start state final,
    /// so the finished DAWG contains `""`. This differs from treating the
    /// previous word as initially empty, under which a leading `""` would be
    /// an ignored duplicate and could never be stored.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Order`] if `word` sorts before the previously
    /// added word. The builder is left untouched in that case.
    pub fn add(&mut self, word: impl IntoWord<S>) -> Result<(), BuildError<S>> {
        let word = word.collect_word();
        let Some(prefix_len) = self.prefix_len(&word)? else {
            return Ok(());
        };
        self.seal_frontier(prefix_len);
        if prefix_len == word.len() {
            self.top_mut().set_final();
        }
        self.frontier.extend(
            word[prefix_len..]
                .iter()
                .copied()
                .mark_last()
                .map(|(last, symbol)| FrontierEntry {
                    symbol,
                    state: FrontierState::new(last),
                }),
        );
        self.word_count += 1;
        Ok(())
    }

    /// Returns the length of the common prefix of `word` and the previous
    /// word, or `None` if the two are equal.
    fn prefix_len(&self, word: &[S]) -> Result<Option<usize>, BuildError<S>> {
        if self.word_count == 0 {
            return Ok(Some(0));
        }
        let prefix_len = self
            .frontier
            .iter()
            .zip(word)
            .take_while(|(entry, symbol)| entry.symbol == **symbol)
            .count();
        let ordering = match (self.frontier.get(prefix_len), word.get(prefix_len)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(entry), Some(symbol)) => symbol.cmp(&entry.symbol),
        };
        match ordering {
            Ordering::Equal => Ok(None),
            Ordering::Greater => Ok(Some(prefix_len)),
            Ordering::Less => Err(BuildError::Order {
                previous: self.previous_word(),
                word: word.to_vec(),
            }),
        }
    }

    /// Seals frontier states until only `depth` of them are left, linking each
    /// sealed state to its parent.
    fn seal_frontier(&mut self, depth: usize) {
        while self.frontier.len() > depth {
            let Some(entry) = self.frontier.pop() else {
                break;
            };
            let sealed = self.register.seal(self.arena, entry.state);
            self.top_mut().push(entry.symbol, sealed);
        }
    }

    /// The deepest frontier state, or the start state if the frontier is empty.
    fn top_mut(&mut self) -> &mut FrontierState<'a, S> {
        match self.frontier.last_mut() {
            Some(entry) => &mut entry.state,
            None => &mut self.root,
        }
    }

    /// Returns the most recently added word.
    pub fn previous_word(&self) -> Vec<S> {
        self.frontier.iter().map(|entry| entry.symbol).collect()
    }

    /// Returns the number of distinct words added so far.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Returns the register of canonical states.
    pub fn register(&self) -> &Register<'a, S> {
        &self.register
    }

    /// Finalizes construction and returns the finished DAWG.
    ///
    /// Seals whatever is left of the frontier, then the start state itself.
    /// The start state is moved into the arena but never registered, since no
    /// other state of an acyclic automaton can be equivalent to it.
    pub fn finish(mut self) -> Dawg<'a, S> {
        self.seal_frontier(0);
        let root: &'a State<'a, S> = self.arena.alloc(self.root.seal());
        debug!(
            "finished DAWG with {} words and {} registered states",
            self.word_count,
            self.register.len()
        );
        Dawg::new(root, self.word_count)
    }
}

/// Errors that can occur while building a DAWG.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError<S: Symbol> {
    /// A word sorted before the word added just before it.
    #[error("words out of order: {word:?} was added after {previous:?}")]
    Order {
        /// The previously added word.
        previous: Vec<S>,
        /// The rejected word.
        word: Vec<S>,
    },
}

/// Errors that can occur while building a DAWG from a word list.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The word list couldn't be read.
    #[error("failed to read word list")]
    Io(#[from] io::Error),
    /// A word was out of order.
    #[error("line {line}: {source}")]
    Build {
        /// The 1-based line number of the offending word.
        line: usize,
        /// The ordering violation.
        source: BuildError<char>,
    },
}

/// Builds a DAWG from sorted words.
///
/// Consecutive duplicates are ignored. Construction stops at the first word
/// that is out of order.
///
/// # Examples
///
/// ```
/// use minidawg::dawg::builder::build_dawg;
/// use minidawg::dawg::Arena;
///
/// let arena = Arena::new();
/// let dawg = build_dawg(&arena, ["APPLE", "BANANA", "CHERRY"]).unwrap();
/// assert!(dawg.contains("BANANA"));
/// assert!(!dawg.contains("APRICOT"));
///
/// let arena = Arena::new();
/// let words: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![1, 2, 4], vec![2, 3, 4]];
/// let dawg = build_dawg(&arena, words).unwrap();
/// assert!(dawg.contains([1, 2, 4]));
/// assert!(!dawg.contains([1, 2]));
/// ```
pub fn build_dawg<'a, S, W>(
    arena: &'a Arena<State<'a, S>>,
    words: impl IntoIterator<Item = W>,
) -> Result<Dawg<'a, S>, BuildError<S>>
where
    S: Symbol,
    W: IntoWord<S>,
{
    let mut builder = Builder::new(arena);
    for word in words {
        builder.add(word)?;
    }
    Ok(builder.finish())
}

/// Builds a DAWG from a sorted word list, one word per line.
///
/// Trailing whitespace is trimmed. Blank lines and lines starting with `#` are
/// skipped.
pub fn build_dawg_from_reader<'a>(
    arena: &'a Arena<State<'a, char>>,
    mut reader: impl BufRead,
) -> Result<Dawg<'a, char>, LoadError> {
    let mut builder = Builder::new(arena);
    // One buffer for every line instead of allocating through lines().
    let mut buf = String::with_capacity(80);
    let mut line = 0;
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        line += 1;
        let word = buf.trim_end();
        if word.is_empty() || is_comment(word) {
            continue;
        }
        builder
            .add(word)
            .map_err(|source| LoadError::Build { line, source })?;
    }
    Ok(builder.finish())
}

/// Builds a DAWG from a sorted word list file. See [`build_dawg_from_reader`].
///
/// ```no_run
/// use minidawg::dawg::builder::build_dawg_from_file;
/// use minidawg::dawg::Arena;
///
/// let arena = Arena::new();
/// let dawg = build_dawg_from_file(&arena, "dictionary.txt").unwrap();
/// ```
pub fn build_dawg_from_file<'a>(
    arena: &'a Arena<State<'a, char>>,
    path: impl AsRef<Path>,
) -> Result<Dawg<'a, char>, LoadError> {
    let file = File::open(path)?;
    build_dawg_from_reader(arena, BufReader::new(file))
}

/// Returns true if this line is a comment.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn order_err(previous: &str, word: &str) -> BuildError<char> {
        BuildError::Order {
            previous: previous.chars().collect(),
            word: word.chars().collect(),
        }
    }

    #[test]
    fn suffixes_of_a_single_word_fold_into_its_chain() {
        // Each word skips part of WORKBENCH and rejoins its chain.
        let single = Arena::new();
        let single = build_dawg(&single, ["WORKBENCH"]).unwrap();
        assert_eq!(single.state_count(), "WORKBENCH".len() + 1);

        let arena = Arena::new();
        let folded = build_dawg(&arena, ["WBENCH", "WENCH", "WORKBENCH", "WRKBENCH"]).unwrap();
        assert_eq!(folded.state_count(), single.state_count());
        assert_eq!(arena.len(), folded.state_count());
        assert_eq!(folded.transition_count(), single.transition_count() + 3);
    }

    #[test]
    fn multibyte_suffixes_are_shared() {
        let single = Arena::new();
        let single = build_dawg(&single, ["überübermorgen"]).unwrap();

        let arena = Arena::new();
        let both = build_dawg(&arena, ["übermorgen", "überübermorgen"]).unwrap();
        assert_eq!(both.state_count(), single.state_count());
        assert!(std::ptr::eq(
            both.walk("überm").unwrap(),
            both.walk("überüberm").unwrap()
        ));
        assert!(!std::ptr::eq(
            both.walk("über").unwrap(),
            both.walk("überüber").unwrap()
        ));
    }

    #[test]
    fn discarded_states_never_reach_the_arena() {
        let arena = Arena::new();
        let mut builder = Builder::new(&arena);
        for word in ["CAT", "CATS", "DOG", "DOGS", "RAT", "RATS"] {
            builder.add(word).unwrap();
        }
        let dawg = builder.finish();
        // CATS, DOGS and RATS all end in the same two states.
        assert_eq!(dawg.state_count(), arena.len());
        assert_eq!(arena.len(), 1 + 3 + 3);
    }

    #[test]
    fn sorted_input_words_gives_no_error() {
        let arena = Arena::new();
        let res = build_dawg(&arena, ["ALFA", "BRAVO", "CHARLIE", "DELTA"]);
        assert!(res.is_ok());
    }

    #[test]
    fn only_the_sorted_permutation_builds() {
        use itertools::Itertools;
        let words = ["KILO", "LIMA", "MIKE", "NOVEMBER", "OSCAR", "PAPA"];
        let accepted: Vec<Vec<&str>> = words
            .iter()
            .copied()
            .permutations(words.len())
            .filter(|order| build_dawg(&Arena::new(), order).is_ok())
            .collect();
        assert_eq!(accepted, vec![words.to_vec()]);
    }

    #[test]
    fn same_word_twice_is_ignored() {
        let arena = Arena::new();
        let mut builder = Builder::new(&arena);
        for word in ["ALFA", "BRAVO", "CHARLIE", "CHARLIE"] {
            builder.add(word).unwrap();
        }
        assert_eq!(builder.word_count(), 3);
        assert_eq!(builder.previous_word(), "CHARLIE".chars().collect::<Vec<_>>());
        let dawg = builder.finish();
        assert!(dawg.contains("CHARLIE"));
        assert_eq!(dawg.word_count(), 3);
    }

    #[test]
    fn duplicate_add_leaves_graph_unchanged() {
        let once = Arena::new();
        let once = build_dawg(&once, ["TAP", "TAPS", "TOP"]).unwrap();
        let twice = Arena::new();
        let twice = build_dawg(&twice, ["TAP", "TAP", "TAPS", "TAPS", "TOP", "TOP"]).unwrap();
        assert_eq!(once.state_count(), twice.state_count());
        assert_eq!(once.transition_count(), twice.transition_count());
        assert_eq!(once.to_string(), twice.to_string());
    }

    #[test]
    fn unsorted_input_words_gives_unsorted_words_in_error() {
        let arena = Arena::new();
        let res = build_dawg(
            &arena,
            [
                "ALFA", "BRAVO", "CHARLIE", "DELTA", "ECHO", "GOLF", "FOXTROT", "HOTEL",
            ],
        );
        assert_eq!(res.unwrap_err(), order_err("GOLF", "FOXTROT"));

        let arena = Arena::new();
        let res = build_dawg(&arena, ["ZULU", "ALFA", "BRAVO", "CHARLIE"]);
        assert_eq!(res.unwrap_err(), order_err("ZULU", "ALFA"));
    }

    #[test]
    fn prefix_of_previous_word_is_out_of_order() {
        let arena = Arena::new();
        let res = build_dawg(&arena, ["TAPS", "TAP"]);
        assert_eq!(res.unwrap_err(), order_err("TAPS", "TAP"));
    }

    #[test]
    fn failed_add_leaves_builder_usable() {
        let arena = Arena::new();
        let mut builder = Builder::new(&arena);
        builder.add("MIKE").unwrap();
        assert_eq!(builder.add("LIMA"), Err(order_err("MIKE", "LIMA")));
        builder.add("NOVEMBER").unwrap();
        let dawg = builder.finish();
        assert!(dawg.contains("MIKE"));
        assert!(dawg.contains("NOVEMBER"));
        assert!(!dawg.contains("LIMA"));
    }

    #[test]
    fn empty_word_first_is_accepted() {
        let arena = Arena::new();
        let dawg = build_dawg(&arena, ["", "", "A"]).unwrap();
        assert!(dawg.contains(""));
        assert!(dawg.contains("A"));
        assert_eq!(dawg.word_count(), 2);
    }

    #[test]
    fn empty_word_after_others_is_out_of_order() {
        let arena = Arena::new();
        let res = build_dawg(&arena, ["A", ""]);
        assert_eq!(res.unwrap_err(), order_err("A", ""));
    }

    #[test]
    fn empty_builder_accepts_nothing() {
        let arena = Arena::new();
        let dawg = Builder::<char>::new(&arena).finish();
        assert!(!dawg.contains(""));
        assert!(!dawg.contains("A"));
        assert_eq!(dawg.state_count(), 1);
    }

    #[test]
    fn order_error_message() {
        assert_eq!(
            order_err("B", "A").to_string(),
            "words out of order: ['A'] was added after ['B']"
        );
    }

    #[test]
    fn comment_lines() {
        for line in ["#", "# header", "\t#indented", "##"] {
            assert!(is_comment(line), "{line:?}");
        }
        for line in ["WORD", "  WORD", "WO#RD", "WORD#"] {
            assert!(!is_comment(line), "{line:?}");
        }
    }

    #[test]
    fn reader_skips_comments_and_blank_lines() {
        let list = "# fruits\nAPPLE\n\nBANANA  \n   # more\nCHERRY\n";
        let arena = Arena::new();
        let dawg = build_dawg_from_reader(&arena, Cursor::new(list)).unwrap();
        assert_eq!(dawg.word_count(), 3);
        assert!(dawg.contains("BANANA"));
        assert!(!dawg.contains("BANANA  "));
        assert!(!dawg.contains("# fruits"));
    }

    #[test]
    fn reader_reports_line_of_unsorted_word() {
        let list = "ALFA\n# skip\nCHARLIE\nBRAVO\n";
        let arena = Arena::new();
        let err = build_dawg_from_reader(&arena, Cursor::new(list)).unwrap_err();
        match err {
            LoadError::Build { line, source } => {
                assert_eq!(line, 4);
                assert_eq!(source, order_err("CHARLIE", "BRAVO"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let arena = Arena::new();
        let err = build_dawg_from_file(&arena, "/nonexistent/minidawg/words.txt").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn generic_dawg_with_u8() {
        let arena = Arena::new();
        let mut builder = Builder::<u8>::new(&arena);
        builder.add([1, 2, 3]).unwrap();
        builder.add([1, 2, 4]).unwrap();
        builder.add([2, 3, 4]).unwrap();
        let dawg = builder.finish();
        assert!(dawg.contains([1, 2, 3]));
        assert!(dawg.contains([1, 2, 4]));
        assert!(dawg.contains([2, 3, 4]));
        assert!(!dawg.contains([1, 2, 5]));
        assert!(!dawg.contains([1, 2]));
    }
}
