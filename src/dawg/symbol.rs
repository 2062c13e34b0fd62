use std::borrow::Cow;
use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

/// Inline capacity of a word buffer before it spills to the heap.
pub const WORD_INLINE: usize = 32;

/// A word collected into a symbol buffer.
pub type Word<S> = SmallVec<[S; WORD_INLINE]>;

/// Trait for types that can label a transition.
///
/// Implemented for every type meeting the bounds, so `char`, `u8`, `u16` and
/// `u32` all work out of the box.
///
/// - `Copy`: transitions store symbols by value
/// - `Ord`: transition lists are kept sorted, and words are compared
///   symbol by symbol when checking insertion order
/// - `Hash`: symbols are part of a state's fingerprint
/// - `Debug`: used in error messages and fingerprint rendering
pub trait Symbol: Copy + Eq + Ord + Hash + Debug {}

impl<T: Copy + Eq + Ord + Hash + Debug> Symbol for T {}

/// Conversion of a word-like value into a sequence of symbols.
///
/// Lets [`Builder::add`](super::builder::Builder::add) and
/// [`Dawg::contains`](super::query::Dawg::contains) take `&str`, `String`,
/// slices, vectors and arrays directly.
pub trait IntoWord<S: Symbol> {
    /// Collects this word into a symbol buffer.
    fn collect_word(self) -> Word<S>;
}

macro_rules! char_words {
    ($($source:ty),* $(,)?) => {
        $(
            impl IntoWord<char> for $source {
                #[inline]
                fn collect_word(self) -> Word<char> {
                    self.chars().collect()
                }
            }
        )*
    };
}

char_words!(&str, &&str, String, &String, Cow<'_, str>);

impl<S: Symbol> IntoWord<S> for &[S] {
    #[inline]
    fn collect_word(self) -> Word<S> {
        Word::from_slice(self)
    }
}

impl<S: Symbol, const N: usize> IntoWord<S> for &[S; N] {
    #[inline]
    fn collect_word(self) -> Word<S> {
        self.as_slice().collect_word()
    }
}

impl<S: Symbol, const N: usize> IntoWord<S> for [S; N] {
    #[inline]
    fn collect_word(self) -> Word<S> {
        self.as_slice().collect_word()
    }
}

impl<S: Symbol> IntoWord<S> for &Vec<S> {
    #[inline]
    fn collect_word(self) -> Word<S> {
        self.as_slice().collect_word()
    }
}

/// Reuses the vector's allocation when the word is too long to store inline.
impl<S: Symbol> IntoWord<S> for Vec<S> {
    #[inline]
    fn collect_word(self) -> Word<S> {
        Word::from_vec(self)
    }
}

impl<S: Symbol> IntoWord<S> for Word<S> {
    #[inline]
    fn collect_word(self) -> Word<S> {
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn str_collects_code_points() {
        let word: Word<char> = "grüß".collect_word();
        assert_eq!(word.as_slice(), &['g', 'r', 'ü', 'ß']);
    }

    #[test]
    fn byte_slices_collect_verbatim() {
        let word: Word<u8> = (&[3u8, 1, 2][..]).collect_word();
        assert_eq!(word.as_slice(), &[3, 1, 2]);
    }

    #[test]
    fn every_char_source_agrees() {
        let owned = String::from("héllo");
        let expected: Word<char> = "héllo".collect_word();
        assert_eq!((&owned).collect_word(), expected);
        assert_eq!((&"héllo").collect_word(), expected);
        assert_eq!(Cow::Borrowed("héllo").collect_word(), expected);
        assert_eq!(owned.collect_word(), expected);
    }

    #[test]
    fn every_slice_source_agrees() {
        let expected: Word<u16> = [7u16, 8, 9].collect_word();
        let vec = vec![7u16, 8, 9];
        assert_eq!((&[7u16, 8, 9]).collect_word(), expected);
        assert_eq!((&vec).collect_word(), expected);
        assert_eq!(vec.collect_word(), expected);
        assert_eq!(expected.clone().collect_word(), expected);
    }

    #[test]
    fn long_words_spill_to_heap() {
        let long = "x".repeat(WORD_INLINE + 1);
        let word: Word<char> = long.collect_word();
        assert_eq!(word.len(), WORD_INLINE + 1);
        assert!(word.spilled());
    }
}
