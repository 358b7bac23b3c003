//! Three-valued parse outcome.

use crate::error::ParseError;

/// The outcome of a parser: a value, nothing, or an error.
///
/// `Parsed` is richer than `Option` and flatter than `Result`: `Empty` means
/// the input held no value for this parser (which alternation and filtering
/// treat as a non-event), while `Error` carries a defect that poisons any
/// compound it participates in.
///
/// # Examples
///
/// ```rust,ignore
/// let n = Parsed::Success(2).map(|n| n * 2);
/// assert_eq!(n, Parsed::Success(4));
///
/// let collected: Parsed<Vec<i32>> =
///     vec![Parsed::Success(1), Parsed::Empty, Parsed::Success(2)]
///         .into_iter()
///         .collect();
/// assert_eq!(collected, Parsed::Success(vec![1, 2]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed<T> {
    /// A value was produced.
    Success(T),
    /// The input held no value for this parser.
    Empty,
    /// Parsing failed.
    Error(ParseError),
}

impl<T> Parsed<T> {
    /// True for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, Parsed::Success(_))
    }

    /// True for `Empty`.
    pub fn is_empty(&self) -> bool {
        matches!(self, Parsed::Empty)
    }

    /// True for `Error`.
    pub fn is_error(&self) -> bool {
        matches!(self, Parsed::Error(_))
    }

    /// Transform the success value; `Empty` and `Error` pass through.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        match self {
            Parsed::Success(value) => Parsed::Success(f(value)),
            Parsed::Empty => Parsed::Empty,
            Parsed::Error(e) => Parsed::Error(e),
        }
    }

    /// Monadic bind; `Empty` and `Error` pass through.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Parsed<U>) -> Parsed<U> {
        match self {
            Parsed::Success(value) => f(value),
            Parsed::Empty => Parsed::Empty,
            Parsed::Error(e) => Parsed::Error(e),
        }
    }

    /// Transform the success value with a fallible function; an `Err` becomes
    /// `Parsed::Error`.
    pub fn try_map<U>(self, f: impl FnOnce(T) -> Result<U, ParseError>) -> Parsed<U> {
        match self {
            Parsed::Success(value) => match f(value) {
                Ok(mapped) => Parsed::Success(mapped),
                Err(e) => Parsed::Error(e),
            },
            Parsed::Empty => Parsed::Empty,
            Parsed::Error(e) => Parsed::Error(e),
        }
    }

    /// Turn a `Success` that fails the predicate into `Empty`.
    pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Parsed<T> {
        match self {
            Parsed::Success(value) if predicate(&value) => Parsed::Success(value),
            Parsed::Success(_) => Parsed::Empty,
            other => other,
        }
    }

    /// Replace `Empty` with a fallback value.
    pub fn recover(self, fallback: impl FnOnce() -> T) -> Parsed<T> {
        match self {
            Parsed::Empty => Parsed::Success(fallback()),
            other => other,
        }
    }

    /// Give an error handler the chance to produce a replacement outcome.
    pub fn catch(self, handler: impl FnOnce(ParseError) -> Parsed<T>) -> Parsed<T> {
        match self {
            Parsed::Error(e) => handler(e),
            other => other,
        }
    }

    /// Pair two outcomes. The first error by position wins; otherwise any
    /// `Empty` makes the pair `Empty`.
    pub fn zip<U>(self, other: Parsed<U>) -> Parsed<(T, U)> {
        match (self, other) {
            (Parsed::Error(e), _) => Parsed::Error(e),
            (_, Parsed::Error(e)) => Parsed::Error(e),
            (Parsed::Success(a), Parsed::Success(b)) => Parsed::Success((a, b)),
            _ => Parsed::Empty,
        }
    }

    /// View as a standard `Result`, flattening `Empty` into `Ok(None)`.
    pub fn into_result(self) -> Result<Option<T>, ParseError> {
        match self {
            Parsed::Success(value) => Ok(Some(value)),
            Parsed::Empty => Ok(None),
            Parsed::Error(e) => Err(e),
        }
    }
}

impl<T> From<Option<T>> for Parsed<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Parsed::Success(value),
            None => Parsed::Empty,
        }
    }
}

impl<T> From<Result<T, ParseError>> for Parsed<T> {
    fn from(result: Result<T, ParseError>) -> Self {
        match result {
            Ok(value) => Parsed::Success(value),
            Err(e) => Parsed::Error(e),
        }
    }
}

/// Collect many outcomes into one: `Empty` items are dropped, the first
/// `Error` poisons the whole collection, and `Success` values are kept in
/// order.
impl<T> FromIterator<Parsed<T>> for Parsed<Vec<T>> {
    fn from_iter<I: IntoIterator<Item = Parsed<T>>>(iter: I) -> Self {
        let mut values = Vec::new();
        for item in iter {
            match item {
                Parsed::Success(value) => values.push(value),
                Parsed::Empty => {}
                Parsed::Error(e) => return Parsed::Error(e),
            }
        }
        Parsed::Success(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err(msg: &str) -> ParseError {
        ParseError::Message(msg.to_string())
    }

    #[test]
    fn map_identity() {
        assert_eq!(Parsed::Success(7).map(|v| v), Parsed::Success(7));
        assert_eq!(Parsed::<i32>::Empty.map(|v| v), Parsed::Empty);
        assert_eq!(
            Parsed::<i32>::Error(err("x")).map(|v| v),
            Parsed::Error(err("x"))
        );
    }

    #[test]
    fn and_then_is_associative() {
        let f = |n: i32| Parsed::Success(n + 1);
        let g = |n: i32| {
            if n > 2 {
                Parsed::Success(n * 10)
            } else {
                Parsed::Empty
            }
        };
        for start in [Parsed::Success(3), Parsed::Empty, Parsed::Error(err("e"))] {
            let left = start.clone().and_then(f).and_then(g);
            let right = start.and_then(|n| f(n).and_then(g));
            assert_eq!(left, right);
        }
    }

    #[test]
    fn error_absorbs_empty_recovers() {
        assert_eq!(
            Parsed::<i32>::Error(err("boom")).and_then(Parsed::Success),
            Parsed::Error(err("boom"))
        );
        assert_eq!(Parsed::<i32>::Empty.recover(|| 9), Parsed::Success(9));
        assert_eq!(Parsed::Success(1).recover(|| 9), Parsed::Success(1));
    }

    #[test]
    fn filter_turns_false_into_empty() {
        assert_eq!(Parsed::Success(4).filter(|n| *n > 3), Parsed::Success(4));
        assert_eq!(Parsed::Success(2).filter(|n| *n > 3), Parsed::Empty);
    }

    #[test]
    fn zip_prefers_first_error() {
        let e1 = err("first");
        let e2 = err("second");
        assert_eq!(
            Parsed::<i32>::Error(e1.clone()).zip(Parsed::<i32>::Error(e2)),
            Parsed::Error(e1)
        );
        assert_eq!(
            Parsed::Success(1).zip(Parsed::<i32>::Empty),
            Parsed::Empty
        );
        assert_eq!(
            Parsed::Success(1).zip(Parsed::Success("a")),
            Parsed::Success((1, "a"))
        );
    }

    #[test]
    fn collect_drops_empty_and_propagates_error() {
        let ok: Parsed<Vec<i32>> =
            vec![Parsed::Success(1), Parsed::Empty, Parsed::Success(2)]
                .into_iter()
                .collect();
        assert_eq!(ok, Parsed::Success(vec![1, 2]));

        let poisoned: Parsed<Vec<i32>> = vec![
            Parsed::Success(1),
            Parsed::Error(err("bad")),
            Parsed::Success(2),
        ]
        .into_iter()
        .collect();
        assert_eq!(poisoned, Parsed::Error(err("bad")));
    }
}
