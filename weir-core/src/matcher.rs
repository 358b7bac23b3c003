//! Context matchers: predicates over the context stack.
//!
//! A matcher decides whether the current stack of frames marks the start of
//! an interesting sub-stream, and may extract a context value from the
//! frames while doing so. Matchers compose into paths with `/`, standing in
//! for the path separator of hierarchical documents:
//!
//! ```rust,ignore
//! let posts = elem("blog") / elem("post");
//! ```
//!
//! Each matcher consumes a fixed number of frames from the front of the
//! stack; a path matches when its segments consume the whole stack.

use std::marker::PhantomData;
use std::ops::Div;

use crate::error::MatchError;

/// A predicate over the context stack, with context extraction.
///
/// `apply_prefix` attempts to match the front of the stack and reports how
/// many frames were consumed alongside the extracted context (or a
/// [`MatchError`] when extraction fails on an otherwise matching stack).
/// `apply` is the exact-match form used by splitters: it succeeds only when
/// the whole stack is consumed.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot match context frames of type `{F}`",
    label = "missing `ContextMatcher<{F}>` implementation",
    note = "Implement `apply_prefix` to match a prefix of the context stack."
)]
pub trait ContextMatcher<F>: Send + Sync {
    /// The value extracted from matched frames.
    type Context;

    /// Match a prefix of `stack`, returning the number of consumed frames
    /// and the extraction outcome.
    fn apply_prefix(&self, stack: &[F]) -> Option<(usize, Result<Self::Context, MatchError>)>;

    /// Match the entire stack.
    fn apply(&self, stack: &[F]) -> Option<Result<Self::Context, MatchError>> {
        match self.apply_prefix(stack) {
            Some((consumed, extracted)) if consumed == stack.len() => Some(extracted),
            _ => None,
        }
    }

    /// Reshape the extracted context.
    fn map<C, M>(self, f: M) -> MapMatcher<Self, M, C>
    where
        Self: Sized,
        M: Fn(Self::Context) -> C + Send + Sync,
    {
        MapMatcher {
            matcher: self,
            f,
            _context: PhantomData,
        }
    }

    /// Append a path segment. `a.then(b)` matches when `a` matches a prefix
    /// and `b` matches the frames after it; `/` is sugar for this.
    fn then<B>(self, next: B) -> Chained<Self, B>
    where
        Self: Sized,
        B: ContextMatcher<F>,
    {
        Chained {
            first: self,
            second: next,
        }
    }
}

/// Two matchers applied in sequence.
///
/// Created by [`ContextMatcher::then`] or the `/` operator. The extracted
/// context is the pair of both segments' contexts; the first failure wins.
#[derive(Debug, Clone)]
pub struct Chained<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chained<A, B> {
    /// Chain two matchers.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<F, A, B> ContextMatcher<F> for Chained<A, B>
where
    A: ContextMatcher<F>,
    B: ContextMatcher<F>,
{
    type Context = (A::Context, B::Context);

    fn apply_prefix(&self, stack: &[F]) -> Option<(usize, Result<Self::Context, MatchError>)> {
        let (first_len, first) = self.first.apply_prefix(stack)?;
        let (second_len, second) = self.second.apply_prefix(&stack[first_len..])?;
        let context = match (first, second) {
            (Ok(a), Ok(b)) => Ok((a, b)),
            (Err(e), _) | (_, Err(e)) => Err(e),
        };
        Some((first_len + second_len, context))
    }
}

impl<A, B, Rhs> Div<Rhs> for Chained<A, B> {
    type Output = Chained<Chained<A, B>, Rhs>;

    fn div(self, rhs: Rhs) -> Self::Output {
        Chained::new(self, rhs)
    }
}

/// A matcher with a reshaped context.
///
/// Created by [`ContextMatcher::map`].
#[derive(Debug, Clone)]
pub struct MapMatcher<M, F, C> {
    matcher: M,
    f: F,
    _context: PhantomData<fn() -> C>,
}

impl<Frame, M, F, C> ContextMatcher<Frame> for MapMatcher<M, F, C>
where
    M: ContextMatcher<Frame>,
    F: Fn(M::Context) -> C + Send + Sync,
{
    type Context = C;

    fn apply_prefix(&self, stack: &[Frame]) -> Option<(usize, Result<Self::Context, MatchError>)> {
        let (consumed, extracted) = self.matcher.apply_prefix(stack)?;
        Some((consumed, extracted.map(&self.f)))
    }
}

impl<M, F, C, Rhs> Div<Rhs> for MapMatcher<M, F, C> {
    type Output = Chained<MapMatcher<M, F, C>, Rhs>;

    fn div(self, rhs: Rhs) -> Self::Output {
        Chained::new(self, rhs)
    }
}

/// Matches exactly one frame of any shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyFrame;

/// A wildcard path segment consuming a single frame.
pub fn any_frame() -> AnyFrame {
    AnyFrame
}

impl<F> ContextMatcher<F> for AnyFrame {
    type Context = ();

    fn apply_prefix(&self, stack: &[F]) -> Option<(usize, Result<Self::Context, MatchError>)> {
        if stack.is_empty() {
            None
        } else {
            Some((1, Ok(())))
        }
    }
}

impl<Rhs> Div<Rhs> for AnyFrame {
    type Output = Chained<AnyFrame, Rhs>;

    fn div(self, rhs: Rhs) -> Self::Output {
        Chained::new(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Label(&'static str);

    impl ContextMatcher<&'static str> for Label {
        type Context = &'static str;

        fn apply_prefix(
            &self,
            stack: &[&'static str],
        ) -> Option<(usize, Result<Self::Context, MatchError>)> {
            match stack.first() {
                Some(frame) if *frame == self.0 => Some((1, Ok(*frame))),
                _ => None,
            }
        }
    }

    impl<Rhs> Div<Rhs> for Label {
        type Output = Chained<Label, Rhs>;

        fn div(self, rhs: Rhs) -> Self::Output {
            Chained::new(self, rhs)
        }
    }

    #[test]
    fn chained_matches_whole_stack_only() {
        let path = Label("blog") / Label("post");
        assert!(path.apply(&["blog", "post"]).is_some());
        assert!(path.apply(&["blog"]).is_none());
        assert!(path.apply(&["blog", "post", "author"]).is_none());
        assert!(path.apply(&["post", "blog"]).is_none());
    }

    #[test]
    fn wildcard_consumes_one_frame() {
        let path = any_frame() / Label("post");
        assert!(path.apply(&["whatever", "post"]).is_some());
        assert!(path.apply(&["post"]).is_none());
    }

    #[test]
    fn map_reshapes_context() {
        let m = Label("post").map(str::len);
        assert_eq!(m.apply(&["post"]), Some(Ok(4)));
    }
}
