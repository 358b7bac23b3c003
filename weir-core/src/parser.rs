//! Parser factories and their combinators.
//!
//! A [`Parser`] is an immutable factory: every call to
//! [`make_handler`](Parser::make_handler) yields a fresh, independent
//! handler that computes a single [`Parsed`] result from the stream it is
//! fed. Factories compose by method chaining; each combinator is a small
//! struct wrapping the previous factory, so composed parsers stay cheap to
//! share and re-instantiate:
//!
//! ```rust,ignore
//! let age = attr("age")
//!     .try_map(|raw| raw.parse::<u32>().map_err(|e| ParseError::Message(e.to_string())))
//!     .filter(|age| *age < 200);
//! ```
//!
//! Fallible user logic enters through [`try_map`](Parser::try_map); there is
//! deliberately no catch-unwind boundary anywhere in the framework.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::{
    consumer::Consumer,
    error::{ParseError, SourceError},
    event::Event,
    handler::{BoxHandler, Handler},
    parsed::Parsed,
};

/// An immutable factory for handlers producing a single [`Parsed`] result.
///
/// Parsers are `Send + Sync` and freely shareable; all mutable state lives
/// in the handlers they create.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Parser` for `{In}`",
    label = "missing `Parser` implementation",
    note = "Parsers must implement `make_handler` producing a handler for `{In}`."
)]
pub trait Parser<In: Event>: Send + Sync {
    /// The value this parser produces on success.
    type Output: Clone + Send + 'static;

    /// Build a fresh handler.
    fn make_handler(&self) -> BoxHandler<In, Parsed<Self::Output>>;

    /// Transform the result value.
    fn map<U, F>(self, f: F) -> MapParser<Self, F, U>
    where
        Self: Sized,
        U: Clone + Send + 'static,
        F: Fn(Self::Output) -> U + Send + Sync + 'static,
    {
        MapParser {
            parser: self,
            f: Arc::new(f),
            _out: PhantomData,
        }
    }

    /// Transform the result value with a fallible function; `Err` becomes a
    /// parse error.
    fn try_map<U, F>(self, f: F) -> TryMapParser<Self, F, U>
    where
        Self: Sized,
        U: Clone + Send + 'static,
        F: Fn(Self::Output) -> Result<U, ParseError> + Send + Sync + 'static,
    {
        TryMapParser {
            parser: self,
            f: Arc::new(f),
            _out: PhantomData,
        }
    }

    /// Turn results failing the predicate into `Empty`.
    fn filter<F>(self, predicate: F) -> FilterParser<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Output) -> bool + Send + Sync + 'static,
    {
        FilterParser {
            parser: self,
            predicate: Arc::new(predicate),
        }
    }

    /// Replace an `Empty` result with a fallback value.
    fn recover<F>(self, fallback: F) -> RecoverParser<Self, F>
    where
        Self: Sized,
        F: Fn() -> Self::Output + Send + Sync + 'static,
    {
        RecoverParser {
            parser: self,
            fallback: Arc::new(fallback),
        }
    }

    /// Give an error handler the chance to replace an `Error` result.
    fn catch<F>(self, handler: F) -> Catch<Self, F>
    where
        Self: Sized,
        F: Fn(ParseError) -> Parsed<Self::Output> + Send + Sync + 'static,
    {
        Catch {
            parser: self,
            handler: Arc::new(handler),
        }
    }

    /// Run `self` and `other` in lock-step on the same stream, producing a
    /// pair.
    fn and<P>(self, other: P) -> crate::And<Self, P>
    where
        Self: Sized,
        P: Parser<In>,
    {
        crate::And::new(self, other)
    }

    /// Reify errors into the result value: `Error(e)` becomes
    /// `Success(Err(e))`, so the surrounding compound is never poisoned.
    fn wrap_safe(self) -> WrapSafe<Self>
    where
        Self: Sized,
    {
        WrapSafe { parser: self }
    }

    /// Inverse of [`wrap_safe`](Parser::wrap_safe): a `Success(Err(e))`
    /// result becomes `Error(e)` again.
    fn unwrap_safe(self) -> UnwrapSafe<Self>
    where
        Self: Sized,
    {
        UnwrapSafe { parser: self }
    }

    /// Adapt this parser for a top-level driver run.
    fn into_consumer(self) -> ParserConsumer<Self>
    where
        Self: Sized,
    {
        ParserConsumer { parser: self }
    }
}

// Shared parsers are parsers.
impl<In: Event, P: Parser<In> + ?Sized> Parser<In> for Arc<P> {
    type Output = P::Output;

    fn make_handler(&self) -> BoxHandler<In, Parsed<Self::Output>> {
        (**self).make_handler()
    }
}

/// Handler adapter applying a function to the success value of its inner
/// handler's result.
pub struct MapHandler<H, F, U> {
    inner: H,
    f: Arc<F>,
    _out: PhantomData<fn() -> U>,
}

impl<H, F, U> MapHandler<H, F, U> {
    /// Wrap `inner`, mapping its success value through `f`.
    pub fn new(inner: H, f: Arc<F>) -> Self {
        Self {
            inner,
            f,
            _out: PhantomData,
        }
    }
}

impl<In, T, U, H, F> Handler<In> for MapHandler<H, F, U>
where
    In: Event,
    U: 'static,
    H: Handler<In, Out = Parsed<T>>,
    F: Fn(T) -> U,
{
    type Out = Parsed<U>;

    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    fn handle_input(&mut self, input: In) -> Option<Self::Out> {
        let f = self.f.as_ref();
        self.inner.handle_input(input).map(|r| r.map(|v| f(v)))
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        let f = self.f.as_ref();
        self.inner.handle_error(error).map(|r| r.map(|v| f(v)))
    }

    fn handle_end(&mut self) -> Self::Out {
        let f = self.f.as_ref();
        self.inner.handle_end().map(|v| f(v))
    }
}

/// A parser with a mapped result. Created by [`Parser::map`].
pub struct MapParser<P, F, U> {
    parser: P,
    f: Arc<F>,
    _out: PhantomData<fn() -> U>,
}

impl<In, P, F, U> Parser<In> for MapParser<P, F, U>
where
    In: Event,
    P: Parser<In>,
    U: Clone + Send + 'static,
    F: Fn(P::Output) -> U + Send + Sync + 'static,
{
    type Output = U;

    fn make_handler(&self) -> BoxHandler<In, Parsed<U>> {
        Box::new(MapHandler::new(
            self.parser.make_handler(),
            Arc::clone(&self.f),
        ))
    }
}

/// A parser with a fallibly mapped result. Created by [`Parser::try_map`].
pub struct TryMapParser<P, F, U> {
    parser: P,
    f: Arc<F>,
    _out: PhantomData<fn() -> U>,
}

struct TryMapHandler<H, F, U> {
    inner: H,
    f: Arc<F>,
    _out: PhantomData<fn() -> U>,
}

impl<In, T, U, H, F> Handler<In> for TryMapHandler<H, F, U>
where
    In: Event,
    U: 'static,
    H: Handler<In, Out = Parsed<T>>,
    F: Fn(T) -> Result<U, ParseError>,
{
    type Out = Parsed<U>;

    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    fn handle_input(&mut self, input: In) -> Option<Self::Out> {
        let f = self.f.as_ref();
        self.inner.handle_input(input).map(|r| r.try_map(|v| f(v)))
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        let f = self.f.as_ref();
        self.inner.handle_error(error).map(|r| r.try_map(|v| f(v)))
    }

    fn handle_end(&mut self) -> Self::Out {
        let f = self.f.as_ref();
        self.inner.handle_end().try_map(|v| f(v))
    }
}

impl<In, P, F, U> Parser<In> for TryMapParser<P, F, U>
where
    In: Event,
    P: Parser<In>,
    U: Clone + Send + 'static,
    F: Fn(P::Output) -> Result<U, ParseError> + Send + Sync + 'static,
{
    type Output = U;

    fn make_handler(&self) -> BoxHandler<In, Parsed<U>> {
        Box::new(TryMapHandler {
            inner: self.parser.make_handler(),
            f: Arc::clone(&self.f),
            _out: PhantomData,
        })
    }
}

/// A parser filtering its result. Created by [`Parser::filter`].
pub struct FilterParser<P, F> {
    parser: P,
    predicate: Arc<F>,
}

struct FilterHandler<H, F> {
    inner: H,
    predicate: Arc<F>,
}

impl<In, T, H, F> Handler<In> for FilterHandler<H, F>
where
    In: Event,
    T: 'static,
    H: Handler<In, Out = Parsed<T>>,
    F: Fn(&T) -> bool,
{
    type Out = Parsed<T>;

    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    fn handle_input(&mut self, input: In) -> Option<Self::Out> {
        let predicate = self.predicate.as_ref();
        self.inner
            .handle_input(input)
            .map(|r| r.filter(|v| predicate(v)))
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        let predicate = self.predicate.as_ref();
        self.inner
            .handle_error(error)
            .map(|r| r.filter(|v| predicate(v)))
    }

    fn handle_end(&mut self) -> Self::Out {
        let predicate = self.predicate.as_ref();
        self.inner.handle_end().filter(|v| predicate(v))
    }
}

impl<In, P, F> Parser<In> for FilterParser<P, F>
where
    In: Event,
    P: Parser<In>,
    F: Fn(&P::Output) -> bool + Send + Sync + 'static,
{
    type Output = P::Output;

    fn make_handler(&self) -> BoxHandler<In, Parsed<P::Output>> {
        Box::new(FilterHandler {
            inner: self.parser.make_handler(),
            predicate: Arc::clone(&self.predicate),
        })
    }
}

/// A parser replacing `Empty` with a fallback. Created by
/// [`Parser::recover`].
pub struct RecoverParser<P, F> {
    parser: P,
    fallback: Arc<F>,
}

struct RecoverHandler<H, F> {
    inner: H,
    fallback: Arc<F>,
}

impl<In, T, H, F> Handler<In> for RecoverHandler<H, F>
where
    In: Event,
    T: 'static,
    H: Handler<In, Out = Parsed<T>>,
    F: Fn() -> T,
{
    type Out = Parsed<T>;

    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    fn handle_input(&mut self, input: In) -> Option<Self::Out> {
        let fallback = self.fallback.as_ref();
        self.inner
            .handle_input(input)
            .map(|r| r.recover(|| fallback()))
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        let fallback = self.fallback.as_ref();
        self.inner
            .handle_error(error)
            .map(|r| r.recover(|| fallback()))
    }

    fn handle_end(&mut self) -> Self::Out {
        let fallback = self.fallback.as_ref();
        self.inner.handle_end().recover(|| fallback())
    }
}

impl<In, P, F> Parser<In> for RecoverParser<P, F>
where
    In: Event,
    P: Parser<In>,
    F: Fn() -> P::Output + Send + Sync + 'static,
{
    type Output = P::Output;

    fn make_handler(&self) -> BoxHandler<In, Parsed<P::Output>> {
        Box::new(RecoverHandler {
            inner: self.parser.make_handler(),
            fallback: Arc::clone(&self.fallback),
        })
    }
}

/// A parser whose errors may be replaced. Created by [`Parser::catch`].
pub struct Catch<P, F> {
    parser: P,
    handler: Arc<F>,
}

struct CatchHandler<H, F> {
    inner: H,
    handler: Arc<F>,
}

impl<In, T, H, F> Handler<In> for CatchHandler<H, F>
where
    In: Event,
    T: 'static,
    H: Handler<In, Out = Parsed<T>>,
    F: Fn(ParseError) -> Parsed<T>,
{
    type Out = Parsed<T>;

    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    fn handle_input(&mut self, input: In) -> Option<Self::Out> {
        let handler = self.handler.as_ref();
        self.inner
            .handle_input(input)
            .map(|r| r.catch(|e| handler(e)))
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        let handler = self.handler.as_ref();
        self.inner
            .handle_error(error)
            .map(|r| r.catch(|e| handler(e)))
    }

    fn handle_end(&mut self) -> Self::Out {
        let handler = self.handler.as_ref();
        self.inner.handle_end().catch(|e| handler(e))
    }
}

impl<In, P, F> Parser<In> for Catch<P, F>
where
    In: Event,
    P: Parser<In>,
    F: Fn(ParseError) -> Parsed<P::Output> + Send + Sync + 'static,
{
    type Output = P::Output;

    fn make_handler(&self) -> BoxHandler<In, Parsed<P::Output>> {
        Box::new(CatchHandler {
            inner: self.parser.make_handler(),
            handler: Arc::clone(&self.handler),
        })
    }
}

/// A parser reifying errors into its result. Created by
/// [`Parser::wrap_safe`].
pub struct WrapSafe<P> {
    parser: P,
}

struct WrapSafeHandler<H> {
    inner: H,
}

fn reify<T>(result: Parsed<T>) -> Parsed<Result<T, ParseError>> {
    match result {
        Parsed::Success(value) => Parsed::Success(Ok(value)),
        Parsed::Error(e) => Parsed::Success(Err(e)),
        Parsed::Empty => Parsed::Empty,
    }
}

impl<In, T, H> Handler<In> for WrapSafeHandler<H>
where
    In: Event,
    T: 'static,
    H: Handler<In, Out = Parsed<T>>,
{
    type Out = Parsed<Result<T, ParseError>>;

    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    fn handle_input(&mut self, input: In) -> Option<Self::Out> {
        self.inner.handle_input(input).map(reify)
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        self.inner.handle_error(error).map(reify)
    }

    fn handle_end(&mut self) -> Self::Out {
        reify(self.inner.handle_end())
    }
}

impl<In, P> Parser<In> for WrapSafe<P>
where
    In: Event,
    P: Parser<In>,
{
    type Output = Result<P::Output, ParseError>;

    fn make_handler(&self) -> BoxHandler<In, Parsed<Self::Output>> {
        Box::new(WrapSafeHandler {
            inner: self.parser.make_handler(),
        })
    }
}

/// Inverse of [`WrapSafe`]. Created by [`Parser::unwrap_safe`].
pub struct UnwrapSafe<P> {
    parser: P,
}

struct UnwrapSafeHandler<H> {
    inner: H,
}

fn collapse<T>(result: Parsed<Result<T, ParseError>>) -> Parsed<T> {
    match result {
        Parsed::Success(Ok(value)) => Parsed::Success(value),
        Parsed::Success(Err(e)) => Parsed::Error(e),
        Parsed::Empty => Parsed::Empty,
        Parsed::Error(e) => Parsed::Error(e),
    }
}

impl<In, T, H> Handler<In> for UnwrapSafeHandler<H>
where
    In: Event,
    T: 'static,
    H: Handler<In, Out = Parsed<Result<T, ParseError>>>,
{
    type Out = Parsed<T>;

    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    fn handle_input(&mut self, input: In) -> Option<Self::Out> {
        self.inner.handle_input(input).map(collapse)
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        self.inner.handle_error(error).map(collapse)
    }

    fn handle_end(&mut self) -> Self::Out {
        collapse(self.inner.handle_end())
    }
}

impl<In, P, T> Parser<In> for UnwrapSafe<P>
where
    In: Event,
    T: Clone + Send + 'static,
    P: Parser<In, Output = Result<T, ParseError>>,
{
    type Output = T;

    fn make_handler(&self) -> BoxHandler<In, Parsed<T>> {
        Box::new(UnwrapSafeHandler {
            inner: self.parser.make_handler(),
        })
    }
}

/// A parser ignoring its input and succeeding with a fixed value.
pub struct Constant<T> {
    value: T,
}

/// A parser that succeeds with `value` on the first event (or at end of
/// input, whichever comes first).
pub fn constant<T: Clone + Send + Sync + 'static>(value: T) -> Constant<T> {
    Constant { value }
}

struct ConstantHandler<T> {
    value: Option<T>,
}

impl<In, T> Handler<In> for ConstantHandler<T>
where
    In: Event,
    T: Clone + Send + 'static,
{
    type Out = Parsed<T>;

    fn is_finished(&self) -> bool {
        self.value.is_none()
    }

    fn handle_input(&mut self, _input: In) -> Option<Self::Out> {
        self.value.take().map(Parsed::Success)
    }

    fn handle_error(&mut self, _error: SourceError) -> Option<Self::Out> {
        None
    }

    fn handle_end(&mut self) -> Self::Out {
        match self.value.take() {
            Some(value) => Parsed::Success(value),
            None => Parsed::Empty,
        }
    }
}

impl<In, T> Parser<In> for Constant<T>
where
    In: Event,
    T: Clone + Send + Sync + 'static,
{
    type Output = T;

    fn make_handler(&self) -> BoxHandler<In, Parsed<T>> {
        Box::new(ConstantHandler {
            value: Some(self.value.clone()),
        })
    }
}

/// Adapter letting a parser run as a top-level consumer. Created by
/// [`Parser::into_consumer`].
pub struct ParserConsumer<P> {
    parser: P,
}

impl<In, P> Consumer<In> for ParserConsumer<P>
where
    In: Event,
    P: Parser<In>,
{
    type Output = Parsed<P::Output>;

    fn make_handler(&self) -> BoxHandler<In, Self::Output> {
        self.parser.make_handler()
    }
}
