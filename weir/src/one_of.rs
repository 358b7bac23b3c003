//! Alternation: the first parser to succeed wins.
//!
//! Every alternative sees every event of the sub-stream in index order.
//! Resolution happens after each event has been delivered to all unfinished
//! alternatives, so when several succeed on the same event the one with the
//! lowest index wins. When all alternatives settle without a success, the
//! first error by index is reported; with no errors the result is `Empty`.

use std::sync::Arc;

use weir_core::{BoxHandler, Event, Handler, Parsed, Parser, SourceError};

/// A set of alternative parsers sharing an output type.
///
/// Usually built with the [`one_of!`](crate::one_of!) macro:
///
/// ```rust,ignore
/// let item = one_of![
///     boolean().map(Item::Bool),
///     string_value().map(Item::Str),
/// ];
/// ```
pub struct OneOf<In, T> {
    alternatives: Vec<Arc<dyn Parser<In, Output = T>>>,
}

impl<In, T> OneOf<In, T>
where
    In: Event,
    T: Clone + Send + 'static,
{
    /// An empty set of alternatives.
    pub fn new() -> Self {
        Self {
            alternatives: Vec::new(),
        }
    }

    /// Append an alternative. Earlier alternatives win ties.
    pub fn or<P>(mut self, parser: P) -> Self
    where
        P: Parser<In, Output = T> + 'static,
    {
        self.alternatives.push(Arc::new(parser));
        self
    }
}

impl<In, T> Default for OneOf<In, T>
where
    In: Event,
    T: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<In, T> Parser<In> for OneOf<In, T>
where
    In: Event,
    T: Clone + Send + 'static,
{
    type Output = T;

    fn make_handler(&self) -> BoxHandler<In, Parsed<T>> {
        let children: Vec<_> = self.alternatives.iter().map(|p| p.make_handler()).collect();
        let slots = vec![None; children.len()];
        Box::new(OneOfHandler {
            children,
            slots,
            finished: false,
        })
    }
}

struct OneOfHandler<In, T> {
    children: Vec<BoxHandler<In, Parsed<T>>>,
    slots: Vec<Option<Parsed<T>>>,
    finished: bool,
}

impl<In, T> OneOfHandler<In, T>
where
    In: Event,
    T: Clone + Send + 'static,
{
    fn resolve(&mut self) -> Option<Parsed<T>> {
        if let Some(winner) = self
            .slots
            .iter()
            .position(|slot| matches!(slot, Some(Parsed::Success(_))))
        {
            self.finished = true;
            return self.slots[winner].take();
        }
        if self.slots.iter().all(Option::is_some) {
            self.finished = true;
            let first_error = self
                .slots
                .iter_mut()
                .find(|slot| matches!(slot, Some(Parsed::Error(_))))
                .and_then(Option::take);
            return Some(first_error.unwrap_or(Parsed::Empty));
        }
        None
    }
}

impl<In, T> Handler<In> for OneOfHandler<In, T>
where
    In: Event,
    T: Clone + Send + 'static,
{
    type Out = Parsed<T>;

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn handle_input(&mut self, input: In) -> Option<Self::Out> {
        for (child, slot) in self.children.iter_mut().zip(self.slots.iter_mut()) {
            if slot.is_none() {
                if let Some(result) = child.handle_input(input.clone()) {
                    *slot = Some(result);
                }
            }
        }
        self.resolve()
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        for (child, slot) in self.children.iter_mut().zip(self.slots.iter_mut()) {
            if slot.is_none() {
                if let Some(result) = child.handle_error(error.clone()) {
                    *slot = Some(result);
                }
            }
        }
        self.resolve()
    }

    fn handle_end(&mut self) -> Self::Out {
        for (child, slot) in self.children.iter_mut().zip(self.slots.iter_mut()) {
            if slot.is_none() {
                *slot = Some(child.handle_end());
            }
        }
        self.resolve().unwrap_or(Parsed::Empty)
    }
}

/// Build a [`OneOf`] from a list of parsers, earliest first.
///
/// ```rust,ignore
/// let value = one_of![number().map(V::Num), boolean().map(V::Bool)];
/// ```
#[macro_export]
macro_rules! one_of {
    ( $($parser:expr),+ $(,)? ) => {
        $crate::OneOf::new()$(.or($parser))+
    };
}
