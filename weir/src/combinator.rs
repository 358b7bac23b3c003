//! Consumers and extension methods over parsers and transformers.

use weir_core::{BoxHandler, Event, Handler, Parsed, Parser, SourceError, Transformer};

use crate::funnel::{Funnelled, HCons, HNil};

/// Extra composition methods for every transformer.
pub trait TransformerExt<In: Event>: Transformer<In> {
    /// Keep only the first value-or-error the transformer emits.
    fn parse_first(self) -> ParseFirst<Self>
    where
        Self: Sized,
    {
        ParseFirst::new(self)
    }

    /// Collect every emitted value into a list, in stream order.
    fn parse_to_list(self) -> ParseToList<Self>
    where
        Self: Sized,
    {
        ParseToList::new(self)
    }

    /// Merge with another transformer emitting the same item type.
    fn merge<T>(self, other: T) -> Funnelled<Self::Emitted, HCons<Self, HCons<T, HNil>>>
    where
        Self: Sized,
        T: Transformer<In, Emitted = Self::Emitted>,
    {
        Funnelled::from_chain(HCons {
            head: self,
            tail: HCons {
                head: other,
                tail: HNil,
            },
        })
    }
}

impl<In: Event, T: Transformer<In>> TransformerExt<In> for T {}

/// A parser producing the first value a transformer emits.
///
/// `Empty` emissions are skipped, so a sub-stream in which the inner parser
/// found nothing does not stop the scan; the first `Success` or `Error`
/// terminates it. The upstream transformer is cancelled through the finish
/// of this parser's handler, which is what lets a driver release the source
/// without draining the stream.
pub struct ParseFirst<T> {
    transformer: T,
}

impl<T> ParseFirst<T> {
    /// Take the first emission of `transformer`.
    pub fn new(transformer: T) -> Self {
        Self { transformer }
    }
}

impl<In, T, X> Parser<In> for ParseFirst<T>
where
    In: Event,
    X: Clone + Send + 'static,
    T: Transformer<In, Emitted = Parsed<X>>,
{
    type Output = X;

    fn make_handler(&self) -> BoxHandler<In, Parsed<X>> {
        self.transformer.spawn(Box::new(FirstHandler {
            finished: false,
        }))
    }
}

struct FirstHandler {
    finished: bool,
}

impl<X> Handler<Parsed<X>> for FirstHandler
where
    X: Clone + Send + 'static,
{
    type Out = Parsed<X>;

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn handle_input(&mut self, input: Parsed<X>) -> Option<Self::Out> {
        match input {
            Parsed::Empty => None,
            settled => {
                self.finished = true;
                Some(settled)
            }
        }
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        self.finished = true;
        Some(Parsed::Error(error.into()))
    }

    fn handle_end(&mut self) -> Self::Out {
        self.finished = true;
        Parsed::Empty
    }
}

/// A parser collecting every value a transformer emits into a `Vec`.
///
/// `Empty` emissions are dropped and the first `Error` poisons the list,
/// mirroring the collection law of [`Parsed`].
pub struct ParseToList<T> {
    transformer: T,
}

impl<T> ParseToList<T> {
    /// Collect the emissions of `transformer`.
    pub fn new(transformer: T) -> Self {
        Self { transformer }
    }
}

impl<In, T, X> Parser<In> for ParseToList<T>
where
    In: Event,
    X: Clone + Send + 'static,
    T: Transformer<In, Emitted = Parsed<X>>,
{
    type Output = Vec<X>;

    fn make_handler(&self) -> BoxHandler<In, Parsed<Vec<X>>> {
        self.transformer.spawn(Box::new(ToListHandler {
            items: Vec::new(),
            finished: false,
        }))
    }
}

struct ToListHandler<X> {
    items: Vec<X>,
    finished: bool,
}

impl<X> Handler<Parsed<X>> for ToListHandler<X>
where
    X: Clone + Send + 'static,
{
    type Out = Parsed<Vec<X>>;

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn handle_input(&mut self, input: Parsed<X>) -> Option<Self::Out> {
        match input {
            Parsed::Success(value) => {
                self.items.push(value);
                None
            }
            Parsed::Empty => None,
            Parsed::Error(e) => {
                self.finished = true;
                Some(Parsed::Error(e))
            }
        }
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        self.finished = true;
        Some(Parsed::Error(error.into()))
    }

    fn handle_end(&mut self) -> Self::Out {
        self.finished = true;
        Parsed::Success(std::mem::take(&mut self.items))
    }
}
