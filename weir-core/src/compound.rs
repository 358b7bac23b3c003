//! Compound handlers: several parsers in lock-step on one stream.
//!
//! A compound delivers every event to each of its unfinished children, in
//! index order, before accepting the next event; a child never observes
//! event `i + 1` before its siblings observed event `i`. When every child
//! has a result the slots are zipped: the first error by index poisons the
//! compound, and with no error any `Empty` child makes the compound `Empty`.
//!
//! The binary form is [`And`]; tuples of parsers up to arity 8 implement
//! [`Parser`] directly, so an N-ary compound is written as a tuple and
//! finalized with `map`:
//!
//! ```rust,ignore
//! let author = (attr("id"), attr("name")).map(|(id, name)| Author { id, name });
//! ```

use std::sync::Arc;

use crate::{
    error::SourceError,
    event::Event,
    handler::{BoxHandler, Handler},
    parsed::Parsed,
    parser::{MapHandler, Parser},
};

/// Two child handlers running in lock-step on the same stream.
pub struct PairHandler<HA, HB, A, B> {
    left: HA,
    right: HB,
    left_slot: Option<Parsed<A>>,
    right_slot: Option<Parsed<B>>,
    finished: bool,
}

impl<HA, HB, A, B> PairHandler<HA, HB, A, B> {
    /// Pair two child handlers.
    pub fn new(left: HA, right: HB) -> Self {
        Self {
            left,
            right,
            left_slot: None,
            right_slot: None,
            finished: false,
        }
    }

    fn emit_if_ready(&mut self) -> Option<Parsed<(A, B)>> {
        match (self.left_slot.take(), self.right_slot.take()) {
            (Some(left), Some(right)) => {
                self.finished = true;
                Some(left.zip(right))
            }
            (left, right) => {
                self.left_slot = left;
                self.right_slot = right;
                None
            }
        }
    }
}

impl<In, HA, HB, A, B> Handler<In> for PairHandler<HA, HB, A, B>
where
    In: Event,
    A: Clone + Send + 'static,
    B: Clone + Send + 'static,
    HA: Handler<In, Out = Parsed<A>>,
    HB: Handler<In, Out = Parsed<B>>,
{
    type Out = Parsed<(A, B)>;

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn handle_input(&mut self, input: In) -> Option<Self::Out> {
        if self.left_slot.is_none() {
            if let Some(result) = self.left.handle_input(input.clone()) {
                self.left_slot = Some(result);
            }
        }
        if self.right_slot.is_none() {
            if let Some(result) = self.right.handle_input(input) {
                self.right_slot = Some(result);
            }
        }
        self.emit_if_ready()
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        if self.left_slot.is_none() {
            if let Some(result) = self.left.handle_error(error.clone()) {
                self.left_slot = Some(result);
            }
        }
        if self.right_slot.is_none() {
            if let Some(result) = self.right.handle_error(error) {
                self.right_slot = Some(result);
            }
        }
        self.emit_if_ready()
    }

    fn handle_end(&mut self) -> Self::Out {
        if self.left_slot.is_none() {
            self.left_slot = Some(self.left.handle_end());
        }
        if self.right_slot.is_none() {
            self.right_slot = Some(self.right.handle_end());
        }
        self.emit_if_ready().unwrap_or(Parsed::Empty)
    }
}

/// Two parsers combined into one producing a pair. Created by
/// [`Parser::and`](crate::Parser::and).
pub struct And<PA, PB> {
    left: PA,
    right: PB,
}

impl<PA, PB> And<PA, PB> {
    /// Combine two parsers.
    pub fn new(left: PA, right: PB) -> Self {
        Self { left, right }
    }
}

impl<In, PA, PB> Parser<In> for And<PA, PB>
where
    In: Event,
    PA: Parser<In>,
    PB: Parser<In>,
{
    type Output = (PA::Output, PB::Output);

    fn make_handler(&self) -> BoxHandler<In, Parsed<Self::Output>> {
        Box::new(PairHandler::new(
            self.left.make_handler(),
            self.right.make_handler(),
        ))
    }
}

impl<In, P1, P2> Parser<In> for (P1, P2)
where
    In: Event,
    P1: Parser<In>,
    P2: Parser<In>,
{
    type Output = (P1::Output, P2::Output);

    fn make_handler(&self) -> BoxHandler<In, Parsed<Self::Output>> {
        Box::new(PairHandler::new(
            self.0.make_handler(),
            self.1.make_handler(),
        ))
    }
}

impl<In, P1, P2, P3> Parser<In> for (P1, P2, P3)
where
    In: Event,
    P1: Parser<In>,
    P2: Parser<In>,
    P3: Parser<In>,
{
    type Output = (P1::Output, P2::Output, P3::Output);

    fn make_handler(&self) -> BoxHandler<In, Parsed<Self::Output>> {
        let nested = PairHandler::new(
            self.0.make_handler(),
            PairHandler::new(self.1.make_handler(), self.2.make_handler()),
        );
        let flatten = |(a, (b, c)): (P1::Output, (P2::Output, P3::Output))| (a, b, c);
        Box::new(MapHandler::new(nested, Arc::new(flatten)))
    }
}

impl<In, P1, P2, P3, P4> Parser<In> for (P1, P2, P3, P4)
where
    In: Event,
    P1: Parser<In>,
    P2: Parser<In>,
    P3: Parser<In>,
    P4: Parser<In>,
{
    type Output = (P1::Output, P2::Output, P3::Output, P4::Output);

    fn make_handler(&self) -> BoxHandler<In, Parsed<Self::Output>> {
        let nested = PairHandler::new(
            self.0.make_handler(),
            PairHandler::new(
                self.1.make_handler(),
                PairHandler::new(self.2.make_handler(), self.3.make_handler()),
            ),
        );
        let flatten = |(a, (b, (c, d))): (P1::Output, (P2::Output, (P3::Output, P4::Output)))| {
            (a, b, c, d)
        };
        Box::new(MapHandler::new(nested, Arc::new(flatten)))
    }
}

impl<In, P1, P2, P3, P4, P5> Parser<In> for (P1, P2, P3, P4, P5)
where
    In: Event,
    P1: Parser<In>,
    P2: Parser<In>,
    P3: Parser<In>,
    P4: Parser<In>,
    P5: Parser<In>,
{
    type Output = (P1::Output, P2::Output, P3::Output, P4::Output, P5::Output);

    fn make_handler(&self) -> BoxHandler<In, Parsed<Self::Output>> {
        let nested = PairHandler::new(
            self.0.make_handler(),
            PairHandler::new(
                self.1.make_handler(),
                PairHandler::new(
                    self.2.make_handler(),
                    PairHandler::new(self.3.make_handler(), self.4.make_handler()),
                ),
            ),
        );
        type Nested<P1, P2, P3, P4, P5> = (P1, (P2, (P3, (P4, P5))));
        let flatten =
            |(a, (b, (c, (d, e)))): Nested<P1::Output, P2::Output, P3::Output, P4::Output, P5::Output>| {
                (a, b, c, d, e)
            };
        Box::new(MapHandler::new(nested, Arc::new(flatten)))
    }
}

impl<In, P1, P2, P3, P4, P5, P6> Parser<In> for (P1, P2, P3, P4, P5, P6)
where
    In: Event,
    P1: Parser<In>,
    P2: Parser<In>,
    P3: Parser<In>,
    P4: Parser<In>,
    P5: Parser<In>,
    P6: Parser<In>,
{
    type Output = (
        P1::Output,
        P2::Output,
        P3::Output,
        P4::Output,
        P5::Output,
        P6::Output,
    );

    fn make_handler(&self) -> BoxHandler<In, Parsed<Self::Output>> {
        let nested = PairHandler::new(
            self.0.make_handler(),
            PairHandler::new(
                self.1.make_handler(),
                PairHandler::new(
                    self.2.make_handler(),
                    PairHandler::new(
                        self.3.make_handler(),
                        PairHandler::new(self.4.make_handler(), self.5.make_handler()),
                    ),
                ),
            ),
        );
        type Nested<P1, P2, P3, P4, P5, P6> = (P1, (P2, (P3, (P4, (P5, P6)))));
        let flatten = |(a, (b, (c, (d, (e, f))))): Nested<
            P1::Output,
            P2::Output,
            P3::Output,
            P4::Output,
            P5::Output,
            P6::Output,
        >| (a, b, c, d, e, f);
        Box::new(MapHandler::new(nested, Arc::new(flatten)))
    }
}

impl<In, P1, P2, P3, P4, P5, P6, P7> Parser<In> for (P1, P2, P3, P4, P5, P6, P7)
where
    In: Event,
    P1: Parser<In>,
    P2: Parser<In>,
    P3: Parser<In>,
    P4: Parser<In>,
    P5: Parser<In>,
    P6: Parser<In>,
    P7: Parser<In>,
{
    type Output = (
        P1::Output,
        P2::Output,
        P3::Output,
        P4::Output,
        P5::Output,
        P6::Output,
        P7::Output,
    );

    fn make_handler(&self) -> BoxHandler<In, Parsed<Self::Output>> {
        let nested = PairHandler::new(
            self.0.make_handler(),
            PairHandler::new(
                self.1.make_handler(),
                PairHandler::new(
                    self.2.make_handler(),
                    PairHandler::new(
                        self.3.make_handler(),
                        PairHandler::new(
                            self.4.make_handler(),
                            PairHandler::new(self.5.make_handler(), self.6.make_handler()),
                        ),
                    ),
                ),
            ),
        );
        type Nested<P1, P2, P3, P4, P5, P6, P7> = (P1, (P2, (P3, (P4, (P5, (P6, P7))))));
        let flatten = |(a, (b, (c, (d, (e, (f, g)))))): Nested<
            P1::Output,
            P2::Output,
            P3::Output,
            P4::Output,
            P5::Output,
            P6::Output,
            P7::Output,
        >| (a, b, c, d, e, f, g);
        Box::new(MapHandler::new(nested, Arc::new(flatten)))
    }
}

impl<In, P1, P2, P3, P4, P5, P6, P7, P8> Parser<In> for (P1, P2, P3, P4, P5, P6, P7, P8)
where
    In: Event,
    P1: Parser<In>,
    P2: Parser<In>,
    P3: Parser<In>,
    P4: Parser<In>,
    P5: Parser<In>,
    P6: Parser<In>,
    P7: Parser<In>,
    P8: Parser<In>,
{
    type Output = (
        P1::Output,
        P2::Output,
        P3::Output,
        P4::Output,
        P5::Output,
        P6::Output,
        P7::Output,
        P8::Output,
    );

    fn make_handler(&self) -> BoxHandler<In, Parsed<Self::Output>> {
        let nested = PairHandler::new(
            self.0.make_handler(),
            PairHandler::new(
                self.1.make_handler(),
                PairHandler::new(
                    self.2.make_handler(),
                    PairHandler::new(
                        self.3.make_handler(),
                        PairHandler::new(
                            self.4.make_handler(),
                            PairHandler::new(
                                self.5.make_handler(),
                                PairHandler::new(self.6.make_handler(), self.7.make_handler()),
                            ),
                        ),
                    ),
                ),
            ),
        );
        type Nested<P1, P2, P3, P4, P5, P6, P7, P8> =
            (P1, (P2, (P3, (P4, (P5, (P6, (P7, P8)))))));
        let flatten = |(a, (b, (c, (d, (e, (f, (g, h))))))): Nested<
            P1::Output,
            P2::Output,
            P3::Output,
            P4::Output,
            P5::Output,
            P6::Output,
            P7::Output,
            P8::Output,
        >| (a, b, c, d, e, f, g, h);
        Box::new(MapHandler::new(nested, Arc::new(flatten)))
    }
}
