//! Funnelled transformers: several derived streams into one downstream.
//!
//! Each child transformer (a *funnel*) is spawned onto a guarded proxy of a
//! single shared downstream handler. The proxy forwards inputs and faults
//! but swallows end-of-input, so one funnel finishing early cannot end the
//! downstream for its siblings; the real end is delivered exactly once, when
//! the last funnel is done.
//!
//! Funnels are composed as a static chain in the `HCons`/`HNil` style and
//! are usually built with the [`funnel!`](crate::funnel!) macro:
//!
//! ```rust,ignore
//! let both = funnel![authors, stats].parse_to_list();
//! ```

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use weir_core::{BoxHandler, Event, Handler, SourceError, Transformer};

/// Chain terminator for funnel chains.
pub struct HNil;

/// Chain cell: a transformer followed by more transformers.
pub struct HCons<H, T> {
    /// The first funnel of this chain.
    pub head: H,
    /// The rest of the chain.
    pub tail: T,
}

/// What a guarded proxy hands back to its funnel: either a real downstream
/// result, or the sentinel marking a swallowed end-of-input.
///
/// A funnel that observes `Ignored` has ended from its own point of view
/// and must not emit again; its siblings keep running against the still
/// open downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunnelEnd<T> {
    /// The downstream terminated with this result.
    Emitted(T),
    /// The funnel's end-of-input was swallowed by the guard.
    Ignored,
}

/// Shared single-threaded ownership of one downstream handler.
///
/// Handler trees are exclusively owned by their driver, so plain `Rc` and
/// `RefCell` are enough; nothing here needs to be `Send`.
pub struct SharedHandler<D> {
    inner: Rc<RefCell<D>>,
}

impl<D> SharedHandler<D> {
    /// Share `handler` between a set of proxies.
    pub fn new(handler: D) -> Self {
        Self {
            inner: Rc::new(RefCell::new(handler)),
        }
    }
}

impl<D> Clone for SharedHandler<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<In, D> Handler<In> for SharedHandler<D>
where
    In: Event,
    D: Handler<In>,
{
    type Out = D::Out;

    fn is_finished(&self) -> bool {
        self.inner.borrow().is_finished()
    }

    fn handle_input(&mut self, input: In) -> Option<Self::Out> {
        self.inner.borrow_mut().handle_input(input)
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        self.inner.borrow_mut().handle_error(error)
    }

    fn handle_end(&mut self) -> Self::Out {
        self.inner.borrow_mut().handle_end()
    }
}

/// A proxy over the shared downstream that swallows `handle_end`.
pub struct GuardedEnd<D> {
    downstream: SharedHandler<D>,
    finished: bool,
}

impl<D> GuardedEnd<D> {
    /// Guard the shared downstream against a funnel's end-of-input.
    pub fn new(downstream: SharedHandler<D>) -> Self {
        Self {
            downstream,
            finished: false,
        }
    }
}

impl<In, D> Handler<In> for GuardedEnd<D>
where
    In: Event,
    D: Handler<In>,
{
    type Out = FunnelEnd<D::Out>;

    fn is_finished(&self) -> bool {
        self.finished || self.downstream.is_finished()
    }

    fn handle_input(&mut self, input: In) -> Option<Self::Out> {
        match self.downstream.handle_input(input) {
            Some(out) => {
                self.finished = true;
                Some(FunnelEnd::Emitted(out))
            }
            None => None,
        }
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Self::Out> {
        match self.downstream.handle_error(error) {
            Some(out) => {
                self.finished = true;
                Some(FunnelEnd::Emitted(out))
            }
            None => None,
        }
    }

    fn handle_end(&mut self) -> Self::Out {
        self.finished = true;
        FunnelEnd::Ignored
    }
}

/// A static chain of transformers sharing input and emitted types.
pub trait FunnelChain<In: Event, A: Event>: Send + Sync {
    /// Spawn every transformer in the chain onto a guarded proxy of
    /// `downstream`, collecting the funnels in chain order.
    fn spawn_funnels<Out: 'static>(
        &self,
        downstream: &SharedHandler<BoxHandler<A, Out>>,
        funnels: &mut Vec<BoxHandler<In, FunnelEnd<Out>>>,
    );
}

impl<In: Event, A: Event> FunnelChain<In, A> for HNil {
    fn spawn_funnels<Out: 'static>(
        &self,
        _downstream: &SharedHandler<BoxHandler<A, Out>>,
        _funnels: &mut Vec<BoxHandler<In, FunnelEnd<Out>>>,
    ) {
    }
}

impl<In, A, H, T> FunnelChain<In, A> for HCons<H, T>
where
    In: Event,
    A: Event,
    H: Transformer<In, Emitted = A>,
    T: FunnelChain<In, A>,
{
    fn spawn_funnels<Out: 'static>(
        &self,
        downstream: &SharedHandler<BoxHandler<A, Out>>,
        funnels: &mut Vec<BoxHandler<In, FunnelEnd<Out>>>,
    ) {
        funnels.push(self.head.spawn(Box::new(GuardedEnd::new(downstream.clone()))));
        self.tail.spawn_funnels(downstream, funnels);
    }
}

/// Several transformers merged into one, emitting into a single downstream
/// in stream order.
///
/// Built by [`funnel!`](crate::funnel!) or
/// [`TransformerExt::merge`](crate::TransformerExt::merge).
pub struct Funnelled<A, L> {
    chain: L,
    _emitted: PhantomData<fn() -> A>,
}

impl<A, L> Funnelled<A, L> {
    /// Merge a prepared chain of transformers.
    pub fn from_chain(chain: L) -> Self {
        Self {
            chain,
            _emitted: PhantomData,
        }
    }
}

impl<In, A, L> Transformer<In> for Funnelled<A, L>
where
    In: Event,
    A: Event,
    L: FunnelChain<In, A> + 'static,
{
    type Emitted = A;

    fn spawn<Out: 'static>(&self, downstream: BoxHandler<A, Out>) -> BoxHandler<In, Out> {
        let shared = SharedHandler::new(downstream);
        let mut funnels = Vec::new();
        self.chain.spawn_funnels(&shared, &mut funnels);
        Box::new(FunnelledHandler {
            funnels,
            downstream: shared,
            finished: false,
        })
    }
}

/// Runs every unfinished funnel on each event and owns the delivery of the
/// single real end-of-input to the shared downstream.
pub struct FunnelledHandler<In, A, Out> {
    funnels: Vec<BoxHandler<In, FunnelEnd<Out>>>,
    downstream: SharedHandler<BoxHandler<A, Out>>,
    finished: bool,
}

impl<In, A, Out> FunnelledHandler<In, A, Out>
where
    In: Event,
    A: Event,
    Out: 'static,
{
    fn all_funnels_finished(&self) -> bool {
        self.funnels.iter().all(|funnel| funnel.is_finished())
    }
}

impl<In, A, Out> Handler<In> for FunnelledHandler<In, A, Out>
where
    In: Event,
    A: Event,
    Out: 'static,
{
    type Out = Out;

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn handle_input(&mut self, input: In) -> Option<Out> {
        for funnel in &mut self.funnels {
            if funnel.is_finished() {
                continue;
            }
            if let Some(FunnelEnd::Emitted(out)) = funnel.handle_input(input.clone()) {
                self.finished = true;
                return Some(out);
            }
        }
        if self.all_funnels_finished() {
            self.finished = true;
            return Some(self.downstream.handle_end());
        }
        None
    }

    fn handle_error(&mut self, error: SourceError) -> Option<Out> {
        for funnel in &mut self.funnels {
            if funnel.is_finished() {
                continue;
            }
            if let Some(FunnelEnd::Emitted(out)) = funnel.handle_error(error.clone()) {
                self.finished = true;
                return Some(out);
            }
        }
        if self.all_funnels_finished() {
            self.finished = true;
            return Some(self.downstream.handle_end());
        }
        None
    }

    fn handle_end(&mut self) -> Out {
        self.finished = true;
        for funnel in &mut self.funnels {
            if funnel.is_finished() {
                continue;
            }
            if let FunnelEnd::Emitted(out) = funnel.handle_end() {
                return out;
            }
        }
        self.downstream.handle_end()
    }
}

/// Merge transformers into a [`Funnelled`], earliest first.
///
/// ```rust,ignore
/// let merged = funnel![authors, stats];
/// ```
#[macro_export]
macro_rules! funnel {
    ( $($transformer:expr),+ $(,)? ) => {
        $crate::Funnelled::from_chain($crate::funnel_chain!($($transformer),+))
    };
}

/// Build the `HCons`/`HNil` chain behind [`funnel!`](crate::funnel!).
#[macro_export]
macro_rules! funnel_chain {
    ( $transformer:expr $(,)? ) => {
        $crate::HCons { head: $transformer, tail: $crate::HNil }
    };
    ( $transformer:expr, $($rest:expr),+ ) => {
        $crate::HCons { head: $transformer, tail: $crate::funnel_chain!($($rest),+) }
    };
}
