//! Event marker trait.

use crate::parsed::Parsed;

/// A marker trait for the items of an event stream.
///
/// The core is agnostic to what an event is; it only moves events forward
/// into handlers. Events must be `Clone` because compound and funnelled
/// handlers deliver the same event to several children, and `Send + 'static`
/// so factories stay shareable across threads.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// enum MyEvent { Open(String), Close, Datum(u64) }
///
/// impl Event for MyEvent {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Event",
    label = "must be `Clone + Send + 'static`",
    note = "All stream items in weir must be cloneable and thread-safe."
)]
pub trait Event: Clone + Send + 'static {}

// Common Event implementations
impl Event for () {}
impl Event for String {}
impl Event for &'static str {}
impl Event for bool {}
impl Event for u64 {}
impl Event for usize {}
impl Event for f64 {}
impl<T: Event> Event for Option<T> {}
impl<T: Event> Event for Vec<T> {}
impl<T: Event> Event for Box<T> {}
impl<T: Event + Sync> Event for std::sync::Arc<T> {}

// A parse outcome re-emitted by a transformer is itself an event for the
// downstream handler. The bound is structural rather than `T: Event` so
// plain result values never have to opt in to the marker.
impl<T: Clone + Send + 'static> Event for Parsed<T> {}
