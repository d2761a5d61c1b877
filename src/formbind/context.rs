//! # Context Detection
//!
//! Hosts enter the binding layer in one of two shapes: an event context
//! (the host called a registered handler and passed its execution context)
//! or the form itself. [`detect`] tells them apart once, at the boundary, so
//! nothing downstream has to.
//!
//! This is the only fatal path in the crate: without a form there is nothing
//! to bind to.

use crate::error::{FormError, Result};
use crate::events::EventContext;

/// Whatever the host handed over.
#[derive(Debug, Clone)]
pub enum HostInput<H> {
    /// An event execution context, carrying the form it was raised on.
    Event { event: EventContext, form: H },
    /// The form model itself.
    Form(H),
    /// Input of a shape the binding layer does not know.
    Unrecognized(String),
}

/// Extracts the form and, when entered from an event, its context.
pub fn detect<H>(input: Option<HostInput<H>>) -> Result<(H, Option<EventContext>)> {
    match input {
        None => Err(FormError::MissingContext),
        Some(HostInput::Event { event, form }) => {
            tracing::trace!(target: "formbind", kind = %event.kind, "entered from event context");
            Ok((form, Some(event)))
        }
        Some(HostInput::Form(form)) => Ok((form, None)),
        Some(HostInput::Unrecognized(desc)) => Err(FormError::UnrecognizedContext(desc)),
    }
}
