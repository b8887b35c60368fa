//! Testing infrastructure (mock interfaces, delays).

pub(crate) mod mock;

pub(crate) use mock::{MockDelay, MockError, MockInterface, Transaction};
