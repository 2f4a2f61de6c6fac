//! Transport abstraction.
//!
//! A transport moves opaque byte messages. The [`crate::Channel`] is the
//! root transport; every layer is a transport wrapping another one, so
//! channels and layers are interchangeable wherever a transport is expected.

use std::rc::Rc;

use crate::error::Result;

/// Anything bytes can be sent into and received out of.
///
/// Methods take `&self`: one transport is shared by several actors and by
/// the layers stacked above it, and all state lives behind interior
/// mutability. Execution is single-threaded, so transports are not `Sync`.
pub trait Transport {
    /// Send a message.
    fn send(&self, data: &[u8]) -> Result<()>;

    /// Receive the pending message.
    fn receive(&self) -> Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, data: &[u8]) -> Result<()> {
        (**self).send(data)
    }

    fn receive(&self) -> Result<Vec<u8>> {
        (**self).receive()
    }
}

impl<T: Transport + ?Sized> Transport for Rc<T> {
    fn send(&self, data: &[u8]) -> Result<()> {
        (**self).send(data)
    }

    fn receive(&self) -> Result<Vec<u8>> {
        (**self).receive()
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, data: &[u8]) -> Result<()> {
        (**self).send(data)
    }

    fn receive(&self) -> Result<Vec<u8>> {
        (**self).receive()
    }
}
