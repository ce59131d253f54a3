//! Signals — handler dispatch for the single-threaded UI loop

use pyre_core::HandlerId;
use std::cell::RefCell;
use std::rc::Rc;

type Handler<T> = Rc<dyn Fn(&T)>;

/// A list of handlers invoked in connection order when the signal is emitted.
///
/// Handlers are cloned out before dispatch, so a handler may connect or
/// disconnect handlers on the same signal while it runs. Such changes take
/// effect from the next emission.
pub struct Signal<T> {
    handlers: RefCell<Vec<(HandlerId, Handler<T>)>>,
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Connect a handler, returning its id
    pub fn connect<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&T) + 'static,
    {
        let id = HandlerId::next();
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Disconnect a handler. Returns whether it was connected.
    pub fn disconnect(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(h, _)| *h != id);
        handlers.len() != before
    }

    /// Invoke every connected handler with `value`
    pub fn emit(&self, value: &T) {
        let handlers: Vec<Handler<T>> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        for handler in handlers {
            handler(value);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}
