use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use super::{EventObserver, Unsubscriber};

pub trait EventHandler<T> {
    fn handle_event(&mut self, event: &T);
}

/// Routes every event seen by `observer` into `handler`.
pub fn attach_handler<T, H>(observer: &EventObserver<T>, handler: Rc<RefCell<H>>) -> Unsubscriber<T>
where
    T: Debug + 'static,
    H: EventHandler<T> + 'static,
{
    observer.subscribe(move |event| handler.borrow_mut().handle_event(event))
}
