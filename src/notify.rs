use log::trace;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Synchronous publish/subscribe list. Subscribers get a bare "state
/// changed" signal and re-read whatever they need.
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: Vec<(SubscriberId, Box<dyn FnMut()>)>,
    next_id: u64,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Calls every subscriber in subscription order.
    pub fn notify(&mut self) {
        trace!("notifying {} observers", self.len());
        for (_, observer) in self.subscribers.iter_mut() {
            observer();
        }
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notifies_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = ChangeNotifier::new();
        for name in ["first", "second"] {
            let log = Rc::clone(&log);
            notifier.subscribe(move || log.borrow_mut().push(name));
        }
        notifier.notify();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn unsubscribed_observer_is_silent() {
        let count = Rc::new(RefCell::new(0));
        let mut notifier = ChangeNotifier::new();
        let c = Rc::clone(&count);
        let id = notifier.subscribe(move || *c.borrow_mut() += 1);

        notifier.notify();
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id), "second unsubscribe finds nothing");
        notifier.notify();

        assert_eq!(*count.borrow(), 1);
        assert!(notifier.is_empty());
    }

    #[test]
    fn debug_reports_subscriber_count() {
        let mut notifier = ChangeNotifier::new();
        notifier.subscribe(|| {});
        notifier.subscribe(|| {});
        assert_eq!(notifier.len(), 2);
        assert_eq!(format!("{notifier:?}"), "ChangeNotifier { subscribers: 2 }");
    }
}
