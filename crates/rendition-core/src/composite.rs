//! Fan-out listener

use rendition_ast::{Event, EventResult, Listener};

/// Forwards every event to each registered listener, in registration order
///
/// The first listener error stops delivery of that event: listeners after the
/// failing one do not receive it and the error is returned to the caller.
#[derive(Default)]
pub struct CompositeListener<'a> {
    listeners: Vec<Box<dyn Listener + 'a>>,
}

impl<'a> CompositeListener<'a> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn add_listener(&mut self, listener: impl Listener + 'a) {
        self.listeners.push(Box::new(listener));
    }

    /// Builder form of [`add_listener`](Self::add_listener)
    pub fn with_listener(mut self, listener: impl Listener + 'a) -> Self {
        self.add_listener(listener);
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Listener for CompositeListener<'_> {
    fn on_event(&mut self, event: &Event<'_>) -> EventResult {
        for listener in &mut self.listeners {
            event.dispatch(listener.as_mut())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rendition_ast::{ListenerError, Parameters};
    use std::cell::RefCell;

    struct Tagged<'log> {
        name: &'static str,
        log: &'log RefCell<Vec<String>>,
        fail_on_space: bool,
    }

    impl Listener for Tagged<'_> {
        fn on_event(&mut self, event: &Event<'_>) -> EventResult {
            if self.fail_on_space && matches!(event, Event::Space) {
                return Err(ListenerError::custom(format!("{} failed", self.name)));
            }
            self.log
                .borrow_mut()
                .push(format!("{}:{}", self.name, event.kind()));
            Ok(())
        }
    }

    fn tagged<'log>(name: &'static str, log: &'log RefCell<Vec<String>>) -> Tagged<'log> {
        Tagged {
            name,
            log,
            fail_on_space: false,
        }
    }

    #[test]
    fn test_fan_out_in_registration_order() {
        let log = RefCell::new(Vec::new());
        let mut composite = CompositeListener::new()
            .with_listener(tagged("l1", &log))
            .with_listener(tagged("l2", &log))
            .with_listener(tagged("l3", &log));

        composite.begin_paragraph(&Parameters::new()).unwrap();
        composite.on_word("x").unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                "l1:beginParagraph",
                "l2:beginParagraph",
                "l3:beginParagraph",
                "l1:onWord",
                "l2:onWord",
                "l3:onWord",
            ]
        );
    }

    #[test]
    fn test_parameters_reach_every_listener_unchanged() {
        struct Capture<'c>(&'c RefCell<Vec<Parameters>>);

        impl Listener for Capture<'_> {
            fn begin_table(&mut self, parameters: &Parameters) -> EventResult {
                self.0.borrow_mut().push(parameters.clone());
                Ok(())
            }
        }

        let seen = RefCell::new(Vec::new());
        let mut composite = CompositeListener::new()
            .with_listener(Capture(&seen))
            .with_listener(Capture(&seen));
        let params = Parameters::from([("border".to_string(), "1".to_string())]);
        composite.begin_table(&params).unwrap();

        assert_eq!(*seen.borrow(), vec![params.clone(), params]);
    }

    #[test]
    fn test_error_stops_later_listeners() {
        let log = RefCell::new(Vec::new());
        let mut composite = CompositeListener::new()
            .with_listener(tagged("l1", &log))
            .with_listener(Tagged {
                name: "l2",
                log: &log,
                fail_on_space: true,
            })
            .with_listener(tagged("l3", &log));

        let err = composite.on_space().unwrap_err();
        assert_eq!(err.to_string(), "l2 failed");
        assert_eq!(*log.borrow(), vec!["l1:onSpace"]);
    }

    #[test]
    fn test_empty_composite() {
        let mut composite = CompositeListener::new();
        assert!(composite.is_empty());
        assert!(composite.on_new_line().is_ok());
    }
}
