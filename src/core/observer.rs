//! Value-change observers.
//!
//! The ruler publishes its formatted value on every render.  Anything that
//! wants to hear about it implements [`ValueObserver`]; closures and
//! `tokio::sync::watch` senders already do.

use tokio::sync::watch;

/// Receives the selected value, formatted with one decimal place.
pub trait ValueObserver {
    fn on_value_change(&mut self, value: &str);
}

impl<F> ValueObserver for F
where
    F: FnMut(&str),
{
    fn on_value_change(&mut self, value: &str) {
        self(value)
    }
}

/// Publishes into a watch channel; readers always see the latest value.
impl ValueObserver for watch::Sender<String> {
    fn on_value_change(&mut self, value: &str) {
        self.send_if_modified(|current| {
            if current == value {
                false
            } else {
                value.clone_into(current);
                true
            }
        });
    }
}
