use super::{Deferred, ViewId, ViewTree};
use crate::model::{Model, ModelId};
use compact_str::CompactString;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventSource {
    Model(ModelId),
    View(ViewId),
}

impl From<&Model> for EventSource {
    fn from(model: &Model) -> Self {
        EventSource::Model(model.id())
    }
}

impl From<ViewId> for EventSource {
    fn from(view: ViewId) -> Self {
        EventSource::View(view)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscription {
    pub source: EventSource,
    pub event: CompactString,
}

#[derive(Clone, Debug)]
pub struct Event {
    pub source: EventSource,
    pub name: CompactString,
    pub payload: Value,
}

impl ViewTree {
    pub fn listen_to(&mut self, view: ViewId, source: impl Into<EventSource>, event: &str) {
        let Some(node) = self.views.get_mut(view) else {
            return;
        };
        let sub = Subscription {
            source: source.into(),
            event: event.into(),
        };
        if !node.subscriptions.contains(&sub) {
            node.subscriptions.push(sub);
        }
    }

    /// Drops the view's subscriptions to `source`, or all of them.
    pub fn stop_listening(&mut self, view: ViewId, source: Option<EventSource>) {
        let Some(node) = self.views.get_mut(view) else {
            return;
        };
        match source {
            Some(source) => node.subscriptions.retain(|s| s.source != source),
            None => node.subscriptions.clear(),
        }
    }

    pub fn subscriptions(&self, view: ViewId) -> &[Subscription] {
        self.views
            .get(view)
            .map(|n| n.subscriptions.as_slice())
            .unwrap_or(&[])
    }

    pub fn listener_count(&self, view: ViewId) -> usize {
        self.subscriptions(view).len()
    }

    /// Delivers the event to every view subscribed to `(source, name)`. A
    /// listener whose own hook is running gets the event once that hook
    /// returns. Returns how many views the event was delivered or queued to.
    pub fn trigger(&mut self, source: impl Into<EventSource>, name: &str, payload: Value) -> usize {
        let event = Event {
            source: source.into(),
            name: name.into(),
            payload,
        };
        let listeners: Vec<ViewId> = self
            .views
            .iter()
            .filter(|(_, node)| {
                node.subscriptions
                    .iter()
                    .any(|s| s.source == event.source && s.event == event.name)
            })
            .map(|(id, _)| id)
            .collect();

        let mut delivered = 0;
        for id in listeners {
            if !self.contains(id) {
                continue;
            }
            self.run_or_defer(id, Deferred::Event(event.clone()));
            delivered += 1;
        }
        delivered
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/events.rs"]
mod tests;
