use serde_json::{Map, Value};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModelId(u64);

thread_local! {
    static NEXT_MODEL_ID: Cell<u64> = const { Cell::new(1) };
}

fn next_model_id() -> ModelId {
    NEXT_MODEL_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        ModelId(id)
    })
}

struct ModelInner {
    id: ModelId,
    attrs: RefCell<Map<String, Value>>,
}

/// Shared attribute bag. Clones share identity and attributes.
#[derive(Clone)]
pub struct Model {
    inner: Rc<ModelInner>,
}

impl Model {
    pub fn new() -> Self {
        Self::with_attrs(Map::new())
    }

    pub fn with_attrs(attrs: Map<String, Value>) -> Self {
        Self {
            inner: Rc::new(ModelInner {
                id: next_model_id(),
                attrs: RefCell::new(attrs),
            }),
        }
    }

    /// Builds a model from a JSON object; any other value yields an empty
    /// model.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(attrs) => Self::with_attrs(attrs),
            _ => Self::new(),
        }
    }

    pub fn id(&self) -> ModelId {
        self.inner.id
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.attrs.borrow().get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.inner.attrs.borrow_mut().insert(key.into(), value);
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.inner.attrs.borrow().clone())
    }

    pub fn ptr_eq(&self, other: &Model) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.inner.id)
            .field("attrs", &self.inner.attrs.borrow())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/unit/model.rs"]
mod tests;
