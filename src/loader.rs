//! Load-by-name for module subview slots.
//!
//! Each module name gets one `OnceCell`; concurrent requests for the same
//! name await the same fetch. A failed fetch is evicted so the next request
//! tries again.

use crate::error::LoadError;
use crate::view::ViewClass;
use compact_str::CompactString;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tokio::sync::OnceCell;

pub type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

pub trait ModuleSource {
    /// Resolves to `None` when the module does not exist or failed to load.
    fn fetch(&self, module: &str) -> LocalBoxFuture<'static, Option<ViewClass>>;
}

/// A source backed by classes registered up front.
#[derive(Clone, Debug, Default)]
pub struct StaticModules {
    modules: FxHashMap<CompactString, ViewClass>,
}

impl StaticModules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, module: &str, class: ViewClass) -> Self {
        self.modules.insert(module.into(), class);
        self
    }
}

impl ModuleSource for StaticModules {
    fn fetch(&self, module: &str) -> LocalBoxFuture<'static, Option<ViewClass>> {
        let class = self.modules.get(module).cloned();
        Box::pin(async move { class })
    }
}

type ModuleCell = Rc<OnceCell<Option<ViewClass>>>;

#[derive(Clone)]
pub struct ViewLoader {
    source: Rc<dyn ModuleSource>,
    modules: Rc<RefCell<FxHashMap<CompactString, ModuleCell>>>,
}

impl ViewLoader {
    pub fn new(source: impl ModuleSource + 'static) -> Self {
        Self {
            source: Rc::new(source),
            modules: Rc::new(RefCell::new(FxHashMap::default())),
        }
    }

    pub async fn load(&self, module: &str) -> Result<ViewClass, LoadError> {
        let cell: ModuleCell = self
            .modules
            .borrow_mut()
            .entry(module.into())
            .or_default()
            .clone();

        let source = Rc::clone(&self.source);
        let loaded = cell.get_or_init(|| source.fetch(module)).await.clone();

        match loaded {
            Some(class) => {
                tracing::debug!(module, class = class.name(), "module loaded");
                Ok(class)
            }
            None => {
                let mut modules = self.modules.borrow_mut();
                if modules.get(module).is_some_and(|c| Rc::ptr_eq(c, &cell)) {
                    modules.remove(module);
                }
                tracing::warn!(module, "module failed to load");
                Err(LoadError::ModuleNotFound {
                    module: module.into(),
                })
            }
        }
    }

    pub fn is_loaded(&self, module: &str) -> bool {
        self.modules
            .borrow()
            .get(module)
            .is_some_and(|c| matches!(c.get(), Some(Some(_))))
    }
}

#[cfg(test)]
#[path = "../tests/unit/loader.rs"]
mod tests;
