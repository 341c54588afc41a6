use super::{Slot, ViewId, ViewTree};
use crate::error::LoadError;
use crate::loader::ViewLoader;
use crate::view::{ViewClass, ViewOptions};

impl ViewTree {
    /// Like [`ViewTree::subview`], but also resolves module slots by
    /// loading them through `loader`.
    pub async fn subview_async(
        &mut self,
        parent: ViewId,
        name: &str,
        loader: &ViewLoader,
    ) -> Result<ViewId, LoadError> {
        let slot = self
            .views
            .get(parent)
            .ok_or(LoadError::Tree(crate::error::TreeError::UnknownView))?
            .subviews
            .get(name)
            .cloned();

        match slot {
            Some(Slot::Module(module)) => {
                let class = loader.load(&module).await?;
                self.install_loaded(parent, name, &module, &class)
            }
            Some(_) => self.subview(parent, name).ok_or_else(|| LoadError::NoSubview {
                name: name.into(),
            }),
            None => Err(LoadError::NoSubview { name: name.into() }),
        }
    }

    pub async fn open_subview_async(
        &mut self,
        parent: ViewId,
        name: &str,
        loader: &ViewLoader,
    ) -> Result<ViewId, LoadError> {
        let child = self.subview_async(parent, name, loader).await?;
        self.call_method(child, "open", &[]);
        Ok(child)
    }

    /// Installs a loaded class into a module slot. Idempotent: a slot that
    /// is already live returns its instance, and a slot overwritten with a
    /// different value keeps that value.
    pub fn install_loaded(
        &mut self,
        parent: ViewId,
        name: &str,
        module: &str,
        class: &ViewClass,
    ) -> Result<ViewId, LoadError> {
        let slot = self
            .views
            .get(parent)
            .ok_or(LoadError::Tree(crate::error::TreeError::UnknownView))?
            .subviews
            .get(name)
            .cloned();

        match slot {
            Some(Slot::Module(m)) if m.as_str() == module => {
                let child = self.construct(class, ViewOptions::default());
                self.adopt(parent, name, child)?;
                Ok(child)
            }
            Some(Slot::Live(id)) => Ok(id),
            Some(Slot::Class { .. }) => self.subview(parent, name).ok_or_else(|| LoadError::Superseded {
                name: name.into(),
            }),
            Some(Slot::Module(_)) => Err(LoadError::Superseded { name: name.into() }),
            None => Err(LoadError::NoSubview { name: name.into() }),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/load.rs"]
mod tests;
