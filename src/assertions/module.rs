//! Navigation of the planned module tree.

use crate::error::Result;
use crate::plan::ModuleNode;

use super::lookup::{Collection, resolve_addressed};
use super::resource::ResourceAssert;

/// Accessor over one planned module.
#[derive(Debug, Clone, Copy)]
pub struct ModuleAssert<'a> {
    module: &'a ModuleNode,
}

/// Lookup into the immediate child modules of a module.
#[derive(Debug, Clone, Copy)]
pub struct ChildModules<'a> {
    modules: &'a Vec<ModuleNode>,
}

impl<'a> ModuleAssert<'a> {
    pub(crate) const fn new(module: &'a ModuleNode) -> Self {
        Self { module }
    }

    /// Module address, `root` for the root module.
    #[must_use]
    pub fn address(&self) -> &'a str {
        self.module.address_or_root()
    }

    /// Raw module node.
    #[must_use]
    pub const fn get(&self) -> &'a ModuleNode {
        self.module
    }

    /// Looks up a resource declared directly in this module.
    ///
    /// # Errors
    ///
    /// Fails if the module has no resources, or the address matches zero or
    /// several of them.
    pub fn resource(&self, address: &str) -> Result<ResourceAssert<'a>> {
        resolve_addressed(self.module.resources.as_ref(), address, Collection::PlannedResources)
            .map(ResourceAssert::new)
    }

    /// Addresses of the resources declared directly in this module.
    #[must_use]
    pub fn resource_addresses(&self) -> Vec<&'a str> {
        self.module
            .resources
            .iter()
            .flatten()
            .map(|r| r.address.as_str())
            .collect()
    }

    /// Child module lookup, or `None` when the module declares no children.
    #[must_use]
    pub fn child_modules(&self) -> Option<ChildModules<'a>> {
        self.module
            .child_modules
            .as_ref()
            .map(|modules| ChildModules { modules })
    }
}

impl<'a> ChildModules<'a> {
    /// Looks up an immediate child by its full module address.
    ///
    /// # Errors
    ///
    /// Fails if no child, or more than one, has this address.
    pub fn module(&self, address: &str) -> Result<ModuleAssert<'a>> {
        resolve_addressed(Some(self.modules), address, Collection::ChildModules)
            .map(ModuleAssert::new)
    }

    /// Addresses of the immediate children.
    #[must_use]
    pub fn addresses(&self) -> Vec<&'a str> {
        self.modules.iter().map(ModuleNode::address_or_root).collect()
    }

    /// Number of immediate children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns true if the module declares an empty child list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> ModuleNode {
        serde_json::from_value(json!({
            "resources": [{ "address": "random_id.root" }],
            "child_modules": [{
                "address": "module.app",
                "resources": [{ "address": "module.app.random_id.inner" }],
                "child_modules": [{
                    "address": "module.app.module.net",
                    "resources": [{ "address": "module.app.module.net.random_id.leaf" }]
                }]
            }]
        }))
        .expect("decode")
    }

    #[test]
    fn test_resources_are_scoped_to_module() {
        let root = tree();
        let module = ModuleAssert::new(&root);
        assert_eq!(module.address(), "root");
        assert!(module.resource("random_id.root").is_ok());
        assert!(module.resource("module.app.random_id.inner").is_err());
        assert_eq!(module.resource_addresses(), vec!["random_id.root"]);
    }

    #[test]
    fn test_nested_traversal_is_repeatable() -> Result<()> {
        let root = tree();
        let module = ModuleAssert::new(&root);

        for _ in 0..2 {
            let children = module.child_modules().expect("root has children");
            let app = children.module("module.app")?;
            let leaf = app
                .child_modules()
                .expect("app has children")
                .module("module.app.module.net")?
                .resource("module.app.module.net.random_id.leaf")?;
            assert_eq!(leaf.address(), "module.app.module.net.random_id.leaf");
            assert!(std::ptr::eq(app.get(), &root.child_modules.as_ref().expect("children")[0]));
        }
        Ok(())
    }

    #[test]
    fn test_leaf_has_no_child_accessor() -> Result<()> {
        let root = tree();
        let net = ModuleAssert::new(&root)
            .child_modules()
            .expect("children")
            .module("module.app")?
            .child_modules()
            .expect("children")
            .module("module.app.module.net")?;
        assert!(net.child_modules().is_none());
        Ok(())
    }

    #[test]
    fn test_missing_child_module() {
        let root = tree();
        let children = ModuleAssert::new(&root).child_modules().expect("children");
        assert_eq!(children.len(), 1);
        assert_eq!(children.addresses(), vec!["module.app"]);
        let err = children.module("module.other").unwrap_err();
        assert_eq!(err.to_string(), "Lookup failed: No child module module.other found in plan");
    }
}
