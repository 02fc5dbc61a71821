//! Tool Registry: stores and looks up ToolSpec definitions.

use dm_core::tool::ToolSpec;
use std::collections::HashMap;

/// In-memory tool registry. Listing preserves registration order.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolSpec>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of tools.
    pub fn with_tools(tools: impl IntoIterator<Item = ToolSpec>) -> Self {
        let mut registry = Self::new();
        for tool in tools {
            registry.register(tool);
        }
        registry
    }

    /// Register a tool. Overwrites in place if the same name already exists.
    pub fn register(&mut self, tool: ToolSpec) {
        match self.index.get(&tool.name) {
            Some(&i) => self.tools[i] = tool,
            None => {
                self.index.insert(tool.name.clone(), self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// List all registered tools.
    pub fn list(&self) -> &[ToolSpec] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dm_core::tool::docker_tools;

    #[test]
    fn keeps_registration_order() {
        let registry = ToolRegistry::with_tools(docker_tools());
        let names: Vec<_> = registry.list().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "docker_version",
                "list_containers",
                "list_images",
                "build_image",
                "run_container",
                "stop_container",
                "remove_container",
                "remove_image",
            ]
        );
    }

    #[test]
    fn register_overwrites_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(ToolSpec::new("a", "first"));
        registry.register(ToolSpec::new("b", "second"));
        registry.register(ToolSpec::new("a", "replaced"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("a").unwrap().description, "replaced");
        assert_eq!(registry.list()[0].name, "a");
        assert!(!registry.contains("c"));
    }
}
