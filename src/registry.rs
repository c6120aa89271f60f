//! # Registry Module
//!
//! Existence oracles consulted by convention resolution: does a module with
//! this name exist, and does a controller exist inside a module (or in the
//! root module when the module name is empty)?
//!
//! The router only asks; the application owns the answer. Oracles must be
//! side-effect free and safe to call from several threads. They are called
//! once per probe evaluated and their answers are never cached by the
//! router. An application whose lookup can fail maps the failure to `false`
//! before answering.
//!
//! Two implementations ship with the crate:
//!
//! - [`StaticRegistry`] - an in-memory declaration, usually loaded from the
//!   routing configuration file
//! - [`FnRegistry`] - adapts two closures

use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Module and controller existence checks
pub trait Registry: Send + Sync {
    /// Whether a module named `name` exists
    fn exists_module(&self, name: &str) -> bool;

    /// Whether controller `name` exists in `module` (`""` = root module)
    fn exists_controller(&self, module: &str, name: &str) -> bool;
}

impl<T: Registry + ?Sized> Registry for &T {
    fn exists_module(&self, name: &str) -> bool {
        (**self).exists_module(name)
    }

    fn exists_controller(&self, module: &str, name: &str) -> bool {
        (**self).exists_controller(module, name)
    }
}

impl<T: Registry + ?Sized> Registry for Arc<T> {
    fn exists_module(&self, name: &str) -> bool {
        (**self).exists_module(name)
    }

    fn exists_controller(&self, module: &str, name: &str) -> bool {
        (**self).exists_controller(module, name)
    }
}

impl<T: Registry + ?Sized> Registry for Box<T> {
    fn exists_module(&self, name: &str) -> bool {
        (**self).exists_module(name)
    }

    fn exists_controller(&self, module: &str, name: &str) -> bool {
        (**self).exists_controller(module, name)
    }
}

/// In-memory module/controller declaration.
///
/// Names compare ASCII case-insensitively, so `blog` in a URL finds the
/// `Blog` module.
///
/// ```yaml
/// registry:
///   controllers: [News, Page]
///   modules:
///     Blog: [Post, Tag]
///     Shop: [Cart]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticRegistry {
    /// Controllers of the root module
    #[serde(default)]
    controllers: Vec<String>,
    /// Module name to its controllers
    #[serde(default)]
    modules: BTreeMap<String, Vec<String>>,
}

impl StaticRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a controller of the root module
    #[must_use]
    pub fn with_controller(mut self, name: impl Into<String>) -> Self {
        self.controllers.push(name.into());
        self
    }

    /// Declare a module and its controllers
    #[must_use]
    pub fn with_module<I, S>(mut self, name: impl Into<String>, controllers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules
            .entry(name.into())
            .or_default()
            .extend(controllers.into_iter().map(Into::into));
        self
    }

    /// Number of declared modules
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Number of declared controllers across all modules, root included
    #[must_use]
    pub fn controller_count(&self) -> usize {
        self.controllers.len() + self.modules.values().map(Vec::len).sum::<usize>()
    }

    fn module_controllers(&self, module: &str) -> Option<&[String]> {
        if module.is_empty() {
            return Some(&self.controllers);
        }
        self.modules
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(module))
            .map(|(_, controllers)| controllers.as_slice())
    }
}

impl Registry for StaticRegistry {
    fn exists_module(&self, name: &str) -> bool {
        !name.is_empty()
            && self
                .modules
                .keys()
                .any(|module| module.eq_ignore_ascii_case(name))
    }

    fn exists_controller(&self, module: &str, name: &str) -> bool {
        self.module_controllers(module)
            .is_some_and(|controllers| controllers.iter().any(|c| c.eq_ignore_ascii_case(name)))
    }
}

/// Registry backed by two closures
pub struct FnRegistry<M, C> {
    module: M,
    controller: C,
}

impl<M, C> FnRegistry<M, C>
where
    M: Fn(&str) -> bool + Send + Sync,
    C: Fn(&str, &str) -> bool + Send + Sync,
{
    /// `module(name)` answers module checks, `controller(module, name)`
    /// answers controller checks
    pub fn new(module: M, controller: C) -> Self {
        Self { module, controller }
    }
}

impl<M, C> Registry for FnRegistry<M, C>
where
    M: Fn(&str) -> bool + Send + Sync,
    C: Fn(&str, &str) -> bool + Send + Sync,
{
    fn exists_module(&self, name: &str) -> bool {
        (self.module)(name)
    }

    fn exists_controller(&self, module: &str, name: &str) -> bool {
        (self.controller)(module, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> StaticRegistry {
        StaticRegistry::new()
            .with_controller("News")
            .with_module("Blog", ["Post", "Tag"])
            .with_module("Shop", ["Cart"])
    }

    #[test]
    fn test_static_registry_is_case_insensitive() {
        let reg = registry();
        assert!(reg.exists_module("blog"));
        assert!(reg.exists_module("BLOG"));
        assert!(!reg.exists_module("news"));
        assert!(!reg.exists_module(""));
        assert!(reg.exists_controller("blog", "post"));
        assert!(reg.exists_controller("", "news"));
        assert!(!reg.exists_controller("", "post"));
        assert!(!reg.exists_controller("shop", "post"));
        assert!(!reg.exists_controller("missing", "cart"));
    }

    #[test]
    fn test_static_registry_counts() {
        let reg = registry();
        assert_eq!(reg.module_count(), 2);
        assert_eq!(reg.controller_count(), 4);
    }

    #[test]
    fn test_static_registry_from_yaml() {
        let reg: StaticRegistry = serde_yaml::from_str(
            "controllers: [Page]\nmodules:\n  Admin: [Users]\n",
        )
        .unwrap();
        assert!(reg.exists_controller("", "page"));
        assert!(reg.exists_controller("admin", "users"));
    }

    #[test]
    fn test_fn_registry_and_wrappers() {
        let reg = FnRegistry::new(
            |m: &str| m == "blog",
            |m: &str, c: &str| m.is_empty() && c == "news",
        );
        assert!(reg.exists_module("blog"));
        assert!(reg.exists_controller("", "news"));

        let shared: Arc<dyn Registry> = Arc::new(reg);
        assert!(shared.exists_module("blog"));
        assert!(!shared.exists_controller("blog", "news"));
    }
}
