//! Runtime algorithm selection.
//!
//! Maps algorithm names to constructors so the transport can pick a
//! congestion controller from configuration. Lookups are case-insensitive.

use std::collections::HashMap;
use std::fmt;

use crate::config::CongestionControlConfig;

use super::congestion_control::{CongestionControlAlgorithm, CongestionOps};
use super::errors::CongestionControlError;
use super::libra::LibraController;
use super::new_reno::NewRenoController;

/// Constructor for a registered algorithm.
pub type CongestionOpsFactory =
    fn(&CongestionControlConfig) -> Result<Box<dyn CongestionOps>, CongestionControlError>;

/// Registry of congestion control algorithms, keyed by name.
#[derive(Clone, Default)]
pub struct CongestionRegistry {
    factories: HashMap<String, (&'static str, CongestionOpsFactory)>,
}

impl CongestionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every algorithm shipped in this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.factories.insert(
            normalize(CongestionControlAlgorithm::Libra.name()),
            (
                CongestionControlAlgorithm::Libra.name(),
                build_libra as CongestionOpsFactory,
            ),
        );
        registry.factories.insert(
            normalize(CongestionControlAlgorithm::NewReno.name()),
            (
                CongestionControlAlgorithm::NewReno.name(),
                build_new_reno as CongestionOpsFactory,
            ),
        );
        registry
    }

    /// Register a constructor under `name`.
    pub fn register(
        &mut self,
        name: &'static str,
        factory: CongestionOpsFactory,
    ) -> Result<(), CongestionControlError> {
        let key = normalize(name);
        if self.factories.contains_key(&key) {
            return Err(CongestionControlError::DuplicateAlgorithm(name.to_string()));
        }
        self.factories.insert(key, (name, factory));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Registered names as given at registration, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.values().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names
    }

    /// Construct the controller registered under `name`.
    ///
    /// Short aliases of the built-in algorithms (`libra`, `newreno`) resolve
    /// to their canonical entries.
    pub fn build(
        &self,
        name: &str,
        config: &CongestionControlConfig,
    ) -> Result<Box<dyn CongestionOps>, CongestionControlError> {
        let Some((canonical, factory)) = self.resolve(name) else {
            return Err(CongestionControlError::UnknownAlgorithm(name.to_string()));
        };
        let controller = factory(config)?;
        tracing::debug!(algorithm = canonical, "Built congestion controller");
        Ok(controller)
    }

    fn resolve(&self, name: &str) -> Option<(&'static str, CongestionOpsFactory)> {
        if let Some(entry) = self.factories.get(&normalize(name)) {
            return Some(*entry);
        }
        let alias = name.parse::<CongestionControlAlgorithm>().ok()?;
        self.factories.get(&normalize(alias.name())).copied()
    }
}

impl fmt::Debug for CongestionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CongestionRegistry")
            .field("algorithms", &self.names())
            .finish()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn build_libra(
    config: &CongestionControlConfig,
) -> Result<Box<dyn CongestionOps>, CongestionControlError> {
    Ok(Box::new(LibraController::new(config.libra)?))
}

fn build_new_reno(
    _config: &CongestionControlConfig,
) -> Result<Box<dyn CongestionOps>, CongestionControlError> {
    Ok(Box::new(NewRenoController::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::libra::LibraConfig;

    fn build_custom(
        _config: &CongestionControlConfig,
    ) -> Result<Box<dyn CongestionOps>, CongestionControlError> {
        Ok(Box::new(NewRenoController::new()))
    }

    #[test]
    fn test_builtin_names() {
        let registry = CongestionRegistry::with_builtin();
        assert_eq!(registry.names(), vec!["TcpLibra", "TcpNewReno"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = CongestionRegistry::new();
        assert!(registry.names().is_empty());
        assert!(matches!(
            registry.build("TcpLibra", &CongestionControlConfig::default()),
            Err(CongestionControlError::UnknownAlgorithm(_))
        ));
    }

    #[test_log::test]
    fn test_build_by_name() {
        let registry = CongestionRegistry::with_builtin();
        let config = CongestionControlConfig::default();

        for (name, expected) in [
            ("TcpLibra", "TcpLibra"),
            ("tcplibra", "TcpLibra"),
            ("libra", "TcpLibra"),
            ("TcpNewReno", "TcpNewReno"),
            ("NEWRENO", "TcpNewReno"),
        ] {
            let controller = registry.build(name, &config).unwrap();
            assert_eq!(controller.name(), expected, "lookup of {name:?}");
        }
    }

    #[test]
    fn test_unknown_algorithm() {
        let registry = CongestionRegistry::with_builtin();
        let err = registry
            .build("bbr", &CongestionControlConfig::default())
            .unwrap_err();
        assert!(matches!(err, CongestionControlError::UnknownAlgorithm(name) if name == "bbr"));
        assert!(!registry.contains("bbr"));
    }

    #[test]
    fn test_register_custom_and_duplicate() {
        let mut registry = CongestionRegistry::with_builtin();
        registry.register("Custom", build_custom).unwrap();

        assert!(registry.contains("custom"));
        assert_eq!(registry.names(), vec!["Custom", "TcpLibra", "TcpNewReno"]);
        assert!(matches!(
            registry.register("CUSTOM", build_custom),
            Err(CongestionControlError::DuplicateAlgorithm(_))
        ));
        assert!(matches!(
            registry.register("TcpLibra", build_custom),
            Err(CongestionControlError::DuplicateAlgorithm(_))
        ));
    }

    #[test]
    fn test_invalid_libra_config_is_reported() {
        let registry = CongestionRegistry::with_builtin();
        let config = CongestionControlConfig {
            libra: LibraConfig {
                bottleneck_capacity: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(matches!(
            registry.build("TcpLibra", &config),
            Err(CongestionControlError::InvalidConfig(_))
        ));
        // NewReno has no tunables to reject.
        assert!(registry.build("TcpNewReno", &config).is_ok());
    }
}
