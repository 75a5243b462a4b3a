//! Routing and construction options.

use splitinit_config::{ConfigError, RouterConfig};
use splitinit_core::{ComponentId, ComponentRegistry};

/// Switches for one routing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteOptions {
    /// Ancestors at and beyond this component are not routed to.
    pub stop_boundary: ComponentId,
    /// Claim values by parameter type hints.
    pub type_hint_routing: bool,
    /// Claim values by keys components declare they consume.
    pub declared_key_routing: bool,
    /// Copy unclaimed values into parents that accept extra named values.
    pub broadcast_leftovers: bool,
    /// Copy sibling values into parents missing a required name.
    pub backfill_missing: bool,
}

impl Default for RouteOptions {
    fn default() -> Self {
        RouteOptions {
            stop_boundary: ComponentId::ROOT,
            type_hint_routing: false,
            declared_key_routing: false,
            broadcast_leftovers: true,
            backfill_missing: true,
        }
    }
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stop_boundary(mut self, stop: ComponentId) -> Self {
        self.stop_boundary = stop;
        self
    }

    pub fn with_type_hint_routing(mut self, enabled: bool) -> Self {
        self.type_hint_routing = enabled;
        self
    }

    pub fn with_declared_key_routing(mut self, enabled: bool) -> Self {
        self.declared_key_routing = enabled;
        self
    }

    pub fn with_broadcast(mut self, enabled: bool) -> Self {
        self.broadcast_leftovers = enabled;
        self
    }

    pub fn with_backfill(mut self, enabled: bool) -> Self {
        self.backfill_missing = enabled;
        self
    }

    /// Builds options from configuration, resolving the stop boundary name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the stop boundary names no
    /// registered component.
    pub fn from_config(config: &RouterConfig, registry: &ComponentRegistry) -> Result<Self, ConfigError> {
        let stop_boundary = match &config.stop_boundary {
            Some(name) => registry.lookup(name).ok_or_else(|| {
                ConfigError::Invalid(format!("stop_boundary `{name}` is not a registered component"))
            })?,
            None => ComponentId::ROOT,
        };
        Ok(RouteOptions {
            stop_boundary,
            type_hint_routing: config.type_hint_routing,
            declared_key_routing: config.declared_key_routing,
            broadcast_leftovers: config.broadcast_leftovers,
            backfill_missing: config.backfill_missing,
        })
    }
}

/// Options for a full construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstructOptions {
    pub route: RouteOptions,
    /// Component left out of chain segmentation and invocation.
    pub skip: Option<ComponentId>,
    /// On a binding failure of a chain head, invoke the remaining chain
    /// members directly instead of failing. Best effort only: members then
    /// run without their chain's forwarded values.
    pub direct_fallback: bool,
}

impl ConstructOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, route: RouteOptions) -> Self {
        self.route = route;
        self
    }

    pub fn with_skip(mut self, skip: ComponentId) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn with_direct_fallback(mut self, enabled: bool) -> Self {
        self.direct_fallback = enabled;
        self
    }

    /// Builds options from configuration.
    ///
    /// # Errors
    ///
    /// See [`RouteOptions::from_config`].
    pub fn from_config(config: &RouterConfig, registry: &ComponentRegistry) -> Result<Self, ConfigError> {
        Ok(ConstructOptions {
            route: RouteOptions::from_config(config, registry)?,
            skip: None,
            direct_fallback: config.direct_fallback,
        })
    }
}
