//! Router setup from configuration.

use splitinit_config::RouterConfig;
use splitinit_core::{ComponentRegistry, SplitInitError};
use splitinit_router::{ConstructOptions, Router};
use tracing::info;

/// Builds a router over `registry` and the construction options `config`
/// describes.
///
/// With the `console` feature, also installs the console logger for the
/// configured level and categories.
///
/// # Errors
///
/// Fails if the configured stop boundary names no registered component.
pub fn configure(
    registry: ComponentRegistry,
    config: &RouterConfig,
) -> Result<(Router, ConstructOptions), SplitInitError> {
    #[cfg(feature = "console")]
    splitinit_console::init_with_config(config);

    let options = ConstructOptions::from_config(config, &registry)
        .map_err(|e| SplitInitError::Config(e.to_string()))?;

    info!(
        event = "router_configured",
        category = "config",
        components = registry.len(),
        stop_boundary = config.stop_boundary.as_deref().unwrap_or("root"),
        direct_fallback = options.direct_fallback,
    );
    Ok((Router::new(registry), options))
}
