//! The router: routing and construction over one registry.

use std::any::Any;
use std::sync::Arc;

use splitinit_core::{
    invoke_detached, CallArgs, ComponentId, ComponentRegistry, ConstructError, HasLeftovers,
};
use tracing::{debug, info, warn};

use crate::chain::{segment, Chain, Segmentation};
use crate::graph::CompositionGraph;
use crate::inspect::SignatureCache;
use crate::invoke::invoke_chains;
use crate::options::{ConstructOptions, RouteOptions};
use crate::split::{backfill, broadcast, heuristic, primary, Pool, Routing, RoutingDiagnostic};

/// Report of a completed construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Construction {
    pub routing: Routing,
    pub chains: Vec<Chain>,
    /// Components whose constructors ran, in order.
    pub invoked: Vec<ComponentId>,
}

impl Construction {
    pub fn leftovers(&self) -> &CallArgs {
        &self.routing.leftovers
    }

    pub fn diagnostics(&self) -> &[RoutingDiagnostic] {
        &self.routing.diagnostics
    }

    /// Number of times `id` was invoked.
    pub fn invocations(&self, id: ComponentId) -> usize {
        self.invoked.iter().filter(|&&c| c == id).count()
    }
}

/// Routes construction arguments across the composition graphs of one
/// registry.
///
/// Cheap to clone; clones share the registry and the signature cache.
#[derive(Debug, Clone)]
pub struct Router {
    registry: Arc<ComponentRegistry>,
    cache: Arc<SignatureCache>,
}

impl Router {
    /// Creates a router with a fresh signature cache.
    pub fn new(registry: impl Into<Arc<ComponentRegistry>>) -> Self {
        Self::with_cache(registry, Arc::new(SignatureCache::new()))
    }

    /// Creates a router sharing an existing cache.
    ///
    /// The cache must only ever have been used with this registry.
    pub fn with_cache(registry: impl Into<Arc<ComponentRegistry>>, cache: Arc<SignatureCache>) -> Self {
        Router {
            registry: registry.into(),
            cache,
        }
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &Arc<SignatureCache> {
        &self.cache
    }

    /// Splits `args` across the direct parents of `target`.
    ///
    /// Never fails: routing issues are logged and recorded as diagnostics.
    pub fn route(&self, target: ComponentId, args: CallArgs, options: &RouteOptions) -> Routing {
        let registry = self.registry.as_ref();
        let cache = self.cache.as_ref();
        let mut routing = Routing::new(target);

        if !registry.contains(target) {
            warn!(event = "unknown_target", category = "route", component = %target);
            routing
                .diagnostics
                .push(RoutingDiagnostic::UnknownTarget { component: target });
            routing.leftovers = args;
            return routing;
        }

        debug!(
            event = "route_start",
            category = "route",
            component = registry.name(target),
            positional = args.positional.len(),
            named = args.named.len(),
        );

        let graph = CompositionGraph::build(registry, target, options.stop_boundary);
        let mut pool = Pool::new(args);

        primary::split(registry, cache, &graph, &mut pool, &mut routing);
        if options.type_hint_routing {
            heuristic::route_by_type_hint(registry, cache, &graph, &mut pool, &mut routing);
        }
        if options.declared_key_routing {
            heuristic::route_by_declared_keys(registry, cache, &graph, &mut pool, &mut routing);
        }
        if options.broadcast_leftovers {
            broadcast::broadcast(registry, cache, &graph, &pool, &mut routing);
        }
        routing.leftovers = pool.into_leftovers();
        if options.backfill_missing {
            backfill::backfill(registry, cache, &graph, &mut routing);
        }

        debug!(
            event = "route_end",
            category = "route",
            component = registry.name(target),
            claims = routing.claims.len(),
            copies = routing.copies.len(),
            leftover_positional = routing.leftovers.positional.len(),
            leftover_named = routing.leftovers.named.len(),
        );
        routing
    }

    /// Cooperative chains of `target`, cut at `stop`, without `skip`.
    pub fn chains(&self, target: ComponentId, stop: ComponentId, skip: Option<ComponentId>) -> Segmentation {
        if !self.registry.contains(target) {
            return Segmentation::default();
        }
        segment(&self.registry, target, stop, skip)
    }

    /// Routes `args` and runs the constructors of `target`'s ancestors
    /// on `instance`.
    ///
    /// Chain heads run in chain order. If `target` has a constructor of its
    /// own, it runs last with the leftover bucket.
    ///
    /// # Errors
    ///
    /// Returns the first constructor or binding failure unchanged.
    pub fn construct(
        &self,
        target: ComponentId,
        instance: &mut dyn Any,
        args: CallArgs,
        options: &ConstructOptions,
    ) -> Result<Construction, ConstructError> {
        let registry = self.registry.as_ref();
        let mut routing = self.route(target, args, &options.route);
        let segmentation = self.chains(target, options.route.stop_boundary, options.skip);
        routing.diagnostics.extend(segmentation.diagnostics);

        let mut invoked = Vec::new();
        invoke_chains(
            registry,
            &routing,
            &segmentation.chains,
            instance,
            options.direct_fallback,
            &mut invoked,
        )?;

        let own_constructor = registry
            .get(target)
            .is_some_and(|d| d.constructor.is_some() && !target.is_root());
        if own_constructor {
            invoke_detached(registry, target, instance, routing.leftovers.clone(), &mut invoked)?;
        }

        info!(
            event = "constructed",
            category = "construct",
            component = registry.get(target).map_or("<unknown>", |d| d.name.as_ref()),
            invoked = invoked.len(),
            diagnostics = routing.diagnostics.len(),
        );
        Ok(Construction {
            routing,
            chains: segmentation.chains,
            invoked,
        })
    }

    /// Like [`construct`](Self::construct), then hands the leftover bucket
    /// to the instance.
    ///
    /// # Errors
    ///
    /// See [`construct`](Self::construct).
    pub fn construct_into<T>(
        &self,
        target: ComponentId,
        instance: &mut T,
        args: CallArgs,
        options: &ConstructOptions,
    ) -> Result<Construction, ConstructError>
    where
        T: HasLeftovers + Any,
    {
        let construction = self.construct(target, instance, args, options)?;
        instance.set_leftovers(construction.routing.leftovers.clone());
        Ok(construction)
    }
}
