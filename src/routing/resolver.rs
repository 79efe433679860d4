use super::environment::EnvironmentObjects;
use super::route::Route;
use std::collections::HashMap;

/// Turns a route into renderable content
pub trait RouteResolver: Send + Sync {
    /// Whatever the rendering layer mounts (a view, a widget tree, a string...)
    type Content: Send + 'static;

    /// Resolve `route`, with the router's current environment objects available
    fn resolve(&self, route: &Route, environment: &EnvironmentObjects) -> Option<Self::Content>;
}

type Handler<C> = Box<dyn Fn(&Route, &EnvironmentObjects) -> Option<C> + Send + Sync>;

/// Resolver backed by per-path handlers with an optional catch-all
pub struct StandardRouteResolver<C> {
    routes: HashMap<String, Handler<C>>,
    fallback: Option<Handler<C>>,
}

impl<C: Send + 'static> StandardRouteResolver<C> {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            fallback: None,
        }
    }

    /// Register a handler for an exact path
    pub fn register<F>(&mut self, path: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&Route, &EnvironmentObjects) -> Option<C> + Send + Sync + 'static,
    {
        let path = path.into();
        if self.routes.insert(path.clone(), Box::new(handler)).is_some() {
            tracing::debug!("Replaced handler for route {}", path);
        }
        self
    }

    /// Register a handler consulted when no exact path matches
    pub fn register_fallback<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&Route, &EnvironmentObjects) -> Option<C> + Send + Sync + 'static,
    {
        self.fallback = Some(Box::new(handler));
        self
    }

    pub fn has_route(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    /// Registered paths, sorted
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.routes.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Drop every registered handler, including the fallback
    pub fn clear_routes(&mut self) {
        self.routes.clear();
        self.fallback = None;
    }
}

impl<C: Send + 'static> Default for StandardRouteResolver<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Send + 'static> RouteResolver for StandardRouteResolver<C> {
    type Content = C;

    fn resolve(&self, route: &Route, environment: &EnvironmentObjects) -> Option<C> {
        if let Some(handler) = self.routes.get(&route.path) {
            return handler(route, environment);
        }
        self.fallback
            .as_ref()
            .and_then(|handler| handler(route, environment))
    }
}
