use super::environment::EnvironmentObjects;
use crate::errors::Result;
use serde::Serialize;
use std::any::Any;

/// Symbolic description of a screen to display
#[derive(Debug, Clone)]
pub struct Route {
    /// Route path, also used as the screen's type tag
    pub path: String,
    /// Optional typed parameters, stored as JSON
    pub parameters: Option<serde_json::Value>,
    /// Dependencies to merge into the router's environment when navigating
    pub environment: EnvironmentObjects,
}

impl Route {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            parameters: None,
            environment: EnvironmentObjects::new(),
        }
    }

    /// Attach serializable parameters to the route
    pub fn with_parameters<T: Serialize>(mut self, parameters: &T) -> Result<Self> {
        self.parameters = Some(serde_json::to_value(parameters)?);
        Ok(self)
    }

    /// Attach a dependency that will be registered when the route is used
    pub fn with_environment_object<T: Any + Send + Sync>(mut self, object: T) -> Self {
        self.environment.insert(object);
        self
    }

    pub fn environment_objects(&self) -> &EnvironmentObjects {
        &self.environment
    }
}

impl From<&str> for Route {
    fn from(path: &str) -> Self {
        Route::new(path)
    }
}

impl From<String> for Route {
    fn from(path: String) -> Self {
        Route::new(path)
    }
}

/// Application-defined route table entry, usually an enum
pub trait RouteConfig {
    fn path(&self) -> String;

    /// Build a plain route for this entry
    fn route(&self) -> Route {
        Route::new(self.path())
    }

    /// Start a builder for attaching environment objects
    fn builder(&self) -> RouteBuilder {
        RouteBuilder::new(self.path())
    }
}

/// Accumulates environment objects and parameters before producing a [`Route`]
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    path: String,
    parameters: Option<serde_json::Value>,
    environment: EnvironmentObjects,
}

impl RouteBuilder {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            parameters: None,
            environment: EnvironmentObjects::new(),
        }
    }

    pub fn from_config(config: &impl RouteConfig) -> Self {
        Self::new(config.path())
    }

    pub fn environment_object<T: Any + Send + Sync>(mut self, object: T) -> Self {
        self.environment.insert(object);
        self
    }

    pub fn parameters<T: Serialize>(mut self, parameters: &T) -> Result<Self> {
        self.parameters = Some(serde_json::to_value(parameters)?);
        Ok(self)
    }

    pub fn build(self) -> Route {
        Route {
            path: self.path,
            parameters: self.parameters,
            environment: self.environment,
        }
    }
}
