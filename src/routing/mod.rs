//! Routes and how they turn into content

pub mod environment;
pub mod resolver;
pub mod route;

pub use environment::EnvironmentObjects;
pub use resolver::{RouteResolver, StandardRouteResolver};
pub use route::{Route, RouteBuilder, RouteConfig};
