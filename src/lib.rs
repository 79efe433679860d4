pub mod cli;
pub mod config;
pub mod errors;
pub mod router;
pub mod routing;
pub mod script;
pub mod stack;

pub use errors::{NavError, Result};
pub use router::{PresentationHost, Router, RouterEvent};
pub use routing::{EnvironmentObjects, Route, RouteConfig, RouteResolver};
pub use stack::{PresentationStyle, StackId};
