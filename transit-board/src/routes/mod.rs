//! Line routes from the static route list.

mod catalog;

pub use catalog::{LineRoutes, NamedLineRoutes, NamedRoute, Route, RouteCatalog, RouteError};
