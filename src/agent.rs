//! Agent roster: identities, default ports and service endpoints.

pub mod endpoints;
pub mod identity;
pub mod ports;
pub mod roster;

pub use endpoints::ServiceEndpoints;
pub use identity::{AgentName, KnownAgent};
pub use ports::{PortMapping, PortTable};
pub use roster::{Roster, RosterEntry};
