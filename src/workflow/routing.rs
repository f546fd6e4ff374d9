//! Which agents the gateway dispatches each workflow type to.

use crate::agent::KnownAgent;

/// Workflow types the gateway routes explicitly, with their agents in dispatch order.
pub const ROUTES: &[(&str, &[KnownAgent])] = &[
    (
        "meal_planning",
        &[KnownAgent::Milo, KnownAgent::Bucky, KnownAgent::Nani],
    ),
    ("fitness_scheduling", &[KnownAgent::Luna, KnownAgent::Nani]),
    ("shopping_optimization", &[KnownAgent::Bucky, KnownAgent::Nani]),
    ("health_analysis", &[KnownAgent::Luna, KnownAgent::Milo]),
    (
        "schedule_optimization",
        &[KnownAgent::Nani, KnownAgent::Luna, KnownAgent::Milo],
    ),
    ("nutrition_planning", &[KnownAgent::Milo, KnownAgent::Bucky]),
    ("workout_planning", &[KnownAgent::Luna, KnownAgent::Nani]),
    ("inventory_management", &[KnownAgent::Bucky, KnownAgent::Milo]),
];

/// Agents involved in `workflow_type`; unrouted types go to the scheduler.
pub fn agents_for(workflow_type: &str) -> Vec<KnownAgent> {
    ROUTES
        .iter()
        .find(|(name, _)| *name == workflow_type)
        .map(|(_, agents)| agents.to_vec())
        .unwrap_or_else(|| vec![KnownAgent::Nani])
}

pub fn known_workflow_types() -> impl Iterator<Item = &'static str> {
    ROUTES.iter().map(|(name, _)| *name)
}
