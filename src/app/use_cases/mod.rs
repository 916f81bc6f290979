//! Use-Cases der Application-Layer-Orchestrierung.

pub mod camera;
pub mod composition;
pub mod drag;
pub mod insertion;
pub mod selection;
pub mod viewport;
