// filepath: src/routine/registry.rs
//! Routine registry
//!
//! Maps routine ids to constructors. Routines are built fresh for every run
//! and initialized with their table from the configuration, if any.

use std::collections::HashMap;

use log::{debug, info};

use crate::error::DrawError;
use crate::routine::{Routine, RoutineCreateFn};

pub struct RoutineRegistry {
    constructors: Vec<(String, RoutineCreateFn)>,
}

impl RoutineRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            constructors: Vec::new(),
        }
    }

    /// Registry holding the built-in routines
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("polygon", crate::routines::PolygonRoutine::create);
        registry.register("diagonal", crate::routines::DiagonalRoutine::create);
        registry
    }

    /// Register a constructor, replacing any previous one with the same id
    pub fn register(&mut self, id: &str, create: RoutineCreateFn) {
        info!("Registering routine: {}", id);
        match self.constructors.iter_mut().find(|(known, _)| known == id) {
            Some(entry) => entry.1 = create,
            None => self.constructors.push((id.to_string(), create)),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.constructors.iter().any(|(known, _)| known == id)
    }

    /// Registered ids in registration order
    pub fn ids(&self) -> Vec<&str> {
        self.constructors.iter().map(|(id, _)| id.as_str()).collect()
    }

    /// Build and initialize the routine registered under `id`
    pub fn create(
        &self,
        id: &str,
        configs: &HashMap<String, toml::Table>,
    ) -> Result<Box<dyn Routine>, Box<dyn std::error::Error>> {
        let (_, create) = self
            .constructors
            .iter()
            .find(|(known, _)| known == id)
            .ok_or_else(|| DrawError::UnknownRoutine(id.to_string()))?;

        let mut routine = create();
        if let Some(cfg) = configs.get(id) {
            debug!("Initializing routine {} with {} config keys", id, cfg.len());
            routine.init(cfg)?;
        }
        Ok(routine)
    }
}

impl Default for RoutineRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
