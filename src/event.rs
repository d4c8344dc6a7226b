//! Combat lifecycle events
//!
//! A small observer registry: subscribers get every event through one
//! `update` entry point and ignore what they don't care about. The
//! single-shot result handler is a separate, independently optional
//! interface for one-result-per-encounter consumers.

use std::cell::RefCell;
use std::rc::Rc;

use crate::combat::CombatSummary;

/// The three lifecycle events, each with a fixed payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    /// Combat began with these combatants
    CombatStart {
        /// Combatant names in roster order
        combatants: Vec<String>,
    },
    /// A new round began
    RoundStart {
        /// Round number, starting at 1
        round: u32,
    },
    /// Combat finished normally
    CombatEnd {
        /// Name of the winning combatant or team
        winner: String,
        /// Name of whoever won initiative
        initiative_winner: String,
    },
}

/// A multi-event subscriber
pub trait Observer {
    /// Receive one lifecycle event
    fn update(&mut self, event: &CombatEvent);
}

/// A single-shot end-of-combat consumer
pub trait ResultHandler {
    /// Called exactly once when combat ends normally
    fn handle_result(&mut self, summary: &CombatSummary);
}

/// Fan-out registry of observers.
///
/// Subscribers are shared handles so the caller can keep one and read its
/// collected state after the combat finishes.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<Rc<RefCell<dyn Observer>>>,
}

impl EventBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer
    pub fn subscribe(&mut self, observer: Rc<RefCell<dyn Observer>>) {
        self.observers.push(observer);
    }

    /// Deliver an event to every observer in subscription order
    pub fn publish(&self, event: &CombatEvent) {
        for observer in &self.observers {
            observer.borrow_mut().update(event);
        }
    }

    /// Number of registered observers
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether any observers are registered
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .finish()
    }
}
