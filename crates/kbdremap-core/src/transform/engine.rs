// Kbdremap Event Router
// Classifies each physical event and drives the resolver and switcher
//
// Per event, in order:
// 1. abort gesture ends the session
// 2. non-key events and keys the active layout does not know pass through
// 3. suppressed keys are dropped
// 4. a press of the toggle key flips the layout, then the key is looked up
//    again under the new layout
// 5. plain keys are emitted remapped; their press settles a pending tap
//    decision as a hold
// 6. dual-role keys go to the resolver

use std::collections::BTreeSet;

use crate::dual_role::{DualRoleKey, DualRoleRegistry};
use crate::input::{is_abort, RawEvent};
use crate::layout::{LayoutMap, Target};
use crate::transform::resolver::{DualRoleResolver, Emitted};
use crate::transform::switcher::LayoutSwitcher;
use crate::{Action, Key};

/// Everything the router needs, resolved and validated at startup
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Layout active at startup
    pub primary: LayoutMap,
    /// Layout the toggle key switches to
    pub secondary: LayoutMap,
    /// Dual-role keys and the toggle key
    pub registry: DualRoleRegistry,
    /// Key whose press ends the session
    pub abort_key: Key,
}

impl RouterConfig {
    /// Every code the router can emit in place of a physical key
    pub fn output_keys(&self) -> BTreeSet<Key> {
        let mut keys: BTreeSet<Key> = self.primary.target_keys().collect();
        keys.extend(self.secondary.target_keys());
        keys.extend(self.registry.entries().into_iter().map(|(_, tap)| tap));
        keys
    }
}

/// Outcome of routing one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    /// The abort gesture was seen; nothing is emitted
    Abort,
    /// Write these events, in order (possibly none)
    Emit(Emitted),
}

impl Routed {
    fn single(event: RawEvent) -> Self {
        let mut out = Emitted::new();
        out.push(event);
        Routed::Emit(out)
    }

    fn nothing() -> Self {
        Routed::Emit(Emitted::new())
    }

    /// Events to write, empty for `Abort`
    pub fn events(&self) -> &[RawEvent] {
        match self {
            Routed::Abort => &[],
            Routed::Emit(events) => events.as_slice(),
        }
    }
}

/// Mutable runtime state, owned by the router for one session
#[derive(Debug, Clone)]
pub struct EngineState {
    switcher: LayoutSwitcher,
    resolver: DualRoleResolver,
    last_event: Option<RawEvent>,
}

impl EngineState {
    pub fn active_layout(&self) -> &LayoutMap {
        self.switcher.active()
    }

    pub fn is_primary_active(&self) -> bool {
        self.switcher.is_primary_active()
    }

    pub fn armed(&self) -> Option<DualRoleKey> {
        self.resolver.armed()
    }

    /// Most recent key event seen, for diagnostics
    pub fn last_event(&self) -> Option<RawEvent> {
        self.last_event
    }
}

pub struct EventRouter {
    registry: DualRoleRegistry,
    abort_key: Key,
    state: EngineState,
}

impl EventRouter {
    pub fn new(config: RouterConfig) -> Self {
        Self {
            registry: config.registry,
            abort_key: config.abort_key,
            state: EngineState {
                switcher: LayoutSwitcher::new(config.primary, config.secondary),
                resolver: DualRoleResolver::new(),
                last_event: None,
            },
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn abort_key(&self) -> Key {
        self.abort_key
    }

    /// Route one physical event.
    pub fn route(&mut self, event: RawEvent) -> Routed {
        if is_abort(&event, self.abort_key) {
            log::info!("abort key {} pressed", self.abort_key);
            return Routed::Abort;
        }

        let Some(key) = event.as_key() else {
            return Routed::single(event);
        };
        self.state.last_event = Some(event);

        let mut target = match self.state.switcher.active().get(key) {
            None => return Routed::single(event),
            Some(Target::Suppressed) => return Routed::nothing(),
            Some(Target::Key(target)) => target,
        };

        let pressed = event.action().is_some_and(Action::is_press);
        if pressed && self.registry.is_toggle(key) {
            let layout = self.state.switcher.toggle();
            log::info!("switched to layout '{}'", layout.name());
            target = match layout.get(key) {
                None => return Routed::single(event),
                Some(Target::Suppressed) => return Routed::nothing(),
                Some(Target::Key(target)) => target,
            };
        }

        let mut out = Emitted::new();
        match self.registry.tap_for(key) {
            None => {
                out.push(RawEvent::key(target, event.value));
                if pressed {
                    if let Some(committed) = self.state.resolver.disarm() {
                        log::debug!("{} interrupted by {}, committed as hold", committed, key);
                    }
                }
            }
            Some(tap) => {
                let dual = DualRoleKey {
                    physical: key,
                    hold: target,
                    tap,
                };
                self.state.resolver.handle(dual, event.value, &mut out);
            }
        }

        log::debug!("{} -> {:?}", event, out.as_slice());
        Routed::Emit(out)
    }
}
