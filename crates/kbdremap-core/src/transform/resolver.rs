// Kbdremap Dual-Role Resolver
// Tap-or-hold decision for dual-role keys, one event at a time
//
// A dual-role key's press is emitted as its hold key straight away. The
// decision is settled later by whichever comes first:
// - release of the same key: the press is replayed as a tap
// - autorepeat of the same key, or a press of any other mapped key:
//   the hold key simply stays down

use smallvec::SmallVec;

use crate::dual_role::DualRoleKey;
use crate::input::RawEvent;
use crate::Action;

/// Output events produced for one input event.
///
/// A synthesized tap is the longest sequence (three events).
pub type Emitted = SmallVec<[RawEvent; 4]>;

#[derive(Debug, Clone, Default)]
pub struct DualRoleResolver {
    armed: Option<DualRoleKey>,
}

impl DualRoleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The key that may still turn out to be a tap, if any
    pub fn armed(&self) -> Option<DualRoleKey> {
        self.armed
    }

    /// Drop any pending tap; the hold key already sent stays pressed.
    pub fn disarm(&mut self) -> Option<DualRoleKey> {
        self.armed.take()
    }

    /// Handle an event for a dual-role key, appending output to `out`.
    pub fn handle(&mut self, key: DualRoleKey, value: i32, out: &mut Emitted) {
        let armed_here = self.armed.map(|a| a.physical) == Some(key.physical);

        match (Action::from_value(value), armed_here) {
            (Some(Action::Press), false) => {
                if let Some(previous) = self.armed.replace(key) {
                    log::debug!("{} armed, {} committed as hold", key, previous);
                } else {
                    log::debug!("{} armed", key);
                }
                out.push(RawEvent::press(key.hold));
            }
            (Some(Action::Release), true) => {
                self.armed = None;
                log::debug!("{} tapped", key.physical);
                out.push(RawEvent::release(key.hold));
                out.push(RawEvent::press(key.tap));
                out.push(RawEvent::release(key.tap));
            }
            (Some(Action::Repeat), true) => {
                self.armed = None;
                log::debug!("{} held long enough to repeat, committed as hold", key.physical);
                out.push(RawEvent::repeat(key.hold));
            }
            _ => {
                // Hold already committed, a press while armed, or an
                // out-of-range value: forward as the hold key.
                self.armed = None;
                out.push(RawEvent::key(key.hold, value));
            }
        }
    }
}
