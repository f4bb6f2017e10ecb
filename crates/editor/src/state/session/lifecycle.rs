//! Starting over and loading saved works

use shared::Work;

use super::EditSession;
use crate::error::Result;
use crate::state::world::WorldState;

/// Why the session wants to throw away a non-empty world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmReason {
    /// Starting a new work
    DiscardForNew,
    /// Loading a saved work over the current one
    DiscardForLoad,
}

impl ConfirmReason {
    pub fn message(&self) -> &'static str {
        match self {
            ConfirmReason::DiscardForNew => "Starting a new work clears the current blocks. Continue?",
            ConfirmReason::DiscardForLoad => "Loading this work replaces the current blocks. Continue?",
        }
    }
}

impl EditSession {
    /// Ask `confirm` only when there is something to lose
    fn confirm_discard(
        &self,
        reason: ConfirmReason,
        confirm: impl FnOnce(ConfirmReason) -> bool,
    ) -> bool {
        self.world.is_empty() || confirm(reason)
    }

    /// Empty world, fresh history, no bound work.
    ///
    /// Returns false when the user declined.
    pub fn new_session(&mut self, confirm: impl FnOnce(ConfirmReason) -> bool) -> bool {
        if !self.confirm_discard(ConfirmReason::DiscardForNew, confirm) {
            return false;
        }
        self.restart(WorldState::empty());
        self.current_work = None;
        tracing::info!("Started new work");
        true
    }

    /// Replace the world with `work` and bind it.
    ///
    /// History restarts at the loaded state. Returns `Ok(false)` when the
    /// user declined. A work with repeated block ids is rejected before the
    /// user is asked anything.
    pub fn load_work(
        &mut self,
        work: Work,
        confirm: impl FnOnce(ConfirmReason) -> bool,
    ) -> Result<bool> {
        let world = WorldState::try_from_blocks(work.blocks.clone())?;
        if !self.confirm_discard(ConfirmReason::DiscardForLoad, confirm) {
            return Ok(false);
        }
        tracing::info!("Loaded work {} ({} blocks)", work.id, work.blocks.len());
        self.restart(world);
        self.current_work = Some(work);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn saved_work() -> Work {
        let mut scratch = EditSession::default();
        scratch.add_block([0.0, 0.5, 0.0]);
        scratch.add_block([0.0, 1.5, 0.0]);
        let now = Utc::now();
        Work {
            id: "w1".into(),
            owner_id: "alice".into(),
            title: "Tower".into(),
            blocks: scratch.world().to_vec(),
            is_public: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_session_on_empty_world_skips_confirm() {
        let mut s = EditSession::default();
        let mut asked = false;
        assert!(s.new_session(|_| {
            asked = true;
            false
        }));
        assert!(!asked);
    }

    #[test]
    fn test_new_session_declined_keeps_everything() {
        let mut s = EditSession::default();
        s.add_block([0.0, 0.5, 0.0]);
        let mut reason = None;
        assert!(!s.new_session(|r| {
            reason = Some(r);
            false
        }));
        assert_eq!(reason, Some(ConfirmReason::DiscardForNew));
        assert_eq!(s.block_count(), 1);
        assert_eq!(s.history().len(), 2);
    }

    #[test]
    fn test_new_session_resets_and_unbinds() {
        let mut s = EditSession::default();
        s.load_work(saved_work(), |_| true).unwrap();
        s.add_block([3.0, 0.5, 0.0]);
        assert!(s.new_session(|_| true));
        assert_eq!(s.block_count(), 0);
        assert_eq!(s.history().len(), 1);
        assert!(s.current_work().is_none());
        assert!(!s.has_unsaved_changes());
    }

    #[test]
    fn test_load_work_starts_fresh_history() {
        let mut s = EditSession::default();
        s.add_block([5.0, 0.5, 5.0]);
        let mut reason = None;
        assert!(s
            .load_work(saved_work(), |r| {
                reason = Some(r);
                true
            })
            .unwrap());
        assert_eq!(reason, Some(ConfirmReason::DiscardForLoad));
        assert_eq!(s.block_count(), 2);
        assert_eq!(s.history().len(), 1);
        assert!(!s.can_undo());
        assert_eq!(s.current_work().map(|w| w.id.as_str()), Some("w1"));
    }

    #[test]
    fn test_load_work_declined() {
        let mut s = EditSession::default();
        s.add_block([5.0, 0.5, 5.0]);
        assert!(!s.load_work(saved_work(), |_| false).unwrap());
        assert!(s.current_work().is_none());
        assert_eq!(s.block_count(), 1);
    }

    #[test]
    fn test_load_work_with_repeated_ids_is_rejected() {
        let mut work = saved_work();
        let mut twin = work.blocks[0].clone();
        twin.position = [1.0, 0.5, 0.0];
        work.blocks.push(twin);

        let mut s = EditSession::default();
        s.add_block([5.0, 0.5, 5.0]);
        let mut asked = false;
        let err = s
            .load_work(work, |_| {
                asked = true;
                true
            })
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::Validation(_)));
        assert!(!asked);
        assert!(s.current_work().is_none());
        assert_eq!(s.block_count(), 1);
        assert_eq!(s.history().len(), 2);
    }

    #[test]
    fn test_confirm_messages_name_the_action() {
        assert!(ConfirmReason::DiscardForNew.message().contains("new work"));
        assert!(ConfirmReason::DiscardForLoad.message().contains("Loading"));
    }
}
