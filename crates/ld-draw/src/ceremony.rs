//! Ceremony Scene Controller
//!
//! Drives the top-level scene from operator advances and owns everything
//! that runs on a timer: the curtain, the draw timers (through the
//! `DrawStateManager`) and, when auto-presentation is on, the timeline that
//! stands in for the presentation's suspense animation.
//!
//! ```text
//! curtain-closed ─► curtain-opening ─(3.5s)─► ready ─► suspense ─► reveal
//!       ▲                                                 ▲          │
//!       │                                                 └──────────┤
//!       └──────────── thank-you ◄──── winners-wall                   │
//!                         ▲                                          │
//!                         └──────────── all prizes drawn ────────────┘
//! ```

use ld_core::{LdError, LdResult, SettingsPatch, Winner, clipboard_text, export_csv};
use ld_stage::{
    AdvanceDebouncer, AdvanceInput, CeremonyEvent, CeremonyTiming, DrawStatus, EventJournal,
    PhaseScript, PhaseTimeline, Scene, StampedEvent, SuspenseStyle, TimelineCue, TimelineState,
    TimerQueue,
};
use ld_state::SettingsStore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::manager::DrawStateManager;
use crate::picker::NonRepeatingPicker;

/// Timers owned by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTimer {
    /// Curtain animation finished
    CurtainOpened,
}

/// Result of `CeremonyController::reset_all`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// Winners exist and the operator has not confirmed; nothing changed
    NeedsConfirmation,
    Reset,
}

/// Who signals the end of the suspense presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoPresent {
    /// The host calls `presentation_complete`
    #[default]
    Off,
    /// Built-in timeline for the chosen suspense style (stage view)
    Suspense,
    /// Built-in timeline for the chosen draw phase (radar, flight, ...)
    Phase,
}

/// Scene state machine wrapped around the draw state
pub struct CeremonyController {
    draw: DrawStateManager,
    store: SettingsStore,
    timing: CeremonyTiming,
    scene: Scene,
    timers: TimerQueue<SceneTimer>,
    debounce: AdvanceDebouncer,
    auto_present: AutoPresent,
    timeline: Option<PhaseTimeline>,
    styles: NonRepeatingPicker<SuspenseStyle>,
    suspense_style: Option<SuspenseStyle>,
    rng: ChaCha8Rng,
    journal: EventJournal,
    /// `draws_started` value of the last draw handed to the presentation
    presented_draw: u64,
    paused: bool,
}

impl CeremonyController {
    pub fn new(store: SettingsStore, timing: CeremonyTiming) -> Self {
        let draw = DrawStateManager::new(store.settings().clone(), timing.clone());
        Self {
            draw,
            store,
            debounce: AdvanceDebouncer::new(timing.advance_debounce_ms),
            timing,
            scene: Scene::default(),
            timers: TimerQueue::new(),
            auto_present: AutoPresent::Off,
            timeline: None,
            styles: NonRepeatingPicker::new(SuspenseStyle::ALL),
            suspense_style: None,
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
            journal: EventJournal::new(),
            presented_draw: 0,
            paused: false,
        }
    }

    pub fn with_auto_present(mut self, mode: AutoPresent) -> Self {
        self.auto_present = mode;
        self
    }

    /// Seed every random choice (tickets, phases, suspense styles)
    pub fn seed(&mut self, seed: u64) {
        self.draw.seed(seed);
        self.rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ADVANCE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Map a raw key/click/touch onto `advance`
    pub fn advance_input(&mut self, input: &AdvanceInput, now_ms: u64) -> bool {
        if !input.triggers_advance() {
            return false;
        }
        self.advance(now_ms)
    }

    /// Move the ceremony one step forward.
    ///
    /// Returns whether the scene changed. Advances inside the debounce
    /// window, while paused, or in a scene that ignores them return false.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        if self.paused || !self.debounce.accept(now_ms) {
            return false;
        }

        match self.scene {
            Scene::CurtainClosed => {
                self.change_scene(now_ms, Scene::CurtainOpening);
                self.timers
                    .schedule(now_ms, self.timing.curtain_open_ms, SceneTimer::CurtainOpened);
                true
            }
            Scene::CurtainOpening | Scene::Suspense => false,
            Scene::Ready => {
                if self.draw.is_complete() {
                    self.notice(now_ms, &LdError::AllPrizesDrawn(self.prize_count()));
                    return false;
                }
                self.next_draw(now_ms);
                true
            }
            Scene::Reveal => {
                if self.draw.is_complete() {
                    self.change_scene(now_ms, Scene::ThankYou);
                } else {
                    self.next_draw(now_ms);
                }
                true
            }
            Scene::WinnersWall => {
                self.change_scene(now_ms, Scene::ThankYou);
                true
            }
            Scene::ThankYou => {
                self.change_scene(now_ms, Scene::CurtainClosed);
                true
            }
        }
    }

    fn next_draw(&mut self, now_ms: u64) {
        self.change_scene(now_ms, Scene::Suspense);
        self.draw.draw_next(now_ms);
    }

    /// The presentation finished its suspense animation.
    ///
    /// Commits the candidate and shows the reveal. Only valid in `suspense`
    /// with a drawing candidate; anything else is a stale signal and changes
    /// nothing.
    pub fn presentation_complete(&mut self, now_ms: u64) -> LdResult<Winner> {
        if self.scene != Scene::Suspense || self.draw.status() != DrawStatus::Drawing {
            return Err(LdError::NoActiveDraw);
        }
        let winner = self.draw.complete_draw(now_ms)?;
        self.change_scene(now_ms, Scene::Reveal);
        Ok(winner)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // OPERATOR CONTROLS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Jump straight to `scene`. `reveal` needs at least one winner.
    pub fn set_scene(&mut self, scene: Scene, now_ms: u64) -> LdResult<()> {
        if scene == Scene::Reveal && self.draw.winners().is_empty() {
            return Err(LdError::NeedsWinners(scene.type_name()));
        }
        self.change_scene(now_ms, scene);
        Ok(())
    }

    /// "Start draw" button: show suspense and select a candidate right away
    pub fn start_draw_now(&mut self, now_ms: u64) -> LdResult<()> {
        if self.paused {
            return Err(LdError::DrawInProgress(DrawStatus::Paused.type_name()));
        }
        if self.draw.is_complete() {
            let done = LdError::AllPrizesDrawn(self.prize_count());
            self.notice(now_ms, &done);
            return Err(done);
        }
        match self.draw.status() {
            // Drops a pending start from `advance` along with the old candidate
            DrawStatus::WinnerDisplay | DrawStatus::Idle => self.draw.clear_draw(now_ms),
            _ => {}
        }

        self.draw.start_draw(now_ms)?;
        self.change_scene(now_ms, Scene::Suspense);
        self.sync_presentation(now_ms);
        Ok(())
    }

    /// Validate, persist and apply a settings change.
    ///
    /// Winners already drawn are kept; the new settings govern later draws.
    /// A change the draw state refuses (prize order or count mid-session)
    /// is not persisted.
    pub fn apply_settings(&mut self, patch: &SettingsPatch, now_ms: u64) -> LdResult<()> {
        let next = self.store.settings().merged(patch);
        next.validate()?;
        self.draw.check_settings(&next)?;

        let settings = self.store.update(patch)?.clone();
        self.draw.apply_settings(settings)?;
        self.record(now_ms, CeremonyEvent::SettingsApplied);
        Ok(())
    }

    /// Clear all winners and return to the closed curtain.
    ///
    /// With winners on the board this needs `confirmed`; without it nothing
    /// changes. Resetting twice leaves the same state as resetting once.
    pub fn reset_all(&mut self, confirmed: bool, now_ms: u64) -> ResetOutcome {
        if !self.draw.winners().is_empty() && !confirmed {
            return ResetOutcome::NeedsConfirmation;
        }

        self.draw.reset(now_ms);
        self.timers.cancel_all();
        self.cancel_timeline();
        self.debounce.reset();
        self.styles.reset();
        self.suspense_style = None;
        self.paused = false;
        self.presented_draw = self.draw.draws_started();
        self.change_scene(now_ms, Scene::CurtainClosed);
        log::info!("Ceremony reset");
        ResetOutcome::Reset
    }

    /// Freeze every timer: curtain, draw and timeline
    pub fn pause(&mut self, now_ms: u64) -> bool {
        if self.paused {
            return false;
        }
        self.paused = true;
        self.timers.pause(now_ms);
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.pause(now_ms);
        }
        if !self.draw.pause(now_ms) {
            self.record(now_ms, CeremonyEvent::Paused);
        }
        true
    }

    pub fn resume(&mut self, now_ms: u64) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        self.timers.resume(now_ms);
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.resume(now_ms);
        }
        if !self.draw.resume(now_ms) {
            self.record(now_ms, CeremonyEvent::Resumed);
        }
        true
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // TIME
    // ═══════════════════════════════════════════════════════════════════════════

    /// Fire everything due at `now_ms`
    pub fn tick(&mut self, now_ms: u64) {
        while let Some(timer) = self.timers.pop_due(now_ms) {
            match timer {
                SceneTimer::CurtainOpened if self.scene == Scene::CurtainOpening => {
                    self.change_scene(now_ms, Scene::Ready);
                }
                SceneTimer::CurtainOpened => {
                    log::debug!("[ceremony] stale curtain timer in {}", self.scene.type_name());
                }
            }
        }

        self.draw.tick(now_ms);
        self.sync_presentation(now_ms);

        let cues = match self.timeline.as_mut() {
            Some(timeline) => timeline.tick(now_ms),
            None => return,
        };
        for cue in cues {
            match cue {
                TimelineCue::Step(step) => {
                    self.record(now_ms, CeremonyEvent::PhaseStep { step });
                }
                TimelineCue::Hold => log::debug!("[ceremony] holding on reveal"),
                TimelineCue::Complete => {
                    self.timeline = None;
                    if let Err(e) = self.presentation_complete(now_ms) {
                        log::debug!("[ceremony] timeline completion ignored: {}", e);
                    }
                }
            }
        }
    }

    /// Hand a freshly started draw to the built-in presenter
    fn sync_presentation(&mut self, now_ms: u64) {
        let started = self.draw.draws_started();
        if started == self.presented_draw {
            return;
        }
        self.presented_draw = started;

        if self.scene != Scene::Suspense {
            return;
        }
        let Some(candidate) = self.draw.candidate() else {
            return;
        };

        let script = match self.auto_present {
            AutoPresent::Off => return,
            AutoPresent::Phase => PhaseScript::for_phase(candidate.phase, &self.timing),
            AutoPresent::Suspense => {
                let style = self.suspense_style.unwrap_or(SuspenseStyle::Lines);
                PhaseScript::for_suspense(style, &self.timing)
            }
        };

        self.cancel_timeline();
        let mut timeline = PhaseTimeline::new(script);
        timeline.start(now_ms);
        if let TimelineState::Running(step) = timeline.state() {
            self.record(now_ms, CeremonyEvent::PhaseStep { step });
        }
        self.timeline = Some(timeline);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNALS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Switch scene, dropping whatever the old scene had scheduled
    fn change_scene(&mut self, now_ms: u64, to: Scene) {
        let from = self.scene;
        self.timers.cancel_all();
        self.cancel_timeline();

        if from == to {
            return;
        }
        if to == Scene::Suspense {
            let style = self
                .styles
                .pick(&mut self.rng)
                .unwrap_or(SuspenseStyle::Lines);
            self.suspense_style = Some(style);
            self.record(now_ms, CeremonyEvent::SuspenseStyleChosen { style });
        }
        self.scene = to;
        log::info!("Scene: {} → {}", from.display_name(), to.display_name());
        self.record(now_ms, CeremonyEvent::SceneChanged { from, to });
    }

    /// Append after anything the draw manager has recorded so far
    fn record(&mut self, now_ms: u64, event: CeremonyEvent) {
        self.journal.absorb(self.draw.journal_mut());
        self.journal.push(now_ms, event);
    }

    fn cancel_timeline(&mut self) {
        if let Some(mut timeline) = self.timeline.take() {
            timeline.cancel();
        }
    }

    fn notice(&mut self, now_ms: u64, error: &LdError) {
        log::warn!("Ceremony notice: {}", error);
        self.record(now_ms, CeremonyEvent::notice(error.to_string()));
    }

    fn prize_count(&self) -> u32 {
        self.draw.settings().number_of_prizes
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn draw(&self) -> &DrawStateManager {
        &self.draw
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn timing(&self) -> &CeremonyTiming {
        &self.timing
    }

    pub fn winners(&self) -> &[Winner] {
        self.draw.winners()
    }

    pub fn suspense_style(&self) -> Option<SuspenseStyle> {
        self.suspense_style
    }

    pub fn auto_present(&self) -> AutoPresent {
        self.auto_present
    }

    pub fn timeline(&self) -> Option<&PhaseTimeline> {
        self.timeline.as_ref()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Earliest pending scene deadline (draw and timeline excluded)
    pub fn next_scene_deadline(&self) -> Option<u64> {
        self.timers.next_due()
    }

    /// Events since the last drain, draw events included
    pub fn drain_events(&mut self) -> Vec<StampedEvent> {
        self.journal.absorb(self.draw.journal_mut());
        self.journal.drain()
    }

    pub fn export_csv(&self) -> LdResult<String> {
        export_csv(self.draw.winners())
    }

    pub fn clipboard_text(&self) -> LdResult<String> {
        clipboard_text(self.draw.winners())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ld_core::PrizeOrder;

    fn controller(start: u32, end: u32, prizes: u32) -> CeremonyController {
        let mut store = SettingsStore::in_memory();
        store
            .update(&SettingsPatch::draw_range(start, end, prizes, PrizeOrder::Ascending))
            .unwrap();
        let mut c = CeremonyController::new(store, CeremonyTiming::normal());
        c.seed(77);
        c
    }

    fn open_curtain(c: &mut CeremonyController) -> u64 {
        assert!(c.advance(0));
        c.tick(3500);
        assert_eq!(c.scene(), Scene::Ready);
        3500
    }

    #[test]
    fn test_curtain_auto_advance() {
        let mut c = controller(1, 100, 3);
        assert!(c.advance(0));
        assert_eq!(c.scene(), Scene::CurtainOpening);

        c.tick(3499);
        assert_eq!(c.scene(), Scene::CurtainOpening);
        c.tick(3500);
        assert_eq!(c.scene(), Scene::Ready);
    }

    #[test]
    fn test_advance_ignored_while_opening() {
        let mut c = controller(1, 100, 3);
        c.advance(0);
        assert!(!c.advance(1000));
        assert_eq!(c.scene(), Scene::CurtainOpening);
    }

    #[test]
    fn test_debounce_window() {
        let mut c = controller(1, 100, 3);
        let now = open_curtain(&mut c);
        c.set_scene(Scene::WinnersWall, now).unwrap();

        assert!(c.advance(now + 1000));
        assert_eq!(c.scene(), Scene::ThankYou);
        assert!(!c.advance(now + 1100), "inside the 600ms window");
        assert_eq!(c.scene(), Scene::ThankYou);
        assert!(c.advance(now + 1600));
        assert_eq!(c.scene(), Scene::CurtainClosed);
    }

    #[test]
    fn test_input_mapping() {
        let mut c = controller(1, 100, 3);
        assert!(!c.advance_input(&AdvanceInput::key("KeyA"), 0));
        assert_eq!(c.scene(), Scene::CurtainClosed);
        assert!(c.advance_input(&AdvanceInput::key("PageDown"), 0));
        assert_eq!(c.scene(), Scene::CurtainOpening);
    }

    #[test]
    fn test_ready_starts_draw_after_delay() {
        let mut c = controller(1, 100, 3);
        let now = open_curtain(&mut c);

        assert!(c.advance(now + 1000));
        assert_eq!(c.scene(), Scene::Suspense);
        assert!(c.suspense_style().is_some());
        assert!(c.draw().candidate().is_none());

        c.tick(now + 1500);
        assert_eq!(c.draw().status(), DrawStatus::Drawing);
        assert!(c.winners().is_empty());
    }

    #[test]
    fn test_presentation_complete_commits_and_reveals() {
        let mut c = controller(1, 100, 3);
        let now = open_curtain(&mut c);
        c.advance(now + 1000);
        c.tick(now + 1500);

        let winner = c.presentation_complete(now + 7500).unwrap();
        assert_eq!(c.scene(), Scene::Reveal);
        assert_eq!(c.winners(), &[winner]);

        // Stale second signal changes nothing
        assert!(c.presentation_complete(now + 7600).is_err());
        assert_eq!(c.winners().len(), 1);
    }

    #[test]
    fn test_suspense_ignores_advance() {
        let mut c = controller(1, 100, 3);
        let now = open_curtain(&mut c);
        c.advance(now + 1000);
        assert!(!c.advance(now + 2000));
        assert_eq!(c.scene(), Scene::Suspense);
    }

    #[test]
    fn test_reveal_to_thank_you_when_complete() {
        let mut c = controller(1, 100, 1);
        let now = open_curtain(&mut c);
        c.advance(now + 1000);
        c.tick(now + 1500);
        c.presentation_complete(now + 2000).unwrap();

        assert!(c.advance(now + 3000));
        assert_eq!(c.scene(), Scene::ThankYou);
        assert!(c.advance(now + 4000));
        assert_eq!(c.scene(), Scene::CurtainClosed);
        assert_eq!(c.winners().len(), 1, "winners survive the closing curtain");
    }

    #[test]
    fn test_set_scene_reveal_needs_winners() {
        let mut c = controller(1, 100, 3);
        assert!(matches!(
            c.set_scene(Scene::Reveal, 0),
            Err(LdError::NeedsWinners("reveal"))
        ));
        assert_eq!(c.scene(), Scene::CurtainClosed);
    }

    #[test]
    fn test_set_scene_cancels_curtain_timer() {
        let mut c = controller(1, 100, 3);
        c.advance(0);
        c.set_scene(Scene::WinnersWall, 100).unwrap();
        c.tick(5000);
        assert_eq!(c.scene(), Scene::WinnersWall);
    }

    #[test]
    fn test_start_draw_now() {
        let mut c = controller(1, 100, 2);
        c.start_draw_now(0).unwrap();
        assert_eq!(c.scene(), Scene::Suspense);
        assert_eq!(c.draw().status(), DrawStatus::Drawing);

        assert!(matches!(c.start_draw_now(10), Err(LdError::DrawInProgress(_))));

        c.presentation_complete(20).unwrap();
        c.start_draw_now(30).unwrap();
        c.presentation_complete(40).unwrap();
        assert!(matches!(c.start_draw_now(50), Err(LdError::AllPrizesDrawn(2))));
        assert_eq!(c.winners().len(), 2);
    }

    #[test]
    fn test_start_button_supersedes_scheduled_start() {
        let mut c = controller(1, 100, 3);
        let now = open_curtain(&mut c);
        c.advance(now + 1000);
        c.start_draw_now(now + 1100).unwrap();
        assert_eq!(c.draw().status(), DrawStatus::Drawing);
        c.drain_events();

        c.tick(now + 5000);
        assert_eq!(c.draw().draws_started(), 1);
        assert!(
            !c.drain_events()
                .iter()
                .any(|e| matches!(e.event, CeremonyEvent::Notice { .. }))
        );
    }

    #[test]
    fn test_start_button_refused_while_paused() {
        let mut c = controller(1, 100, 3);
        c.pause(0);
        assert!(matches!(
            c.start_draw_now(10),
            Err(LdError::DrawInProgress("paused"))
        ));
        assert!(c.draw().candidate().is_none());
        assert_eq!(c.scene(), Scene::CurtainClosed);
    }

    #[test]
    fn test_same_scene_keeps_suspense_style() {
        let mut c = controller(1, 100, 3);
        c.set_scene(Scene::Suspense, 0).unwrap();
        let style = c.suspense_style();
        c.drain_events();

        c.set_scene(Scene::Suspense, 10).unwrap();
        assert_eq!(c.suspense_style(), style);
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn test_prize_order_locked_mid_session() {
        let mut c = controller(1, 100, 3);
        c.start_draw_now(0).unwrap();
        c.presentation_complete(10).unwrap();

        let flip = SettingsPatch {
            prize_order: Some(PrizeOrder::Descending),
            ..SettingsPatch::default()
        };
        assert!(matches!(
            c.apply_settings(&flip, 20),
            Err(LdError::InvalidSettings(_))
        ));
        assert_eq!(c.draw().settings().prize_order, PrizeOrder::Ascending);
        assert_eq!(c.store().settings().prize_order, PrizeOrder::Ascending);

        // Allowed again after a reset
        c.reset_all(true, 30);
        c.apply_settings(&flip, 40).unwrap();
        assert_eq!(c.store().settings().prize_order, PrizeOrder::Descending);
    }

    #[test]
    fn test_apply_settings() {
        let mut c = controller(1, 100, 3);
        c.apply_settings(&SettingsPatch::draw_range(200, 300, 2, PrizeOrder::Descending), 0)
            .unwrap();
        assert_eq!(c.draw().settings().ticket_start, 200);
        assert_eq!(c.store().settings().number_of_prizes, 2);

        let bad = SettingsPatch {
            ticket_start: Some(999),
            ..SettingsPatch::default()
        };
        assert!(c.apply_settings(&bad, 10).is_err());
        assert_eq!(c.draw().settings().ticket_start, 200);
    }

    #[test]
    fn test_reset_needs_confirmation_with_winners() {
        let mut c = controller(1, 100, 3);
        assert_eq!(c.reset_all(false, 0), ResetOutcome::Reset);

        c.start_draw_now(0).unwrap();
        c.presentation_complete(10).unwrap();
        assert_eq!(c.reset_all(false, 20), ResetOutcome::NeedsConfirmation);
        assert_eq!(c.winners().len(), 1);
        assert_eq!(c.scene(), Scene::Reveal);

        assert_eq!(c.reset_all(true, 30), ResetOutcome::Reset);
        assert!(c.winners().is_empty());
        assert_eq!(c.scene(), Scene::CurtainClosed);
    }

    #[test]
    fn test_auto_present_phase() {
        let mut c = controller(1, 100, 3).with_auto_present(AutoPresent::Phase);
        c.start_draw_now(0).unwrap();
        let phase = c.draw().candidate().unwrap().phase;
        let duration = PhaseScript::for_phase(phase, c.timing()).duration_ms();

        c.tick(duration - 1);
        assert_eq!(c.scene(), Scene::Suspense);
        c.tick(duration);
        assert_eq!(c.scene(), Scene::Reveal);
        assert_eq!(c.winners().len(), 1);
        assert!(c.timeline().is_none());
    }

    #[test]
    fn test_auto_present_suspense() {
        let mut c = controller(1, 100, 3).with_auto_present(AutoPresent::Suspense);
        c.start_draw_now(0).unwrap();
        c.tick(5999);
        assert_eq!(c.scene(), Scene::Suspense);
        c.tick(6000);
        assert_eq!(c.scene(), Scene::Reveal);
    }

    #[test]
    fn test_pause_freezes_timeline() {
        let mut c = controller(1, 100, 3).with_auto_present(AutoPresent::Suspense);
        c.start_draw_now(0).unwrap();

        assert!(c.pause(1000));
        assert_eq!(c.draw().status(), DrawStatus::Paused);
        c.tick(20_000);
        assert_eq!(c.scene(), Scene::Suspense);

        assert!(c.resume(20_000));
        assert_eq!(c.draw().status(), DrawStatus::Drawing);
        c.tick(24_999);
        assert_eq!(c.scene(), Scene::Suspense);
        c.tick(25_000);
        assert_eq!(c.scene(), Scene::Reveal);
    }

    #[test]
    fn test_exports() {
        let mut c = controller(1, 100, 3);
        assert!(matches!(c.export_csv(), Err(LdError::NoWinners)));

        c.start_draw_now(0).unwrap();
        let winner = c.presentation_complete(10).unwrap();
        let csv = c.export_csv().unwrap();
        assert!(csv.starts_with("Prize #,Ticket Number,Time\n1,"));
        assert_eq!(
            c.clipboard_text().unwrap(),
            format!("Prize #1: Ticket {}", winner.ticket_number)
        );
    }

    #[test]
    fn test_drain_includes_draw_events() {
        let mut c = controller(1, 100, 3);
        c.start_draw_now(0).unwrap();
        let names: Vec<_> = c
            .drain_events()
            .into_iter()
            .map(|e| e.event.type_name())
            .collect();
        assert!(names.contains(&"draw_started"));
        assert!(names.contains(&"scene_changed"));
        assert!(c.drain_events().is_empty());
    }
}
