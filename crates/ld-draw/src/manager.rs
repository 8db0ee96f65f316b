//! Draw State Manager
//!
//! Owns the ceremony data (winners, current candidate, draw status) and is
//! the only place that mutates it.
//!
//! ```text
//! idle ──start_draw──► drawing ──complete_draw──► winner-display
//!  ▲   ╲                                              │
//!  │    └─draw_next─► countdown ──(ticks)──► drawing  │
//!  └──────────────────────draw_next───────────────────┘
//!
//! countdown | drawing | winner-display ──pause──► paused ──resume──► (same)
//! ```
//!
//! `start_draw` only runs from `idle`, so at most one draw is ever in
//! flight, and `complete_draw` commits each candidate at most once.

use ld_core::{DrawSettings, LdError, LdResult, PrizeOrder, Winner, awarded_tickets};
use ld_stage::{CeremonyEvent, CeremonyTiming, DrawStatus, EventJournal, PhaseType, TimerQueue};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::picker::NonRepeatingPicker;
use crate::selector::select_ticket;

/// Timers owned by the manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawTimer {
    /// Start the next draw after the visual reset pause
    StartDraw,
    /// One countdown step
    CountdownTick,
}

/// The winner being decided live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Tentative winner (ticket, prize number, timestamp)
    pub winner: Winner,
    /// Presentation phase chosen for this draw
    pub phase: PhaseType,
    /// Zero-based ordinal of the draw in this session
    pub draw_index: usize,
    committed: bool,
}

impl Candidate {
    /// Whether the candidate is already in the winners list
    pub fn is_committed(&self) -> bool {
        self.committed
    }
}

/// Draw state for one ceremony
pub struct DrawStateManager {
    settings: DrawSettings,
    timing: CeremonyTiming,
    winners: Vec<Winner>,
    candidate: Option<Candidate>,
    status: DrawStatus,
    /// Status to restore on resume
    paused_from: Option<DrawStatus>,
    countdown_value: u32,
    phases: NonRepeatingPicker<PhaseType>,
    timers: TimerQueue<DrawTimer>,
    rng: ChaCha8Rng,
    journal: EventJournal,
    draws_started: u64,
}

impl DrawStateManager {
    pub fn new(settings: DrawSettings, timing: CeremonyTiming) -> Self {
        Self {
            settings,
            timing,
            winners: Vec::new(),
            candidate: None,
            status: DrawStatus::Idle,
            paused_from: None,
            countdown_value: 0,
            phases: NonRepeatingPicker::new(PhaseType::ALL),
            timers: TimerQueue::new(),
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
            journal: EventJournal::new(),
            draws_started: 0,
        }
    }

    /// Seed RNG for reproducible draws
    pub fn seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Settings used by future draws. Winners already committed are kept.
    ///
    /// Fails without changing anything when `check_settings` rejects them.
    pub fn apply_settings(&mut self, settings: DrawSettings) -> LdResult<()> {
        self.check_settings(&settings)?;
        self.settings = settings;
        Ok(())
    }

    /// Whether `next` keeps the prize numbers already awarded consistent.
    ///
    /// Once winners exist the prize order is fixed. The prize count may only
    /// change in ascending order, and never below the winners on the board,
    /// so every later prize number is still unused.
    pub fn check_settings(&self, next: &DrawSettings) -> LdResult<()> {
        let drawn = self.winners.len();
        if drawn == 0 {
            return Ok(());
        }
        if next.prize_order != self.settings.prize_order {
            return Err(LdError::InvalidSettings(format!(
                "prize order is fixed once {} winners are drawn",
                drawn
            )));
        }
        if next.number_of_prizes == self.settings.number_of_prizes {
            return Ok(());
        }
        if next.prize_order == PrizeOrder::Descending {
            return Err(LdError::InvalidSettings(format!(
                "descending prize count is fixed once {} winners are drawn",
                drawn
            )));
        }
        if (next.number_of_prizes as usize) < drawn {
            return Err(LdError::InvalidSettings(format!(
                "{} prizes is fewer than the {} already drawn",
                next.number_of_prizes, drawn
            )));
        }
        Ok(())
    }

    pub fn set_timing(&mut self, timing: CeremonyTiming) {
        self.timing = timing;
    }

    /// Replace the winners list, e.g. to continue an interrupted session.
    ///
    /// Only allowed while idle with no candidate on screen.
    pub fn restore_winners(&mut self, winners: Vec<Winner>) -> LdResult<()> {
        if self.status != DrawStatus::Idle {
            return Err(LdError::DrawInProgress(self.status.type_name()));
        }
        log::info!("Restored {} winners", winners.len());
        self.winners = winners;
        self.candidate = None;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // DRAW LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Select a candidate and start presenting it.
    ///
    /// Requires `idle` and at least one undrawn prize. On any failure the
    /// state is left exactly as it was.
    pub fn start_draw(&mut self, now_ms: u64) -> LdResult<&Candidate> {
        if self.status != DrawStatus::Idle {
            return Err(LdError::DrawInProgress(self.status.type_name()));
        }
        self.begin_draw(now_ms)?;
        // A scheduled start is superseded by this one
        self.timers.cancel_where(|t| *t == DrawTimer::StartDraw);
        self.candidate.as_ref().ok_or(LdError::NoActiveDraw)
    }

    fn begin_draw(&mut self, now_ms: u64) -> LdResult<&Candidate> {
        let total = self.settings.number_of_prizes;
        let draw_index = self.winners.len();
        if self.is_complete() {
            return Err(LdError::AllPrizesDrawn(total));
        }

        let awarded = awarded_tickets(&self.winners);
        let ticket = select_ticket(&self.settings, &awarded, draw_index, &mut self.rng)?;
        let prize_number = self.settings.prize_order.prize_number(draw_index, total);
        let phase = self
            .phases
            .pick(&mut self.rng)
            .unwrap_or(PhaseType::Radar);

        log::info!(
            "Draw {}: prize #{} → ticket {} ({})",
            draw_index + 1,
            prize_number,
            ticket,
            phase.type_name()
        );

        self.journal.push(
            now_ms,
            CeremonyEvent::DrawStarted {
                draw_index,
                prize_number,
                ticket_number: ticket,
                phase,
            },
        );
        self.draws_started += 1;
        self.set_status(now_ms, DrawStatus::Drawing);

        Ok(self.candidate.insert(Candidate {
            winner: Winner::new(prize_number, ticket),
            phase,
            draw_index,
            committed: false,
        }))
    }

    /// Commit the candidate once its presentation has finished.
    ///
    /// This is the only place a winner becomes permanent.
    pub fn complete_draw(&mut self, now_ms: u64) -> LdResult<Winner> {
        if self.status != DrawStatus::Drawing {
            return Err(LdError::NoActiveDraw);
        }
        let Some(candidate) = self.candidate.as_mut().filter(|c| !c.committed) else {
            return Err(LdError::NoActiveDraw);
        };

        candidate.committed = true;
        let winner = candidate.winner.clone();
        self.winners.push(winner.clone());

        log::info!(
            "Winner committed: prize #{} ticket {} ({}/{})",
            winner.prize_number,
            winner.ticket_number,
            self.winners.len(),
            self.settings.number_of_prizes
        );
        self.journal.push(
            now_ms,
            CeremonyEvent::WinnerCommitted {
                prize_number: winner.prize_number,
                ticket_number: winner.ticket_number,
            },
        );
        self.set_status(now_ms, DrawStatus::WinnerDisplay);
        Ok(winner)
    }

    /// Clear the current draw and schedule the next one.
    ///
    /// The next draw starts after the visual reset pause, or after a
    /// countdown when enabled and at least one winner is already on the
    /// board. Nothing is scheduled when every prize has been drawn.
    pub fn draw_next(&mut self, now_ms: u64) {
        self.clear_draw(now_ms);

        if self.is_complete() {
            let done = LdError::AllPrizesDrawn(self.settings.number_of_prizes);
            self.notice(now_ms, &done);
            return;
        }

        if self.settings.enable_countdown
            && self.settings.countdown_seconds > 0
            && !self.winners.is_empty()
        {
            self.countdown_value = self.settings.countdown_seconds;
            self.set_status(now_ms, DrawStatus::Countdown);
            self.journal.push(
                now_ms,
                CeremonyEvent::CountdownTick {
                    remaining: self.countdown_value,
                },
            );
            self.timers
                .schedule(now_ms, self.timing.countdown_tick_ms, DrawTimer::CountdownTick);
        } else {
            self.timers
                .schedule(now_ms, self.timing.draw_next_delay_ms, DrawTimer::StartDraw);
        }
    }

    /// Drop the candidate and pending timers, back to `idle`. Winners stay.
    pub fn clear_draw(&mut self, now_ms: u64) {
        self.timers.cancel_all();
        self.paused_from = None;
        self.candidate = None;
        self.countdown_value = 0;
        self.set_status(now_ms, DrawStatus::Idle);
    }

    /// Fire every timer due at `now_ms`
    pub fn tick(&mut self, now_ms: u64) {
        while let Some(timer) = self.timers.pop_due(now_ms) {
            log::debug!("[draw] timer {:?} @ {}ms", timer, now_ms);
            match timer {
                DrawTimer::StartDraw => {
                    if let Err(e) = self.start_draw(now_ms).map(|_| ()) {
                        self.notice(now_ms, &e);
                    }
                }
                DrawTimer::CountdownTick => self.countdown_step(now_ms),
            }
        }
    }

    fn countdown_step(&mut self, now_ms: u64) {
        if self.status != DrawStatus::Countdown {
            return;
        }

        self.countdown_value = self.countdown_value.saturating_sub(1);
        self.journal.push(
            now_ms,
            CeremonyEvent::CountdownTick {
                remaining: self.countdown_value,
            },
        );

        if self.countdown_value > 0 {
            self.timers
                .schedule(now_ms, self.timing.countdown_tick_ms, DrawTimer::CountdownTick);
            return;
        }

        if let Err(e) = self.begin_draw(now_ms).map(|_| ()) {
            self.set_status(now_ms, DrawStatus::Idle);
            self.notice(now_ms, &e);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PAUSE / RESET
    // ═══════════════════════════════════════════════════════════════════════════

    /// Freeze timers. Data is untouched; `resume` restores the exact status.
    ///
    /// An idle manager with a draw start pending keeps its `idle` status but
    /// its timers freeze all the same. Returns false when there was nothing
    /// to pause.
    pub fn pause(&mut self, now_ms: u64) -> bool {
        let active = self.status.is_active();
        if !active && self.timers.is_empty() {
            return false;
        }
        if !self.timers.pause(now_ms) {
            return false;
        }
        if active {
            self.paused_from = Some(self.status);
            self.set_status(now_ms, DrawStatus::Paused);
        }
        self.journal.push(now_ms, CeremonyEvent::Paused);
        true
    }

    pub fn resume(&mut self, now_ms: u64) -> bool {
        if !self.timers.resume(now_ms) {
            return false;
        }
        if let Some(previous) = self.paused_from.take() {
            self.set_status(now_ms, previous);
        }
        self.journal.push(now_ms, CeremonyEvent::Resumed);
        true
    }

    /// Whether the draw timers are frozen
    pub fn is_paused(&self) -> bool {
        self.timers.is_paused()
    }

    /// Clear winners, candidate, status, countdown, phase history and timers
    pub fn reset(&mut self, now_ms: u64) {
        let cancelled = self.timers.cancel_all();
        self.winners.clear();
        self.candidate = None;
        self.paused_from = None;
        self.countdown_value = 0;
        self.phases.reset();
        self.set_status(now_ms, DrawStatus::Idle);
        self.journal.push(now_ms, CeremonyEvent::Reset);
        log::info!("Draw state reset ({} pending timers cancelled)", cancelled);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNALS
    // ═══════════════════════════════════════════════════════════════════════════

    fn set_status(&mut self, now_ms: u64, to: DrawStatus) {
        let from = self.status;
        if from == to {
            return;
        }
        self.status = to;
        log::debug!("[draw] status {} → {}", from.type_name(), to.type_name());
        self.journal
            .push(now_ms, CeremonyEvent::StatusChanged { from, to });
    }

    fn notice(&mut self, now_ms: u64, error: &LdError) {
        log::warn!("Draw notice: {}", error);
        self.journal
            .push(now_ms, CeremonyEvent::notice(error.to_string()));
    }

    pub(crate) fn journal_mut(&mut self) -> &mut EventJournal {
        &mut self.journal
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn settings(&self) -> &DrawSettings {
        &self.settings
    }

    pub fn timing(&self) -> &CeremonyTiming {
        &self.timing
    }

    /// Committed winners in draw order
    pub fn winners(&self) -> &[Winner] {
        &self.winners
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        self.candidate.as_ref()
    }

    pub fn status(&self) -> DrawStatus {
        self.status
    }

    /// Status that `resume` will restore
    pub fn paused_from(&self) -> Option<DrawStatus> {
        self.paused_from
    }

    pub fn countdown_value(&self) -> u32 {
        self.countdown_value
    }

    /// Phase of the current candidate
    pub fn current_phase(&self) -> Option<PhaseType> {
        self.candidate.as_ref().map(|c| c.phase)
    }

    /// Last phase picked, kept across draws until reset
    pub fn previous_phase(&self) -> Option<PhaseType> {
        self.phases.previous()
    }

    pub fn remaining_prizes(&self) -> usize {
        (self.settings.number_of_prizes as usize).saturating_sub(self.winners.len())
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_prizes() == 0
    }

    /// Number of candidates selected since creation
    pub fn draws_started(&self) -> u64 {
        self.draws_started
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Take the journal recorded so far
    pub fn drain_events(&mut self) -> Vec<ld_stage::StampedEvent> {
        self.journal.drain()
    }
}
