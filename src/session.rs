//! One battle, from encounter to close.
//!
//! [`BattleSession::tick`] is called once per display refresh. Each tick
//! advances detector loading, applies the newest hand observations to the
//! stroke canvas, submits the next camera frame, polls the enemy and finally
//! checks whether the battle is ready to close.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::actor::{Npc, PlayerProfile};
use crate::combat::{
    BattleResult, CastOutcome, CombatEvent, CombatLoop, CombatState, Combatant, Fizzle, IntervalTimer, Side, Skill,
    SkillCatalog,
};
use crate::config::BattleConfig;
use crate::error::BattleError;
use crate::fx::FxState;
use crate::gesture::{recognize, GestureId, HandObservation, HandPose, Handedness, StrokeCapture};
use crate::perception::{
    BridgeLoader, CameraFeed, LoadRetry, LoadStep, Mailbox, PerceptionBridge, PerceptionFrame, PerceptionStatus,
};
use crate::portrait::BattlePortraits;

/// Shown until the first cast replaces it.
pub const INSTRUCTIONS: &str = "Left palm clears, two fingers draw, right palm releases!";
const INVALID_SPELL: &str = "Invalid spell";

/// What the owner of the session should do after a tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BattleAction {
    None,
    /// The battle is over and the session has shut down.
    Close(BattleResult),
}

/// Which hand did what on the last frame, for the status line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HandInfo {
    pub side: &'static str,
    pub state: &'static str,
}

impl Default for HandInfo {
    fn default() -> Self {
        Self { side: "none", state: "none" }
    }
}

impl std::fmt::Display for HandInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.side, self.state)
    }
}

type EndCallback = Box<dyn FnMut(BattleResult)>;

// ── BattleBuilder ───────────────────────────────────────────────────────────

pub struct BattleBuilder<R = StdRng> {
    config: BattleConfig,
    catalog: SkillCatalog,
    loader: Option<Box<dyn BridgeLoader>>,
    portraits: BattlePortraits,
    rng: R,
    on_end: Option<EndCallback>,
}

impl Default for BattleBuilder<StdRng> {
    fn default() -> Self {
        Self {
            config: BattleConfig::default(),
            catalog: SkillCatalog::builtin(),
            loader: None,
            portraits: BattlePortraits::default(),
            rng: StdRng::from_entropy(),
            on_end: None,
        }
    }
}

impl<R: Rng> BattleBuilder<R> {
    pub fn with_config(mut self, config: BattleConfig) -> Self { self.config = config; self }
    pub fn with_catalog(mut self, catalog: SkillCatalog) -> Self { self.catalog = catalog; self }
    pub fn with_portraits(mut self, portraits: BattlePortraits) -> Self { self.portraits = portraits; self }

    /// Parse a (possibly partial) [`BattleConfig`] from JSON.
    pub fn with_config_json(mut self, json: &str) -> Result<Self, BattleError> {
        self.config = BattleConfig::from_json(json)?;
        Ok(self)
    }

    /// Load the skill table from JSON instead of using the built-in one.
    pub fn with_catalog_json(mut self, json: &str) -> Result<Self, BattleError> {
        self.catalog = SkillCatalog::from_json(json)?;
        Ok(self)
    }

    /// Source of the hand detector. Without one the session starts in
    /// [`PerceptionStatus::Error`] and only ESCAPE works.
    pub fn with_loader(mut self, loader: impl BridgeLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader)); self
    }

    /// Called exactly once, when the battle closes after being decided.
    pub fn on_battle_end(mut self, callback: impl FnMut(BattleResult) + 'static) -> Self {
        self.on_end = Some(Box::new(callback)); self
    }

    /// Swap the RNG used for damage jitter and enemy skill choice.
    pub fn with_rng<R2: Rng>(self, rng: R2) -> BattleBuilder<R2> {
        BattleBuilder {
            config: self.config,
            catalog: self.catalog,
            loader: self.loader,
            portraits: self.portraits,
            rng,
            on_end: self.on_end,
        }
    }

    /// Begin the battle at `now`. The player fights with the configured HP
    /// pool, the enemy with its full `max_hp`.
    pub fn start(self, player: &PlayerProfile, enemy: &Npc, now: Instant) -> BattleSession<R> {
        let player = player.combatant(self.config.player_max_hp);
        self.start_with(player, enemy.combatant(), now)
    }

    /// Begin a battle between two prepared combatants.
    pub fn start_with(self, player: Combatant, enemy: Combatant, now: Instant) -> BattleSession<R> {
        let combat = CombatLoop::with_rng(self.catalog, player, enemy, self.config.timing(), self.rng, now);

        let (status, retry) = match self.loader {
            Some(_) => (PerceptionStatus::Loading, Some(LoadRetry::new(now))),
            None => {
                log::warn!("[perception] no detector loader supplied; casting is disabled");
                (PerceptionStatus::Error, None)
            }
        };

        BattleSession {
            canvas: StrokeCapture::new(self.config.jitter_px),
            enemy_timer: IntervalTimer::new(self.config.enemy_poll_interval()),
            config: self.config,
            combat,
            mailbox: Mailbox::new(),
            loader: self.loader,
            retry,
            bridge: None,
            status,
            preview: None,
            hand_info: HandInfo::default(),
            log_line: INSTRUCTIONS.to_string(),
            fx: FxState::new(),
            portraits: self.portraits,
            on_end: self.on_end,
            closed: false,
        }
    }
}

// ── BattleSession ───────────────────────────────────────────────────────────

pub struct BattleSession<R = StdRng> {
    config: BattleConfig,
    combat: CombatLoop<R>,
    canvas: StrokeCapture,

    mailbox: Mailbox,
    loader: Option<Box<dyn BridgeLoader>>,
    retry: Option<LoadRetry>,
    bridge: Option<Box<dyn PerceptionBridge>>,
    status: PerceptionStatus,

    preview: Option<GestureId>,
    hand_info: HandInfo,
    log_line: String,
    fx: FxState,
    portraits: BattlePortraits,

    enemy_timer: IntervalTimer,
    on_end: Option<EndCallback>,
    closed: bool,
}

impl BattleSession<StdRng> {
    pub fn builder() -> BattleBuilder<StdRng> {
        BattleBuilder::default()
    }
}

impl<R: Rng> BattleSession<R> {
    /// Advance the session by one frame.
    pub fn tick(&mut self, now: Instant, camera: Option<&dyn CameraFeed>) -> BattleAction {
        if self.closed {
            return BattleAction::None;
        }

        self.advance_loader(now);

        if let Some(frame) = self.mailbox.take() {
            self.apply_frame(&frame, now);
        }

        self.submit_frame(camera);

        if self.combat.state().is_over() {
            self.enemy_timer.cancel();
        } else if self.enemy_timer.poll(now) {
            self.combat.resolve_enemy_action(now);
        }

        self.flush_events(now);
        self.fx.tick(now);

        match self.combat.take_close(now) {
            Some(result) => {
                if let Some(callback) = self.on_end.as_mut() {
                    callback(result);
                }
                self.close();
                BattleAction::Close(result)
            }
            None => BattleAction::None,
        }
    }

    /// Release the drawn rune. Does nothing with fewer than the minimum
    /// number of points or once the battle is decided; otherwise the canvas
    /// is cleared and the recognised gesture is cast, or fizzles.
    pub fn confirm_cast(&mut self, now: Instant) -> Option<CastOutcome> {
        if self.status == PerceptionStatus::Error {
            return None;
        }
        let points = self.canvas.flatten();
        if points.len() < self.config.min_cast_points || self.combat.state().is_over() {
            return None;
        }
        self.clear_canvas();

        let skill_id = recognize(&points).and_then(|gesture| {
            let known = &self.combat.combatant(Side::Player).skills;
            self.combat.catalog().castable_for(gesture, known).map(|s| s.id.clone())
        });

        let outcome = match skill_id {
            Some(id) => self.combat.resolve_cast(Side::Player, &id, now),
            None => {
                log::debug!("[battle] drawn rune matched no castable skill");
                let event = CombatEvent::Fizzled { side: Side::Player, reason: Fizzle::NoGesture };
                self.present(&event, now);
                CastOutcome::Fizzled(Fizzle::NoGesture)
            }
        };

        if !matches!(outcome, CastOutcome::Fizzled(_)) {
            self.enemy_timer.start(now);
        }
        self.flush_events(now);
        Some(outcome)
    }

    /// Flee. Closes through the same delay as WIN / LOSE.
    pub fn escape(&mut self, now: Instant) -> bool {
        if self.closed {
            return false;
        }
        let ended = self.combat.end(BattleResult::Escape, now);
        self.flush_events(now);
        ended
    }

    fn advance_loader(&mut self, now: Instant) {
        if self.status != PerceptionStatus::Loading {
            return;
        }
        let (Some(retry), Some(loader)) = (self.retry.as_mut(), self.loader.as_deref_mut()) else {
            return;
        };
        match retry.poll(loader, &self.config.bridge, now) {
            LoadStep::Waiting => {}
            LoadStep::Loaded(bridge) => {
                self.bridge = Some(bridge);
                self.status = PerceptionStatus::Ready;
                self.retry = None;
            }
            LoadStep::Failed(e) => {
                log::warn!("[perception] {e}");
                self.status = PerceptionStatus::Error;
                self.log_line = "Hand tracking failed to load.".to_string();
                self.retry = None;
            }
        }
    }

    fn apply_frame(&mut self, frame: &PerceptionFrame, now: Instant) {
        if frame.is_empty() {
            return;
        }

        let mut any_pointing = false;
        for hand in &frame.hands {
            any_pointing |= self.apply_hand(hand, now);
        }
        if !any_pointing {
            self.canvas.pause();
        }
    }

    /// Returns true if the hand is drawing.
    fn apply_hand(&mut self, hand: &HandObservation, now: Instant) -> bool {
        match (hand.handedness, hand.pose()) {
            (Handedness::Left, HandPose::Palm) => {
                self.clear_canvas();
                self.hand_info = HandInfo { side: Handedness::Left.as_str(), state: "clearing canvas" };
                false
            }
            (Handedness::Right, HandPose::Palm) if !self.canvas.is_empty() => {
                self.confirm_cast(now);
                self.hand_info = HandInfo { side: Handedness::Right.as_str(), state: "casting" };
                false
            }
            (side, HandPose::Pointing) => {
                self.hand_info = HandInfo { side: side.as_str(), state: "drawing" };
                let pen = hand.landmarks.pen_position(self.config.canvas_width, self.config.canvas_height);
                self.canvas.begin_or_continue(pen);
                if self.canvas.point_count() > self.config.preview_min_points {
                    self.preview = recognize(&self.canvas.flatten());
                }
                true
            }
            (_, HandPose::Fist) => {
                self.hand_info = HandInfo { side: "both hands", state: "paused" };
                self.canvas.pause();
                false
            }
            _ => false,
        }
    }

    fn submit_frame(&mut self, camera: Option<&dyn CameraFeed>) {
        if !matches!(self.status, PerceptionStatus::Ready | PerceptionStatus::Tracking) {
            return;
        }
        let (Some(bridge), Some(camera)) = (self.bridge.as_mut(), camera) else { return };
        let Some(frame) = camera.frame() else { return };
        let Some(reply) = self.mailbox.begin_request() else { return };

        if self.status == PerceptionStatus::Ready {
            log::info!("[perception] tracking {}x{} camera frames", frame.width, frame.height);
            self.status = PerceptionStatus::Tracking;
        }
        if let Err(e) = bridge.send(&frame, reply) {
            log::debug!("[perception] frame dropped: {e}");
            self.mailbox.release();
        }
    }

    fn flush_events(&mut self, now: Instant) {
        for event in self.combat.drain_events() {
            self.present(&event, now);
        }
    }

    fn present(&mut self, event: &CombatEvent, now: Instant) {
        match event {
            CombatEvent::Cast { side: Side::Player, skill_name } => {
                self.log_line = format!("{skill_name} unleashed!");
            }
            CombatEvent::Cast { side: Side::Enemy, skill_name } => {
                self.log_line = format!("{} uses {skill_name}!", self.combat.combatant(Side::Enemy).name);
            }
            CombatEvent::Fizzled { side: Side::Player, .. } => {
                self.log_line = INVALID_SPELL.to_string();
            }
            CombatEvent::Ended { result } => {
                self.log_line = result.message().to_string();
            }
            _ => {}
        }
        self.fx.apply(event, now);
    }
}

impl<R> BattleSession<R> {
    /// Wipe the canvas and the preview.
    pub fn clear_canvas(&mut self) {
        self.canvas.clear();
        self.preview = None;
    }

    /// Shut down: close the detector, cancel timers and drop transient
    /// state. Idempotent. Does not invoke the end callback.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Some(mut bridge) = self.bridge.take() {
            bridge.close();
        }
        self.loader = None;
        self.retry = None;
        self.enemy_timer.cancel();
        self.combat.cancel_timers();
        self.mailbox.reset();
        self.clear_canvas();
        self.fx.clear();
        log::debug!("[battle] session closed");
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn state(&self) -> &CombatState {
        self.combat.state()
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        self.combat.combatant(side)
    }

    pub fn status(&self) -> PerceptionStatus {
        self.status
    }

    pub fn canvas(&self) -> &StrokeCapture {
        &self.canvas
    }

    /// Gesture the current drawing would cast as, if any.
    pub fn preview(&self) -> Option<GestureId> {
        self.preview
    }

    /// The player skill the current drawing would cast.
    pub fn preview_skill(&self) -> Option<&Skill> {
        let gesture = self.preview?;
        let known = &self.combat.combatant(Side::Player).skills;
        self.combat.catalog().castable_for(gesture, known)
    }

    pub fn hand_info(&self) -> HandInfo {
        self.hand_info
    }

    pub fn log_line(&self) -> &str {
        &self.log_line
    }

    pub fn fx(&self) -> &FxState {
        &self.fx
    }

    pub fn portraits(&self) -> &BattlePortraits {
        &self.portraits
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Handle the detector answers into. Exposed for detectors that are
    /// driven from outside the session.
    pub fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }
}

impl<R> Drop for BattleSession<R> {
    fn drop(&mut self) {
        self.close();
    }
}
