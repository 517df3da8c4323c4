use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use quiz_core::model::TopicSet;
use quiz_core::scoring::{FEEDBACK_DELAY_MS, INTRO_DELAY_MS, QUESTION_TIME_MS, REVEAL_DWELL_MS};
use storage::repository::ScoreRepository;

use crate::error::GameError;

use super::engine::{GameEngine, RoundSetup, Screen};
use super::event::GameEvent;
use super::reveal::reveal_sequence;
use super::timer::CountdownTimer;

/// Work scheduled on behalf of the active round: at most one timer and
/// whatever reveal/advance/intro tasks are in flight. Everything here
/// is cancelled wholesale when a new round or a new game supersedes it.
#[derive(Default)]
struct Pending {
    timer: Option<CountdownTimer>,
    tasks: Vec<JoinHandle<()>>,
}

impl Pending {
    /// Track a spawned task, reaping handles that already ran to
    /// completion so an endless run does not accumulate them.
    fn push_task(&mut self, handle: JoinHandle<()>) {
        self.tasks.retain(|task| !task.is_finished());
        self.tasks.push(handle);
    }

    fn cancel_all(&mut self) {
        self.timer = None;
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

struct Inner {
    engine: Mutex<GameEngine>,
    scores: Arc<dyn ScoreRepository>,
    events: UnboundedSender<GameEvent>,
    pending: Mutex<Pending>,
}

/// Orchestrates the session engine over real time.
///
/// Owns the engine, the per-round timer/reveal/advance tasks and the
/// event channel the renderer consumes. All methods must run inside a
/// tokio runtime. User intents that the engine ignores (submitting
/// while not answerable, and similar) are silent no-ops here too.
#[derive(Clone)]
pub struct GameLoopService {
    inner: Arc<Inner>,
}

impl GameLoopService {
    /// Wrap an engine; the receiver gets every `GameEvent` the session
    /// produces and is handed to the renderer.
    #[must_use]
    pub fn new(
        engine: GameEngine,
        scores: Arc<dyn ScoreRepository>,
    ) -> (Self, UnboundedReceiver<GameEvent>) {
        let (events, rx) = unbounded_channel();
        let inner = Arc::new(Inner {
            engine: Mutex::new(engine),
            scores,
            events,
            pending: Mutex::new(Pending::default()),
        });
        (Self { inner }, rx)
    }

    /// Process start: show the intro splash, then flip to the menu
    /// after the fixed delay unless something else navigated first.
    pub fn start(&self) {
        let best = self.inner.engine().best_score();
        self.inner.emit(GameEvent::ScreenChanged(Screen::Intro));
        self.inner.emit(GameEvent::BestScore(best));

        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            sleep(Duration::from_millis(INTRO_DELAY_MS)).await;
            {
                let mut engine = inner.engine();
                if engine.screen() != Screen::Intro {
                    return;
                }
                engine.show_menu();
            }
            inner.emit(GameEvent::ScreenChanged(Screen::Menu));
        });
        self.inner.pending().push_task(handle);
    }

    /// Start a run with the given topic selection.
    ///
    /// # Errors
    ///
    /// Propagates `GameError::Question` from generation.
    pub fn start_game(&self, topics: TopicSet) -> Result<(), GameError> {
        self.inner.pending().cancel_all();
        let setup = self.inner.engine().start_game(topics)?;
        self.inner.emit(GameEvent::ScreenChanged(Screen::Game));
        Inner::launch_round(&self.inner, setup);
        Ok(())
    }

    /// Re-run with the previous topic selection (the summary screen's
    /// "play again").
    ///
    /// # Errors
    ///
    /// Propagates `GameError::Question` from generation.
    pub fn play_again(&self) -> Result<(), GameError> {
        self.inner.pending().cancel_all();
        let setup = self.inner.engine().play_again()?;
        self.inner.emit(GameEvent::ScreenChanged(Screen::Game));
        Inner::launch_round(&self.inner, setup);
        Ok(())
    }

    /// Submit a typed answer for the active round.
    pub fn submit_numeric(&self, raw: &str) {
        let (judgement, round) = {
            let mut engine = self.inner.engine();
            (engine.submit_numeric(raw), engine.round())
        };
        let Some(judgement) = judgement else { return };
        Inner::after_judgement(&self.inner, &judgement, round);
    }

    /// Submit a chosen puzzle option for the active round.
    pub fn choose_option(&self, option: i64) {
        let (judgement, round) = {
            let mut engine = self.inner.engine();
            (engine.choose_option(option), engine.round())
        };
        let Some(judgement) = judgement else { return };
        Inner::after_judgement(&self.inner, &judgement, round);
    }

    /// Return to the main menu (the summary screen's "menu" action).
    pub fn show_menu(&self) {
        self.inner.pending().cancel_all();
        self.inner.engine().show_menu();
        self.inner.emit(GameEvent::ScreenChanged(Screen::Menu));
    }

    /// Open the topic-selection screen from the menu.
    pub fn open_topics(&self) {
        let screen = {
            let mut engine = self.inner.engine();
            engine.open_topics();
            engine.screen()
        };
        self.inner.emit(GameEvent::ScreenChanged(screen));
    }

    /// Leave topic selection without starting a game.
    pub fn back_to_menu(&self) {
        let screen = {
            let mut engine = self.inner.engine();
            engine.back_to_menu();
            engine.screen()
        };
        self.inner.emit(GameEvent::ScreenChanged(screen));
    }

    /// End the run: cancel all pending work, fold the score into the
    /// best and persist it. Returns the (possibly unchanged) best.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Storage` if persisting the best fails; the
    /// in-memory state is already on the summary screen by then.
    pub async fn show_summary(&self) -> Result<u32, GameError> {
        self.inner.pending().cancel_all();
        let best = self.inner.engine().show_summary();
        self.inner.emit(GameEvent::ScreenChanged(Screen::Summary));
        self.inner.emit(GameEvent::BestScore(best));

        self.inner.scores.record_best(best).await?;
        Ok(best)
    }
}

impl Inner {
    fn engine(&self) -> MutexGuard<'_, GameEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn pending(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: GameEvent) {
        // A dropped receiver just means nobody is rendering.
        let _ = self.events.send(event);
    }

    /// Announce a new round and set its timing machinery in motion.
    fn launch_round(inner: &Arc<Self>, setup: RoundSetup) {
        inner.emit(GameEvent::RoundStarted {
            round: setup.round,
            question: setup.question.clone(),
            needs_reveal: setup.needs_reveal,
        });

        if setup.needs_reveal {
            let sequence: Vec<i64> = setup.question.reveal().map(<[i64]>::to_vec).unwrap_or_default();
            let round = setup.round;
            let task_inner = Arc::clone(inner);
            let handle = tokio::spawn(async move {
                let events = task_inner.events.clone();
                reveal_sequence(&sequence, Duration::from_millis(REVEAL_DWELL_MS), |value| {
                    let _ = events.send(GameEvent::RevealStep { round, value });
                })
                .await;

                {
                    let mut engine = task_inner.engine();
                    if engine.round() != round {
                        return;
                    }
                    engine.begin_timing();
                }
                task_inner.emit(GameEvent::RevealEnded { round });
                Self::arm_timer(&task_inner, round);
            });
            inner.pending().push_task(handle);
        } else {
            Self::arm_timer(inner, setup.round);
        }
    }

    /// Arm the per-question countdown. Replacing the slot drops (and
    /// thereby cancels) whatever timer was armed before.
    fn arm_timer(inner: &Arc<Self>, round: u64) {
        let tick_events = inner.events.clone();
        let expire_inner = Arc::clone(inner);

        let timer = CountdownTimer::arm(
            Duration::from_millis(QUESTION_TIME_MS.unsigned_abs()),
            move |remaining| {
                #[allow(clippy::cast_possible_truncation)]
                let remaining_ms = remaining.as_millis() as u64;
                let _ = tick_events.send(GameEvent::Tick { remaining_ms });
            },
            move || Self::handle_timeout(&expire_inner, round),
        );

        inner.pending().timer = Some(timer);
    }

    fn handle_timeout(inner: &Arc<Self>, round: u64) {
        let judgement = {
            let mut engine = inner.engine();
            if engine.round() != round {
                return;
            }
            engine.time_up()
        };
        // None: the round was judged before the expiry landed.
        let Some(judgement) = judgement else { return };

        inner.emit(GameEvent::TimedOut {
            expected: judgement.expected,
        });
        Self::schedule_advance(inner, round);
    }

    fn after_judgement(inner: &Arc<Self>, judgement: &super::engine::Judgement, round: u64) {
        // The engine has already flipped not-answerable; stop the ticks.
        inner.pending().timer = None;
        inner.emit(GameEvent::Judged {
            correct: judgement.correct,
            expected: judgement.expected,
            awarded: judgement.awarded,
            score: judgement.score,
            streak: judgement.streak,
        });
        Self::schedule_advance(inner, round);
    }

    /// Queue the next round after the feedback pause, unless the round
    /// (or the screen) moved on in the meantime.
    fn schedule_advance(inner: &Arc<Self>, round: u64) {
        let task_inner = Arc::clone(inner);
        let handle = tokio::spawn(async move {
            sleep(Duration::from_millis(FEEDBACK_DELAY_MS)).await;

            let setup = {
                let mut engine = task_inner.engine();
                if engine.round() != round || engine.screen() != Screen::Game {
                    return;
                }
                match engine.advance_round() {
                    Ok(setup) => setup,
                    Err(_) => return,
                }
            };
            Self::launch_round(&task_inner, setup);
        });
        inner.pending().push_task(handle);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Topic;
    use quiz_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    /// A long unattended run keeps pushing advance/reveal handles; the
    /// reaping on push has to keep the backlog bounded rather than one
    /// dead handle per round.
    #[tokio::test(start_paused = true)]
    async fn finished_round_tasks_do_not_accumulate() {
        let engine = GameEngine::new(0)
            .with_clock(fixed_clock())
            .with_rng_seed(3);
        let (service, mut rx) =
            GameLoopService::new(engine, Arc::new(InMemoryRepository::new()));
        service
            .start_game(TopicSet::from_topics([Topic::Add]))
            .expect("start");

        // Let eight rounds time out back to back.
        let mut rounds = 0;
        while rounds < 8 {
            let event = rx.recv().await.expect("event channel closed");
            if matches!(event, GameEvent::RoundStarted { .. }) {
                rounds += 1;
            }
        }

        let pending = service.inner.pending();
        let finished = pending.tasks.iter().filter(|task| task.is_finished()).count();
        assert!(
            pending.tasks.len() <= 2,
            "stale handles piled up: {} tracked, {finished} finished",
            pending.tasks.len()
        );
    }
}
