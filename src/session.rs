//! Session controller
//!
//! The state machine wrapped around the simulation:
//! Menu → Playing (Paused is a sub-state inside the sim) → GameOver →
//! Playing again with the last-selected difficulty. The session owns the
//! high score and the difficulty preference; the sim owns everything else.
//! Quit is honored in every state and ends the loop immediately.

use crate::highscores::HighScore;
use crate::platform::{Clock, ControlEvent, Frame, FrameSink, InputSource};
use crate::settings::{Difficulty, Settings};
use crate::sim::{GameState, TickEvent, TickInput, tick};

/// How a blocking screen (menu, instructions, game-over wait) was left.
enum ScreenExit {
    Continue,
    Quit,
}

/// How one run ended.
enum RoundEnd {
    Quit,
    Finished { score: u32 },
}

pub struct Session<I, C, S> {
    input: I,
    clock: C,
    sink: S,
    settings: Settings,
    high_score: HighScore,
    next_seed: u64,
}

impl<I: InputSource, C: Clock, S: FrameSink> Session<I, C, S> {
    pub fn new(
        input: I,
        clock: C,
        sink: S,
        settings: Settings,
        high_score: HighScore,
        seed: u64,
    ) -> Self {
        Self {
            input,
            clock,
            sink,
            settings,
            high_score,
            next_seed: seed,
        }
    }

    /// Settings as left by the session (the caller persists them on exit).
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn best_score(&self) -> u32 {
        self.high_score.best()
    }

    /// Drive the whole session until the player quits.
    pub fn run(&mut self) {
        let difficulty = match self.menu() {
            Some(d) => d,
            None => return,
        };
        self.settings.difficulty = difficulty;

        loop {
            let seed = self.next_seed;
            self.next_seed = self.next_seed.wrapping_add(1);
            let state = GameState::new(seed, difficulty);

            match self.play(state) {
                RoundEnd::Quit => return,
                RoundEnd::Finished { score } => {
                    if self.high_score.record(score) {
                        log::info!("run ended with a new high score: {}", score);
                    } else {
                        log::info!("run ended: score {}", score);
                    }
                    self.sink.present_game_over(score, self.high_score.best());
                    match self.await_restart() {
                        ScreenExit::Quit => return,
                        ScreenExit::Continue => {}
                    }
                }
            }
        }
    }

    /// Difficulty-select menu; returns `None` on quit.
    fn menu(&mut self) -> Option<Difficulty> {
        let mut selected = self.settings.difficulty;
        loop {
            self.sink.present_menu(selected, self.high_score.best());
            self.clock.await_next_tick();
            for event in self.input.poll() {
                match event {
                    ControlEvent::Quit => return None,
                    ControlEvent::SelectDifficulty(d) => selected = d,
                    ControlEvent::Confirm => return Some(selected),
                    ControlEvent::Help => {
                        if let ScreenExit::Quit = self.instructions() {
                            return None;
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    /// Instructions overlay: blocks until any key, quit still honored.
    fn instructions(&mut self) -> ScreenExit {
        self.sink.present_instructions();
        loop {
            self.clock.await_next_tick();
            let events = self.input.poll();
            if events.contains(&ControlEvent::Quit) {
                return ScreenExit::Quit;
            }
            if !events.is_empty() {
                return ScreenExit::Continue;
            }
        }
    }

    /// One run of the simulation, one tick per frame.
    fn play(&mut self, mut state: GameState) -> RoundEnd {
        loop {
            self.clock.await_next_tick();

            let events = self.input.poll();
            if events.contains(&ControlEvent::Quit) {
                return RoundEnd::Quit;
            }
            if events.contains(&ControlEvent::Help) {
                // Blocking overlay; the run freezes until it is dismissed
                if let ScreenExit::Quit = self.instructions() {
                    return RoundEnd::Quit;
                }
            }

            let tick_input = TickInput {
                now_ms: self.clock.elapsed_ms(),
                pause: events.contains(&ControlEvent::PauseToggle),
                dir: self.input.directions(),
            };

            for event in tick(&mut state, &tick_input) {
                match event {
                    TickEvent::CarrotCollected { score } => {
                        log::debug!("carrot collected, score {}", score);
                    }
                    TickEvent::BoostStarted => log::debug!("speed boost started"),
                    TickEvent::BoostEnded => log::debug!("speed boost ended"),
                    // The sim logs level-ups itself
                    TickEvent::LevelUp { .. } => {}
                    TickEvent::GameOver { cause } => {
                        log::info!("game over: {:?}", cause);
                        return RoundEnd::Finished { score: state.score };
                    }
                }
            }

            self.sink
                .present(&Frame::of(&state, self.high_score.best()));
        }
    }

    /// Game-over screen: wait for an explicit restart (or quit).
    fn await_restart(&mut self) -> ScreenExit {
        loop {
            self.clock.await_next_tick();
            for event in self.input.poll() {
                match event {
                    ControlEvent::Restart => return ScreenExit::Continue,
                    ControlEvent::Quit => return ScreenExit::Quit,
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use crate::consts::TICK_MS;
    use crate::sim::Directions;

    #[derive(Default)]
    struct Shared {
        menus: u32,
        instructions: u32,
        frames: u32,
        paused_frames: u32,
        game_over_screens: Vec<u32>,
        last_menu_selection: Option<Difficulty>,
    }

    /// Replays a scripted sequence of per-tick event batches, then nothing.
    struct TestInput {
        script: VecDeque<Vec<ControlEvent>>,
    }

    impl InputSource for TestInput {
        fn poll(&mut self) -> Vec<ControlEvent> {
            self.script.pop_front().unwrap_or_default()
        }

        fn directions(&mut self) -> Directions {
            Directions::default()
        }
    }

    struct TestClock {
        now_ms: u64,
    }

    impl Clock for TestClock {
        fn elapsed_ms(&mut self) -> u64 {
            self.now_ms
        }

        fn await_next_tick(&mut self) {
            self.now_ms += TICK_MS;
        }
    }

    struct TestSink {
        shared: Rc<RefCell<Shared>>,
    }

    impl FrameSink for TestSink {
        fn present(&mut self, frame: &Frame<'_>) {
            let mut shared = self.shared.borrow_mut();
            shared.frames += 1;
            if frame.paused {
                shared.paused_frames += 1;
            }
        }

        fn present_menu(&mut self, selected: Difficulty, _high_score: u32) {
            let mut shared = self.shared.borrow_mut();
            shared.menus += 1;
            shared.last_menu_selection = Some(selected);
        }

        fn present_instructions(&mut self) {
            self.shared.borrow_mut().instructions += 1;
        }

        fn present_game_over(&mut self, score: u32, _high_score: u32) {
            self.shared.borrow_mut().game_over_screens.push(score);
        }
    }

    fn session_with(
        script: Vec<Vec<ControlEvent>>,
    ) -> (Session<TestInput, TestClock, TestSink>, Rc<RefCell<Shared>>) {
        let shared = Rc::new(RefCell::new(Shared::default()));
        let input = TestInput {
            script: script.into(),
        };
        let clock = TestClock { now_ms: 0 };
        let sink = TestSink {
            shared: shared.clone(),
        };
        let high_score = HighScore::load_from(
            std::env::temp_dir().join(format!("burrow_dash_session_{}", std::process::id())),
        );
        let session = Session::new(input, clock, sink, Settings::default(), high_score, 1);
        (session, shared)
    }

    #[test]
    fn quit_from_the_menu_ends_the_session() {
        let (mut session, shared) = session_with(vec![vec![ControlEvent::Quit]]);
        session.run();
        let shared = shared.borrow();
        assert!(shared.menus >= 1);
        assert_eq!(shared.frames, 0);
    }

    #[test]
    fn selection_is_reflected_and_remembered() {
        let (mut session, shared) = session_with(vec![
            vec![ControlEvent::SelectDifficulty(Difficulty::Hard)],
            vec![ControlEvent::Quit],
        ]);
        session.run();
        assert_eq!(
            shared.borrow().last_menu_selection,
            Some(Difficulty::Hard)
        );
    }

    #[test]
    fn instructions_block_until_any_key() {
        let (mut session, shared) = session_with(vec![
            vec![ControlEvent::Help],
            vec![],
            vec![ControlEvent::Other],
            vec![ControlEvent::Quit],
        ]);
        session.run();
        let shared = shared.borrow();
        assert_eq!(shared.instructions, 1);
        // Back on the menu after the overlay
        assert!(shared.menus >= 2);
    }

    #[test]
    fn quit_during_play_skips_the_game_over_screen() {
        let (mut session, shared) = session_with(vec![
            vec![ControlEvent::Confirm],
            vec![],
            vec![ControlEvent::Quit],
        ]);
        session.run();
        let shared = shared.borrow();
        assert!(shared.frames > 0);
        assert!(shared.game_over_screens.is_empty());
    }

    #[test]
    fn pausing_presents_paused_frames() {
        let (mut session, shared) = session_with(vec![
            vec![ControlEvent::Confirm],
            vec![ControlEvent::PauseToggle],
            vec![],
            vec![ControlEvent::PauseToggle],
            vec![ControlEvent::Quit],
        ]);
        session.run();
        assert_eq!(shared.borrow().paused_frames, 2);
    }

    #[test]
    fn an_idle_player_on_an_open_board_is_caught() {
        use glam::IVec2;

        use crate::consts::PLAYER_SIZE;

        let (mut session, shared) = session_with(vec![]);

        // Open board with the enemy two pixels off the player's right edge:
        // after the pursuit warm-up it closes in within a few ticks.
        let mut state = GameState::new(7, Difficulty::Easy);
        state.obstacles.clear();
        state.carrot = None;
        state.enemy = state.player + IVec2::new(PLAYER_SIZE + 2, 0);

        match session.play(state) {
            RoundEnd::Finished { score } => assert_eq!(score, 0),
            RoundEnd::Quit => panic!("expected the run to finish"),
        }
        assert!(shared.borrow().frames > 0);
    }

    #[test]
    fn restart_waits_for_the_explicit_signal() {
        let (mut session, _) = session_with(vec![
            vec![],
            vec![ControlEvent::Other],
            vec![ControlEvent::Restart],
        ]);
        assert!(matches!(session.await_restart(), ScreenExit::Continue));

        let (mut session, _) = session_with(vec![vec![ControlEvent::Quit]]);
        assert!(matches!(session.await_restart(), ScreenExit::Quit));
    }
}
