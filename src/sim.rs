use std::time::Instant;

use log::{debug, info};
use rand::Rng;

use crate::apple::{Apple, GridFull};
use crate::config::{tick_interval, Settings, POINTS_PER_SPEED_UP};
use crate::grid::{Direction, Grid, Movable, Position};
use crate::head::Head;
use crate::input::KeyInput;
use crate::tail::Tail;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Won,
    Lost,
}

impl Phase {
    pub fn is_over(&self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameState {
    pub score: u32,
    pub speed: u32,
    pub phase: Phase,
}

impl GameState {
    fn new(speed: u32) -> Self {
        GameState {
            score: 0,
            speed,
            phase: Phase::Running,
        }
    }
}

#[derive(Debug)]
pub struct Snapshot<'a> {
    pub head: Position,
    pub tail: &'a [Position],
    pub apple: Position,
}

/// Receives everything the player should see. All methods default to no-ops.
pub trait UiSink {
    fn score_changed(&mut self, _score: u32) {}
    fn phase_changed(&mut self, _phase: Phase) {}
    fn positions_changed(&mut self, _snapshot: &Snapshot<'_>) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,     // Not running, nothing happens
    Waiting,  // Input sampled, move not due yet
    Moved,    // Normal movement, no special events
    Ate(u32), // Ate the apple, with the new score
    Won,      // Grid filled up
    Lost,     // Head ran into the tail
}

#[derive(Debug)]
pub struct Simulation {
    grid: Grid,
    head: Head,
    tail: Tail,
    apple: Apple,
    state: GameState,
    next_tick: Instant,
}

impl Simulation {
    /// Head at the origin facing up, no tail, apple on a random free cell.
    pub fn new(settings: Settings, now: Instant, rng: &mut impl Rng) -> Result<Self, GridFull> {
        let grid = Grid::new(settings.plane_scale);
        let head = Head::new(Position::default(), Direction::Up);
        let tail = Tail::default();
        let apple = Apple::spawn(&grid, &head, &tail, rng)?;
        Ok(Self::from_parts(settings, head, tail, apple, now))
    }

    pub fn from_parts(settings: Settings, head: Head, tail: Tail, apple: Apple, now: Instant) -> Self {
        info!(
            "New game on a {0}x{0} grid at speed {1}",
            settings.plane_scale, settings.initial_speed
        );
        Simulation {
            grid: Grid::new(settings.plane_scale),
            head,
            tail,
            apple,
            state: GameState::new(settings.initial_speed),
            next_tick: now + tick_interval(settings.initial_speed),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    pub fn tail(&self) -> &Tail {
        &self.tail
    }

    pub fn apple(&self) -> &Apple {
        &self.apple
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn next_tick(&self) -> Instant {
        self.next_tick
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            head: self.head.position(),
            tail: self.tail.segments(),
            apple: self.apple.position(),
        }
    }

    /// Called once per frame. Input is sampled every frame; the snake only
    /// moves once the deadline has passed.
    pub fn tick(
        &mut self,
        now: Instant,
        input: &impl KeyInput,
        rng: &mut impl Rng,
        ui: &mut impl UiSink,
    ) -> TickOutcome {
        if self.state.phase != Phase::Running {
            return TickOutcome::Idle;
        }

        self.head.record_input(input);

        if now <= self.next_tick {
            return TickOutcome::Waiting;
        }

        let score_before = self.state.score;
        let outcome = self.advance(rng);

        if self.state.score != score_before {
            ui.score_changed(self.state.score);
        }
        ui.positions_changed(&self.snapshot());

        match outcome {
            TickOutcome::Won => self.finish(Phase::Won, ui),
            TickOutcome::Lost => self.finish(Phase::Lost, ui),
            _ => self.next_tick = now + tick_interval(self.state.speed),
        }

        outcome
    }

    /// Flips between running and paused. Finished games stay finished.
    pub fn toggle_pause(&mut self, now: Instant, ui: &mut impl UiSink) -> Phase {
        match self.state.phase {
            Phase::Running => {
                self.state.phase = Phase::Paused;
                ui.phase_changed(Phase::Paused);
            }
            Phase::Paused => {
                self.state.phase = Phase::Running;
                self.next_tick = now + tick_interval(self.state.speed);
                ui.phase_changed(Phase::Running);
            }
            Phase::Won | Phase::Lost => {}
        }
        self.state.phase
    }

    fn advance(&mut self, rng: &mut impl Rng) -> TickOutcome {
        // Head first: the tail follows into the cell the head just left.
        // Nothing is ahead of the head, so the seed is never read.
        let mut vacated = self.head.position();
        let movables: [&mut dyn Movable; 2] = [&mut self.head, &mut self.tail];
        for movable in movables {
            vacated = movable.step(vacated);
        }

        let head = self.head.position();
        if !self.grid.contains(head) {
            debug!("Head left the grid at {:?}", head);
        }

        let ate = head == self.apple.position();
        if ate {
            self.state.score += 1;
            self.tail.add_cell();
            if let Err(e) = self.apple.relocate(&self.grid, &self.head, &self.tail, rng) {
                info!("Won with score {}: {}", self.state.score, e);
                return TickOutcome::Won;
            }
            if self.state.score % POINTS_PER_SPEED_UP == 0 {
                self.state.speed = self.state.speed.saturating_add(1);
                info!("Speed up to {}", self.state.speed);
            }
            debug!("Ate apple, score {}", self.state.score);
        }

        if self.tail.contains(head) {
            info!("Lost with score {}: head hit tail at {:?}", self.state.score, head);
            return TickOutcome::Lost;
        }

        if ate {
            TickOutcome::Ate(self.state.score)
        } else {
            TickOutcome::Moved
        }
    }

    fn finish(&mut self, phase: Phase, ui: &mut impl UiSink) {
        self.state.phase = phase;
        ui.phase_changed(phase);
    }
}
