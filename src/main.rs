use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;
use std::time::{Duration, Instant};

mod apple;
mod config;
mod grid;
mod head;
mod input;
mod sim;
mod tail;
mod terminal;

use config::{Settings, FRAME_RATE, LOG_FILE};
use input::PressedKeys;
use sim::Simulation;
use terminal::{command_for, Command, Hud};

fn main() -> Result<(), io::Error> {
    // Set up logging before anything else
    WriteLogger::init(LevelFilter::Info, Config::default(), File::create(LOG_FILE)?)
        .expect("Failed to initialize logger");

    info!("Starting gridsnake");

    let settings = Settings::from_args(std::env::args().skip(1));
    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(e);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, settings);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("Exiting on error: {}", e);
    }
    result
}

fn new_game(settings: Settings, rng: &mut impl rand::Rng) -> Result<Simulation, io::Error> {
    Simulation::new(settings, Instant::now(), rng)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

fn run<B: Backend>(terminal: &mut Terminal<B>, settings: Settings) -> Result<(), io::Error> {
    let mut rng = rand::thread_rng();
    let mut game = new_game(settings, &mut rng)?;
    let mut hud = Hud::default();
    let mut keys = PressedKeys::default();

    loop {
        terminal.draw(|f| hud.render(f, &game))?;

        // Collect everything pressed since the last frame
        keys.clear();
        let mut timeout = FRAME_RATE;
        while event::poll(timeout)? {
            timeout = Duration::ZERO;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match command_for(key) {
                Some(Command::Steer(direction)) => keys.press(direction),
                Some(Command::TogglePause) => {
                    let phase = game.toggle_pause(Instant::now(), &mut hud);
                    info!("Pause toggled, now {:?}", phase);
                }
                Some(Command::Restart) if game.state().phase.is_over() => {
                    game = new_game(settings, &mut rng)?;
                    hud = Hud::default();
                }
                Some(Command::Quit) => {
                    info!("Quitting with score {}", game.state().score);
                    return Ok(());
                }
                _ => {}
            }
        }

        game.tick(Instant::now(), &keys, &mut rng, &mut hud);
    }
}
