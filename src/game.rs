use std::{thread::sleep, time::{Duration, Instant}};

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::config::Config;
use crate::error::Result;
use crate::input::{self, GameCommand, KeyMap};
use crate::maze::Maze;
use crate::menu::{Menu, MenuOutcome};
use crate::playfield::{Difficulty, PlayerCount, Playfield};
use crate::scene::Sound;
use crate::stage::{Route, Stage};
use crate::term::TermManager;

const PAUSE_POLL_MS: u64 = 50;

/// Whether the player asked to leave.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct SnakeGame {
    config: Config,
    term: TermManager,
    players: Option<PlayerCount>,
    difficulty: Option<Difficulty>,
    playfield: Option<Playfield<StdRng>>,
}

impl SnakeGame {
    pub fn new(config: Config) -> Result<Self> {
        let term = TermManager::new(config.scale)?;
        let players = config.players;
        let difficulty = config.difficulty;
        Ok(SnakeGame { config, term, players, difficulty, playfield: None })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.place_grid(&self.config.grid)?;
        self.term.setup()
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.term.restore()
    }

    pub fn run(&mut self) -> Result<()> {
        let route = Route {
            last_level: self.config.levels,
            players_chosen: self.players.is_some(),
            difficulty_chosen: self.difficulty.is_some(),
        };
        let mut stage = Stage::Intro;

        loop {
            debug!("entering {:?}", stage);

            let flow = match stage {
                Stage::Intro => self.intro()?,
                Stage::PlayersMenu => self.players_menu()?,
                Stage::DifficultyMenu => self.difficulty_menu()?,
                Stage::LevelPlay(level) => self.play_level(level)?,
                Stage::LevelOutro(level) => self.level_outro(level, stage.is_last_outro(&route))?,
                Stage::GameComplete => {
                    info!("all {} levels done", self.config.levels);
                    return Ok(());
                },
            };

            if flow == Flow::Quit {
                info!("player quit during {:?}", stage);
                return Ok(());
            }
            stage = stage.next(&route);
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn intro(&mut self) -> Result<Flow> {
        self.term.clear()?;
        self.term.play(Sound::Intro)?;
        self.term.show_message(&[
            "",
            "S N A K E",
            "",
            "Control: arrow keys or WASD",
            "Pause: P",
            "Quit: Esc",
            "",
        ])?;

        let flow = self.linger(self.config.intro_duration())?;
        self.term.hide_message()?;
        Ok(flow)
    }

    fn players_menu(&mut self) -> Result<Flow> {
        let items = PlayerCount::ALL.iter().map(|p| p.label()).collect();
        match self.run_menu(Menu::new(items))? {
            Some(i) => {
                self.players = Some(PlayerCount::ALL[i]);
                info!("players: {:?}", PlayerCount::ALL[i]);
                Ok(Flow::Continue)
            },
            None => Ok(Flow::Quit),
        }
    }

    fn difficulty_menu(&mut self) -> Result<Flow> {
        let items = Difficulty::ALL.iter().map(|d| d.label()).collect();
        match self.run_menu(Menu::new(items))? {
            Some(i) => {
                self.difficulty = Some(Difficulty::ALL[i]);
                info!("difficulty: {:?}, {} points per level", Difficulty::ALL[i], Difficulty::ALL[i].threshold());
                Ok(Flow::Continue)
            },
            None => Ok(Flow::Quit),
        }
    }

    fn run_menu(&mut self, mut menu: Menu) -> Result<Option<usize>> {
        loop {
            self.term.show_message(&menu.lines())?;

            let cmd = match input::menu_command(&self.term.read_key_blocking()?) {
                Some(cmd) => cmd,
                None => continue,
            };

            match menu.handle(cmd) {
                MenuOutcome::Pending => {},
                MenuOutcome::Selected(i) => {
                    self.term.hide_message()?;
                    self.term.play(Sound::Menu)?;
                    return Ok(Some(i));
                },
                MenuOutcome::Quit => return Ok(None),
            }
        }
    }

    fn play_level(&mut self, level: u32) -> Result<Flow> {
        let players = self.players.unwrap_or(PlayerCount::One);
        let difficulty = self.difficulty.unwrap_or(Difficulty::Easy);
        let keys = KeyMap::new(players);
        let grid = self.config.grid;

        let maze = Maze::load(&self.config.maze_dir, level, &grid)?;
        let config = &self.config;
        let playfield = self.playfield.get_or_insert_with(|| {
            let rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Playfield::new(grid, players, difficulty, config.donut_lifetime(), rng)
        });
        playfield.start_level(level, maze)?;

        self.term.clear()?;
        let mut first_frame = true;

        while !playfield.is_complete() {
            let frame_start = Instant::now();

            for key_ev in self.term.read_key_events_queue()? {
                match keys.game_command(&key_ev) {
                    Some(GameCommand::Quit) => return Ok(Flow::Quit),
                    Some(GameCommand::Pause) => {
                        playfield.toggle_pause();
                        if playfield.is_paused() {
                            self.term.show_message(&["", "Game paused", "", "P to continue", ""])?;
                        } else {
                            self.term.hide_message()?;
                        }
                    },
                    Some(GameCommand::Turn(player, dir)) => playfield.queue_turn(player, dir),
                    None => {},
                }
            }

            if playfield.is_paused() {
                sleep(Duration::from_millis(PAUSE_POLL_MS));
                continue;
            }

            let sounds = playfield.tick()?;
            self.term.draw_scene(&playfield.scene(), &grid)?;
            for sound in sounds {
                self.term.play(sound)?;
            }

            let frame = if first_frame {
                first_frame = false;
                self.config.first_frame()
            } else {
                self.term.play(Sound::Tick)?;
                self.config.frame()
            };
            sleep(frame.saturating_sub(frame_start.elapsed()));
        }

        info!("level {} done with {} points", level, playfield.score());
        Ok(Flow::Continue)
    }

    fn level_outro(&mut self, level: u32, last_level: bool) -> Result<Flow> {
        self.term.play(Sound::LevelComplete)?;

        let title = if last_level {
            "You made it! :)".to_string()
        } else {
            format!("Level {} done! :)", level)
        };
        self.term.show_message(&["".to_string(), title, "".to_string()])?;

        let flow = self.linger(self.config.outro_duration(last_level))?;
        self.term.hide_message()?;
        Ok(flow)
    }

    /// Keeps the current screen up for `duration`, listening only for quit.
    fn linger(&mut self, duration: Duration) -> Result<Flow> {
        let deadline = Instant::now() + duration;

        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if left == Duration::ZERO {
                return Ok(Flow::Continue);
            }
            if let Some(key_ev) = self.term.read_key_timeout(left)? {
                if input::menu_command(&key_ev) == Some(input::MenuCommand::Quit) {
                    return Ok(Flow::Quit);
                }
            }
        }
    }
}
