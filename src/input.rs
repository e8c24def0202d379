use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::grid::Direction::{self, *};
use crate::playfield::PlayerCount;
use crate::snake::Player;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Turn(Player, Direction),
    Pause,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuCommand {
    Previous,
    Next,
    Select,
    Quit,
}

/// Arrow keys steer player one, WASD player two. With a single player
/// both sets drive the same snake.
#[derive(Copy, Clone, Debug)]
pub struct KeyMap {
    players: PlayerCount,
}

impl KeyMap {
    pub fn new(players: PlayerCount) -> Self {
        KeyMap { players }
    }

    pub fn game_command(&self, ev: &KeyEvent) -> Option<GameCommand> {
        if is_ctrl_c(ev) {
            return Some(GameCommand::Quit);
        }

        let wasd_player = match self.players {
            PlayerCount::One => Player::One,
            PlayerCount::Two => Player::Two,
        };

        let cmd = match ev.code {
            KeyCode::Up => GameCommand::Turn(Player::One, Up),
            KeyCode::Down => GameCommand::Turn(Player::One, Down),
            KeyCode::Left => GameCommand::Turn(Player::One, Left),
            KeyCode::Right => GameCommand::Turn(Player::One, Right),
            KeyCode::Esc => GameCommand::Quit,
            KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
                'w' => GameCommand::Turn(wasd_player, Up),
                's' => GameCommand::Turn(wasd_player, Down),
                'a' => GameCommand::Turn(wasd_player, Left),
                'd' => GameCommand::Turn(wasd_player, Right),
                'p' => GameCommand::Pause,
                _ => return None,
            },
            _ => return None,
        };

        Some(cmd)
    }
}

pub fn menu_command(ev: &KeyEvent) -> Option<MenuCommand> {
    if is_ctrl_c(ev) {
        return Some(MenuCommand::Quit);
    }

    match ev.code {
        KeyCode::Up => Some(MenuCommand::Previous),
        KeyCode::Down => Some(MenuCommand::Next),
        KeyCode::Enter => Some(MenuCommand::Select),
        KeyCode::Esc => Some(MenuCommand::Quit),
        KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
            'w' => Some(MenuCommand::Previous),
            's' => Some(MenuCommand::Next),
            ' ' => Some(MenuCommand::Select),
            _ => None,
        },
        _ => None,
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers } if modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn single_player_takes_both_key_sets() {
        let keys = KeyMap::new(PlayerCount::One);

        assert_eq!(keys.game_command(&key(KeyCode::Left)), Some(GameCommand::Turn(Player::One, Left)));
        assert_eq!(keys.game_command(&key(KeyCode::Char('w'))), Some(GameCommand::Turn(Player::One, Up)));
        assert_eq!(keys.game_command(&key(KeyCode::Char('D'))), Some(GameCommand::Turn(Player::One, Right)));
    }

    #[test]
    fn two_players_split_the_keyboard() {
        let keys = KeyMap::new(PlayerCount::Two);

        assert_eq!(keys.game_command(&key(KeyCode::Down)), Some(GameCommand::Turn(Player::One, Down)));
        assert_eq!(keys.game_command(&key(KeyCode::Char('a'))), Some(GameCommand::Turn(Player::Two, Left)));
        assert_eq!(keys.game_command(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn pause_and_quit() {
        let keys = KeyMap::new(PlayerCount::One);

        assert_eq!(keys.game_command(&key(KeyCode::Char('p'))), Some(GameCommand::Pause));
        assert_eq!(keys.game_command(&key(KeyCode::Esc)), Some(GameCommand::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(keys.game_command(&ctrl_c), Some(GameCommand::Quit));
        assert_eq!(menu_command(&ctrl_c), Some(MenuCommand::Quit));
    }

    #[test]
    fn menu_keys() {
        assert_eq!(menu_command(&key(KeyCode::Char('s'))), Some(MenuCommand::Next));
        assert_eq!(menu_command(&key(KeyCode::Up)), Some(MenuCommand::Previous));
        assert_eq!(menu_command(&key(KeyCode::Char(' '))), Some(MenuCommand::Select));
        assert_eq!(menu_command(&key(KeyCode::Enter)), Some(MenuCommand::Select));
        assert_eq!(menu_command(&key(KeyCode::Char('q'))), None);
    }
}
