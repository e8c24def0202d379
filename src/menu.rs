use crate::input::MenuCommand;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuOutcome {
    Pending,
    Selected(usize),
    Quit,
}

/// A vertical list of choices with one highlighted entry.
#[derive(Clone, Debug)]
pub struct Menu {
    items: Vec<&'static str>,
    highlighted: usize,
}

impl Menu {
    pub fn new(items: Vec<&'static str>) -> Self {
        Menu { items, highlighted: 0 }
    }

    pub fn handle(&mut self, cmd: MenuCommand) -> MenuOutcome {
        let len = self.items.len();

        match cmd {
            MenuCommand::Previous => self.highlighted = (self.highlighted + len - 1) % len,
            MenuCommand::Next => self.highlighted = (self.highlighted + 1) % len,
            MenuCommand::Select => return MenuOutcome::Selected(self.highlighted),
            MenuCommand::Quit => return MenuOutcome::Quit,
        }

        MenuOutcome::Pending
    }

    /// Message lines with the highlighted entry framed.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![String::new()];

        for (i, item) in self.items.iter().enumerate() {
            if i == self.highlighted {
                lines.push(format!("[ {} ]", item));
            } else {
                lines.push(item.to_string());
            }
            lines.push(String::new());
        }

        lines
    }
}
