/// The screens the game walks through, start to finish.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Intro,
    PlayersMenu,
    DifficultyMenu,
    LevelPlay(u32),
    LevelOutro(u32),
    GameComplete,
}

/// What decides the route through the stages.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub last_level: u32,
    pub players_chosen: bool,
    pub difficulty_chosen: bool,
}

impl Stage {
    pub fn next(self, route: &Route) -> Stage {
        use Stage::*;

        match self {
            Intro if !route.players_chosen => PlayersMenu,
            Intro | PlayersMenu if !route.difficulty_chosen => DifficultyMenu,
            Intro | PlayersMenu | DifficultyMenu => LevelPlay(1),
            LevelPlay(level) => LevelOutro(level),
            LevelOutro(level) if level < route.last_level => LevelPlay(level + 1),
            LevelOutro(_) | GameComplete => GameComplete,
        }
    }

    pub fn is_last_outro(self, route: &Route) -> bool {
        matches!(self, Stage::LevelOutro(level) if level >= route.last_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Stage::*;
    use pretty_assertions::assert_eq;

    fn walk(route: Route) -> Vec<Stage> {
        let mut stages = vec![Intro];
        while *stages.last().unwrap() != GameComplete {
            let next = stages.last().unwrap().next(&route);
            stages.push(next);
        }
        stages
    }

    #[test]
    fn full_route_with_menus() {
        let route = Route { last_level: 2, players_chosen: false, difficulty_chosen: false };

        assert_eq!(walk(route), vec![
            Intro,
            PlayersMenu,
            DifficultyMenu,
            LevelPlay(1),
            LevelOutro(1),
            LevelPlay(2),
            LevelOutro(2),
            GameComplete,
        ]);
    }

    #[test]
    fn preset_choices_skip_menus() {
        let route = Route { last_level: 1, players_chosen: true, difficulty_chosen: false };
        assert_eq!(walk(route), vec![Intro, DifficultyMenu, LevelPlay(1), LevelOutro(1), GameComplete]);

        let route = Route { last_level: 1, players_chosen: false, difficulty_chosen: true };
        assert_eq!(walk(route), vec![Intro, PlayersMenu, LevelPlay(1), LevelOutro(1), GameComplete]);

        let route = Route { last_level: 1, players_chosen: true, difficulty_chosen: true };
        assert_eq!(walk(route), vec![Intro, LevelPlay(1), LevelOutro(1), GameComplete]);
    }

    #[test]
    fn five_levels_then_done() {
        let route = Route { last_level: 5, players_chosen: true, difficulty_chosen: true };
        let levels: Vec<_> = walk(route).into_iter().filter(|s| matches!(s, LevelPlay(_))).collect();

        assert_eq!(levels, (1..=5).map(LevelPlay).collect::<Vec<_>>());
        assert!(LevelOutro(5).is_last_outro(&route));
        assert!(!LevelOutro(4).is_last_outro(&route));
    }
}
