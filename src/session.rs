use crate::battle::{is_random_battle, is_victory, BattleResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionCounters {
    victories: u64,
    defeats: u64,
}

impl SessionCounters {
    pub fn record_result(&mut self, result: &BattleResult) -> Option<BattleOutcome> {
        if !is_random_battle(result) {
            return None;
        }
        if is_victory(result) {
            self.victories += 1;
            Some(BattleOutcome::Victory)
        } else {
            self.defeats += 1;
            Some(BattleOutcome::Defeat)
        }
    }

    pub fn victories(&self) -> u64 {
        self.victories
    }

    pub fn defeats(&self) -> u64 {
        self.defeats
    }

    pub fn total(&self) -> u64 {
        self.victories + self.defeats
    }

    // NaN until the first counted battle; the renderer tolerates it.
    pub fn win_rate(&self) -> f64 {
        self.victories as f64 / self.total() as f64
    }
}
