use serde::Deserialize;

pub const RANDOM_BATTLE: i64 = 1;
pub const GRAND_BATTLE: i64 = 24;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BattleResult {
    #[serde(default)]
    pub common: BattleCommon,
    #[serde(default)]
    pub personal: PersonalResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleCommon {
    #[serde(default)]
    pub bonus_type: Option<i64>,
    #[serde(default)]
    pub winner_team: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonalResult {
    #[serde(default)]
    pub avatar: AvatarResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvatarResult {
    #[serde(default)]
    pub team: Option<i64>,
}

pub fn is_random_battle(result: &BattleResult) -> bool {
    matches!(
        result.common.bonus_type,
        Some(RANDOM_BATTLE) | Some(GRAND_BATTLE)
    )
}

pub fn is_victory(result: &BattleResult) -> bool {
    match (result.personal.avatar.team, result.common.winner_team) {
        (Some(team), Some(winner)) => team == winner,
        // A missing team on either side is never counted as a win.
        _ => false,
    }
}
