use serde::Serialize;

use super::params::Params;
use super::priority::TilePriority;
use crate::model::*;

// 推奨打牌と評価一覧
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscardRecommendation {
    pub recommendation: Option<TilePriority>,
    pub priorities: Vec<TilePriority>,
    pub safety: SafetyAnalysis,
}

// 打牌候補全体の安全度
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyAnalysis {
    pub safe_count: usize,
    pub dangerous_count: usize,
    pub average_danger: f64,
    pub suggest_defense: bool,
}

pub fn calc_safety_analysis(priorities: &[TilePriority], params: &Params) -> SafetyAnalysis {
    let safe_count = priorities
        .iter()
        .filter(|tp| tp.danger < params.safe_danger)
        .count();
    let dangerous_count = priorities
        .iter()
        .filter(|tp| tp.danger > params.high_danger)
        .count();
    let average_danger = if priorities.is_empty() {
        0.0
    } else {
        priorities.iter().map(|tp| tp.danger).sum::<f64>() / priorities.len() as f64
    };

    SafetyAnalysis {
        safe_count,
        dangerous_count,
        average_danger,
        suggest_defense: dangerous_count > safe_count,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveQuality {
    Optimal,
    Good,
    Acceptable,
    Suboptimal,
    Unknown,
}

// 実際の打牌と推奨打牌の比較
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveComparison {
    pub is_same: bool,
    pub player_rank: Option<usize>, // 1始まり
    pub priority_difference: f64,   // 推奨打牌の評価値 - 実際の打牌の評価値
    pub quality: MoveQuality,
}

// 牌の比較はドラ枚数まで一致するもの (赤牌と通常の牌は区別する)
pub fn compare_discard(priorities: &[TilePriority], player_tile: &HandTile) -> MoveComparison {
    let is_same = priorities
        .first()
        .map_or(false, |tp| tp.tile.is_same_strict(player_tile));
    let pos = priorities.iter().position(|tp| tp.tile.is_same_strict(player_tile));
    let priority_difference = match pos {
        Some(i) => priorities[0].value - priorities[i].value,
        None => 0.0,
    };
    let player_rank = pos.map(|i| i + 1);

    let quality = match player_rank {
        _ if is_same => MoveQuality::Optimal,
        None => MoveQuality::Unknown,
        Some(r) if r <= 2 => MoveQuality::Good,
        Some(r) if r <= 5 => MoveQuality::Acceptable,
        Some(_) => MoveQuality::Suboptimal,
    };

    MoveComparison {
        is_same,
        player_rank,
        priority_difference,
        quality,
    }
}

#[cfg(test)]
fn priority(sym: &str, value: f64, danger: f64) -> TilePriority {
    use crate::hand::evaluate_hand;
    let tile = HandTile::from_symbol(sym).unwrap();
    let st = TurnState::from_hand(vec![tile]).unwrap();
    TilePriority {
        tile,
        efficiency: 0.0,
        danger,
        hand_value: evaluate_hand(&st, &[], Strategy::General),
        value,
        explanation: String::new(),
    }
}

#[test]
fn test_compare_discard() {
    let tps: Vec<TilePriority> = ["9p", "1m", "5m", "0p", "7z", "3s", "4s"]
        .iter()
        .enumerate()
        .map(|(i, s)| priority(s, i as f64, 0.0))
        .collect();

    let c = compare_discard(&tps, &HandTile::from_symbol("9p").unwrap());
    assert_eq!((c.is_same, c.player_rank, c.quality), (true, Some(1), MoveQuality::Optimal));

    let c = compare_discard(&tps, &HandTile::from_symbol("1m").unwrap());
    assert_eq!(c.quality, MoveQuality::Good);
    assert_eq!(c.priority_difference, -1.0);

    let c = compare_discard(&tps, &HandTile::from_symbol("0p").unwrap());
    assert_eq!((c.player_rank, c.quality), (Some(4), MoveQuality::Acceptable));
    // 赤牌でない5pは評価一覧にない
    let c = compare_discard(&tps, &HandTile::from_symbol("5p").unwrap());
    assert_eq!((c.player_rank, c.quality), (None, MoveQuality::Unknown));

    let c = compare_discard(&tps, &HandTile::from_symbol("4s").unwrap());
    assert_eq!(c.quality, MoveQuality::Suboptimal);

    let c = compare_discard(&[], &HandTile::from_symbol("4s").unwrap());
    assert_eq!(c.quality, MoveQuality::Unknown);
}

#[test]
fn test_safety_analysis() {
    let params = Params::default();
    let tps = vec![
        priority("1m", 0.0, 100.0),
        priority("2m", 0.0, 2500.0),
        priority("3m", 0.0, 3000.0),
        priority("4m", 0.0, 1000.0),
    ];
    let sa = calc_safety_analysis(&tps, &params);
    assert_eq!((sa.safe_count, sa.dangerous_count), (1, 2));
    assert_eq!(sa.average_danger, 1650.0);
    assert!(sa.suggest_defense);

    let sa = calc_safety_analysis(&[], &params);
    assert_eq!(sa.average_danger, 0.0);
    assert!(!sa.suggest_defense);
}
