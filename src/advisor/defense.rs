use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::priority::TilePriority;
use crate::model::*;

// 他家への放銃危険度の推定 (外部実装)
pub trait Defense {
    // 打牌の危険度 (0以上, 大きいほど危険)
    fn danger(&self, tile: &HandTile) -> f64;

    // 打牌を避けるべきか (ベタオリ判定)
    fn should_fold(&self, _tile: &HandTile) -> bool {
        false
    }
}

// 危険度を考慮しない
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefense;

impl Defense for NoDefense {
    fn danger(&self, _tile: &HandTile) -> f64 {
        0.0
    }
}

// 牌の種類ごとの危険度表
// fold_dangerを超える牌はベタオリ対象
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DangerTable {
    pub danger: BTreeMap<Tile, f64>,
    pub fold_danger: Option<f64>,
}

impl DangerTable {
    pub fn from_json(s: &str) -> AdvisorResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn set(&mut self, tile: Tile, danger: f64) {
        self.danger.insert(tile, danger);
    }
}

impl Defense for DangerTable {
    fn danger(&self, tile: &HandTile) -> f64 {
        self.danger.get(&tile.tile).copied().unwrap_or(0.0)
    }

    fn should_fold(&self, tile: &HandTile) -> bool {
        match self.fold_danger {
            Some(th) => self.danger(tile) > th,
            None => false,
        }
    }
}

// 評価済みの打牌候補の並び順
pub trait OrderingPolicy {
    fn order(&self, priorities: Vec<TilePriority>, defense: &dyn Defense) -> Vec<TilePriority>;
}

fn sort_by_value(tps: &mut [TilePriority]) {
    tps.sort_by(|a, b| a.value.total_cmp(&b.value));
}

// ベタオリ対象でない牌を先に,それぞれを評価値の昇順に並べる
// 危険度の大小に関わらずベタオリ対象の牌は後ろになる
#[derive(Debug, Clone, Copy, Default)]
pub struct SafeFirst;

impl OrderingPolicy for SafeFirst {
    fn order(&self, priorities: Vec<TilePriority>, defense: &dyn Defense) -> Vec<TilePriority> {
        let (mut safe, mut fold): (Vec<_>, Vec<_>) = priorities
            .into_iter()
            .partition(|tp| !defense.should_fold(&tp.tile));
        sort_by_value(&mut safe);
        sort_by_value(&mut fold);
        safe.append(&mut fold);
        safe
    }
}

// 評価値の昇順のみ
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueOrder;

impl OrderingPolicy for ValueOrder {
    fn order(&self, mut priorities: Vec<TilePriority>, _defense: &dyn Defense) -> Vec<TilePriority> {
        sort_by_value(&mut priorities);
        priorities
    }
}

#[test]
fn test_danger_table() {
    let dt = DangerTable::from_json(r#"{"danger": {"5m": 2500.0, "1z": 100.0}, "fold_danger": 2000.0}"#)
        .unwrap();
    let t5m = HandTile::from_symbol("0m").unwrap();
    assert_eq!(dt.danger(&t5m), 2500.0);
    assert!(dt.should_fold(&t5m));
    assert!(!dt.should_fold(&HandTile::from_symbol("1z").unwrap()));
    assert_eq!(dt.danger(&HandTile::from_symbol("9s").unwrap()), 0.0);

    let mut dt = DangerTable::default();
    dt.set(Tile(TP, 1), 3000.0);
    assert!(!dt.should_fold(&HandTile::from_symbol("1p").unwrap()));
    assert!(!NoDefense.should_fold(&t5m));
}
