use log::info;
use serde::{Deserialize, Serialize};

use super::params::Params;
use crate::hand::decompose;
use crate::model::*;
use crate::util::common::{tiles_to_tile_table, YAOCHUU};

// 評価方針と鳴きの可否
// 手番ごとに一度だけ更新する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyState {
    pub strategy: Strategy,
    pub allows_calls: bool,
}

impl Default for StrategyState {
    fn default() -> Self {
        Self {
            strategy: Strategy::General,
            allows_calls: true,
        }
    }
}

impl StrategyState {
    // ベタオリへの移行は外部から行う
    pub fn fold(self) -> Self {
        Self {
            strategy: Strategy::Fold,
            ..self
        }
    }

    // 手牌の形から次の方針を決定
    // ベタオリ中は変更しない
    pub fn update(self, hand: &[HandTile], melds: &[Meld], is_closed: bool, params: &Params) -> Self {
        if self.strategy == Strategy::Fold {
            info!("strategy: {} (keep)", self.strategy);
            return self;
        }

        let tt = tiles_to_tile_table(hand);
        let pairs = count_pairs(&tt);
        let groups = decompose(&tt, melds).groups();

        let next = if (pairs >= 6 || (pairs >= params.chiitoitsu_pairs && groups < 2)) && is_closed {
            Self {
                strategy: Strategy::Chiitoitsu,
                allows_calls: false,
            }
        } else if count_yaochuu_kinds(&tt) >= params.thirteen_orphans_kinds {
            Self {
                strategy: Strategy::ThirteenOrphans,
                allows_calls: false,
            }
        } else {
            Self {
                strategy: Strategy::General,
                allows_calls: self.allows_calls || self.strategy.is_closed_only(),
            }
        };
        info!("strategy: {} -> {}", self.strategy, next.strategy);
        next
    }
}

// 対子の数 (暗刻, 4枚持ちも1つと数える)
fn count_pairs(tt: &TileTable) -> usize {
    tt.iter()
        .map(|tr| tr[1..].iter().filter(|&&n| n >= 2).count())
        .sum()
}

// 手牌にある么九牌の種類
fn count_yaochuu_kinds(tt: &TileTable) -> usize {
    YAOCHUU.iter().filter(|t| tt[t.0][t.1] > 0).count()
}

// 通常方針から手牌の形のみで方針を選択
pub fn select_strategy(hand: &[HandTile], is_closed: bool) -> Strategy {
    StrategyState::default()
        .update(hand, &[], is_closed, &Params::default())
        .strategy
}

#[cfg(test)]
fn hand(exp: &str) -> Vec<HandTile> {
    crate::util::common::tiles_from_string(exp).unwrap()
}

#[test]
fn test_select_strategy() {
    assert_eq!(select_strategy(&hand("1239p22456m44468s"), true), Strategy::General);
    // 6対子
    assert_eq!(select_strategy(&hand("1133m5577p2299s13z"), true), Strategy::Chiitoitsu);
    assert_eq!(select_strategy(&hand("1133m5577p2299s13z"), false), Strategy::General);
    // 5対子かつ面子1つ
    assert_eq!(select_strategy(&hand("1133m55p2299s1z567p"), true), Strategy::Chiitoitsu);
    // 么九牌10種
    assert_eq!(select_strategy(&hand("19m19p19s1234z55p89s"), true), Strategy::ThirteenOrphans);
}

#[test]
fn test_strategy_transition() {
    let params = Params::default();
    let chiitoi = hand("1133m5577p2299s13z");
    let general = hand("1239p22456m44468s");

    let st = StrategyState::default().update(&chiitoi, &[], true, &params);
    assert_eq!(st.strategy, Strategy::Chiitoitsu);
    assert!(!st.allows_calls);

    // 通常形に戻ると鳴きが可能になる
    let st = st.update(&general, &[], true, &params);
    assert_eq!(st, StrategyState::default());

    // ベタオリは外部からリセットされるまで維持
    let st = st.fold().update(&chiitoi, &[], true, &params);
    assert_eq!(st.strategy, Strategy::Fold);
}
