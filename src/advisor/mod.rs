// 打牌, 鳴きの判断を行うモジュール
pub mod availability;
pub mod call;
pub mod defense;
pub mod efficiency;
pub mod params;
pub mod priority;
pub mod review;
pub mod strategy;

use std::thread;

use log::info;

use crate::model::*;

pub use self::{
    call::{evaluate_call, CallEvaluation},
    defense::{DangerTable, Defense, NoDefense, OrderingPolicy, SafeFirst, ValueOrder},
    params::Params,
    priority::{rank_discard_candidates, TilePriority},
    review::{
        calc_safety_analysis, compare_discard, DiscardRecommendation, MoveComparison,
        MoveQuality, SafetyAnalysis,
    },
    strategy::{select_strategy, StrategyState},
};

// 打牌候補を評価して推奨打牌を決定
// 手牌が空の場合は推奨なし
pub fn recommend_discard(
    state: &TurnState,
    strategy: Strategy,
    params: &Params,
    defense: &dyn Defense,
    policy: &dyn OrderingPolicy,
) -> DiscardRecommendation {
    let priorities = rank_discard_candidates(state, strategy, params, defense, policy);
    let recommendation = priorities.first().cloned();
    if let Some(tp) = &recommendation {
        info!(
            "recommend {} (value={:.3}, shanten={})",
            tp.tile, tp.value, tp.hand_value.shanten
        );
    }
    let safety = calc_safety_analysis(&priorities, params);
    DiscardRecommendation {
        recommendation,
        priorities,
        safety,
    }
}

// 別スレッドで推奨打牌を計算
pub fn spawn_recommendation(
    state: TurnState,
    strategy: Strategy,
    params: Params,
    defense: Box<dyn Defense + Send>,
    policy: Box<dyn OrderingPolicy + Send>,
) -> thread::JoinHandle<DiscardRecommendation> {
    thread::spawn(move || recommend_discard(&state, strategy, &params, defense.as_ref(), policy.as_ref()))
}

#[test]
fn test_recommend_discard() {
    use crate::util::common::tiles_from_string;
    let st = TurnState::from_hand(tiles_from_string("1239p22456m44468s").unwrap()).unwrap();
    let rec = recommend_discard(&st, Strategy::General, &Params::default(), &NoDefense, &SafeFirst);
    assert_eq!(rec.recommendation.as_ref().map(|tp| tp.tile.tile), Some(Tile(TP, 9)));
    assert_eq!(rec.safety.safe_count, rec.priorities.len());

    let handle = spawn_recommendation(
        st.clone(),
        Strategy::General,
        Params::default(),
        Box::new(NoDefense),
        Box::new(SafeFirst),
    );
    assert_eq!(handle.join().unwrap(), rec);

    let st = TurnState::from_hand(vec![]).unwrap();
    let rec = recommend_discard(&st, Strategy::General, &Params::default(), &NoDefense, &SafeFirst);
    assert!(rec.recommendation.is_none());
}
