use rand::prelude::*;

use mahjong_advisor::advisor::*;
use mahjong_advisor::hand::*;
use mahjong_advisor::model::*;
use mahjong_advisor::util::common::*;

fn state(exp: &str) -> TurnState {
    TurnState::from_hand(tiles_from_string(exp).unwrap()).unwrap()
}

fn all_tiles() -> Vec<HandTile> {
    let mut tiles = vec![];
    for t in tile_kinds() {
        for _ in 0..TILE {
            tiles.push(HandTile::new(t));
        }
    }
    tiles
}

fn random_hand(rng: &mut StdRng) -> Vec<HandTile> {
    let mut tiles = all_tiles();
    tiles.shuffle(rng);
    tiles.truncate(14);
    tiles
}

#[test]
fn test_recommend_edge_wait() {
    let st = state("1239p22456m44468s");
    let strategy = select_strategy(st.hand(), st.is_closed());
    assert_eq!(strategy, Strategy::General);

    let rec = recommend_discard(&st, strategy, &Params::default(), &NoDefense, &SafeFirst);
    let top = rec.recommendation.unwrap();
    assert_eq!(top.tile, HandTile::from_symbol("9p").unwrap());
    assert_eq!(top.hand_value.shanten, 0);
    assert_eq!(top.hand_value.waits, vec![Tile(TS, 7)]);
    assert!(!rec.safety.suggest_defense);
}

#[test]
fn test_select_chiitoitsu() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut kinds: Vec<Tile> = tile_kinds().collect();
    for _ in 0..100 {
        kinds.shuffle(&mut rng);
        // 6対子 + 2枚
        let mut hand = vec![];
        for &t in &kinds[..6] {
            hand.push(HandTile::new(t));
            hand.push(HandTile::new(t));
        }
        hand.push(HandTile::new(kinds[6]));
        hand.push(HandTile::new(kinds[7]));
        hand.shuffle(&mut rng);

        assert_eq!(select_strategy(&hand, true), Strategy::Chiitoitsu);
        assert_ne!(select_strategy(&hand, false), Strategy::Chiitoitsu);
    }
}

#[test]
fn test_select_thirteen_orphans() {
    let mut rng = StdRng::seed_from_u64(2);
    let simples: Vec<Tile> = tile_kinds().filter(|t| t.is_simple()).collect();
    for _ in 0..100 {
        let mut yaochuu = YAOCHUU.to_vec();
        yaochuu.shuffle(&mut rng);
        let mut hand: Vec<HandTile> = yaochuu[..10].iter().map(|&t| HandTile::new(t)).collect();
        for _ in 0..4 {
            if let Some(&t) = simples.choose(&mut rng) {
                hand.push(HandTile::new(t));
            }
        }
        assert_eq!(select_strategy(&hand, true), Strategy::ThirteenOrphans);
    }
}

#[test]
fn test_idempotence() {
    let mut rng = StdRng::seed_from_u64(3);
    let params = Params::default();
    for _ in 0..20 {
        let st = TurnState::from_hand(random_hand(&mut rng)).unwrap();
        let strategy = select_strategy(st.hand(), true);

        let a = recommend_discard(&st, strategy, &params, &NoDefense, &SafeFirst);
        let b = recommend_discard(&st, strategy, &params, &NoDefense, &SafeFirst);
        assert_eq!(a, b);

        let a = evaluate_hand(&st, st.hand(), strategy);
        let b = evaluate_hand(&st, st.hand(), strategy);
        assert_eq!(a, b);
    }
}

#[test]
fn test_ranking_order() {
    let mut rng = StdRng::seed_from_u64(4);
    let params = Params::default();
    for _ in 0..20 {
        let st = TurnState::from_hand(random_hand(&mut rng)).unwrap();
        let mut dt = DangerTable {
            fold_danger: Some(2000.0),
            ..Default::default()
        };
        for t in st.hand() {
            dt.set(t.tile, rng.gen_range(0.0..4000.0));
        }

        let rec = recommend_discard(&st, Strategy::General, &params, &dt, &SafeFirst);
        let tps = &rec.priorities;
        let n_safe = tps.iter().take_while(|tp| !dt.should_fold(&tp.tile)).count();
        // ベタオリ対象の牌はすべて後ろ
        assert!(tps[n_safe..].iter().all(|tp| dt.should_fold(&tp.tile)));
        assert!(tps[..n_safe].windows(2).all(|w| w[0].value <= w[1].value));
        assert!(tps[n_safe..].windows(2).all(|w| w[0].value <= w[1].value));
        assert_eq!(rec.recommendation.as_ref(), tps.first());

        let tps = rank_discard_candidates(&st, Strategy::General, &params, &dt, &ValueOrder);
        assert!(tps.windows(2).all(|w| w[0].value <= w[1].value));
    }
}

#[test]
fn test_decomposition_accounting() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..200 {
        let hand = random_hand(&mut rng);
        let tt = tiles_to_tile_table(&hand);
        let d = decompose(&tt, &[]);
        let consumed = 3 * d.sets.len() + 2 * d.pair.iter().count() + 2 * d.partials.len() + d.isolated.len();
        assert_eq!(consumed, hand.len());
        assert!(d.groups() <= 4);

        for strategy in [Strategy::General, Strategy::Chiitoitsu, Strategy::ThirteenOrphans] {
            let s = calc_shanten_by_strategy(&tt, &[], strategy);
            assert!((-1..=13).contains(&s));
        }
        let (g, p, t) = d.counts();
        assert!((-1..=8).contains(&calc_shanten(g, p, t)));
    }
}

#[test]
fn test_call_from_state_json() {
    let json = r#"{
        "hand": ["3m", "4m", "6m", "7m", "9m", "1p", "2p", "3p", "4p", "5p", "6p", "1z", "1z"],
        "doras": ["2m"],
        "discards": [[], ["5m"], [], []],
        "seat_wind": 2,
        "wall_count": 40
    }"#;
    let st = TurnState::from_json(json).unwrap();
    assert!(!st.is_dealer());
    let hv = evaluate_hand(&st, st.hand(), Strategy::General);
    assert_eq!(hv.shanten, 1);

    let combs: Vec<Vec<HandTile>> = ["3m|4m", "6m|7m"]
        .iter()
        .map(|e| combination_from_string(e).unwrap())
        .collect();
    let ev = evaluate_call(&st, &combs, &hv, true, &Params::default());
    assert!(ev.recommended);
    assert_eq!(ev.shanten, Some(0));
    // 3mはドラ
    assert_eq!(ev.dora_value, Some(1));
    assert_eq!(ev.best_combination, Some(combs[0].clone()));

    let ev = evaluate_call(&st, &combs, &hv, false, &Params::default());
    assert!(!ev.recommended);
}
