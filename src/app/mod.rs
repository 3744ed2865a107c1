// mainから直接呼び出すアプリケーションの動作モード(C, A, K)のモジュール

mod advisor;
mod calculator;

pub use advisor::{AdvisorApp, CallApp};
pub use calculator::CalculatorApp;

use crate::model::*;
use crate::util::common::*;
use crate::util::misc::Res;

// 局面の表記 "手牌[,副露...]/<場風><自風>[,ドラ表示牌]"
// 例: "123m456p789s1z,777z/ES,1m"
// 2つ目のブロックは省略可能 (東場の東家)
pub(crate) fn parse_state_expression(exp: &str) -> Res<TurnState> {
    let exp = exp.replace(' ', "");
    let exps: Vec<&str> = exp.split('/').collect();
    if exps.len() > 2 {
        Err(format!("too many blocks: {}", exp))?;
    }

    let mut data = TurnStateData::default();
    let mut it = exps[0].split(',');
    if let Some(h) = it.next() {
        data.hand = tiles_from_string(h)?;
    }
    for m in it {
        data.melds[0].push(meld_from_string(m)?);
    }

    if let Some(info) = exps.get(1) {
        let mut it = info.split(',');
        let winds: Vec<char> = it.next().unwrap_or("").chars().collect();
        if winds.len() != 2 {
            Err(format!("invalid wind info: {}", info))?;
        }
        data.prevalent_wind = wind_from_char(winds[0])?;
        data.seat_wind = wind_from_char(winds[1])?;
        for d in it {
            data.doras.extend(tiles_from_string(d)?.iter().map(|t| t.tile));
        }
    }

    Ok(TurnState::new(data)?)
}

#[test]
fn test_parse_state_expression() {
    let st = parse_state_expression("123m456p789s1z,777z/ES,1m").unwrap();
    assert_eq!(st.hand().len(), 10);
    assert_eq!(st.own_melds().len(), 1);
    assert_eq!((st.prevalent_wind(), st.seat_wind()), (WE, WS));
    assert_eq!(st.doras(), &[Tile(TM, 1)]);
    assert!(!st.is_closed());
    // ドラ(2m)の枚数
    assert_eq!(st.hand().iter().map(|t| t.dora).sum::<usize>(), 1);

    let st = parse_state_expression("1239p22456m44468s").unwrap();
    assert!(st.is_dealer());

    assert!(parse_state_expression("1239p22456m44468s/E").is_err());
    assert!(parse_state_expression("1239p22456m44468s/EE/x/y").is_err());
    assert!(parse_state_expression("11111m").is_err());
}
