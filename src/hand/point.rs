use crate::model::{Point, Score};

pub type Points = (Point, Point, Point); // (ロンの支払い, ツモ・子の支払い, ツモ・親の支払い)

fn ceil(n: Point) -> Point {
    (n + 99) / 100 * 100
}

// 基本点 (役満, 13翻以上は符に関わらず8000)
fn calc_base_point(fu: usize, fan: usize, yakuman: bool) -> Point {
    if yakuman || fan >= 13 {
        return 8000;
    }
    if fan == 0 {
        return 0;
    }

    let base = fu * 2_usize.pow(fan as u32 + 2);
    (if base >= 2000 || fan >= 5 {
        match fan {
            0..=5 => 2000, // 満貫
            6..=7 => 3000,  // 跳満
            8..=10 => 4000, // 倍満
            _ => 6000,      // 三倍満
        }
    } else {
        base
    }) as Point
}

pub fn get_score_title(fu: usize, fan: usize, yakuman: bool) -> String {
    if yakuman {
        return "役満".to_string();
    }
    match calc_base_point(fu, fan, false) {
        2000 => "満貫",
        3000 => "跳満",
        4000 => "倍満",
        6000 => "三倍満",
        8000 => "数え役満",
        _ => "",
    }
    .to_string()
}

// 和了 (直撃, ツモ和了の子, ツモ和了の親)の支払いを返却
pub fn calc_points(is_dealer: bool, fu: usize, fan: usize, yakuman: bool) -> Points {
    let base = calc_base_point(fu, fan, yakuman);
    if is_dealer {
        (ceil(base * 6), ceil(base * 2), 0)
    } else {
        (ceil(base * 4), ceil(base), ceil(base * 2))
    }
}

// ロン和了の得点
#[inline]
pub fn calc_ron_score(is_dealer: bool, fu: usize, fan: usize, yakuman: bool) -> Score {
    calc_points(is_dealer, fu, fan, yakuman).0
}

#[test]
fn test_points() {
    assert_eq!(calc_ron_score(false, 30, 1, false), 1000);
    assert_eq!(calc_ron_score(true, 30, 1, false), 1500);
    assert_eq!(calc_ron_score(false, 40, 1, false), 1300);
    assert_eq!(calc_ron_score(false, 30, 4, false), 7700);
    assert_eq!(calc_ron_score(false, 40, 4, false), 8000);
    assert_eq!(calc_ron_score(false, 25, 2, false), 1600);
    assert_eq!(calc_ron_score(false, 30, 0, false), 0);

    // 親子の差は支払いの倍率 (6/4)
    let (child, dealer) = (calc_points(false, 30, 2, false), calc_points(true, 30, 2, false));
    assert_eq!((child.0, dealer.0), (2000, 2900));
}

#[test]
fn test_limit_points() {
    assert_eq!(calc_ron_score(false, 30, 6, false), 12000);
    assert_eq!(calc_ron_score(false, 30, 11, false), 24000);
    // 13翻以上, 役満は符に関わらず一定
    assert_eq!(calc_ron_score(false, 30, 13, false), 32000);
    assert_eq!(calc_ron_score(false, 110, 13, false), 32000);
    assert_eq!(calc_ron_score(false, 20, 10, true), 32000);
    assert_eq!(calc_ron_score(true, 20, 10, true), 48000);
    assert_eq!(get_score_title(30, 13, false), "数え役満");
    assert_eq!(get_score_title(20, 10, true), "役満");
    assert_eq!(get_score_title(30, 1, false), "");
}

// cargo test print_points_table -- --nocapture
#[test]
fn print_points_table() {
    let fu_list = [20, 25, 30, 40, 50, 60, 70, 80, 90, 100, 110];

    println!("点数計算表 (子) ============================================");
    for fu in fu_list {
        print!("[{fu:3}符] ");
        for fan in 1..=4 {
            let scores = calc_points(false, fu, fan, false);
            print!("{fan}飜:{:4}({:4}/{:4}) ", scores.0, scores.1, scores.2)
        }
        println!();
    }
    for fan in 5..=13 {
        let scores = calc_points(false, 30, fan, false);
        let title = get_score_title(30, fan, false);
        println!(
            "{fan:2}飜:{:5}({:4}/{:5}) {title}",
            scores.0, scores.1, scores.2
        );
    }
}
