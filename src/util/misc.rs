use std::fmt;

pub type Res<T = ()> = Result<T, Box<dyn std::error::Error>>;

// コマンドラインオプションの値を取得
pub fn next_value<T>(it: &mut std::slice::Iter<'_, String>, opt: &str) -> Res<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let n = it.next().ok_or_else(|| format!("{}: value missing", opt))?;
    let v = n
        .parse()
        .map_err(|e| format!("{}: {} '{}'", opt, e, n))?;
    Ok(v)
}

pub fn vec_count<T: PartialEq>(v: &[T], e: &T) -> usize {
    v.iter().filter(|&n| n == e).count()
}

// 各リストから1つずつ選んだ組み合わせ(直積)をすべて返却
// いずれかのリストが空の場合は空のリストを返却
pub fn cartesian_product<T>(vv: &[Vec<T>]) -> Vec<Vec<&T>> {
    if vv.is_empty() || vv.iter().any(|l| l.is_empty()) {
        return vec![];
    }

    let lens: Vec<usize> = vv.iter().map(|l| l.len()).collect();
    let mut idxs = vec![0; vv.len()];
    let mut i = idxs.len() - 1;
    let mut res = vec![];
    loop {
        let mut v = vec![];
        for (i1, &i2) in idxs.iter().enumerate() {
            v.push(&vv[i1][i2]);
        }
        res.push(v);

        // increment idxs
        loop {
            if idxs[i] < lens[i] - 1 {
                idxs[i] += 1;
                i = idxs.len() - 1;
                break;
            } else {
                idxs[i] = 0;
                if i == 0 {
                    return res;
                }
            }
            i -= 1;
        }
    }
}

#[test]
fn test_cartesian_product() {
    let vv = vec![vec![1, 2], vec![3], vec![4, 5]];
    let res = cartesian_product(&vv);
    assert_eq!(res.len(), 4);
    assert_eq!(res[0], vec![&1, &3, &4]);
    assert_eq!(res[3], vec![&2, &3, &5]);

    let empty: Vec<Vec<usize>> = vec![vec![1], vec![]];
    assert!(cartesian_product(&empty).is_empty());
}

#[test]
fn test_next_value() {
    let args = vec!["12".to_string(), "x".to_string()];
    let mut it = args.iter();
    assert_eq!(next_value::<usize>(&mut it, "-n").unwrap(), 12);
    assert!(next_value::<usize>(&mut it, "-n").is_err());
    assert!(next_value::<usize>(&mut it, "-n").is_err());
}
