use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl Variant {
    pub fn as_int(&self) -> Option<i64> {
        if let &Self::Int(v) = self {
            return Some(v);
        }
        None
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            &Self::Float(v) => Some(v),
            &Self::Int(v) => Some(v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let &Self::Bool(v) = self {
            return Some(v);
        }
        None
    }

    pub fn as_string(&self) -> Option<String> {
        if let Self::String(v) = self {
            return Some(v.clone());
        }
        None
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Arg {
    pub name: String,
    pub value: Variant,
}

impl Arg {
    pub fn int(name: &str, value: i64) -> Self {
        Self {
            name: name.to_string(),
            value: Variant::Int(value),
        }
    }

    pub fn float(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value: Variant::Float(value),
        }
    }

    pub fn bool(name: &str, value: bool) -> Self {
        Self {
            name: name.to_string(),
            value: Variant::Bool(value),
        }
    }

    pub fn string(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: Variant::String(value.to_string()),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

// targetと同じ型としてvalueをパース
pub fn parse_as(target: &Variant, value: &str) -> Result<Variant, String> {
    Ok(match target {
        Variant::Int(_) => Variant::Int(value.parse::<i64>().map_err(|e| e.to_string())?),
        Variant::Float(_) => Variant::Float(value.parse::<f64>().map_err(|e| e.to_string())?),
        Variant::Bool(_) => Variant::Bool(value.parse::<bool>().map_err(|e| e.to_string())?),
        Variant::String(_) => Variant::String(value.to_string()),
    })
}

// "name=value,name=value" 形式の引数を既定の引数リストに適用
pub fn apply_args(args: &mut [Arg], exp: &str) -> Result<(), String> {
    for a in exp.split(',') {
        let a = a.trim();
        if a.is_empty() {
            continue;
        }
        let (name, value) = a
            .split_once('=')
            .ok_or_else(|| format!("expected name=value: {}", a))?;
        let arg = args
            .iter_mut()
            .find(|arg| arg.name == name.trim())
            .ok_or_else(|| format!("unknown argument: {}", name))?;
        arg.value = parse_as(&arg.value, value.trim()).map_err(|e| format!("{}: {}", e, a))?;
    }
    Ok(())
}

#[test]
fn test_apply_args() {
    let mut args = vec![Arg::float("w_eff", 40.0), Arg::int("threshold", 5)];
    apply_args(&mut args, "w_eff=20.5, threshold=4").unwrap();
    assert_eq!(args[0].value, Variant::Float(20.5));
    assert_eq!(args[1].value.as_int(), Some(4));
    assert_eq!(args[0].to_string(), "w_eff=20.5");

    assert!(apply_args(&mut args, "unknown=1").is_err());
    assert!(apply_args(&mut args, "threshold=x").is_err());
    assert!(apply_args(&mut args, "threshold").is_err());
}
