// 麻雀のデータモデル
mod define;
mod error;
mod meld;
mod strategy;
mod tile;
mod turn_state;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use define::*;
pub use error::*;
pub use meld::*;
pub use strategy::*;
pub use tile::*;
pub use turn_state::*;
