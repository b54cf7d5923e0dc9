use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    #[error("Vocabulary too small: need {required} words, have {available}")]
    VocabularyTooSmall { required: usize, available: usize },
    #[error("Cannot run a game without players")]
    EmptyRoster,
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },
    #[error("Invalid color: {value}")]
    InvalidColor { value: String },
}
