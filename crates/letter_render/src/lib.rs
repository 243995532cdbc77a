mod image_pipeline;
mod letters;
mod pipeline;
mod sink;
mod transition;

use std::path::PathBuf;

pub use image_pipeline::{
    loader::{ImageRequest, Selector, UserFile},
    placement::Placement,
    sample::{AlphaMode, ColorMode, GridSampler, SampleOptions},
    surface::TargetSurface,
};
pub use letters::{
    cycler::{LetterCycler, PROSE},
    grid::{Grid, GridCell, COLUMNS, ROWS},
};
pub use pipeline::{
    OverlapPolicy, Pipeline, PipelineConfig, RunOutcome, ERROR_MESSAGE, FILE_LOADING_MESSAGE,
    LOADING_MESSAGE,
};
pub use sink::{MemorySink, Sink, SinkContent, SinkEvent};
pub use transition::{TransitionController, Visibility, FADE_TIME};

#[derive(Debug, thiserror::Error)]
pub enum LetterError {
    #[error("invalid image selector {0:?}")]
    SelectorInvalid(String),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no file provided")]
    NoFileProvided,
    #[error("image or surface has zero size")]
    InvalidPlacement,
    #[error("conflicting sample options: {0}")]
    ConflictingOptions(&'static str),
    #[error("letter source text is empty")]
    EmptySourceText,
}
