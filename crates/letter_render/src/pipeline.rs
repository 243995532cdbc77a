use std::cell::{Cell, Ref, RefCell};
use std::path::PathBuf;
use std::time::Duration;

use image::{DynamicImage, GenericImageView};
use log::{debug, info, warn};

use crate::image_pipeline::loader::{self, ImageRequest, Selector, UserFile};
use crate::image_pipeline::placement::Placement;
use crate::image_pipeline::sample::{GridSampler, SampleOptions};
use crate::image_pipeline::surface::TargetSurface;
use crate::letters::cycler::LetterCycler;
use crate::letters::grid::Grid;
use crate::sink::{Sink, SinkContent};
use crate::transition::{TransitionController, Visibility, FADE_TIME};
use crate::LetterError;

pub const LOADING_MESSAGE: &str = "Preparing image";
pub const FILE_LOADING_MESSAGE: &str = "Loading file";
pub const ERROR_MESSAGE: &str = "There was a problem loading that image";

/// What happens to a run that is still in flight when a newer one starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// The older run stops at its next suspension point.
    #[default]
    Supersede,
    /// Both runs continue and interleave their sink updates.
    Concurrent,
}

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Surface size in pixels, fixed for the pipeline's lifetime.
    pub surface_width: u32,
    pub surface_height: u32,
    pub fade: Duration,
    /// Directory holding the `image-<n>.<ext>` files routes point at.
    pub images_dir: PathBuf,
    pub extension: String,
    pub sample: SampleOptions,
    pub overlap: OverlapPolicy,
    /// Source text for the letters, the built-in prose when unset.
    pub text: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            surface_width: 800,
            surface_height: 600,
            fade: FADE_TIME,
            images_dir: PathBuf::from("images"),
            extension: String::from("jpg"),
            sample: SampleOptions::default(),
            overlap: OverlapPolicy::default(),
            text: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// A new grid is on display.
    Presented,
    /// The run failed and the error message is on display.
    Failed,
    /// A newer run took over before this one finished.
    Abandoned,
}

/// Why a run stopped early.
#[derive(Debug)]
enum Halt {
    Stale,
    Failed(LetterError),
}

impl From<LetterError> for Halt {
    fn from(err: LetterError) -> Self {
        Halt::Failed(err)
    }
}

enum Source {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// Sequences loading, sampling and presentation of letter grids on a sink.
///
/// Runs borrow the pipeline immutably and never hold a borrow of its state
/// across a suspension point, so several runs may be polled at once.
pub struct Pipeline<S: Sink> {
    config: PipelineConfig,
    sink: RefCell<S>,
    transition: TransitionController,
    cycler: RefCell<LetterCycler>,
    surface: RefCell<TargetSurface>,
    sampler: GridSampler,
    generation: Cell<u64>,
}

impl<S: Sink> Pipeline<S> {
    pub fn new(config: PipelineConfig, sink: S) -> Result<Self, LetterError> {
        let sampler = GridSampler::new(config.sample)?;
        let cycler = match &config.text {
            Some(text) => LetterCycler::with_text(text.clone())?,
            None => LetterCycler::new(),
        };
        let surface = TargetSurface::new(config.surface_width, config.surface_height);

        Ok(Self {
            transition: TransitionController::new(config.fade),
            sink: RefCell::new(sink),
            cycler: RefCell::new(cycler),
            surface: RefCell::new(surface),
            sampler,
            generation: Cell::new(0),
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn sink(&self) -> Ref<'_, S> {
        self.sink.borrow()
    }

    pub fn into_sink(self) -> S {
        self.sink.into_inner()
    }

    pub fn visibility(&self) -> Visibility {
        self.transition.state()
    }

    /// Position of the last letter handed out.
    pub fn cursor(&self) -> isize {
        self.cycler.borrow().cursor()
    }

    pub async fn run(&self, request: ImageRequest) -> RunOutcome {
        match request {
            ImageRequest::Route(signal) => self.on_route_change(signal.as_deref()).await,
            ImageRequest::File(file) => self.on_file_selected(file).await,
        }
    }

    /// Show the image the routing signal selects.
    pub async fn on_route_change(&self, signal: Option<&str>) -> RunOutcome {
        let token = self.begin();
        let selector = Selector::from_route(signal);
        let path = selector.image_path(&self.config.images_dir, &self.config.extension);
        debug!("run {token}: route {:?} selects {}", signal, path.display());

        let result = self.present(token, Source::Path(path)).await;
        self.finish(token, result).await
    }

    /// Show an image supplied through the file picker.
    pub async fn on_file_selected(&self, file: Option<UserFile>) -> RunOutcome {
        let token = self.begin();
        let result = self.load_file(token, file).await;
        self.finish(token, result).await
    }

    async fn load_file(&self, token: u64, file: Option<UserFile>) -> Result<(), Halt> {
        self.loading(token, FILE_LOADING_MESSAGE).await?;
        let file = file.ok_or(LetterError::NoFileProvided)?;

        let bytes = loader::read_user_file(file).await;
        self.checkpoint(token)?;

        self.present(token, Source::Bytes(bytes?)).await
    }

    async fn present(&self, token: u64, source: Source) -> Result<(), Halt> {
        self.loading(token, LOADING_MESSAGE).await?;

        let bytes = match source {
            Source::Path(path) => {
                let bytes = loader::read_bytes(&path).await;
                self.checkpoint(token)?;
                bytes?
            },
            Source::Bytes(bytes) => bytes,
        };

        let image = loader::decode(&bytes).await;
        self.checkpoint(token)?;
        let grid = self.build_grid(&image?)?;

        self.clear(token).await?;
        info!("run {token}: presenting {}x{} letter grid", grid.columns, grid.rows);
        self.sink.borrow_mut().show(SinkContent::Grid(&grid));
        self.fade_in(token).await
    }

    fn build_grid(&self, image: &DynamicImage) -> Result<Grid, LetterError> {
        let (width, height) = image.dimensions();
        let mut surface = self.surface.borrow_mut();
        let placement = Placement::cover(width, height, surface.width(), surface.height())
            .ok_or(LetterError::InvalidPlacement)?;
        debug!("placing {}x{} image at {:?}", width, height, placement);

        surface.draw(image, placement);
        Ok(self.sampler.sample(&surface, &mut self.cycler.borrow_mut()))
    }

    async fn finish(&self, token: u64, result: Result<(), Halt>) -> RunOutcome {
        let err = match result {
            Ok(()) => return RunOutcome::Presented,
            Err(Halt::Stale) => {
                debug!("run {token}: superseded");
                return RunOutcome::Abandoned;
            },
            Err(Halt::Failed(err)) => err,
        };

        warn!("run {token}: {err}");
        match self.show_error(token).await {
            Ok(()) => RunOutcome::Failed,
            Err(_) => RunOutcome::Abandoned,
        }
    }

    async fn show_error(&self, token: u64) -> Result<(), Halt> {
        self.clear(token).await?;
        self.sink.borrow_mut().show(SinkContent::Error(ERROR_MESSAGE));
        self.fade_in(token).await
    }

    async fn loading(&self, token: u64, message: &str) -> Result<(), Halt> {
        self.clear(token).await?;
        self.sink.borrow_mut().show(SinkContent::Loading(message));
        self.fade_in(token).await
    }

    async fn clear(&self, token: u64) -> Result<(), Halt> {
        self.transition.fade_out(&self.sink).await;
        self.checkpoint(token)?;
        self.sink.borrow_mut().clear();
        Ok(())
    }

    async fn fade_in(&self, token: u64) -> Result<(), Halt> {
        self.transition.fade_in(&self.sink).await;
        self.checkpoint(token)
    }

    fn begin(&self) -> u64 {
        let token = self.generation.get() + 1;
        self.generation.set(token);
        token
    }

    fn checkpoint(&self, token: u64) -> Result<(), Halt> {
        match self.config.overlap {
            OverlapPolicy::Supersede if self.generation.get() != token => Err(Halt::Stale),
            _ => Ok(()),
        }
    }
}
