use crate::letters::grid::Grid;

/// Content the pipeline asks the sink to display.
#[derive(Clone, Copy, Debug)]
pub enum SinkContent<'a> {
    Loading(&'a str),
    Error(&'a str),
    Grid(&'a Grid),
}

/// Renderer the pipeline drives. Implementations paint; the pipeline decides
/// what is shown and when it fades.
pub trait Sink {
    /// Start fading the sink in or out.
    fn set_visible(&mut self, visible: bool);

    /// Drop whatever is currently displayed.
    fn clear(&mut self);

    fn show(&mut self, content: SinkContent<'_>);
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn set_visible(&mut self, visible: bool) {
        (**self).set_visible(visible)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn show(&mut self, content: SinkContent<'_>) {
        (**self).show(content)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SinkEvent {
    Visible(bool),
    Clear,
    Loading(String),
    Error(String),
    /// A grid was shown; carries its letters row by row.
    Grid(Vec<String>),
}

/// Sink that records every request, for embedding and tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub events: Vec<SinkEvent>,
    pub visible: bool,
    pub content: Option<SinkEvent>,
    pub last_grid: Option<Grid>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grids_shown(&self) -> usize {
        self.events.iter().filter(|event| matches!(event, SinkEvent::Grid(_))).count()
    }
}

impl Sink for MemorySink {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.events.push(SinkEvent::Visible(visible));
    }

    fn clear(&mut self) {
        self.content = None;
        self.events.push(SinkEvent::Clear);
    }

    fn show(&mut self, content: SinkContent<'_>) {
        let event = match content {
            SinkContent::Loading(message) => SinkEvent::Loading(message.to_owned()),
            SinkContent::Error(message) => SinkEvent::Error(message.to_owned()),
            SinkContent::Grid(grid) => {
                self.last_grid = Some(grid.clone());
                SinkEvent::Grid(grid.rows().collect())
            },
        };
        self.content = Some(event.clone());
        self.events.push(event);
    }
}
