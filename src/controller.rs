//! View controller: keeps the scatter panel in sync with the map selection.
//!
//! Two states, `Unfiltered` (initial) and `Filtered`. Every selection event
//! is handled to completion before the next one; the newest render replaces
//! the displayed chart.

use crate::figure::{ChartSpec, FigureComposer};
use crate::models::{Selection, SelectionEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Unfiltered,
    Filtered(Selection),
}

impl ViewState {
    pub fn selection(&self) -> Selection {
        match self {
            ViewState::Unfiltered => Selection::all(),
            ViewState::Filtered(s) => s.clone(),
        }
    }
}

#[derive(Debug)]
pub struct ViewController {
    composer: FigureComposer,
    state: ViewState,
    displayed: ChartSpec,
}

impl ViewController {
    /// Start `Unfiltered`, showing every record.
    pub fn new(composer: FigureComposer) -> Self {
        let displayed = composer.compose(&Selection::all());
        Self {
            composer,
            state: ViewState::Unfiltered,
            displayed,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The scatter chart currently on display.
    pub fn displayed(&self) -> &ChartSpec {
        &self.displayed
    }

    /// React to one map selection event. `None` and an empty point list both
    /// clear the filter; unusable point identifiers are dropped first.
    pub fn on_selection(&mut self, event: Option<&SelectionEvent>) -> &ChartSpec {
        let len = self.composer.dataset().len();
        let (selection, dropped) = Selection::from_event(event, len);
        if dropped > 0 {
            log::warn!("ignored {} invalid point identifier(s) in selection", dropped);
        }

        let next = if selection.is_empty() {
            ViewState::Unfiltered
        } else {
            ViewState::Filtered(selection)
        };
        log::debug!("view transition {:?} -> {:?}", self.state, next);

        self.displayed = self.composer.compose(&next.selection());
        self.state = next;
        &self.displayed
    }

    /// Register this controller as the handler of `source`'s events.
    pub fn attach(mut self, source: &mut SelectionSource) {
        source.subscribe(move |event| self.on_selection(event).clone());
    }
}

type Handler = Box<dyn FnMut(Option<&SelectionEvent>) -> ChartSpec>;

/// Selection-event source of the map panel. Holds at most one handler; the
/// display boundary re-renders whatever the handler returns.
#[derive(Default)]
pub struct SelectionSource {
    handler: Option<Handler>,
}

impl SelectionSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `handler`, replacing any previous one.
    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(Option<&SelectionEvent>) -> ChartSpec + 'static,
    {
        self.handler = Some(Box::new(handler));
    }

    pub fn is_subscribed(&self) -> bool {
        self.handler.is_some()
    }

    /// Deliver one event. Returns the chart to display, or `None` when
    /// nothing is subscribed.
    pub fn emit(&mut self, event: Option<&SelectionEvent>) -> Option<ChartSpec> {
        self.handler.as_mut().map(|h| h(event))
    }
}

impl std::fmt::Debug for SelectionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionSource")
            .field("subscribed", &self.is_subscribed())
            .finish()
    }
}
