//! View state machine: Loading, Error, or Ready with a selected year

use crate::chart::{build_chart, ChartSpec};
use crate::dataset::Dataset;
use crate::error::ClientResult;

/// State of one view
#[derive(Debug, Clone)]
pub enum ViewState {
    /// Waiting for the one-time fetch
    Loading,
    /// Fetch failed or returned nothing
    Error { message: String },
    /// Data loaded; a year is selected
    Ready(ReadyState),
}

impl ViewState {
    /// Apply the fetch outcome. Only a `Loading` view changes.
    pub fn on_loaded(&mut self, result: ClientResult<Dataset>) {
        if !matches!(self, ViewState::Loading) {
            log::warn!("Ignoring fetch result: view already loaded");
            return;
        }

        *self = match result {
            Ok(dataset) => ViewState::Ready(ReadyState::new(dataset)),
            Err(e) => {
                log::error!("There was an error fetching the data: {e}");
                ViewState::Error {
                    message: e.to_string(),
                }
            }
        };
    }

    pub fn ready(&self) -> Option<&ReadyState> {
        match self {
            ViewState::Ready(ready) => Some(ready),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut ReadyState> {
        match self {
            ViewState::Ready(ready) => Some(ready),
            _ => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.ready().is_some_and(ReadyState::is_playing)
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.ready().map(ReadyState::selected_year)
    }
}

/// Loaded view: the dataset, the selected year, and the play flag.
///
/// `selected_year` is always one of `dataset.years()`.
#[derive(Debug, Clone)]
pub struct ReadyState {
    dataset: Dataset,
    selected_year: i32,
    is_playing: bool,
}

impl ReadyState {
    /// Start at the earliest year, paused
    pub fn new(dataset: Dataset) -> Self {
        let selected_year = dataset.earliest_year();
        Self {
            dataset,
            selected_year,
            is_playing: false,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selected_year(&self) -> i32 {
        self.selected_year
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    /// Flip the play flag, returning the new value
    pub fn toggle_play(&mut self) -> bool {
        self.is_playing = !self.is_playing;
        self.is_playing
    }

    /// Select a year directly; years absent from the dataset are rejected
    pub fn select_year(&mut self, year: i32) -> bool {
        if !self.dataset.contains_year(year) {
            log::warn!("Year {year} is not in the dataset");
            return false;
        }
        self.selected_year = year;
        true
    }

    /// Move to the next year, wrapping to the first, and return it
    pub fn advance(&mut self) -> i32 {
        self.selected_year = self.dataset.next_year(self.selected_year);
        self.selected_year
    }

    /// Chart specification for the selected year
    pub fn chart(&self) -> ChartSpec {
        build_chart(&self.dataset, self.selected_year)
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
