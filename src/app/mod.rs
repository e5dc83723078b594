//! Application state for odontogram.

mod actions;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::chart::{Chart, ToothId};
use crate::config::Config;
use crate::record::ChartRecord;
use crate::ui::modal::AnnotationModalState;
use crate::ui::toast::ToastManager;
use crate::ui::ToothCell;

/// Modal dialog state
pub enum ModalState {
    /// No modal is open
    None,
    /// Summary input for a bulk annotation or a single tooth
    Annotation(Box<AnnotationModalState>),
}

/// Application state
pub struct App {
    /// The mounted chart
    pub chart: Chart,
    /// Application configuration
    pub config: Config,
    /// Last record written to (or loaded from) disk
    record: ChartRecord,
    /// Where the record is persisted
    record_path: PathBuf,
    /// Chart revision the record on disk reflects
    saved_revision: u64,
    /// Current modal state
    pub modal_state: ModalState,
    /// Toast notification manager
    pub toast_manager: ToastManager,
    /// Tooth hit regions from the last render, used for mouse mapping
    pub tooth_cells: Vec<ToothCell>,
    /// Whether the help menu overlay is open (toggled by '?')
    pub help_menu_open: bool,
    /// Should quit
    pub should_quit: bool,
}

impl App {
    /// Load the record at `record_path` and mount a chart for it
    pub fn new(config: Config, record_path: PathBuf) -> Result<Self> {
        let record = ChartRecord::load(&record_path).context("Failed to load chart record")?;

        let mut chart = Chart::from_snapshot(record.snapshot(), config.read_only);
        chart.on_selection_change(Box::new(|selection: &[ToothId]| {
            log::debug!("selection changed: {selection:?}");
        }));
        log::info!(
            "chart mounted from {} with {} selected teeth (read_only={})",
            record_path.display(),
            chart.selection().len(),
            config.read_only
        );

        let saved_revision = chart.revision();
        Ok(Self {
            chart,
            config,
            record,
            record_path,
            saved_revision,
            modal_state: ModalState::None,
            toast_manager: ToastManager::new(),
            tooth_cells: Vec::new(),
            help_menu_open: false,
            should_quit: false,
        })
    }

    pub fn record_path(&self) -> &Path {
        &self.record_path
    }

    /// Whether the chart has changes not yet written to disk
    pub fn is_dirty(&self) -> bool {
        self.chart.revision() != self.saved_revision
    }

    /// Write the record when the chart changed since the last save.
    /// Returns true when a save happened.
    pub fn persist_if_changed(&mut self) -> Result<bool> {
        if !self.is_dirty() {
            return Ok(false);
        }
        self.record.update(self.chart.snapshot());
        self.record.save(&self.record_path)?;
        self.saved_revision = self.chart.revision();
        log::debug!("chart record saved to {}", self.record_path.display());
        Ok(true)
    }
}
