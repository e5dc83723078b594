//! Terminal UI components: chart, detail panel, modal, toasts and help.

pub mod chart_view;
pub mod detail_panel;
pub mod help_menu;
pub mod layout;
pub mod modal;
pub mod toast;

pub use chart_view::{layout_chart, tooth_at, OdontogramWidget, ToothCell};
pub use detail_panel::DetailPanel;
pub use help_menu::HelpMenuWidget;
pub use toast::{Toast, ToastManager, ToastType};
