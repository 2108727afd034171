//! The review session: its states, the collaborators it drives, and the view
//! it derives for the presentation surface.

pub mod collaborators;
pub mod controller;
pub mod state;
mod tooltips;
pub mod view;

pub use collaborators::{CardStore, PresentationSurface, Scheduler};
pub use controller::ReviewSessionController;
pub use state::SessionState;
pub use view::{GradeButton, ShowButton, ViewState};
