//! Display logic for standup pages.

pub mod clock;
pub mod standup_presenter;

pub use clock::{Clock, FixedClock, SystemClock};
pub use standup_presenter::{StandupPresenter, StandupRecord};
