//! Holdings store port trait.

use crate::domain::error::TickermapError;
use crate::domain::holding::Holding;

/// Durable storage for the portfolio. `save` replaces the whole set;
/// callers load, edit and save back.
pub trait HoldingsPort {
    fn load(&self) -> Result<Vec<Holding>, TickermapError>;

    fn save(&self, holdings: &[Holding]) -> Result<(), TickermapError>;
}
