//! Pricing module
//!
//! Converts raw usage into charged cost before it reaches a meter:
//! - PricingSchedule: category-keyed logarithmic transform
//! - PricedGasMeter: meter wrapper applying the schedule

pub mod priced;
pub mod schedule;

pub use priced::PricedGasMeter;
pub use schedule::PricingSchedule;
