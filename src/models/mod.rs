pub mod card;
pub mod grade;
pub mod interval;
pub mod review_data;
pub mod sm2;

pub use card::{Card, DEFAULT_CATEGORY};
pub use grade::{Grade, Phase};
pub use interval::Interval;
pub use review_data::ReviewData;
