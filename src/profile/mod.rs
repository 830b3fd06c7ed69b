pub mod merge;
pub mod shapes;

pub use merge::merge;
pub use shapes::{CompanyProfile, StudentProfile};
