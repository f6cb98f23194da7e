pub mod card;
pub mod legality;
pub mod price;
pub mod set;
pub mod sync;

pub use card::*;
pub use legality::{Legalities, UNKNOWN_STATUS};
pub use price::*;
pub use set::*;
pub use sync::*;
