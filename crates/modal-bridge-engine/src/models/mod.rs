pub mod caret;
pub mod line_information;
pub mod mark;
pub mod search;
pub mod selection;
pub mod viewport;

pub use caret::*;
pub use line_information::*;
pub use mark::*;
pub use search::*;
pub use selection::*;
pub use viewport::*;
