pub mod card;
pub mod draft;
pub mod image;
pub mod page;
pub mod side;

pub use card::*;
pub use draft::*;
pub use image::*;
pub use page::*;
pub use side::*;
