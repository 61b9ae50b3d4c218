pub mod gray;
pub mod io;
pub mod pgm;
pub mod traits;
pub mod view;

pub use self::gray::{GrayImage, PIX_MAX};
pub use self::io::{load, save};
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::view::GrayView;
