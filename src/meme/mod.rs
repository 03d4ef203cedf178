//! Meme source client: listing, random selection and image loading.

mod client;
mod error;
mod loader;
mod model;
mod picker;

pub use client::{fetch_random_meme, ImgflipClient, MemeSource};
pub use error::{FetchError, ImageLoadError};
pub use loader::ImageLoader;
pub use model::{Meme, MemeListData, MemeListResponse};
pub use picker::{IndexPicker, UniformPicker};
