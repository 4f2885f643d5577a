/// Image decoding.
pub mod decode;
/// Font loading.
pub mod font;
