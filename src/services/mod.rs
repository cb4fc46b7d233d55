pub mod translate;

pub use translate::{TranslateOptions, translate, translate_for, translate_with};
