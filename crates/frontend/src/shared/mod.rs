pub mod clipboard;
pub mod icons;
pub mod markdown;
pub mod settings;
