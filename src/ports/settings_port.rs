//! Run settings access port trait.

pub trait SettingsPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}
