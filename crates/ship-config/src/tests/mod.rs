mod api_config;
mod identity_provider;
mod logging;

use std::env;

use tempfile::TempDir;

/// Isolated config directory plus environment overrides, undone on drop.
///
/// Tests using this must be `#[serial]`: the process environment is shared.
pub(crate) struct TestEnv {
    dir: TempDir,
    saved: Vec<(&'static str, Option<String>)>,
}

impl TestEnv {
    /// Fresh temp dir exported as `XENSHIP_CONFIG_DIR`.
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut test_env = Self {
            saved: Vec::new(),
            dir,
        };
        let path = test_env.dir.path().to_string_lossy().into_owned();
        test_env.set(crate::CONFIG_DIR_ENV, &path);
        test_env
    }

    pub(crate) fn set(&mut self, key: &'static str, value: &str) {
        self.saved.push((key, env::var(key).ok()));
        // SAFETY: serial tests; no other thread reads the environment meanwhile.
        unsafe { env::set_var(key, value) };
    }

    pub(crate) fn write_config(&self, toml: &str) {
        std::fs::write(self.dir.path().join(crate::CONFIG_FILENAME), toml).unwrap();
    }
}

impl Drop for TestEnv {
    fn drop(&mut self) {
        // Restore in reverse so repeated keys end at their first saved value.
        for (key, original) in self.saved.drain(..).rev() {
            // SAFETY: see `set`.
            unsafe {
                match original {
                    Some(value) => env::set_var(key, value),
                    None => env::remove_var(key),
                }
            }
        }
    }
}
