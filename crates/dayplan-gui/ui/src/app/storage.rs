use anyhow::anyhow;
use dayplan_core::KeyValueStorage;

/// `window.localStorage`, when the browser exposes it.
#[derive(Debug, Clone)]
pub struct BrowserStorage {
  storage: web_sys::Storage
}

impl BrowserStorage {
  pub fn detect() -> Option<Self> {
    let storage = web_sys::window()
      .and_then(|window| {
        window
          .local_storage()
          .ok()
          .flatten()
      });

    if storage.is_none() {
      tracing::warn!(
        "local storage unavailable; \
         tasks will not survive a \
         reload"
      );
    }

    storage.map(|storage| Self {
      storage
    })
  }
}

impl KeyValueStorage for BrowserStorage {
  fn read(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    self
      .storage
      .get_item(key)
      .map_err(|error| {
        anyhow!(
          "local storage read of {key} \
           failed: {error:?}"
        )
      })
  }

  fn write(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    self
      .storage
      .set_item(key, value)
      .map_err(|error| {
        anyhow!(
          "local storage write of {key} \
           failed: {error:?}"
        )
      })
  }
}
