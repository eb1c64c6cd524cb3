mod app;
mod components;

const MOUNT_ID: &str = "app";

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  let Some(root) = web_sys::window()
    .and_then(|window| window.document())
    .and_then(|document| {
      document.get_element_by_id(MOUNT_ID)
    })
  else {
    tracing::error!(
      mount = MOUNT_ID,
      "planner mount element missing; \
       nothing rendered"
    );
    return;
  };

  tracing::info!(
    version = env!("CARGO_PKG_VERSION"),
    "mounting day planner"
  );
  yew::Renderer::<app::App>::with_root(root)
    .render();
}
