#[cfg(target_arch = "wasm32")]
fn main() {
    use peopleos_frontend::{config, App};

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Starting PeopleOS frontend");

    wasm_bindgen_futures::spawn_local(async move {
        config::init().await;
        log::info!("Runtime config initialized");
        leptos::mount_to_body(App);
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("peopleos-frontend targets wasm32; build it with trunk for the browser.");
}
