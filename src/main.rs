#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    ring_flight::start()
}

// The browser build enters through `ring_flight::mount`
#[cfg(target_arch = "wasm32")]
fn main() {}
