//! Example: Render a single backdrop frame headlessly and save a PNG.
//!
//! Run with:
//!     cargo run --example snapshot [output.png]

use carbon_backdrop::{BackdropConfig, OffscreenBackdrop};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "backdrop.png".to_string());

    let config = BackdropConfig {
        alpha_particles: true,
        ..Default::default()
    };

    println!("Carbon Backdrop - Snapshot Example");
    println!("  Rendering 1280x720 frame to {}", output);

    let mut backdrop = pollster::block_on(OffscreenBackdrop::new(config, 1280, 720))?;
    println!("  Adapter: {}", backdrop.adapter_info().name);

    // Advance a few seconds in so the field has drifted off its seed pose.
    backdrop.renderer_mut().advance(4000.0);
    backdrop.save_png(&output)?;

    println!("  Wrote {}", output);
    Ok(())
}
