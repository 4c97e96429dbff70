//! Example: Run the animated particle backdrop in a window.
//!
//! Run with:
//!     cargo run --example backdrop_window [config.json]
//!
//! Without an argument this uses the stock page configuration; a JSON
//! file can override any subset of the fields.

use carbon_backdrop::{BackdropApp, BackdropConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            println!("Loading backdrop config from {}", path);
            BackdropConfig::from_json_file(path)?
        }
        None => BackdropConfig {
            particle_count: 210,
            particle_spread: 10.0,
            speed: 0.7,
            particle_colors: vec![
                "#5a222286".to_string(),
                "#51928dff".to_string(),
                "#236b48ff".to_string(),
            ],
            move_particles_on_hover: true,
            particle_hover_factor: 3.0,
            alpha_particles: false,
            particle_base_size: 130.0,
            size_randomness: 0.7,
            camera_distance: 35.0,
            disable_rotation: false,
        },
    };

    println!("Carbon Backdrop - Windowed Demo");
    println!("  Particles: {}", config.particle_count);
    println!("  Speed: {}", config.speed);
    println!("  Move the pointer to push the field around; Esc quits.");

    BackdropApp::run(config)?;
    Ok(())
}
