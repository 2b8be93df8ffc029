#![cfg(target_arch = "wasm32")]

use dyeflow_engine::FluidSimulation;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn facade_ticks_and_exposes_frame() {
    dyeflow_engine::init();
    let mut sim = FluidSimulation::new(64, 64, r#"{"sim_resolution": 16, "dye_resolution": 32}"#).unwrap();
    sim.splat(32.0, 32.0, 1.0, 0.5, 0.0, 1.0);
    sim.tick(0.0);

    assert_eq!(sim.frame(), 1);
    assert_eq!(sim.frame_len(), (sim.frame_width() * sim.frame_height()) as usize);
    assert_eq!(sim.sample_velocity(0.5, 0.5).len(), 2);
    assert!(sim.set_config("{\"curl\": -1}").is_err());
}
