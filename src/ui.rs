// ui.rs - egui control panel with Color, Light and Wave folders
use glam::Vec3;

use crate::light::TARGET_RANGE;
use crate::math::{rgb_to_u8, u8_to_rgb};
use crate::scene::{PanelChange, Scene};

pub const AMPLITUDE_RANGE: std::ops::RangeInclusive<f32> = -10.0..=10.0;
pub const WAVELENGTH_RANGE: std::ops::RangeInclusive<f32> = -50.0..=50.0;
pub const FREQUENCY_RANGE: std::ops::RangeInclusive<f32> = 0.0..=20.0;

/// Panel-side copy of the editable values; edits come back as [`PanelChange`]s
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    color: [u8; 3],
    light_target: [f32; 3],
    wave: Option<[f32; 3]>,
}

impl ControlPanel {
    pub fn new(scene: &Scene) -> Self {
        Self {
            color: rgb_to_u8(scene.color()),
            light_target: scene.light().target().to_array(),
            wave: scene
                .wave_state()
                .map(|state| [state.amplitude, state.wavelength, state.frequency]),
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Vec<PanelChange> {
        let mut changes = Vec::new();

        egui::Window::new("Controls")
            .default_open(false)
            .resizable(false)
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
            .show(ctx, |ui| {
                egui::CollapsingHeader::new("Color").show(ui, |ui| {
                    if ui.color_edit_button_srgb(&mut self.color).changed() {
                        changes.push(PanelChange::Color(u8_to_rgb(self.color)));
                    }
                });

                egui::CollapsingHeader::new("Light").show(ui, |ui| {
                    let mut moved = false;
                    for (label, value) in ["x", "y", "z"].into_iter().zip(self.light_target.iter_mut()) {
                        moved |= ui
                            .add(egui::Slider::new(value, -TARGET_RANGE..=TARGET_RANGE).text(label))
                            .changed();
                    }
                    if moved {
                        changes.push(PanelChange::LightTarget(Vec3::from_array(self.light_target)));
                    }
                });

                if let Some([amplitude, wavelength, frequency]) = &mut self.wave {
                    egui::CollapsingHeader::new("Wave").show(ui, |ui| {
                        if ui
                            .add(egui::Slider::new(amplitude, AMPLITUDE_RANGE).text("amplitude"))
                            .changed()
                        {
                            changes.push(PanelChange::Amplitude(*amplitude));
                        }
                        if ui
                            .add(egui::Slider::new(wavelength, WAVELENGTH_RANGE).text("wavelength"))
                            .changed()
                        {
                            changes.push(PanelChange::Wavelength(*wavelength));
                        }
                        if ui
                            .add(egui::Slider::new(frequency, FREQUENCY_RANGE).text("frequency"))
                            .changed()
                        {
                            changes.push(PanelChange::Frequency(*frequency));
                        }
                    });
                }
            });

        changes
    }
}
