use radview_core::render::RenderedFrame;

/// Convert an 8-bit rendered frame to an egui ColorImage.
pub fn rendered_to_color_image(rendered: &RenderedFrame) -> egui::ColorImage {
    let pixels = rendered
        .pixels
        .iter()
        .map(|&v| egui::Color32::from_gray(v))
        .collect();

    egui::ColorImage {
        size: [rendered.width, rendered.height],
        pixels,
        source_size: Default::default(),
    }
}
